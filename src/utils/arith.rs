//! Integer helpers.
//!
//! Binary helpers take the piped value last, so `sub(a, b)` is `b - a`.
//! All arithmetic wraps on overflow.

/// Add each step to `a`, or 1 when no steps are given
pub fn step(a: i64, steps: &[i64]) -> i64 {
    if steps.is_empty() {
        return a.wrapping_add(1);
    }
    steps.iter().fold(a, |acc, s| acc.wrapping_add(*s))
}

pub fn add(a: i64, b: i64) -> i64 {
    b.wrapping_add(a)
}

/// Subtract `a` from `b`
pub fn sub(a: i64, b: i64) -> i64 {
    b.wrapping_sub(a)
}

pub fn mul(a: i64, b: i64) -> i64 {
    b.wrapping_mul(a)
}

/// `b` divided by `a`. Returns `0` if `a == 0`.
pub fn div(a: i64, b: i64) -> i64 {
    if a == 0 {
        return 0;
    }
    b.wrapping_div(a)
}

/// `b` modulo `a`. Returns `0` if `a == 0`.
pub fn modulo(a: i64, b: i64) -> i64 {
    if a == 0 {
        return 0;
    }
    b.wrapping_rem(a)
}

/// Element `i` of `values`, or `-1` when out of range
pub fn index(i: i64, values: &[i64]) -> i64 {
    usize::try_from(i)
        .ok()
        .and_then(|i| values.get(i).copied())
        .unwrap_or(-1)
}
