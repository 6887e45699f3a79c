//! String helpers exposed to templates.
//!
//! Argument order follows template pipelines: the value being operated on
//! comes last.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^[:alpha:]]").unwrap());

/// Substring by byte offsets.
///
/// Offsets are reduced modulo the length (truncating, so the sign is kept) and
/// negative offsets then count from the end. Swapped offsets are re-ordered.
/// A range that does not fall on character boundaries yields `s` unchanged.
pub fn substr(start: i64, end: i64, s: &str) -> &str {
    let len = s.len() as i64;
    if len == 0 {
        return s;
    }

    let (mut start, mut end) = (start % len, end % len);
    if start < 0 {
        start += len;
    }
    if end < 0 {
        end += len;
    }
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    s.get(start as usize..end as usize).unwrap_or(s)
}

/// Split on `sep`; an empty separator splits into characters
pub fn split(sep: &str, s: &str) -> Vec<String> {
    if sep.is_empty() {
        return s.chars().map(String::from).collect();
    }
    s.split(sep).map(String::from).collect()
}

pub fn join<S: AsRef<str>>(sep: &str, parts: &[S]) -> String {
    parts.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(sep)
}

/// Remove everything that is not an ASCII letter
pub fn cleanse(s: &str) -> String {
    NON_ALPHA.replace_all(s, "").into_owned()
}

/// Remove every match of `pattern`
pub fn cleanser(pattern: &str, s: &str) -> Result<String, regex::Error> {
    let re = Regex::new(pattern)?;
    Ok(re.replace_all(s, "").into_owned())
}

/// Final path element, with the first matching extension stripped.
///
/// Extensions may be given with or without the leading dot.
pub fn basename<S: AsRef<str>>(path: &str, extensions: &[S]) -> String {
    let base = path.rsplit('/').next().unwrap_or(path);
    for ext in extensions {
        let ext = ext.as_ref().trim_start_matches('.');
        if ext.is_empty() {
            continue;
        }
        if let Some(stem) = base.strip_suffix(ext).and_then(|b| b.strip_suffix('.')) {
            return stem.to_string();
        }
    }
    base.to_string()
}

/// Replace the first `n` occurrences of `old`, or all of them when `n < 0`
pub fn replace(s: &str, old: &str, new: &str, n: i64) -> String {
    if n < 0 {
        s.replace(old, new)
    } else {
        s.replacen(old, new, n as usize)
    }
}

/// Trim any of the characters in `cutset` from both ends
pub fn trim<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_matches(|c| cutset.contains(c))
}

pub fn trim_left<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_start_matches(|c| cutset.contains(c))
}

pub fn trim_right<'a>(s: &'a str, cutset: &str) -> &'a str {
    s.trim_end_matches(|c| cutset.contains(c))
}

/// [`replace`] with the subject last
pub fn re_replace(n: i64, old: &str, new: &str, s: &str) -> String {
    replace(s, old, new, n)
}

/// [`trim`] with the subject last
pub fn re_trim<'a>(cutset: &str, s: &'a str) -> &'a str {
    trim(s, cutset)
}

pub fn re_trim_left<'a>(cutset: &str, s: &'a str) -> &'a str {
    trim_left(s, cutset)
}

pub fn re_trim_right<'a>(cutset: &str, s: &'a str) -> &'a str {
    trim_right(s, cutset)
}

/// Upper-case the first letter of every word and lower-case the rest.
/// A word starts after any character that is not alphanumeric.
pub fn initcap(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        word_start = !c.is_alphanumeric();
    }
    out
}

pub fn lower(s: &str) -> String {
    s.to_lowercase()
}

pub fn upper(s: &str) -> String {
    s.to_uppercase()
}
