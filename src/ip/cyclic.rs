//! Cyclic group arithmetic.
//!
//! Every increment helper funnels into [`ip_add`], which advances one group
//! through a window `[lowest, lowest + count)` modulo the family width.

use super::codec::{ip4_join, ip6_join, ip_ints};
use super::family::{IPV4_WIDTH, IPV6_WIDTH};

/// Advance `value` by `inc` steps through the window `[lowest, lowest + count)`
/// taken modulo `width`.
///
/// A value below `lowest` is treated as lying one full turn later, which lets
/// a window such as `[250, 260)` wrap across the width boundary.
/// `count` must be non-zero.
pub fn ip_calc(width: i64, lowest: i64, count: i64, inc: i64, value: i64) -> i64 {
    let value = if value < lowest { value.wrapping_add(width) } else { value };
    let offset = value.wrapping_sub(lowest).wrapping_add(inc).rem_euclid(count);
    (lowest + offset).rem_euclid(width)
}

/// Given a zero-based, left-to-right group index, window and increment,
/// advance that group cyclically.
///
/// `lowest == 0 && count == 0` means the whole `[0, width)` range. An index
/// past the end, or an empty window with a non-zero `lowest`, leaves the
/// groups unchanged.
pub fn ip_add(width: i64, group: usize, lowest: i64, count: i64, inc: i64, mut addr: Vec<i64>) -> Vec<i64> {
    let Some(value) = addr.get(group).copied() else {
        log::debug!("group index {} out of range for {} groups", group, addr.len());
        return addr;
    };

    addr[group] = if lowest == 0 && count == 0 {
        value.wrapping_add(inc).rem_euclid(width)
    } else if count == 0 {
        log::debug!("empty window at {} for group {}, leaving {} unchanged", lowest, group, value);
        value
    } else {
        ip_calc(width, lowest, count, inc, value)
    };
    addr
}

/// IPv4 instance of [`ip_add`]
pub fn ip4_add(group: u8, lowest: u8, count: u8, inc: i8, addr: Vec<i64>) -> Vec<i64> {
    ip_add(IPV4_WIDTH, group as usize, lowest as i64, count as i64, inc as i64, addr)
}

/// IPv6 instance of [`ip_add`]
pub fn ip6_add(group: u8, lowest: u16, count: u16, inc: i16, addr: Vec<i64>) -> Vec<i64> {
    ip_add(IPV6_WIDTH, group as usize, lowest as i64, count as i64, inc as i64, addr)
}

/// Increment an IPv4 group over the full octet range
pub fn ip4_inc(group: u8, inc: i8, addr: &str) -> String {
    ip4_join(&ip4_add(group, 0, 0, inc, ip_ints(addr)))
}

/// Step an IPv4 group forward within `[lowest, lowest + count)`
pub fn ip4_next(group: u8, lowest: u8, count: u8, addr: &str) -> String {
    ip4_join(&ip4_add(group, lowest, count, 1, ip_ints(addr)))
}

/// Step an IPv4 group backward within `[lowest, lowest + count)`
pub fn ip4_prev(group: u8, lowest: u8, count: u8, addr: &str) -> String {
    ip4_join(&ip4_add(group, lowest, count, -1, ip_ints(addr)))
}

/// Increment an IPv6 group over the full hextet range
pub fn ip6_inc(group: u8, inc: i16, addr: &str) -> String {
    ip6_join(&ip6_add(group, 0, 0, inc, ip_ints(addr)))
}

pub fn ip6_next(group: u8, lowest: u16, count: u16, addr: &str) -> String {
    ip6_join(&ip6_add(group, lowest, count, 1, ip_ints(addr)))
}

pub fn ip6_prev(group: u8, lowest: u16, count: u16, addr: &str) -> String {
    ip6_join(&ip6_add(group, lowest, count, -1, ip_ints(addr)))
}

/// Prefix-aware increment. Not implemented: returns the groups unchanged.
pub fn cidr_next(_cidr: u8, _lowest: i8, _count: i8, _inc: i8, addr: Vec<i64>) -> Vec<i64> {
    addr
}
