//! Address text codec.
//!
//! Converts address strings to ordered integer groups and back. Parsing is
//! lenient: a token that does not parse becomes `0` and the group count is
//! never checked. [`Address::parse_strict`] is the checked counterpart.

use std::fmt;

use super::family::Family;

/// Errors reported by strict address parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("{family} address must have {expected} groups, found {found}")]
    GroupCount {
        family: Family,
        expected: usize,
        found: usize,
    },

    #[error("invalid {family} group '{token}' at index {index}")]
    InvalidGroup {
        family: Family,
        index: usize,
        token: String,
    },

    #[error("{family} group {value} at index {index} is outside [0, {width})")]
    OutOfRange {
        family: Family,
        index: usize,
        value: i64,
        width: i64,
    },
}

/// An address as an ordered sequence of groups, most significant first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub family: Family,
    pub groups: Vec<i64>,
}

impl Address {
    /// Parse leniently; unparseable groups become `0`
    pub fn parse(text: &str) -> Address {
        let family = Family::sniff(text);
        Address {
            family,
            groups: to_int(family.radix(), &family.split(text)),
        }
    }

    /// Parse, rejecting bad tokens, out-of-range groups and wrong group counts
    pub fn parse_strict(text: &str) -> Result<Address, CodecError> {
        let family = Family::sniff(text);
        let tokens = family.split(text);
        if tokens.len() != family.group_count() {
            return Err(CodecError::GroupCount {
                family,
                expected: family.group_count(),
                found: tokens.len(),
            });
        }

        let width = family.width();
        let mut groups = Vec::with_capacity(tokens.len());
        for (index, token) in tokens.iter().enumerate() {
            let value = family.parse_group(token).ok_or_else(|| CodecError::InvalidGroup {
                family,
                index,
                token: token.to_string(),
            })?;
            if !(0..width).contains(&value) {
                return Err(CodecError::OutOfRange { family, index, value, width });
            }
            groups.push(value);
        }

        Ok(Address { family, groups })
    }

    /// Render using the family's separator and group format
    pub fn render(&self) -> String {
        join_groups(self.family, &self.groups)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn join_groups(family: Family, groups: &[i64]) -> String {
    groups
        .iter()
        .map(|&g| family.format_group(g))
        .collect::<Vec<_>>()
        .join(&family.separator().to_string())
}

/// Split an address into its group tokens (`.` if present, else `:`)
pub fn ip_split(addr: &str) -> Vec<String> {
    let family = Family::sniff(addr);
    family.split(addr).into_iter().map(String::from).collect()
}

/// Parse an address into its group values
pub fn ip_ints(addr: &str) -> Vec<i64> {
    Address::parse(addr).groups
}

/// Render groups as a dotted decimal address
pub fn ip4_join(addr: &[i64]) -> String {
    join_groups(Family::V4, addr)
}

/// Render groups as a colon separated, zero padded hex address
pub fn ip6_join(addr: &[i64]) -> String {
    join_groups(Family::V6, addr)
}

/// Parse decimal tokens, `0` for any that fail
pub fn dec_to_int<S: AsRef<str>>(tokens: &[S]) -> Vec<i64> {
    to_int(10, tokens)
}

/// Parse hexadecimal tokens, `0` for any that fail
pub fn hex_to_int<S: AsRef<str>>(tokens: &[S]) -> Vec<i64> {
    to_int(16, tokens)
}

/// Parse tokens in the given radix, `0` for any that fail.
///
/// # Panics
/// Panics if `radix` is outside `2..=36`.
pub fn to_int<S: AsRef<str>>(radix: u32, tokens: &[S]) -> Vec<i64> {
    tokens
        .iter()
        .map(|t| i64::from_str_radix(t.as_ref(), radix).unwrap_or(0))
        .collect()
}
