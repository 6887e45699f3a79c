//! Address family selection.
//!
//! An address string is classified once, by its separator, and the resulting
//! [`Family`] carries everything group operations need: the group width, the
//! radix used for literals and the rendering format.

use std::fmt;

/// IPv4 group width (one octet)
pub const IPV4_WIDTH: i64 = 256;
/// IPv6 group width (one hextet)
pub const IPV6_WIDTH: i64 = 65536;

/// Address family, inferred from the separator of the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// Dotted decimal, 4 groups in `[0, 256)`
    V4,
    /// Colon separated 4-digit hex, 8 groups in `[0, 65536)`
    V6,
}

impl Family {
    /// Classify an address (or expression) string.
    ///
    /// Text that splits into more than one part on `.` is IPv4; everything
    /// else, including an empty string, is treated as IPv6.
    pub fn sniff(text: &str) -> Family {
        if text.split('.').nth(1).is_some() {
            Family::V4
        } else {
            Family::V6
        }
    }

    /// Exclusive upper bound of a group value
    pub fn width(self) -> i64 {
        match self {
            Family::V4 => IPV4_WIDTH,
            Family::V6 => IPV6_WIDTH,
        }
    }

    /// Radix of group literals
    pub fn radix(self) -> u32 {
        match self {
            Family::V4 => 10,
            Family::V6 => 16,
        }
    }

    pub fn separator(self) -> char {
        match self {
            Family::V4 => '.',
            Family::V6 => ':',
        }
    }

    /// Number of groups in a well-formed address
    pub fn group_count(self) -> usize {
        match self {
            Family::V4 => 4,
            Family::V6 => 8,
        }
    }

    /// Split text on this family's separator
    pub fn split(self, text: &str) -> Vec<&str> {
        text.split(self.separator()).collect()
    }

    /// Parse one group literal, returning `None` on any failure.
    ///
    /// Accepts an optional leading sign, like the lenient parsers built on it.
    pub fn parse_group(self, token: &str) -> Option<i64> {
        i64::from_str_radix(token, self.radix()).ok()
    }

    /// Parse one group literal, defaulting to `0` on failure
    pub fn parse_group_or_zero(self, token: &str) -> i64 {
        self.parse_group(token).unwrap_or(0)
    }

    /// Render one group value. Values outside the family range are rendered as-is.
    pub fn format_group(self, value: i64) -> String {
        match self {
            Family::V4 => value.to_string(),
            Family::V6 => format!("{:04x}", value),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::V4 => write!(f, "IPv4"),
            Family::V6 => write!(f, "IPv6"),
        }
    }
}
