//! Printf-style integer formats for `from_int`.
//!
//! Supported: optional literal prefix and suffix around a single directive
//! `%[0][width](d|x|X|o|b)`, e.g. `%d`, `%04x`, `host-%03d`.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("format '{0}' has no directive")]
    MissingDirective(String),

    #[error("format '{format}' has unsupported verb '{verb}'")]
    UnsupportedVerb { format: String, verb: char },

    #[error("format '{0}' has more than one directive")]
    MultipleDirectives(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntFormat {
    prefix: String,
    suffix: String,
    radix: u32,
    width: usize,
    zero_pad: bool,
    upper: bool,
}

impl IntFormat {
    pub fn format(&self, value: i64) -> String {
        let magnitude = value.unsigned_abs();
        let mut digits = match self.radix {
            2 => format!("{:b}", magnitude),
            8 => format!("{:o}", magnitude),
            16 => format!("{:x}", magnitude),
            _ => magnitude.to_string(),
        };
        if self.upper {
            digits.make_ascii_uppercase();
        }

        let sign = if value < 0 { "-" } else { "" };
        let body = if self.zero_pad {
            let pad = self.width.saturating_sub(sign.len() + digits.len());
            format!("{}{}{}", sign, "0".repeat(pad), digits)
        } else {
            format!("{:>width$}", format!("{}{}", sign, digits), width = self.width)
        };
        format!("{}{}{}", self.prefix, body, self.suffix)
    }
}

impl FromStr for IntFormat {
    type Err = FormatError;

    fn from_str(format: &str) -> Result<Self, Self::Err> {
        let (prefix, rest) = format
            .split_once('%')
            .ok_or_else(|| FormatError::MissingDirective(format.to_string()))?;

        let zero_pad = rest.starts_with('0');
        let rest = rest.trim_start_matches('0');
        let width_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let width = rest[..width_len].parse().unwrap_or(0);

        let mut tail = rest[width_len..].chars();
        let verb = tail
            .next()
            .ok_or_else(|| FormatError::MissingDirective(format.to_string()))?;
        let (radix, upper) = match verb {
            'd' => (10, false),
            'x' => (16, false),
            'X' => (16, true),
            'o' => (8, false),
            'b' => (2, false),
            _ => {
                return Err(FormatError::UnsupportedVerb {
                    format: format.to_string(),
                    verb,
                })
            }
        };

        let suffix = tail.as_str();
        if suffix.contains('%') {
            return Err(FormatError::MultipleDirectives(format.to_string()));
        }

        Ok(IntFormat {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            radix,
            width,
            zero_pad,
            upper,
        })
    }
}

/// Format every value with `format`
pub fn from_int(format: &str, values: &[i64]) -> Result<Vec<String>, FormatError> {
    let format: IntFormat = format.parse()?;
    Ok(values.iter().map(|&v| format.format(v)).collect())
}
