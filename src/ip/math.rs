//! Per-group address arithmetic (`ip_math`).
//!
//! An expression has one token per address group, separated the same way as
//! the address. A token is either `_` (leave the group alone) or a bracketed
//! list of steps applied left to right, e.g. `_.[+2]._.[+1,%10]`.
//!
//! Each step is an optional operator (`+ - * / %`, absent means assign) and an
//! operand, which is a literal in the family's radix or `R` for a random value
//! in `[0, width)`. The running value is reduced modulo the width after every
//! step.
//!
//! Nothing here fails: steps that cannot be applied are skipped and recorded
//! as [`Skip`]s, which [`ip_math_strict`] turns into errors.

use std::fmt;

use rand::Rng;

use super::codec::{Address, CodecError};
use super::family::Family;
use crate::rng::SharedRng;

/// Step operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    /// No operator: the operand replaces the value
    Assign,
}

impl Operator {
    /// Split a step into its operator and operand text
    fn split(step: &str) -> (Operator, &str) {
        let op = match step.as_bytes().first() {
            Some(b'+') => Operator::Add,
            Some(b'-') => Operator::Sub,
            Some(b'*') => Operator::Mul,
            Some(b'/') => Operator::Div,
            Some(b'%') => Operator::Rem,
            _ => return (Operator::Assign, step),
        };
        (op, &step[1..])
    }

    fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Assign => "=",
        }
    }

    /// Apply to the running value. `None` for division or remainder by zero.
    fn apply(self, p: i64, n: i64) -> Option<i64> {
        match self {
            Operator::Add => Some(p.wrapping_add(n)),
            Operator::Sub => Some(p.wrapping_sub(n)),
            Operator::Mul => Some(p.wrapping_mul(n)),
            Operator::Div => (n != 0).then(|| p.wrapping_div(n)),
            Operator::Rem => (n != 0).then(|| p.wrapping_rem(n)),
            Operator::Assign => Some(n),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Literal(i64),
    /// `R`: uniform in `[0, width)`
    Random,
    /// Text that is neither `R` nor a literal of the family's radix
    Invalid(String),
}

impl Operand {
    fn parse(text: &str, family: Family) -> Operand {
        if text == "R" {
            return Operand::Random;
        }
        match family.parse_group(text) {
            Some(n) => Operand::Literal(n),
            None => Operand::Invalid(text.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub operator: Operator,
    pub operand: Operand,
}

/// The parsed form of one expression token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupExpr {
    /// `_`
    Passthrough,
    /// Too short or not bracketed; the group is left alone
    Ignored(String),
    Steps(Vec<Step>),
}

impl GroupExpr {
    pub fn parse(token: &str, family: Family) -> GroupExpr {
        if token == "_" {
            return GroupExpr::Passthrough;
        }
        if token.len() < 3 || !token.starts_with('[') || !token.ends_with(']') {
            return GroupExpr::Ignored(token.to_string());
        }

        let steps = token[1..token.len() - 1]
            .split(',')
            .map(|step| {
                let (operator, operand) = Operator::split(step);
                Step {
                    operator,
                    operand: Operand::parse(operand, family),
                }
            })
            .collect();
        GroupExpr::Steps(steps)
    }
}

/// A step or token that was not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    ShapeMismatch { address_groups: usize, expression_groups: usize },
    IgnoredToken { group: usize, token: String },
    InvalidOperand { group: usize, step: usize, operand: String },
    DivideByZero { group: usize, step: usize, operator: Operator },
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::ShapeMismatch { address_groups, expression_groups } => write!(
                f,
                "expression has {} groups but address has {}",
                expression_groups, address_groups
            ),
            Skip::IgnoredToken { group, token } => {
                write!(f, "group {}: token '{}' is neither '_' nor bracketed", group, token)
            }
            Skip::InvalidOperand { group, step, operand } => {
                write!(f, "group {} step {}: invalid operand '{}'", group, step, operand)
            }
            Skip::DivideByZero { group, step, operator } => {
                write!(f, "group {} step {}: '{}' by zero", group, step, operator)
            }
        }
    }
}

/// Errors reported by [`ip_math_strict`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MathError {
    #[error(transparent)]
    Address(#[from] CodecError),

    #[error("{0}")]
    Skipped(Skip),
}

/// Result text together with every step that was skipped producing it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub text: String,
    pub skipped: Vec<Skip>,
}

/// Expression interpreter over an injected random generator
#[derive(Debug, Clone)]
pub struct IpMath<R> {
    rng: R,
}

impl<R: Rng> IpMath<R> {
    pub fn new(rng: R) -> Self {
        IpMath { rng }
    }

    /// Apply `expression` to `addr`, returning the new address text
    pub fn apply(&mut self, expression: &str, addr: &str) -> String {
        self.evaluate(expression, addr).text
    }

    /// Apply `expression` to `addr`, reporting skipped steps
    pub fn evaluate(&mut self, expression: &str, addr: &str) -> Evaluation {
        let family = Family::sniff(addr);
        let mut groups: Vec<String> = family.split(addr).into_iter().map(String::from).collect();
        let tokens = family.split(expression);
        let mut skipped = Vec::new();

        if groups.len() != tokens.len() {
            let skip = Skip::ShapeMismatch {
                address_groups: groups.len(),
                expression_groups: tokens.len(),
            };
            log::debug!("ip_math '{}' on '{}': {}", expression, addr, skip);
            skipped.push(skip);
            return Evaluation { text: addr.to_string(), skipped };
        }

        for (group, token) in tokens.into_iter().enumerate() {
            let steps = match GroupExpr::parse(token, family) {
                GroupExpr::Passthrough => continue,
                GroupExpr::Ignored(token) => {
                    let skip = Skip::IgnoredToken { group, token };
                    log::debug!("ip_math '{}': {}", expression, skip);
                    skipped.push(skip);
                    continue;
                }
                GroupExpr::Steps(steps) => steps,
            };

            let start = family.parse_group_or_zero(&groups[group]);
            let p = self.run_steps(family, group, start, &steps, &mut skipped);
            // Reinterpret as unsigned before the final reduction
            let value = ((p as u64) % family.width() as u64) as i64;
            log::trace!("ip_math group {}: {} -> {}", group, start, value);
            groups[group] = family.format_group(value);
        }

        Evaluation {
            text: groups.join(&family.separator().to_string()),
            skipped,
        }
    }

    fn run_steps(&mut self, family: Family, group: usize, start: i64, steps: &[Step], skipped: &mut Vec<Skip>) -> i64 {
        let width = family.width();
        let mut p = start;

        for (step, Step { operator, operand }) in steps.iter().enumerate() {
            let n = match operand {
                Operand::Literal(n) => *n,
                Operand::Random => self.rng.gen_range(0..width),
                Operand::Invalid(text) => {
                    let skip = Skip::InvalidOperand { group, step, operand: text.clone() };
                    log::debug!("ip_math: {}", skip);
                    skipped.push(skip);
                    continue;
                }
            };

            match operator.apply(p, n) {
                Some(next) => p = next % width,
                None => {
                    let skip = Skip::DivideByZero { group, step, operator: *operator };
                    log::debug!("ip_math: {}", skip);
                    skipped.push(skip);
                }
            }
        }
        p
    }
}

/// Apply an expression using the shared random source
pub fn ip_math(expression: &str, addr: &str) -> String {
    IpMath::new(SharedRng).apply(expression, addr)
}

/// Like [`ip_math`], but the address must be well formed and every step must apply
pub fn ip_math_strict(expression: &str, addr: &str) -> Result<String, MathError> {
    Address::parse_strict(addr)?;
    let evaluation = IpMath::new(SharedRng).evaluate(expression, addr);
    match evaluation.skipped.into_iter().next() {
        Some(skip) => Err(MathError::Skipped(skip)),
        None => Ok(evaluation.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn apply(expression: &str, addr: &str) -> String {
        IpMath::new(StdRng::seed_from_u64(0)).apply(expression, addr)
    }

    #[test]
    fn test_zero_address() {
        let cases = [
            ("0.0.0.0", "_._._._"),
            ("255.0.0.0", "[-1]._._._"),
            ("0.0.0.0", "[0]._._._"),
            ("1.0.0.0", "[+1]._._._"),
            ("0.255.0.0", "_.[-1]._._"),
            ("0.1.0.0", "_.[+1]._._"),
            ("0.0.255.0", "_._.[-1]._"),
            ("0.0.1.0", "_._.[+1]._"),
            ("0.0.0.255", "_._._.[-1]"),
            ("0.0.0.0", "_._._.[0]"),
            ("0.0.0.1", "_._._.[+1]"),
        ];
        for (expect, expression) in cases {
            assert_eq!(apply(expression, "0.0.0.0"), expect, "for {}", expression);
        }
    }

    #[test]
    fn test_max_address() {
        let cases = [
            ("255.255.255.255", "_._._._"),
            ("254.255.255.255", "[-1]._._._"),
            ("0.255.255.255", "[0]._._._"),
            ("0.255.255.255", "[+1]._._._"),
            ("255.0.255.255", "_.[+1]._._"),
            ("255.255.254.255", "_._.[-1]._"),
            ("255.255.255.0", "_._._.[+1]"),
            ("7.255.255.255", "[-1,/2,%10]._._._"),
            ("5.255.255.255", "[+2,*5,%10]._._._"),
            ("255.7.255.255", "_.[-1,/2,%10]._._"),
            ("255.255.5.255", "_._.[+2,*5,%10]._"),
            ("255.255.255.7", "_._._.[-1,/2,%10]"),
        ];
        for (expect, expression) in cases {
            assert_eq!(apply(expression, "255.255.255.255"), expect, "for {}", expression);
        }
    }

    #[test]
    fn test_ipv6() {
        let max = "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff";
        assert_eq!(apply("_:_:_:_:_:_:_:_", max), max);
        assert_eq!(apply("[-1]:_:_:_:_:_:_:_", max), "fffe:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(apply("[0]:_:_:_:_:_:_:_", max), "0000:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(apply("_:_:_:_:_:_:_:[+1]", max), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:0000");
        assert_eq!(apply("_:_:[a0]:_:_:_:_:_", max), "ffff:ffff:00a0:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(apply("[-1,/2,%10]:_:_:_:_:_:_:_", max), "000f:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
        assert_eq!(apply("[-1,/2,%a]:_:_:_:_:_:_:_", max), "0007:ffff:ffff:ffff:ffff:ffff:ffff:ffff");
    }

    #[test]
    fn test_ipv6_operands_are_hex() {
        let zero = "0:0:0:0:0:0:0:0";
        assert_eq!(apply("[10]:_:_:_:_:_:_:_", zero), "0010:0:0:0:0:0:0:0");
        assert_eq!(apply("[+10,*10]:_:_:_:_:_:_:_", zero), "0100:0:0:0:0:0:0:0");
        assert_eq!(apply("[ff,/f]:_:_:_:_:_:_:_", zero), "0011:0:0:0:0:0:0:0");
        assert_eq!(apply("[ff]._._._", "0.0.0.0"), "0.0.0.0");
    }

    #[test]
    fn test_passthrough_keeps_original_text() {
        assert_eq!(apply("_._._.[+1]", "010.000.0.1"), "010.000.0.2");
        assert_eq!(apply("[+0]._._._", "010.0.0.1"), "10.0.0.1");
    }

    #[test]
    fn test_shape_mismatch() {
        assert_eq!(apply("_._._", "10.0.0.1"), "10.0.0.1");
        assert_eq!(apply("[+1]:_", "10.0.0.1"), "10.0.0.1");
        assert_eq!(apply("_._._._", "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff"), "ffff:ffff:ffff:ffff:ffff:ffff:ffff:ffff");

        let evaluation = IpMath::new(StdRng::seed_from_u64(0)).evaluate("_._", "1.2.3.4");
        assert_eq!(
            evaluation.skipped,
            vec![Skip::ShapeMismatch { address_groups: 4, expression_groups: 2 }]
        );
    }

    #[test]
    fn test_ignored_tokens() {
        assert_eq!(apply("x.[].+1.[+1", "1.2.3.4"), "1.2.3.4");
    }

    #[test]
    fn test_invalid_operand_skips_step() {
        let mut math = IpMath::new(StdRng::seed_from_u64(0));
        let evaluation = math.evaluate("[+x,+1]._._._", "1.2.3.4");
        assert_eq!(evaluation.text, "2.2.3.4");
        assert_eq!(
            evaluation.skipped,
            vec![Skip::InvalidOperand { group: 0, step: 0, operand: "x".to_string() }]
        );

        // Empty steps and operands are invalid too
        assert_eq!(apply("[,+1]._._._", "1.2.3.4"), "2.2.3.4");
        assert_eq!(apply("[+]._._._", "1.2.3.4"), "1.2.3.4");
        // Hex literals are not decimal
        assert_eq!(apply("[ff]._._._", "1.2.3.4"), "1.2.3.4");
    }

    #[test]
    fn test_divide_by_zero_skips_step() {
        let mut math = IpMath::new(StdRng::seed_from_u64(0));
        let evaluation = math.evaluate("[/0,+1]._._.[%0]", "8.0.0.9");
        assert_eq!(evaluation.text, "9.0.0.9");
        assert_eq!(
            evaluation.skipped,
            vec![
                Skip::DivideByZero { group: 0, step: 0, operator: Operator::Div },
                Skip::DivideByZero { group: 3, step: 0, operator: Operator::Rem },
            ]
        );
    }

    #[test]
    fn test_negative_intermediates() {
        // -300 % 256 == -44, reinterpreted unsigned: 2^64 - 44 ≡ 212 (mod 256)
        assert_eq!(apply("[-300]._._._", "0.0.0.0"), "212.0.0.0");
        // -1 % 7 stays -1, which renders as 255
        assert_eq!(apply("[-1,%7]._._._", "0.0.0.0"), "255.0.0.0");
        assert_eq!(apply("[-1,*-1]._._._", "0.0.0.0"), "1.0.0.0");
        // A signed literal after an operator
        assert_eq!(apply("[--1]._._._", "0.0.0.0"), "1.0.0.0");
        assert_eq!(apply("[-1]:_:_:_:_:_:_:_", "0:0:0:0:0:0:0:0"), "ffff:0:0:0:0:0:0:0");
        assert_eq!(apply("[-10000]:_:_:_:_:_:_:_", "0:0:0:0:0:0:0:0"), "0000:0:0:0:0:0:0:0");
    }

    #[test]
    fn test_random_is_reproducible_and_in_range() {
        let expression = "[R].[+R,*R,%R].[R].[R]";
        let first = IpMath::new(StdRng::seed_from_u64(42)).apply(expression, "255.255.255.255");
        let second = IpMath::new(StdRng::seed_from_u64(42)).apply(expression, "255.255.255.255");
        assert_eq!(first, second);

        let mut math = IpMath::new(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let groups = crate::ip::ip_ints(&math.apply("[R]._._._", "1.2.3.4"));
            assert!((0..256).contains(&groups[0]));
        }
    }

    #[test]
    fn test_strict() {
        assert_eq!(ip_math_strict("[+1]._._._", "1.2.3.4").unwrap(), "2.2.3.4");
        assert!(matches!(
            ip_math_strict("[+1]._._._", "1.2.3"),
            Err(MathError::Address(CodecError::GroupCount { .. }))
        ));
        assert!(matches!(
            ip_math_strict("[/0]._._._", "1.2.3.4"),
            Err(MathError::Skipped(Skip::DivideByZero { .. }))
        ));
        assert!(matches!(
            ip_math_strict("x._._._", "1.2.3.4"),
            Err(MathError::Skipped(Skip::IgnoredToken { .. }))
        ));
    }

    #[test]
    fn test_group_expr_parse() {
        assert_eq!(GroupExpr::parse("_", Family::V4), GroupExpr::Passthrough);
        assert_eq!(GroupExpr::parse("[]", Family::V4), GroupExpr::Ignored("[]".to_string()));
        assert_eq!(
            GroupExpr::parse("[+R,a]", Family::V6),
            GroupExpr::Steps(vec![
                Step { operator: Operator::Add, operand: Operand::Random },
                Step { operator: Operator::Assign, operand: Operand::Literal(10) },
            ])
        );
    }
}
