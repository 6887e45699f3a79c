//! IP address arithmetic.
//!
//! This module turns address strings into integer groups and back, advances
//! single groups through cyclic windows, and interprets the per-group
//! `ip_math` expression language. IPv4 and IPv6 share one implementation,
//! parameterized by [`Family`].

pub mod codec;
pub mod cyclic;
pub mod family;
pub mod math;

// Re-export commonly used types
pub use codec::{dec_to_int, hex_to_int, ip4_join, ip6_join, ip_ints, ip_split, to_int, Address, CodecError};
pub use cyclic::{cidr_next, ip4_add, ip4_inc, ip4_next, ip4_prev, ip6_add, ip6_inc, ip6_next, ip6_prev, ip_add, ip_calc};
pub use family::{Family, IPV4_WIDTH, IPV6_WIDTH};
pub use math::{ip_math, ip_math_strict, Evaluation, IpMath, MathError, Skip};
