//! # Funcmap - Template helpers for IP address arithmetic
//!
//! This library provides a table of template-callable helper functions for
//! generating and mutating IPv4/IPv6 address strings, plus generic string and
//! integer utilities.
//!
//! ## Overview
//!
//! The core is an address arithmetic engine:
//!
//! - **Address codec**: `10.0.0.1` ⇄ `[10, 0, 0, 1]`, `fe80:0:...` ⇄ hextets.
//!   The family is inferred from the separator.
//! - **Cyclic increments**: advance one group through a window
//!   `[lowest, lowest + count)`, wrapping at the group width.
//! - **`ip_math`**: a per-group expression language, e.g. `_._.[+1].[R]`
//!   increments the third octet and randomizes the fourth.
//!
//! Lenient entry points never fail: malformed input degrades to a best-effort
//! result. Strict variants report what was skipped.
//!
//! ## Architecture
//!
//! - `ip`: address codec, cyclic arithmetic and the `ip_math` interpreter
//! - `funcs`: helper registry (`FuncMap`) and the built-in helpers
//! - `rng`: process-wide seedable random source
//! - `utils`: string, integer, formatting and environment helpers
//! - `config`, `config_loader`: YAML configuration for the binary
//!
//! ## Example Usage
//!
//! ```rust
//! use funcmap::funcs::{FuncMap, Value};
//! use funcmap::ip;
//!
//! assert_eq!(ip::ip4_inc(3, 1, "10.0.0.255"), "10.0.0.0");
//! assert_eq!(ip::ip_math("[-1,/2,%10]._._._", "255.255.255.255"), "7.255.255.255");
//!
//! let funcs = FuncMap::new();
//! let next = funcs.call("ip4_next", &["3".into(), "10".into(), "5".into(), "10.0.0.14".into()])?;
//! assert_eq!(next, Value::from("10.0.0.10"));
//! # Ok::<(), funcmap::funcs::CallError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library errors are `thiserror` enums (`CodecError`, `MathError`,
//! `CallError`, `ValidationError`). The binary and the configuration loader
//! use `color_eyre` for reporting with context.

pub mod config;
pub mod config_loader;
pub mod funcs;
pub mod ip;
pub mod rng;
pub mod utils;
