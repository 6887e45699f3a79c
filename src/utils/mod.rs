//! Shared utilities: string, integer, formatting and environment helpers.

pub mod arith;
pub mod env;
pub mod format;
pub mod sequence;
pub mod strings;

pub use arith::{add, div, index, modulo, mul, step, sub};
pub use env::{command_line, current_command_line, debug, debugger, environment, pause, started};
pub use format::{from_int, FormatError, IntFormat};
pub use sequence::{KeySequencer, Sequencer};
pub use strings::{
    basename, cleanse, cleanser, initcap, join, lower, re_replace, re_trim, re_trim_left, re_trim_right, replace,
    split, substr, trim, trim_left, trim_right, upper,
};
