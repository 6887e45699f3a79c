//! Process environment helpers: variables, command line, start time.

use std::fmt::Display;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use chrono::{DateTime, Local};

static STARTED: LazyLock<DateTime<Local>> = LazyLock::new(Local::now);

/// Value of an environment variable, empty when unset or not unicode
pub fn environment(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Time of the first call in this process.
///
/// Every later call reports the same instant, so a whole template run sees a
/// consistent start time.
pub fn started() -> DateTime<Local> {
    *STARTED
}

/// Sleep for `seconds`, then report the time from `clock`.
/// Zero or negative durations return at once.
pub fn pause<F: Fn() -> DateTime<Local>>(seconds: i64, clock: F) -> DateTime<Local> {
    if seconds > 0 {
        log::debug!("pausing for {}s", seconds);
        std::thread::sleep(Duration::from_secs(seconds as u64));
    }
    clock()
}

/// Whether debug and trace logging are enabled, in that order
pub fn debugger() -> (bool, bool) {
    (log::log_enabled!(log::Level::Debug), log::log_enabled!(log::Level::Trace))
}

/// Space separated display form of all values
pub fn debug<T: Display>(values: &[T]) -> String {
    values.iter().map(ToString::to_string).collect::<Vec<_>>().join(" ")
}

/// Quote one argument so the reconstructed command line can be pasted back
/// into a shell. `key=value` arguments quote each side separately.
fn quote_arg(arg: &str) -> String {
    if !arg.contains(' ') {
        return arg.to_string();
    }
    let escape = |s: &str| s.replace('"', "\\\"");
    match arg.split_once('=') {
        Some((key, value)) => {
            let key = if key.contains(' ') { format!("\"{}\"", escape(key)) } else { key.to_string() };
            format!("{}=\"{}\"", key, escape(value))
        }
        None => format!("\"{}\"", escape(arg)),
    }
}

/// Rebuild a usable command line from `args`, program name first.
///
/// The program is reduced to its file name.
pub fn command_line<S: AsRef<str>>(args: &[S]) -> String {
    let Some((program, rest)) = args.split_first() else {
        return String::new();
    };
    let program = program.as_ref();
    let program = Path::new(program)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string());

    std::iter::once(program)
        .chain(rest.iter().map(|arg| quote_arg(arg.as_ref())))
        .collect::<Vec<_>>()
        .join(" ")
}

/// [`command_line`] for the running process
pub fn current_command_line() -> String {
    command_line(&std::env::args().collect::<Vec<_>>())
}
