//! The built-in helper table.
//!
//! Argument order follows template pipelines: the value being transformed is
//! the last argument, e.g. `ip4_inc GROUP STEP ADDRESS`.

use std::sync::Arc;

use chrono::{DateTime, Local};

use super::{helper, Args, CallError, Clock, Helper, HelperMap, Value};
use crate::ip;
use crate::rng;
use crate::utils::{self, KeySequencer, Sequencer};

fn register(map: &mut HelperMap, name: &str, helper: Helper) {
    map.insert(name.to_string(), Some(helper));
}

/// Binary integer helper taking `(a, b)`
fn binary(f: fn(i64, i64) -> i64) -> Helper {
    helper(move |values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Int(f(args.int(0)?, args.int(1)?)))
    })
}

/// Unary string helper
fn unary(f: fn(&str) -> String) -> Helper {
    helper(move |values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Str(f(&args.string(0)?)))
    })
}

/// String helper taking `(s, cutset)`
fn trimmer(f: for<'a> fn(&'a str, &str) -> &'a str) -> Helper {
    helper(move |values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Str(f(&args.string(0)?, &args.string(1)?).to_string()))
    })
}

/// String helper taking `(cutset, s)`
fn re_trimmer(f: for<'a> fn(&str, &'a str) -> &'a str) -> Helper {
    helper(move |values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Str(f(&args.string(0)?, &args.string(1)?).to_string()))
    })
}

fn ip_helpers(map: &mut HelperMap) {
    register(map, "ip_math", helper(|values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Str(ip::ip_math(&args.string(0)?, &args.string(1)?)))
    }));

    register(map, "ip4_inc", helper(|values| {
        let args = Args::exact(values, 3)?;
        Ok(Value::Str(ip::ip4_inc(args.narrow(0)?, args.narrow(1)?, &args.string(2)?)))
    }));
    register(map, "ip4_next", helper(|values| {
        let args = Args::exact(values, 4)?;
        Ok(Value::Str(ip::ip4_next(args.narrow(0)?, args.narrow(1)?, args.narrow(2)?, &args.string(3)?)))
    }));
    register(map, "ip4_prev", helper(|values| {
        let args = Args::exact(values, 4)?;
        Ok(Value::Str(ip::ip4_prev(args.narrow(0)?, args.narrow(1)?, args.narrow(2)?, &args.string(3)?)))
    }));
    register(map, "ip4_add", helper(|values| {
        let args = Args::exact(values, 5)?;
        Ok(Value::Ints(ip::ip4_add(
            args.narrow(0)?,
            args.narrow(1)?,
            args.narrow(2)?,
            args.narrow(3)?,
            args.ints(4)?,
        )))
    }));
    register(map, "ip4_join", helper(|values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Str(ip::ip4_join(&args.ints(0)?)))
    }));

    register(map, "ip6_inc", helper(|values| {
        let args = Args::exact(values, 3)?;
        Ok(Value::Str(ip::ip6_inc(args.narrow(0)?, args.narrow(1)?, &args.string(2)?)))
    }));
    register(map, "ip6_next", helper(|values| {
        let args = Args::exact(values, 4)?;
        Ok(Value::Str(ip::ip6_next(args.narrow(0)?, args.narrow(1)?, args.narrow(2)?, &args.string(3)?)))
    }));
    register(map, "ip6_prev", helper(|values| {
        let args = Args::exact(values, 4)?;
        Ok(Value::Str(ip::ip6_prev(args.narrow(0)?, args.narrow(1)?, args.narrow(2)?, &args.string(3)?)))
    }));
    register(map, "ip6_add", helper(|values| {
        let args = Args::exact(values, 5)?;
        Ok(Value::Ints(ip::ip6_add(
            args.narrow(0)?,
            args.narrow(1)?,
            args.narrow(2)?,
            args.narrow(3)?,
            args.ints(4)?,
        )))
    }));
    register(map, "ip6_join", helper(|values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Str(ip::ip6_join(&args.ints(0)?)))
    }));

    register(map, "cidr_next", helper(|values| {
        let args = Args::exact(values, 5)?;
        Ok(Value::Ints(ip::cidr_next(
            args.narrow(0)?,
            args.narrow(1)?,
            args.narrow(2)?,
            args.narrow(3)?,
            args.ints(4)?,
        )))
    }));
    register(map, "ip_ints", helper(|values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Ints(ip::ip_ints(&args.string(0)?)))
    }));
    register(map, "ip_split", helper(|values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Strs(ip::ip_split(&args.string(0)?)))
    }));

    register(map, "to_int", helper(|values| {
        let args = Args::exact(values, 2)?;
        let radix: u32 = args.narrow(0)?;
        if !(2..=36).contains(&radix) {
            return Err(CallError::Range {
                index: 0,
                value: radix as i64,
                target: "radix 2..=36",
            });
        }
        Ok(Value::Ints(ip::to_int(radix, &args.strs(1)?)))
    }));
    register(map, "dec_to_int", helper(|values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Ints(ip::dec_to_int(&args.strs(0)?)))
    }));
    register(map, "hex_to_int", helper(|values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Ints(ip::hex_to_int(&args.strs(0)?)))
    }));
    register(map, "from_int", helper(|values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Strs(utils::from_int(&args.string(0)?, &args.ints(1)?)?))
    }));
}

fn arith_helpers(map: &mut HelperMap) {
    register(map, "inc", helper(|values| {
        let args = Args::at_least(values, 1)?;
        Ok(Value::Int(utils::step(args.int(0)?, &args.rest_ints(1)?)))
    }));
    register(map, "add", binary(utils::add));
    register(map, "sub", binary(utils::sub));
    register(map, "mul", binary(utils::mul));
    register(map, "div", binary(utils::div));
    register(map, "mod", binary(utils::modulo));
    register(map, "iindex", helper(|values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Int(utils::index(args.int(0)?, &args.ints(1)?)))
    }));
    register(map, "rand", helper(|values| {
        Args::exact(values, 0)?;
        Ok(Value::Int(rng::rand_i63()))
    }));
}

fn string_helpers(map: &mut HelperMap) {
    register(map, "cleanse", unary(utils::cleanse));
    register(map, "cleanser", helper(|values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Str(utils::cleanser(&args.string(0)?, &args.string(1)?)?))
    }));
    register(map, "basename", helper(|values| {
        let args = Args::at_least(values, 1)?;
        Ok(Value::Str(utils::basename(&args.string(0)?, &args.rest_strings(1)?)))
    }));
    register(map, "split", helper(|values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Strs(utils::split(&args.string(0)?, &args.string(1)?)))
    }));
    register(map, "join", helper(|values| {
        let args = Args::exact(values, 2)?;
        Ok(Value::Str(utils::join(&args.string(0)?, &args.strs(1)?)))
    }));
    register(map, "substr", helper(|values| {
        let args = Args::exact(values, 3)?;
        Ok(Value::Str(utils::substr(args.int(0)?, args.int(1)?, &args.string(2)?).to_string()))
    }));
    register(map, "replace", helper(|values| {
        let args = Args::exact(values, 4)?;
        Ok(Value::Str(utils::replace(&args.string(0)?, &args.string(1)?, &args.string(2)?, args.int(3)?)))
    }));
    register(map, "re_replace", helper(|values| {
        let args = Args::exact(values, 4)?;
        Ok(Value::Str(utils::re_replace(args.int(0)?, &args.string(1)?, &args.string(2)?, &args.string(3)?)))
    }));
    register(map, "initcap", unary(utils::initcap));
    register(map, "lower", unary(utils::lower));
    register(map, "upper", unary(utils::upper));
    register(map, "trim", trimmer(utils::trim));
    register(map, "trim_left", trimmer(utils::trim_left));
    register(map, "trim_right", trimmer(utils::trim_right));
    register(map, "re_trim", re_trimmer(utils::re_trim));
    register(map, "re_trim_left", re_trimmer(utils::re_trim_left));
    register(map, "re_trim_right", re_trimmer(utils::re_trim_right));
}

fn env_helpers(map: &mut HelperMap, clock: Clock, started: DateTime<Local>) {
    register(map, "debug", helper(|values| Ok(Value::Str(utils::debug(values)))));
    register(map, "command_line", helper(|values| {
        Args::exact(values, 0)?;
        Ok(Value::Str(utils::current_command_line()))
    }));
    register(map, "environment", helper(|values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Str(utils::environment(&args.string(0)?)))
    }));
    register(map, "debugging", helper(|values| {
        Args::exact(values, 0)?;
        Ok(Value::Bool(utils::debugger().0))
    }));
    register(map, "tracing", helper(|values| {
        Args::exact(values, 0)?;
        Ok(Value::Bool(utils::debugger().1))
    }));
    let pause_clock = Arc::clone(&clock);
    register(map, "pause", helper(move |values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Time(utils::pause(args.int(0)?, || pause_clock())))
    }));
    register(map, "now", helper(move |values| {
        Args::exact(values, 0)?;
        Ok(Value::Time(clock()))
    }));
    register(map, "started", helper(move |values| {
        Args::exact(values, 0)?;
        Ok(Value::Time(started))
    }));

    let seq = Arc::new(Sequencer::new());
    register(map, "seq", helper(move |values| {
        Args::exact(values, 0)?;
        Ok(Value::Int(seq.next()))
    }));
    let key_seq = Arc::new(KeySequencer::new());
    register(map, "key_seq", helper(move |values| {
        let args = Args::exact(values, 1)?;
        Ok(Value::Int(key_seq.next(&args.string(0)?)))
    }));
}

/// Every built-in helper
pub fn helpers(clock: Clock, started: DateTime<Local>) -> HelperMap {
    let mut map = HelperMap::new();
    ip_helpers(&mut map);
    arith_helpers(&mut map);
    string_helpers(&mut map);
    env_helpers(&mut map, clock, started);
    map
}
