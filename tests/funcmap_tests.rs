use std::io::Write;

use funcmap::config_loader::{apply_overrides, load_config, CliOverrides};
use funcmap::funcs::{helper, CallError, FuncMap, HelperMap, Value};
use tempfile::NamedTempFile;

fn strs(args: &[&str]) -> Vec<Value> {
    args.iter().map(|a| Value::from(*a)).collect()
}

#[test]
fn test_builtin_table() {
    let funcs = FuncMap::new();
    for name in ["ip_math", "ip4_inc", "ip6_next", "substr", "inc", "from_int", "seq", "now"] {
        assert!(funcs.contains(name), "missing {}", name);
    }
    assert!(!funcs.contains("step"));
    assert_eq!(funcs.call("inc", &strs(&["41"])).unwrap(), Value::Int(42));
    assert_eq!(
        funcs.call("ip6_next", &strs(&["7", "0", "2", "0:0:0:0:0:0:0:1"])).unwrap(),
        Value::from("0000:0000:0000:0000:0000:0000:0000:0000")
    );
}

#[test]
fn test_caller_maps_extend_builtins() {
    let mut extra = HelperMap::new();
    extra.insert("greet".to_string(), Some(helper(|_| Ok(Value::from("hello")))));
    extra.insert("ignored".to_string(), None);

    let funcs = FuncMap::builder().with_maps([extra]).build();
    assert_eq!(funcs.call("greet", &[]).unwrap(), Value::from("hello"));
    assert!(!funcs.contains("ignored"));
    assert!(funcs.contains("ip4_inc"));
}

#[test]
fn test_independent_tables_have_independent_sequences() {
    let a = FuncMap::new();
    let b = FuncMap::new();
    assert_eq!(a.call("seq", &[]).unwrap(), Value::Int(1));
    assert_eq!(a.call("seq", &[]).unwrap(), Value::Int(2));
    assert_eq!(b.call("seq", &[]).unwrap(), Value::Int(1));
}

#[test]
fn test_argument_errors() {
    let funcs = FuncMap::new();
    assert!(matches!(funcs.call("ip4_inc", &strs(&["3"])), Err(CallError::Arity { .. })));
    assert!(matches!(funcs.call("ip4_inc", &strs(&["x", "1", "1.2.3.4"])), Err(CallError::Type { .. })));
    assert!(matches!(funcs.call("nope", &[]), Err(CallError::Unknown(_))));
}

#[test]
fn test_config_file_aliases() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "aliases:\n  bump: ip4_inc\nstrict: true").unwrap();

    let mut config = load_config(file.path()).unwrap();
    apply_overrides(&mut config, &CliOverrides { seed: Some(1), ..CliOverrides::default() }).unwrap();
    assert!(config.strict);
    assert_eq!(config.seed, Some(1));

    let funcs = config.func_map().unwrap();
    assert_eq!(
        funcs.call("bump", &strs(&["3", "1", "10.0.0.1"])).unwrap(),
        Value::from("10.0.0.2")
    );
}
