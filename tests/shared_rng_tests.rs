//! Kept in its own test binary so no other test draws from the shared source.

use funcmap::funcs::{FuncMap, Value};
use funcmap::{ip, rng};

#[test]
fn test_reseed_reproduces_random_groups() {
    rng::reseed(0);
    let first = ip::ip_math("[R]._._._", "1.1.1.1");
    let rand_first = rng::rand_i63();

    rng::reseed(0);
    assert_eq!(ip::ip_math("[R]._._._", "1.1.1.1"), first);
    assert_eq!(rng::rand_i63(), rand_first);
    assert!(first.ends_with(".1.1.1"));
    assert!(rand_first >= 0);

    rng::reseed(0);
    let funcs = FuncMap::new();
    let via_helper = funcs
        .call("ip_math", &[Value::from("[R]._._._"), Value::from("1.1.1.1")])
        .unwrap();
    assert_eq!(via_helper, Value::from(first.as_str()));
}
