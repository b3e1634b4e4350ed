use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = Config::from_lookup(env(&[])).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.http_timeout, Duration::from_secs(10));
    assert_eq!(cfg.request_timeout, Duration::from_secs(15));
}

#[test]
fn empty_values_take_defaults() {
    let cfg = Config::from_lookup(env(&[("PORT", "  ")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn overrides_are_parsed() {
    let cfg = Config::from_lookup(env(&[
        ("PORT", "9000"),
        ("HTTP_TIMEOUT_SECS", "3"),
        ("REQUEST_TIMEOUT_SECS", " 7 "),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.http_timeout, Duration::from_secs(3));
    assert_eq!(cfg.request_timeout, Duration::from_secs(7));
}

#[test]
fn bad_values_are_validation_errors() {
    for (k, v) in [
        ("PORT", "eighty"),
        ("PORT", "70000"),
        ("HTTP_TIMEOUT_SECS", "-1"),
        ("REQUEST_TIMEOUT_SECS", "0"),
    ] {
        let err = Config::from_lookup(env(&[(k, v)])).unwrap_err();
        assert!(matches!(err, SpudcatError::Validation(_)), "{k}={v}");
        assert!(err.to_string().contains(k));
    }
}
