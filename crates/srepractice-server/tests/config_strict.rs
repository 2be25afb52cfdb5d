#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use srepractice_core::protocol::simulate::{
    DEFAULT_FAILURE_RATE, DEFAULT_SLOW_MAX, DEFAULT_SLOW_MIN,
};
use srepractice_server::config::{self, SimulateSection};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
simulate:
  eror_rate: 0.2 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = "version: 1\n";
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:5000");
    assert_eq!(cfg.simulate.error_rate, 0.5);
    assert_eq!(cfg.simulate.slow_min_ms, 100);
    assert_eq!(cfg.simulate.slow_max_ms, 3000);
    assert_eq!(cfg.log.filter, "info");
}

#[test]
fn full_config_overrides_defaults() {
    let ok = r#"
version: 1
server:
  listen: "127.0.0.1:8080"
simulate:
  error_rate: 0.1
  slow_min_ms: 50
  slow_max_ms: 75
log:
  filter: "debug"
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.server.listen_addr().unwrap().port(), 8080);
    assert_eq!(cfg.simulate.error_rate, 0.1);
    assert_eq!(cfg.simulate.slow_min().as_millis(), 50);
    assert_eq!(cfg.simulate.slow_max().as_millis(), 75);
    assert_eq!(cfg.log.filter, "debug");
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn rejects_bad_listen_addr() {
    let bad = r#"
version: 1
server:
  listen: "localhost"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_out_of_range_simulation() {
    for bad in [
        "version: 1\nsimulate:\n  error_rate: 1.5\n",
        "version: 1\nsimulate:\n  error_rate: -0.1\n",
        "version: 1\nsimulate:\n  slow_min_ms: 0\n",
        "version: 1\nsimulate:\n  slow_max_ms: 60001\n",
        "version: 1\nsimulate:\n  slow_min_ms: 500\n  slow_max_ms: 400\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.client_code().as_str(), "BAD_CONFIG", "input={bad}");
    }
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = config::load_from_file("/definitely/not/here.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_CONFIG");
}

#[test]
fn simulate_defaults_come_from_core_constants() {
    let sim = SimulateSection::default();
    assert_eq!(sim.error_rate, DEFAULT_FAILURE_RATE);
    assert_eq!(sim.slow_min(), DEFAULT_SLOW_MIN);
    assert_eq!(sim.slow_max(), DEFAULT_SLOW_MAX);

    // omitted yaml fields resolve to the same values
    let cfg = config::load_from_str("version: 1\nsimulate: {}\n").expect("must parse");
    assert_eq!(cfg.simulate.error_rate, DEFAULT_FAILURE_RATE);
    assert_eq!(cfg.simulate.slow_min(), DEFAULT_SLOW_MIN);
    assert_eq!(cfg.simulate.slow_max(), DEFAULT_SLOW_MAX);
}
