//! # Integration Tests for typeconf
//!
//! Exercises the public `Configuration` API end to end: defining shapes,
//! validated writes, reads, resets, custom predicates and issue reporting.

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;
use typeconf::{Configuration, Input, Issue, Issues, PredicateRegistry, TypeDef};

/// Helper: route library logs to the test harness (`RUST_LOG=typeconf=trace`).
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Helper: a configuration with a small server schema already defined.
fn server_config() -> Configuration {
    let mut config = Configuration::new();
    config
        .define(
            "server",
            json!({
                "host": "string",
                "port": "integer",
                "tls": {"enabled": "boolean"},
                "upstreams": [{"name": "string", "weight": "positive"}],
            }),
        )
        .unwrap();
    config
}

fn messages(result: Result<(), Issues>) -> Vec<String> {
    result.unwrap_err().messages()
}

// -- Write / Read -------------------------------------------------------------

#[test]
fn test_defined_scalar_round_trips() {
    init_tracing();
    let mut config = server_config();
    config.write("server.host", json!("example.org")).unwrap();
    assert_eq!(config.read("server.host"), Some(json!("example.org")));
}

#[test]
fn test_failing_value_is_rejected_and_absent() {
    let mut config = server_config();
    let issues = config.write("server.port", json!("http")).unwrap_err();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues.as_slice()[0].path(), "server.port");
    assert!(!config.has("server.port"));
}

#[test]
fn test_undefined_path_leaves_values_untouched() {
    let mut config = server_config();
    config.write("server.host", json!("a")).unwrap();
    let before = config.snapshot();

    assert_eq!(
        messages(config.write("client.timeout", json!(5))),
        vec!["client is invalid"]
    );
    assert_eq!(
        messages(config.write("server.timeout", json!(5))),
        vec!["server.timeout is invalid at \"timeout\""]
    );
    assert_eq!(config.snapshot(), before);
}

#[test]
fn test_nested_write_reports_every_issue_in_key_order() {
    let mut config = server_config();
    let result = config.write(
        "server",
        json!({"port": "eighty", "host": 7, "extra": true}),
    );
    assert_eq!(
        messages(result),
        vec![
            "server.extra is invalid at \"extra\"",
            "server.host matches an invalid type at \"string\"",
            "server.port matches an invalid type at \"integer\"",
        ]
    );
}

#[test]
fn test_partial_write_keeps_valid_leaves() {
    let mut config = server_config();
    let result = config.write("server", json!({"host": "ok", "port": "bad"}));
    assert!(result.is_err());
    assert_eq!(config.read("server.host"), Some(json!("ok")));
    assert!(!config.has("server.port"));
}

#[test]
fn test_decomposed_write_matches_leaf_writes() {
    let mut nested = server_config();
    nested
        .write("server", json!({"host": "h", "tls": {"enabled": true}}))
        .unwrap();

    let mut flat = server_config();
    flat.write("server.host", json!("h")).unwrap();
    flat.write("server.tls.enabled", json!(true)).unwrap();

    assert_eq!(nested.snapshot(), flat.snapshot());
    assert_eq!(
        nested.read("server"),
        Some(json!({"host": "h", "tls": {"enabled": true}}))
    );
}

#[test]
fn test_falsy_values_are_present() {
    let mut config = server_config();
    config.write("server.tls.enabled", json!(false)).unwrap();
    config.write("server.port", json!(0)).unwrap();
    config.write("server.host", json!("")).unwrap();

    assert!(config.has("server.tls.enabled"));
    assert!(config.has("server.port"));
    assert!(config.has("server.host"));
    assert_eq!(config.read("server.tls.enabled"), Some(json!(false)));
}

// -- Arrays -------------------------------------------------------------------

#[test]
fn test_array_glob_covers_every_position() {
    let mut config = Configuration::new();
    config.define("list[*]", "number").unwrap();

    config.write("list[0]", json!(1)).unwrap();
    config.write("list[5]", json!(2.5)).unwrap();
    assert_eq!(
        messages(config.write("list[0]", json!("x"))),
        vec!["list[0] matches an invalid type at \"number\""]
    );

    assert_eq!(config.read("list[0]"), Some(json!(1)));
    assert_eq!(config.read("list[5]"), Some(json!(2.5)));
    assert!(!config.has("list[3]"));
    assert_eq!(
        config.read("list"),
        Some(json!([1, null, null, null, null, 2.5]))
    );
}

#[test]
fn test_array_of_mappings() {
    let mut config = server_config();
    config
        .write(
            "server.upstreams",
            json!([{"name": "a", "weight": 1}, {"name": "b", "weight": 3}]),
        )
        .unwrap();
    assert_eq!(config.read("server.upstreams[1].name"), Some(json!("b")));

    assert_eq!(
        messages(config.write("server.upstreams[2].weight", json!(-1))),
        vec!["server.upstreams[2].weight matches an invalid type at \"positive\""]
    );
}

#[test]
fn test_multi_bracket_paths() {
    let mut config = Configuration::new();
    config.define("grid[*][*]", "integer").unwrap();
    config.write("grid[1][2]", json!(5)).unwrap();
    config.write("grid", json!([[1, 2]])).unwrap();

    assert_eq!(config.read("grid[1][2]"), Some(json!(5)));
    assert_eq!(config.read("grid[0][1]"), Some(json!(2)));
    assert_eq!(config.read("grid"), Some(json!([[1, 2], [null, null, 5]])));
}

#[test]
fn test_glob_token_cannot_address_a_value() {
    let mut config = Configuration::new();
    config.define("list[*]", "number").unwrap();
    let issues = config.write("list[*]", json!(1)).unwrap_err();
    assert!(matches!(issues.as_slice(), [Issue::MalformedPath { .. }]));
    assert_eq!(config.read("list[*]"), None);
}

#[test]
fn test_out_of_range_indices_are_reported_not_allocated() {
    let mut config = Configuration::new();
    config.define("list[*]", "number").unwrap();

    for path in ["list[18446744073709551615]", "list[1000000000000]"] {
        let issues = config.write(path, json!(1)).unwrap_err();
        assert!(
            matches!(issues.as_slice(), [Issue::MalformedPath { .. }]),
            "{path} should be malformed"
        );
        assert!(!config.has(path));
    }
    assert_eq!(config.snapshot(), json!({}));
}

// -- Reset --------------------------------------------------------------------

#[test]
fn test_clear_requires_redefinition() {
    let mut config = server_config();
    config.write("server.host", json!("h")).unwrap();

    config.clear();
    assert!(!config.has("server.host"));
    assert_eq!(
        messages(config.write("server.host", json!("h"))),
        vec!["server is invalid"]
    );
}

#[test]
fn test_empty_keeps_definitions() {
    let mut config = server_config();
    config.write("server.host", json!("h")).unwrap();

    config.empty();
    assert!(!config.has("server.host"));
    assert_eq!(config.snapshot(), json!({}));

    config.write("server.host", json!("again")).unwrap();
    assert_eq!(config.read("server.host"), Some(json!("again")));
}

// -- Definitions --------------------------------------------------------------

#[test]
fn test_define_twice_is_define_once() {
    let mut once = Configuration::new();
    once.define("a.b", "string").unwrap();

    let mut twice = Configuration::new();
    twice.define("a.b", "string").unwrap();
    twice.define("a.b", "string").unwrap();

    assert_eq!(once.definition("a.b"), twice.definition("a.b"));
    assert!(twice.write("a.b", json!("x")).is_ok());
    assert!(twice.write("a.b", json!(1)).is_err());
}

#[test]
fn test_later_definition_replaces_earlier() {
    let mut config = Configuration::new();
    config.define("a", "string").unwrap();
    config.define("a", "number").unwrap();
    assert!(config.write("a", json!(1)).is_ok());
    assert!(config.write("a", json!("1")).is_err());
}

#[test]
fn test_custom_predicate_reads_sibling_settings() {
    init_tracing();
    let mut config = Configuration::new();
    config.define("tls.enabled", "boolean").unwrap();
    config
        .define(
            "tls.cert",
            TypeDef::labeled("certificate when tls enabled", |value, registry, config| {
                config.read("tls.enabled") == Some(json!(true))
                    && registry.test("string", value) == Some(true)
            }),
        )
        .unwrap();

    assert_eq!(
        messages(config.write("tls.cert", json!("/etc/cert.pem"))),
        vec!["tls.cert matches an invalid type at \"certificate when tls enabled\""]
    );

    config.write("tls.enabled", json!(true)).unwrap();
    config.write("tls.cert", json!("/etc/cert.pem")).unwrap();
    assert_eq!(config.read("tls.cert"), Some(json!("/etc/cert.pem")));
}

#[test]
fn test_mixed_shape_with_input_builders() {
    let mut config = Configuration::new();
    config
        .define(
            "limits",
            Input::<TypeDef>::mapping([
                ("max", Input::scalar(TypeDef::named("integer"))),
                (
                    "even",
                    Input::scalar(TypeDef::custom(|value, _, _| {
                        value.as_i64().is_some_and(|n| n % 2 == 0)
                    })),
                ),
            ]),
        )
        .unwrap();

    config.write("limits", json!({"max": 10, "even": 4})).unwrap();
    assert_eq!(
        messages(config.write("limits.even", json!(3))),
        vec!["limits.even matches an invalid type at \"custom\""]
    );
}

#[test]
fn test_opaque_values_are_single_leaves() {
    let mut config = Configuration::new();
    config.define("labels", "object").unwrap();
    config.define("tags", "array").unwrap();

    config
        .write("labels", Input::opaque(json!({"team": "core"})))
        .unwrap();
    config.write("tags", Input::opaque(json!(["a", "b"]))).unwrap();

    assert_eq!(config.read("labels"), Some(json!({"team": "core"})));
    assert_eq!(config.read("labels.team"), None);
    assert_eq!(config.read("tags"), Some(json!(["a", "b"])));

    // Without `opaque` the object decomposes and `labels.team` is undefined.
    assert_eq!(
        messages(config.write("labels", json!({"team": "core"}))),
        vec!["labels.team is invalid at \"team\""]
    );
}

#[test]
fn test_redefining_leaf_as_branch_reshapes_values() {
    init_tracing();
    let mut config = Configuration::new();
    config.define("a", "object").unwrap();
    config.write("a", Input::opaque(json!({"x": 1}))).unwrap();

    config.define("a.x", "number").unwrap();
    config.write("a.x", json!(2)).unwrap();
    assert_eq!(config.read("a"), Some(json!({"x": 2})));
}

#[test]
fn test_keys_with_special_characters_stay_single_keys() {
    let mut config = Configuration::new();
    config.define("hosts", json!({"db.internal": "ip"})).unwrap();
    config
        .write("hosts", json!({"db.internal": "10.0.0.1"}))
        .unwrap();

    let Some(Value::Object(hosts)) = config.read("hosts") else {
        panic!("expected object");
    };
    assert_eq!(hosts.get("db.internal"), Some(&json!("10.0.0.1")));
}

// -- Registry -----------------------------------------------------------------

#[test]
fn test_injected_registry_replaces_standard_set() {
    let mut registry = PredicateRegistry::new();
    registry.register("port", |value| {
        value.as_u64().is_some_and(|port| (1..=65535).contains(&port))
    });

    let mut config = Configuration::with_registry(registry);
    config.define("port", "port").unwrap();
    config.define("name", "string").unwrap();

    assert!(config.write("port", json!(8080)).is_ok());
    assert!(config.write("port", json!(0)).is_err());
    assert_eq!(
        messages(config.write("name", json!("svc"))),
        vec!["name matches an invalid type at \"string\""]
    );
}

#[test]
fn test_standard_predicates_through_configuration() {
    let mut config = Configuration::new();
    config
        .define(
            "contact",
            json!({"email": "email", "site": "url", "color": "hexColor", "addr": "ipv6"}),
        )
        .unwrap();
    config
        .write(
            "contact",
            json!({
                "email": "ops@example.org",
                "site": "https://example.org",
                "color": "#ff8800",
                "addr": "::1",
            }),
        )
        .unwrap();

    let issues = config
        .write("contact", json!({"email": "nope", "addr": "1.2.3.4"}))
        .unwrap_err();
    let paths: Vec<&str> = issues.iter().map(Issue::path).collect();
    assert_eq!(paths, vec!["contact.addr", "contact.email"]);
}

#[test]
fn test_truthy_and_falsy_follow_javascript_truthiness() {
    let mut config = Configuration::new();
    config.define("flag", "truthy").unwrap();
    config.define("off", "falsy").unwrap();

    for value in [json!(0), json!(""), json!(false), json!(null)] {
        assert!(config.write("flag", value.clone()).is_err(), "{value} is not truthy");
        assert!(config.write("off", value.clone()).is_ok(), "{value} is falsy");
    }
    assert!(config.write("flag", json!("0")).is_ok());
    assert!(config.write("off", Input::opaque(json!([]))).is_err());
}

// -- Issue Reporting ----------------------------------------------------------

#[test]
fn test_issues_display_one_per_line() {
    let mut config = server_config();
    let issues = config
        .write("server", json!({"host": 1, "port": "x"}))
        .unwrap_err();
    assert_eq!(
        issues.to_string(),
        "server.host matches an invalid type at \"string\"\n\
         server.port matches an invalid type at \"integer\""
    );
}

#[test]
fn test_issues_serialize_tagged_by_kind() {
    let mut config = Configuration::new();
    let issues = config.write("a.b", json!(1)).unwrap_err();
    assert_eq!(
        serde_json::to_value(&issues).unwrap(),
        json!([{"kind": "invalid_parent", "path": "a.b", "parent": "a"}])
    );
}

#[test]
fn test_malformed_paths() {
    let mut config = Configuration::new();
    for path in ["", "a..b", "[0]", "a[0", "a]b"] {
        let issues = config.write(path, json!(1)).unwrap_err();
        assert!(
            matches!(issues.as_slice(), [Issue::MalformedPath { .. }]),
            "{path:?} should be malformed"
        );
        assert!(config.define(path, "number").is_err());
        assert!(!config.has(path));
    }
}

#[test]
fn test_configuration_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Configuration>();
}
