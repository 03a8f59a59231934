use std::collections::HashMap;
use std::sync::Arc;

use cql_startup::metadata::DriverMetadata;
use cql_startup::startup::CQL_VERSION;
use cql_startup::{
    DefaultDriverContext, DriverConfig, Startup, StaticIdentity, Version, COMPRESSION_KEY,
    CQL_VERSION_KEY, DRIVER_NAME_KEY, DRIVER_VERSION_KEY,
};
use pretty_assertions::assert_eq;

fn config_with_compression(algorithm: &str) -> DriverConfig {
    let json = format!(r#"{{"default":{{"protocol":{{"compression":"{algorithm}"}}}}}}"#);
    DriverConfig::from_json(&json).unwrap()
}

fn custom(pairs: &[(&str, &str)]) -> Option<HashMap<String, Option<String>>> {
    Some(pairs.iter().map(|(k, v)| (k.to_string(), Some(v.to_string()))).collect())
}

fn startup(config: DriverConfig, options: Option<HashMap<String, Option<String>>>) -> Startup {
    let context = DefaultDriverContext::new(config, options);
    Startup::new(context.startup_options().unwrap())
}

fn assert_default_startup_options(startup: &Startup) {
    let packaged = DriverMetadata::packaged().unwrap();
    assert_eq!(startup.options.value(CQL_VERSION_KEY), Some(CQL_VERSION));
    assert_eq!(startup.options.value(DRIVER_NAME_KEY), Some(packaged.name.as_str()));
    let version: Version = startup.options.value(DRIVER_VERSION_KEY).unwrap().parse().unwrap();
    assert_eq!(version, packaged.version);
}

#[test]
fn should_build_minimal_startup_options() {
    let startup = startup(DriverConfig::default(), None);
    assert!(!startup.options.contains_key(COMPRESSION_KEY));
    assert_eq!(startup.options.len(), 3);
    assert_default_startup_options(&startup);
}

#[test]
fn should_build_startup_options_with_custom_options() {
    let startup = startup(
        DriverConfig::default(),
        custom(&[("Custom_Key1", "Custom_Value1"), ("Custom_Key2", "Custom_Value2")]),
    );
    assert_eq!(startup.options.value("Custom_Key1"), Some("Custom_Value1"));
    assert_eq!(startup.options.value("Custom_Key2"), Some("Custom_Value2"));
    assert!(!startup.options.contains_key(COMPRESSION_KEY));
    assert_default_startup_options(&startup);
}

#[test]
fn should_build_startup_options_with_compression() {
    let startup = startup(config_with_compression("lz4"), None);
    assert_eq!(startup.options.value(COMPRESSION_KEY), Some("lz4"));
    assert_default_startup_options(&startup);
}

#[test]
fn should_not_override_internal_startup_options() {
    let startup = startup(
        DriverConfig::default(),
        custom(&[
            (DRIVER_NAME_KEY, "Custom_Value1"),
            (DRIVER_VERSION_KEY, "Custom_Value2"),
            (CQL_VERSION_KEY, "9.9.9999"),
        ]),
    );
    assert!(!startup.options.contains_key(COMPRESSION_KEY));
    assert_default_startup_options(&startup);
}

#[test]
fn should_not_override_compression_startup_option() {
    let startup = startup(
        config_with_compression("snappy"),
        custom(&[
            ("Custom_Key1", "Custom_Value1"),
            ("Custom_Key2", "Custom_Value2"),
            (COMPRESSION_KEY, "lz4"),
        ]),
    );
    assert_eq!(startup.options.value("Custom_Key1"), Some("Custom_Value1"));
    assert_eq!(startup.options.value("Custom_Key2"), Some("Custom_Value2"));
    assert_eq!(startup.options.value(COMPRESSION_KEY), Some("snappy"));
    assert_default_startup_options(&startup);
}

#[test]
fn none_compression_in_config_is_omitted() {
    let startup = startup(config_with_compression("none"), None);
    assert!(!startup.options.contains_key(COMPRESSION_KEY));
}

#[test]
fn null_custom_value_is_preserved() {
    let mut options = HashMap::new();
    options.insert("Nullable".to_string(), None);
    options.insert("Custom_Key1".to_string(), Some("Custom_Value1".to_string()));
    let startup = startup(DriverConfig::default(), Some(options));
    assert_eq!(startup.options.get("Nullable"), Some(None));
    assert_eq!(startup.options.value("Custom_Key1"), Some("Custom_Value1"));
}

#[test]
fn repeated_builds_are_equal() {
    let context = DefaultDriverContext::new(
        config_with_compression("lz4"),
        custom(&[("Custom_Key1", "Custom_Value1")]),
    );
    assert_eq!(context.startup_options().unwrap(), context.startup_options().unwrap());
}

#[test]
fn embedding_identity_replaces_packaged_one() {
    let spoofed = custom(&[(DRIVER_NAME_KEY, "spoof")]);
    let context = DefaultDriverContext::new(DriverConfig::default(), spoofed)
        .with_identity(Arc::new(StaticIdentity::new("Embedded Client", "2.0.0-rc.1")));
    let options = context.startup_options().unwrap();
    assert_eq!(options.value(DRIVER_NAME_KEY), Some("Embedded Client"));
    assert_eq!(options.value(DRIVER_VERSION_KEY), Some("2.0.0-rc.1"));
}

#[test]
fn startup_for_builds_from_json() {
    let startup = cql_startup::startup_for(
        r#"{"default":{"protocol":{"compression":"lz4"}}}"#,
        custom(&[("APPLICATION_NAME", "reports")]),
    )
    .unwrap();
    assert_eq!(startup.options.value(COMPRESSION_KEY), Some("lz4"));
    assert_eq!(startup.options.value("APPLICATION_NAME"), Some("reports"));
    assert_eq!(startup.options.len(), 5);
    assert!(startup.encode_body().is_ok());
}

#[test]
fn named_profile_overrides_default_compression() {
    let config = DriverConfig::from_json(
        r#"{
            "default": {"protocol": {"compression": "snappy"}},
            "profiles": {"bulk": {"protocol": {"compression": "lz4"}}}
        }"#,
    )
    .unwrap();
    let context = DefaultDriverContext::for_profile(&config, "bulk", None).unwrap();
    let startup = Startup::new(context.startup_options().unwrap());
    assert_eq!(startup.options.value(COMPRESSION_KEY), Some("lz4"));
    assert_default_startup_options(&startup);
}
