use navgate_config::{AppConfig, ConfigError};

#[test]
fn reject_missing_and_malformed_values() {
    unsafe {
        std::env::remove_var("NAVGATE_REGISTRY_PATH");
        std::env::set_var("NAVGATE_CACHE_CAPACITY", "many");
    }
    let err = AppConfig::from_env().expect_err("missing registry path");
    assert!(matches!(err, ConfigError::Missing(key) if key == "NAVGATE_REGISTRY_PATH"));

    unsafe {
        std::env::set_var("NAVGATE_REGISTRY_PATH", "registry.json");
    }
    let err = AppConfig::from_env().expect_err("bad capacity");
    assert!(matches!(
        err,
        ConfigError::Invalid(key, value) if key == "NAVGATE_CACHE_CAPACITY" && value == "many"
    ));
}
