//! Tests for the layered inference configuration.

use std::sync::Mutex;

use bayesnet_core::config::{ConfigOverrides, InferenceConfig};
use bayesnet_core::constants;
use bayesnet_core::errors::ConfigError;

/// Serializes tests that touch `BAYESNET_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_bayesnet_env_vars() {
    for key in [
        "BAYESNET_CHECK_INVARIANTS",
        "BAYESNET_MAX_CLIQUE_ENTRIES",
        "BAYESNET_CPT_TOLERANCE",
        "BAYESNET_CANCEL_POLL_INTERVAL",
    ] {
        std::env::remove_var(key);
    }
}

/// T0-CFG-01: Default config values and validation pass.
#[test]
fn test_defaults() {
    let config = InferenceConfig::default();
    assert!(!config.effective_check_invariants());
    assert_eq!(
        config.effective_max_clique_entries(),
        constants::DEFAULT_MAX_CLIQUE_ENTRIES
    );
    assert_eq!(config.effective_cpt_tolerance(), constants::DEFAULT_CPT_TOLERANCE);
    assert_eq!(
        config.effective_cancel_poll_interval(),
        constants::DEFAULT_CANCEL_POLL_INTERVAL
    );
    assert!(InferenceConfig::checked().effective_check_invariants());
}

/// T0-CFG-02: Layered resolution (defaults, file, env, overrides).
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_bayesnet_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join(constants::CONFIG_FILE_NAME),
        r#"
check_invariants = false
max_clique_entries = 1024
cpt_tolerance = 0.001
"#,
    )
    .unwrap();

    std::env::set_var("BAYESNET_MAX_CLIQUE_ENTRIES", "2048");
    std::env::set_var("BAYESNET_CANCEL_POLL_INTERVAL", "16");

    let overrides = ConfigOverrides {
        check_invariants: Some(true),
        ..Default::default()
    };
    let config = InferenceConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Overrides beat the file.
    assert_eq!(config.check_invariants, Some(true));
    // Env beats the file.
    assert_eq!(config.max_clique_entries, Some(2048));
    assert_eq!(config.cancel_poll_interval, Some(16));
    // File value survives when nothing overrides it.
    assert_eq!(config.cpt_tolerance, Some(0.001));

    clear_bayesnet_env_vars();
}

/// T0-CFG-03: Load without file uses defaults.
#[test]
fn test_load_without_file_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_bayesnet_env_vars();

    let dir = tempdir();
    let config = InferenceConfig::load(dir.path(), None).unwrap();
    assert_eq!(config, InferenceConfig::default());
}

/// T0-CFG-04: Unparseable env value is ignored.
#[test]
fn test_unparseable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_bayesnet_env_vars();

    std::env::set_var("BAYESNET_CHECK_INVARIANTS", "perhaps");
    let dir = tempdir();
    let config = InferenceConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.check_invariants, None);

    clear_bayesnet_env_vars();
}

/// T0-CFG-05: Invalid toml file is parse error.
#[test]
fn test_invalid_toml_file_is_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_bayesnet_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join(constants::CONFIG_FILE_NAME),
        "max_clique_entries = \"lots\"",
    )
    .unwrap();
    let err = InferenceConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }), "got {err:?}");
}

/// T0-CFG-06: Validation rejects bad values.
#[test]
fn test_validation_rejects_bad_values() {
    for toml in [
        "cpt_tolerance = 0.0",
        "cpt_tolerance = 1.5",
        "max_clique_entries = 0",
        "cancel_poll_interval = 0",
    ] {
        let err = InferenceConfig::from_toml(toml).unwrap_err();
        assert!(
            matches!(err, ConfigError::ValidationFailed { .. }),
            "{toml} gave {err:?}"
        );
    }
}

/// T0-CFG-07: Config survives a TOML serialize/parse cycle.
#[test]
fn test_toml_round_trip() {
    let config = InferenceConfig {
        check_invariants: Some(true),
        max_clique_entries: Some(4096),
        cpt_tolerance: Some(1e-4),
        cancel_poll_interval: None,
    };
    let text = config.to_toml().unwrap();
    assert_eq!(InferenceConfig::from_toml(&text).unwrap(), config);
}
