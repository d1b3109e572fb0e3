//! Configuration tests

use super::*;
use std::collections::HashMap;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

/// The generated template must parse back to the same values
#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), &no_env);
    assert_eq!(resolved, config);
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.ui.splashless = true;
    config.ui.no_icons = true;
    config.ui.default_panel = StartPanel::Scratch;
    config.ui.read_only = true;
    config.queue.capacity = 8;
    config.logging.file_rotation = LogRotation::Hourly;
    config.logging.file_dir = PathBuf::from("C:\\logs\\lxz");

    let parsed: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    assert_eq!(Config::resolve(parsed, &no_env), config);
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading and precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_partial_file_uses_defaults() {
    let file: FileConfig = toml::from_str(
        r#"
[ui]
headless = true
default_panel = "bogus"

[queue]
capacity = 0
"#,
    )
    .unwrap();
    let config = Config::resolve(file, &no_env);

    assert!(config.ui.headless);
    assert_eq!(config.ui.default_panel, StartPanel::Logs);
    assert_eq!(config.queue.capacity, QueueConfig::default().capacity);
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
[ui]
default_panel = "shell"

[logging]
level = "warn"
"#,
    )
    .unwrap();
    let env = env_from(&[
        ("LXZ_LOG_LEVEL", "debug"),
        ("LXZ_SPLASHLESS", "true"),
        ("LXZ_HEADLESS", "0"),
        ("LXZ_DEFAULT_PANEL", "scratch"),
        ("LXZ_READ_ONLY", "1"),
    ]);
    let config = Config::resolve(file, &env);

    assert_eq!(config.logging.level, "debug");
    assert!(config.ui.splashless);
    assert!(!config.ui.headless);
    assert!(config.ui.read_only);
    assert_eq!(config.ui.default_panel, StartPanel::Scratch);
}

#[test]
fn test_cli_overrides_env() {
    let env = env_from(&[("LXZ_LOG_LEVEL", "debug")]);
    let mut config = Config::resolve(FileConfig::default(), &env);
    config.apply(&Overrides {
        splashless: true,
        headless: false,
        read_only: true,
        log_level: Some("trace".to_string()),
        panel: Some(StartPanel::Shell),
    });

    assert_eq!(config.logging.level, "trace");
    assert!(config.ui.splashless);
    assert!(config.ui.read_only);
    assert_eq!(config.ui.default_panel, StartPanel::Shell);
}

#[test]
fn test_broken_file_is_an_error() {
    let dir = std::env::temp_dir().join(format!("lxz-config-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[ui\nsplashless = maybe").unwrap();

    let err = Config::load_file_config(Some(&path)).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse"));

    let missing = dir.join("missing.toml");
    assert!(Config::load_file_config(Some(&missing)).is_ok());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_load_from_ignores_environment() {
    let dir = std::env::temp_dir().join(format!("lxz-update-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    std::env::set_var("LXZ_LOG_LEVEL", "trace");
    std::env::set_var("LXZ_READ_ONLY", "true");
    let config = Config::load_from(Some(&path));
    std::env::remove_var("LXZ_LOG_LEVEL");
    std::env::remove_var("LXZ_READ_ONLY");

    let config = config.unwrap();
    assert_eq!(config.logging.level, "warn");
    assert!(!config.ui.read_only);
    assert!(config.to_toml().contains("level = \"warn\""));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_write_to_creates_parent() {
    let dir = std::env::temp_dir().join(format!("lxz-write-test-{}", std::process::id()));
    let path = dir.join("nested").join("config.toml");

    Config::default().write_to(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("# lxz configuration"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}
