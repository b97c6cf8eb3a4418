use std::sync::Mutex;

use super::*;

/// Guards tests that mutate environment variables to prevent race conditions.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn write_temp_config(name: &str, content: &str) -> PathBuf {
    use std::io::Write;
    let path = std::env::temp_dir().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
    path
}

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.max_length, 50);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.show_target);
    assert!(config.logging.file.is_none());
}

#[test]
fn test_parse_empty_toml() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_parse_max_length() {
    let config: Config = toml::from_str("max_length = 80").unwrap();
    assert_eq!(config.max_length, 80);
    assert_eq!(config.logging, LoggingConfig::default());
}

#[test]
fn test_parse_full_toml() {
    let toml = r#"
max_length = 64

[logging]
level = "debug"
show_target = true

[logging.file]
directory = "/var/log/urltrim"
max_files = 30
rotation = "hourly"
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.max_length, 64);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.show_target);
    let fc = config.logging.file.unwrap();
    assert_eq!(fc.directory, "/var/log/urltrim");
    assert_eq!(fc.max_files, 30);
    assert_eq!(fc.rotation, Rotation::Hourly);
}

#[test]
fn test_parse_logging_section_partial_defaults() {
    let toml = r#"
[logging]
level = "warn"
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.max_length, 50); // default
    assert_eq!(config.logging.level, "warn");
    assert!(!config.logging.show_target); // default
    assert!(config.logging.file.is_none());
}

#[test]
fn test_file_log_config_defaults() {
    let fc = FileLogConfig::default();
    assert_eq!(fc.directory, "logs");
    assert_eq!(fc.max_files, 7);
    assert_eq!(fc.rotation, Rotation::Daily);
}

#[test]
fn test_empty_file_section_uses_defaults() {
    let toml = r#"
[logging.file]
"#;
    let config: Config = toml::from_str(toml).unwrap();
    assert_eq!(config.logging.file, Some(FileLogConfig::default()));
}

// Rotation enum deserialization tests.

#[test]
fn test_rotation_deserialize_daily() {
    let fc: FileLogConfig = toml::from_str("rotation = \"daily\"").unwrap();
    assert_eq!(fc.rotation, Rotation::Daily);
}

#[test]
fn test_rotation_deserialize_hourly() {
    let fc: FileLogConfig = toml::from_str("rotation = \"hourly\"").unwrap();
    assert_eq!(fc.rotation, Rotation::Hourly);
}

#[test]
fn test_rotation_deserialize_never() {
    let fc: FileLogConfig = toml::from_str("rotation = \"never\"").unwrap();
    assert_eq!(fc.rotation, Rotation::Never);
}

#[test]
fn test_rotation_deserialize_unknown_fails() {
    let result: Result<FileLogConfig, _> = toml::from_str("rotation = \"weekly\"");
    assert!(result.is_err());
}

#[test]
fn test_negative_max_length_fails_to_parse() {
    let result: Result<Config, _> = toml::from_str("max_length = -5");
    assert!(result.is_err());
}

// Validation.

#[test]
fn test_validate_default_ok() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_zero_max_length() {
    let config = Config {
        max_length: 0,
        ..Config::default()
    };
    let result = config.validate();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue {
            field: "max_length",
            ..
        })
    ));
}

#[test]
fn test_validate_unknown_level() {
    let config = Config {
        logging: LoggingConfig {
            level: "chatty".to_string(),
            ..LoggingConfig::default()
        },
        ..Config::default()
    };
    let result = config.validate();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue {
            field: "logging.level",
            ..
        })
    ));
}

#[test]
fn test_validate_level_case_insensitive() {
    let config = Config {
        logging: LoggingConfig {
            level: "WARN".to_string(),
            ..LoggingConfig::default()
        },
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

// Loading from disk.

#[test]
fn test_load_from_path() {
    let path = write_temp_config("urltrim_test_config.toml", "max_length = 33\n");

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.max_length, 33);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_load_from_missing_file() {
    let result = Config::load_from("/nonexistent/path/urltrim.toml");
    assert!(matches!(result, Err(ConfigError::IoError { .. })));
}

#[test]
fn test_load_from_invalid_toml() {
    let path = write_temp_config("urltrim_invalid_config.toml", "max_length = [oops\n");

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_load_from_rejects_zero_max_length() {
    let path = write_temp_config("urltrim_zero_config.toml", "max_length = 0\n");

    let result = Config::load_from(&path);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_load_explicit_path_wins() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let env_path = write_temp_config("urltrim_env_config.toml", "max_length = 11\n");
    let explicit = write_temp_config("urltrim_explicit_config.toml", "max_length = 22\n");
    // SAFETY: guarded by mutex.
    unsafe { std::env::set_var(CONFIG_ENV_VAR, &env_path) };

    let config = Config::load(Some(explicit.as_path())).unwrap();
    assert_eq!(config.max_length, 22);

    // SAFETY: guarded by mutex.
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
    std::fs::remove_file(&env_path).ok();
    std::fs::remove_file(&explicit).ok();
}

#[test]
fn test_load_explicit_missing_is_error() {
    let result = Config::load(Some(Path::new("/nonexistent/urltrim/explicit.toml")));
    assert!(matches!(result, Err(ConfigError::IoError { .. })));
}

#[test]
fn test_load_from_env_var() {
    let _guard = ENV_MUTEX.lock().unwrap();
    let path = write_temp_config("urltrim_env_only_config.toml", "max_length = 44\n");
    // SAFETY: guarded by mutex.
    unsafe { std::env::set_var(CONFIG_ENV_VAR, &path) };

    let config = Config::load(None).unwrap();
    assert_eq!(config.max_length, 44);

    // SAFETY: guarded by mutex.
    unsafe { std::env::remove_var(CONFIG_ENV_VAR) };
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_error_messages_name_the_field() {
    let err = ConfigError::InvalidValue {
        field: "max_length",
        reason: "must be at least 1".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "invalid value for 'max_length': must be at least 1"
    );
}
