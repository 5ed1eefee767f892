//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

fn file_with_keys() -> ConfigFile {
    ConfigFile {
        api_keys: Some(ApiKeysSection {
            development: Some("dev-key".to_string()),
            production: Some("prod-key".to_string()),
        }),
        ..ConfigFile::default()
    }
}

// ===== Paths =====

#[test]
fn default_config_path_contains_gifscroll_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("gifscroll") && path_str.ends_with("config.toml"),
        "Path should contain 'gifscroll' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

// ===== Parsing =====

#[test]
fn load_config_file_parses_valid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("gifscroll_test_config.toml");

    let toml_content = r#"
environment = "production"
endpoint = "https://search.example/v1/gifs/search"
page_size = 25
request_timeout_secs = 3

[api_keys]
development = "dev-key"
production = "prod-key"
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    let config = result
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.environment, Some(Environment::Production));
    assert_eq!(
        config.endpoint.as_deref(),
        Some("https://search.example/v1/gifs/search")
    );
    assert_eq!(config.page_size, Some(25));
    assert_eq!(config.request_timeout_secs, Some(3));
    let keys = config.api_keys.expect("api_keys table");
    assert_eq!(keys.for_environment(Environment::Production), Some("prod-key"));
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("gifscroll_test_invalid.toml");

    fs::write(&config_path, "this is not valid TOML ][}{")
        .expect("Failed to write invalid test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }
}

#[test]
fn load_config_file_rejects_unknown_fields() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("gifscroll_test_unknown_field.toml");

    fs::write(&config_path, "theme = \"monokai\"\n").expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown keys should be rejected, got {:?}",
        result
    );
}

#[test]
fn environment_accepts_short_alias_in_toml() {
    let config: ConfigFile = toml::from_str("environment = \"prod\"").unwrap();
    assert_eq!(config.environment, Some(Environment::Production));
}

#[test]
fn environment_parse_accepts_names_and_aliases() {
    assert_eq!(Environment::parse("Production"), Some(Environment::Production));
    assert_eq!(Environment::parse(" dev "), Some(Environment::Development));
    assert_eq!(Environment::parse("staging"), None);
}

// ===== Merging =====

#[test]
fn merge_without_file_uses_defaults() {
    let resolved = merge_config(None).unwrap();
    assert_eq!(resolved, ResolvedConfig::default());
    assert_eq!(resolved.page_size.get(), 50);
    assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(resolved.api_key, None);
}

#[test]
fn merge_selects_key_for_default_environment() {
    let resolved = merge_config(Some(file_with_keys())).unwrap();
    assert_eq!(resolved.environment, Environment::Development);
    assert_eq!(resolved.api_key.as_deref(), Some("dev-key"));
}

#[test]
fn merge_selects_key_for_configured_environment() {
    let file = ConfigFile {
        environment: Some(Environment::Production),
        ..file_with_keys()
    };
    let resolved = merge_config(Some(file)).unwrap();
    assert_eq!(resolved.api_key.as_deref(), Some("prod-key"));
}

#[test]
fn merge_ignores_blank_keys() {
    let file = ConfigFile {
        api_keys: Some(ApiKeysSection {
            development: Some("   ".to_string()),
            production: None,
        }),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(file)).unwrap();
    assert_eq!(resolved.api_key, None);
}

#[test]
fn merge_rejects_zero_page_size() {
    let file = ConfigFile {
        page_size: Some(0),
        ..ConfigFile::default()
    };
    assert!(matches!(
        merge_config(Some(file)),
        Err(ConfigError::InvalidValue {
            field: "page_size",
            ..
        })
    ));
}

#[test]
fn merge_rejects_zero_request_timeout() {
    let file = ConfigFile {
        request_timeout_secs: Some(0),
        ..ConfigFile::default()
    };
    assert!(matches!(
        merge_config(Some(file)),
        Err(ConfigError::InvalidValue {
            field: "request_timeout_secs",
            ..
        })
    ));
}

#[test]
fn merge_keeps_positive_request_timeout() {
    let file = ConfigFile {
        request_timeout_secs: Some(30),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(file)).unwrap().request_timeout_secs, 30);
}

// ===== Env overrides =====

#[test]
fn env_environment_reselects_file_key() {
    let file = file_with_keys();
    let merged = merge_config(Some(file.clone())).unwrap();
    let env = EnvOverrides {
        environment: Some("production".to_string()),
        ..EnvOverrides::default()
    };

    let resolved = apply_env_overrides(merged, &env, Some(&file)).unwrap();

    assert_eq!(resolved.environment, Environment::Production);
    assert_eq!(resolved.api_key.as_deref(), Some("prod-key"));
}

#[test]
fn env_api_key_wins_over_file_key() {
    let file = file_with_keys();
    let merged = merge_config(Some(file.clone())).unwrap();
    let env = EnvOverrides {
        api_key: Some("env-key".to_string()),
        ..EnvOverrides::default()
    };

    let resolved = apply_env_overrides(merged, &env, Some(&file)).unwrap();
    assert_eq!(resolved.api_key.as_deref(), Some("env-key"));
}

#[test]
fn env_endpoint_overrides_file_endpoint() {
    let env = EnvOverrides {
        endpoint: Some("http://localhost:8080/search".to_string()),
        ..EnvOverrides::default()
    };
    let resolved = apply_env_overrides(ResolvedConfig::default(), &env, None).unwrap();
    assert_eq!(resolved.endpoint, "http://localhost:8080/search");
}

#[test]
fn env_unknown_environment_is_rejected() {
    let env = EnvOverrides {
        environment: Some("staging".to_string()),
        ..EnvOverrides::default()
    };
    let result = apply_env_overrides(ResolvedConfig::default(), &env, None);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial(env)]
fn env_overrides_read_from_process_env() {
    env::set_var(ENV_ENVIRONMENT, "prod");
    env::set_var(ENV_API_KEY, "process-key");
    env::remove_var(ENV_ENDPOINT);

    let overrides = EnvOverrides::from_process_env();

    env::remove_var(ENV_ENVIRONMENT);
    env::remove_var(ENV_API_KEY);

    assert_eq!(overrides.environment.as_deref(), Some("prod"));
    assert_eq!(overrides.api_key.as_deref(), Some("process-key"));
    assert_eq!(overrides.endpoint, None);
}

#[test]
#[serial(env)]
fn config_env_var_selects_file() {
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("gifscroll_test_env_path.toml");
    fs::write(&config_path, "page_size = 10\n").expect("Failed to write test config");

    env::set_var(ENV_CONFIG_PATH, &config_path);
    let result = load_config_with_precedence(None);
    env::remove_var(ENV_CONFIG_PATH);
    fs::remove_file(&config_path).ok();

    let config = result.unwrap().expect("file named by env var should load");
    assert_eq!(config.page_size, Some(10));
}

#[test]
#[serial(env)]
fn explicit_path_beats_config_env_var() {
    env::set_var(ENV_CONFIG_PATH, "/nonexistent/env/config.toml");
    let temp_dir = env::temp_dir();
    let config_path = temp_dir.join("gifscroll_test_explicit_path.toml");
    fs::write(&config_path, "page_size = 20\n").expect("Failed to write test config");

    let result = load_config_with_precedence(Some(config_path.clone()));
    env::remove_var(ENV_CONFIG_PATH);
    fs::remove_file(&config_path).ok();

    assert_eq!(result.unwrap().unwrap().page_size, Some(20));
}

// ===== CLI overrides =====

#[test]
fn cli_environment_beats_env_environment() {
    let file = file_with_keys();
    let env = EnvOverrides {
        environment: Some("production".to_string()),
        ..EnvOverrides::default()
    };
    let with_env =
        apply_env_overrides(merge_config(Some(file.clone())).unwrap(), &env, Some(&file)).unwrap();

    let resolved = apply_cli_overrides(
        with_env,
        Some(Environment::Development),
        None,
        &env,
        Some(&file),
    );

    assert_eq!(resolved.environment, Environment::Development);
    assert_eq!(resolved.api_key.as_deref(), Some("dev-key"));
}

#[test]
fn cli_environment_keeps_explicit_env_key() {
    let file = file_with_keys();
    let env = EnvOverrides {
        api_key: Some("env-key".to_string()),
        ..EnvOverrides::default()
    };
    let with_env =
        apply_env_overrides(merge_config(Some(file.clone())).unwrap(), &env, Some(&file)).unwrap();

    let resolved = apply_cli_overrides(
        with_env,
        Some(Environment::Production),
        None,
        &env,
        Some(&file),
    );

    assert_eq!(resolved.api_key.as_deref(), Some("env-key"));
}

#[test]
fn cli_page_size_overrides() {
    let resolved = apply_cli_overrides(
        ResolvedConfig::default(),
        None,
        Some(PageSize::new(10).unwrap()),
        &EnvOverrides::default(),
        None,
    );
    assert_eq!(resolved.page_size.get(), 10);
}

#[test]
fn require_api_key_names_environment() {
    let config = ResolvedConfig {
        environment: Environment::Production,
        ..ResolvedConfig::default()
    };
    let err = config.require_api_key().unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingApiKey {
            environment: Environment::Production
        }
    );
    assert!(err.to_string().contains("production"));
}

#[test]
fn debug_output_redacts_api_key() {
    let config = ResolvedConfig {
        api_key: Some("super-secret".to_string()),
        ..ResolvedConfig::default()
    };
    let debug = format!("{:?}", config);
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}
