use crate::error::ConfigError;
use std::collections::HashSet;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;
pub mod telemetry;

// Re-export the core types to provide a clean public API.
pub use settings::{
    AuthSettings, Config, CredentialEntry, LoggingSettings, SeedSettings, ServerSettings,
    StorageBackend, StorageSettings,
};
pub use telemetry::init_tracing;

/// The file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix of environment overrides, e.g. `STRATEGY_HUB__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "STRATEGY_HUB";

/// Loads the application configuration.
///
/// Sources, later ones winning: built-in defaults, the TOML file (`path`, which must
/// exist, or an optional `config.toml`), then `STRATEGY_HUB__*` environment variables.
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    validate(&config)?;

    Ok(config)
}

/// Rejects configurations the rest of the system cannot work with.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let users = &config.auth.users;
    if users.is_empty() {
        return Err(ConfigError::ValidationError(
            "auth.users must contain at least one credential".to_string(),
        ));
    }

    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for entry in users {
        if !ids.insert(entry.id) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate credential id {}",
                entry.id
            )));
        }
        if entry.username.is_empty() || !names.insert(entry.username.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "empty or duplicate credential username '{}'",
                entry.username
            )));
        }
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port must not be 0".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::Role;
    use std::fs;
    use std::path::PathBuf;

    fn write_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("strategy-hub-{}.toml", uuid::Uuid::new_v4()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        validate(&config).unwrap();
        assert_eq!(config.auth.users.len(), 2);
        assert_eq!(config.auth.users[1].role, Role::Admin);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.seed.history_days, 365);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = write_config(
            r#"
            [server]
            port = 8080

            [storage]
            backend = "memory"

            [seed]
            anchor_date = "2024-04-05"
            "#,
        );
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(
            config.seed.anchor_date,
            chrono::NaiveDate::from_ymd_opt(2024, 4, 5)
        );
        assert_eq!(config.auth.users.len(), 2);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_custom_credentials() {
        let path = write_config(
            r#"
            [[auth.users]]
            id = 10
            username = "ops"
            password = "hunter2"
            role = "admin"
            "#,
        );
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(
            config.auth.users,
            vec![CredentialEntry {
                id: 10,
                username: "ops".to_string(),
                password: "hunter2".to_string(),
                role: Role::Admin,
            }]
        );
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let missing = std::env::temp_dir().join("strategy-hub-does-not-exist.toml");
        assert!(matches!(load_config(Some(&missing)), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_validation_rejects_duplicates_and_empty_lists() {
        let mut config = Config::default();
        config.auth.users[1].id = 1;
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError(_))));

        let mut config = Config::default();
        config.auth.users[1].username = "muser".to_string();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.auth.users.clear();
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.server.port = 0;
        assert!(validate(&config).is_err());
    }
}
