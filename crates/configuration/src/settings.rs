use chrono::NaiveDate;
use core_types::Role;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section has defaults, so an empty or missing `config.toml` is valid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth: AuthSettings,
    pub storage: StorageSettings,
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub seed: SeedSettings,
}

/// The mock identity provider's credential list.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    pub users: Vec<CredentialEntry>,
}

/// A single `[[auth.users]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialEntry {
    pub id: u32,
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// Where the session record is persisted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory of the file backend. Ignored by the memory backend.
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local, forgotten on exit.
    Memory,
    /// One JSON file per key under `storage.dir`.
    #[default]
    File,
}

/// Contains parameters for the HTTP API.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
}

impl ServerSettings {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive. `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

/// Controls the generated historical series of the seed strategies.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Number of days of history before the anchor date.
    pub history_days: u32,
    /// Seed of the random walk; the same seed always gives the same series.
    pub rng_seed: u64,
    /// Last date of every series. Defaults to today.
    pub anchor_date: Option<NaiveDate>,
}

// --- Default Implementations ---

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            users: vec![
                CredentialEntry {
                    id: 1,
                    username: "muser".to_string(),
                    password: "muser".to_string(),
                    role: Role::User,
                },
                CredentialEntry {
                    id: 2,
                    username: "mvc".to_string(),
                    password: "mvc".to_string(),
                    role: Role::Admin,
                },
            ],
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            dir: PathBuf::from(".strategy-hub"),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 5000,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Default for SeedSettings {
    fn default() -> Self {
        Self {
            history_days: 365,
            rng_seed: 20230405,
            anchor_date: None,
        }
    }
}
