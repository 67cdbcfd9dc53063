//! # Service Configuration
//!
//! Layered configuration for the orders API.
//!
//! ## Load Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Configuration Layers                               │
//! │                                                                         │
//! │  1. Built-in defaults            127.0.0.1:8000, <data dir>/bistro.db  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. TOML file (optional)         --config / BISTRO_CONFIG /            │
//! │       │                          <config dir>/bistro.toml               │
//! │       ▼                                                                 │
//! │  3. Environment overrides        BISTRO_HOST, BISTRO_PORT,             │
//! │       │                          BISTRO_DB_PATH,                        │
//! │       │                          BISTRO_DB_MAX_CONNECTIONS              │
//! │       ▼                                                                 │
//! │  4. validate()                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example File
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! path = "/var/lib/bistro/bistro.db"
//! max_connections = 8
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "BISTRO_CONFIG";

const HOST_ENV: &str = "BISTRO_HOST";
const PORT_ENV: &str = "BISTRO_PORT";
const DB_PATH_ENV: &str = "BISTRO_DB_PATH";
const DB_MAX_CONNECTIONS_ENV: &str = "BISTRO_DB_MAX_CONNECTIONS";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// Sections
// =============================================================================

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// SQLite settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file, or `:memory:` for a throwaway database.
    #[serde(default = "default_db_path")]
    pub path: PathBuf,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// Platform data directory, falling back to the working directory.
///
/// - **Linux**: `~/.local/share/bistro/bistro.db`
/// - **macOS**: `~/Library/Application Support/com.bistro.bistro/bistro.db`
fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("com", "bistro", "bistro")
        .map(|dirs| dirs.data_dir().join("bistro.db"))
        .unwrap_or_else(|| PathBuf::from("bistro.db"))
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub database: DatabaseSettings,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// The file is looked up at `config_path`, then `BISTRO_CONFIG`, then
    /// the platform config directory. A missing file means defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = config_path
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        Self::load_with(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::load`] with an explicit file and variable source.
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading config from file");
                let contents =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                        path: path.to_path_buf(),
                        source,
                    })?;
                toml::from_str(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Applies `BISTRO_*` overrides. Unparseable numbers are ignored.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(host) = lookup(HOST_ENV) {
            debug!(host = %host, "Overriding host from environment");
            self.server.host = host;
        }

        if let Some(port) = lookup(PORT_ENV) {
            match port.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!(value = %port, "Ignoring invalid {}", PORT_ENV),
            }
        }

        if let Some(path) = lookup(DB_PATH_ENV) {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup(DB_MAX_CONNECTIONS_ENV) {
            match max.trim().parse() {
                Ok(max) => self.database.max_connections = max,
                Err(_) => warn!(value = %max, "Ignoring invalid {}", DB_MAX_CONNECTIONS_ENV),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host must not be empty".into()));
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("database.path must not be empty".into()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Database pool settings derived from this configuration.
    pub fn db_config(&self) -> bistro_db::DbConfig {
        if self.database.path == Path::new(":memory:") {
            return bistro_db::DbConfig::in_memory();
        }
        bistro_db::DbConfig::new(&self.database.path).max_connections(self.database.max_connections)
    }

    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "bistro", "bistro")
            .map(|dirs| dirs.config_dir().join("bistro.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::load_with(None, no_env).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.path.ends_with("bistro.db"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = AppConfig::load_with(Some(&path), no_env).unwrap();
        assert_eq!(config.server, ServerSettings::default());
    }

    #[test]
    fn test_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[database]\npath = \"/tmp/orders.db\""
        )
        .unwrap();

        let config = AppConfig::load_with(Some(file.path()), no_env).unwrap();
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.database.path, PathBuf::from("/tmp/orders.db"));
        assert_eq!(config.database.max_connections, 5);

        let env: HashMap<&str, &str> = [
            ("BISTRO_PORT", "9100"),
            ("BISTRO_DB_MAX_CONNECTIONS", "not-a-number"),
        ]
        .into_iter()
        .collect();
        let config = AppConfig::load_with(Some(file.path()), |key| {
            env.get(key).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = AppConfig::load_with(Some(file.path()), no_env).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.database.max_connections = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.server.host = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_memory_path_selects_in_memory_pool() {
        let mut config = AppConfig::default();
        config.database.path = PathBuf::from(":memory:");
        assert!(config.db_config().is_in_memory());
    }
}
