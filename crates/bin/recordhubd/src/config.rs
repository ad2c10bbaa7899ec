//! Configuration loading — TOML file with environment variable overrides.
//!
//! Each service looks for `<collection>.toml` (`cars.toml`, `employees.toml`)
//! in the working directory, or the file named by `RECORDHUB_CONFIG`. Every
//! field has a sensible default so the file is optional. Environment
//! variables take precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use recordhub_domain::schema::CollectionSchema;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Upper bound on the time spent serving one request.
    pub request_timeout_secs: u64,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL. Defaults to `sqlite:<collection>.db?mode=rwc`.
    pub url: Option<String>,
    /// Maximum number of pooled connections.
    pub max_connections: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration for the service of `schema` then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load(schema: &CollectionSchema) -> Result<Self, ConfigError> {
        let path = std::env::var("RECORDHUB_CONFIG")
            .map_or_else(|_| PathBuf::from(format!("{}.toml", schema.collection)), PathBuf::from);
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("RECORDHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("RECORDHUB_PORT")
            && let Ok(port) = val.parse()
        {
            self.server.port = port;
        }
        if let Ok(val) = std::env::var("RECORDHUB_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("RECORDHUB_REQUEST_TIMEOUT_SECS")
            && let Ok(secs) = val.parse()
        {
            self.server.request_timeout_secs = secs;
        }
        if let Ok(val) = std::env::var("RECORDHUB_DATABASE_URL") {
            self.database.url = Some(val);
        }
        if let Ok(val) = std::env::var("RECORDHUB_MAX_CONNECTIONS")
            && let Ok(max) = val.parse()
        {
            self.database.max_connections = max;
        }
        if let Ok(val) = std::env::var("RECORDHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request timeout must be non-zero".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "max_connections must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format, falling back to
    /// a file named after the collection.
    #[must_use]
    pub fn database_url(&self, schema: &CollectionSchema) -> String {
        self.database
            .url
            .clone()
            .unwrap_or_else(|| format!("sqlite:{}.db?mode=rwc", schema.collection))
    }

    /// Return the per-request timeout.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout_secs: 10,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "recordhubd=info,recordhub=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
