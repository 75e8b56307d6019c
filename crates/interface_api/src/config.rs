//! API configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! `hotel-pos.toml` (or the file named by `HOTEL_CONFIG`), then environment
//! variables such as `HOTEL_SERVER__PORT=9090` or
//! `HOTEL_STORAGE__BACKEND=memory`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Timezone};
use domain_billing::{BillingConfig, DEFAULT_RECEIPT_WIDTH};
use domain_identity::IdentityConfig;
use infra_db::{DatabaseConfig, StorageBackend};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "hotel-pos";

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
    pub billing: BillingSettings,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding the database file; created on first start
    pub data_dir: PathBuf,
    pub database_file: String,
    pub max_connections: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            data_dir: PathBuf::from("data"),
            database_file: "hotel_pos.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
    pub default_admin_username: String,
    pub default_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let identity = IdentityConfig::default();
        Self {
            jwt_secret: "change-me-in-production".to_string(),
            token_ttl_secs: 8 * 3600,
            default_admin_username: identity.default_admin_username,
            default_admin_password: identity.default_admin_password,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("default_admin_username", &self.default_admin_username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingSettings {
    pub currency: Currency,
    pub timezone: Timezone,
    pub hotel_name: String,
    pub receipt_width: usize,
    pub enforce_availability: bool,
}

impl Default for BillingSettings {
    fn default() -> Self {
        let billing = BillingConfig::default();
        Self {
            currency: billing.currency,
            timezone: billing.timezone,
            hotel_name: billing.hotel_name,
            receipt_width: DEFAULT_RECEIPT_WIDTH,
            enforce_availability: billing.enforce_availability,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads defaults, the optional config file and `HOTEL_*` variables
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var("HOTEL_CONFIG").ok().map(PathBuf::from);
        Self::load_from(file.as_deref())
    }

    /// Like [`AppConfig::load`] with an explicit config file
    pub fn load_from(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: AppConfig = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(file_source)
            .add_source(
                Environment::with_prefix("HOTEL")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the services cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message("auth.jwt_secret must not be empty".to_string()));
        }
        if self.auth.token_ttl_secs == 0 {
            return Err(ConfigError::Message("auth.token_ttl_secs must be positive".to_string()));
        }
        if self.storage.database_file.trim().is_empty() {
            return Err(ConfigError::Message("storage.database_file must not be empty".to_string()));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::in_dir(&self.storage.data_dir, &self.storage.database_file)
            .max_connections(self.storage.max_connections)
    }

    pub fn billing_config(&self) -> BillingConfig {
        BillingConfig {
            currency: self.billing.currency,
            timezone: self.billing.timezone,
            hotel_name: self.billing.hotel_name.clone(),
            receipt_width: self.billing.receipt_width,
            enforce_availability: self.billing.enforce_availability,
        }
    }

    pub fn identity_config(&self) -> IdentityConfig {
        IdentityConfig {
            default_admin_username: self.auth.default_admin_username.clone(),
            default_admin_password: self.auth.default_admin_password.clone(),
        }
    }
}
