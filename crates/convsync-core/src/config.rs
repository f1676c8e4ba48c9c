//! Configuration types for convsync.
//!
//! [`Config::load`] layers, lowest to highest precedence: the embedded
//! defaults, a TOML file (`./config.toml` unless a path is given), and
//! `CONVSYNC__SECTION__KEY` environment variables. [`Config::defaults`]
//! returns the embedded defaults without touching the filesystem (useful in
//! tests).
//!
//! Loading never checks that credentials are present; call
//! [`Config::validate_database`] and [`Config::validate_upload`] before any
//! data access so that a bad configuration fails the run up front.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::types::PurchaseKind;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[graph]
base_url          = "https://graph.facebook.com/v12.0"
access_token      = ""
conversion_token  = ""
pixel_id          = ""
offline_event_set_id = ""
upload_tag_prefix = "rgp_upload"
location          = ""

[database]
user     = ""
password = ""
address  = "127.0.0.1:3306"
name     = ""

[run]
days_ago          = 1
currency          = "CAD"
online_phone_plus = false

[source]
excluded_customer_id = 1008
offline_type_code    = "POS"
online_type_code     = "ONLINE"
"#;

const DEFAULT_PATH: &str = "config.toml";
const ENV_PREFIX: &str = "CONVSYNC";
const DEFAULT_MYSQL_PORT: u16 = 3306;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("missing required configuration value `{0}`")]
    Missing(&'static str),
    #[error("invalid configuration value `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub graph: GraphConfig,
    pub database: DatabaseConfig,
    pub run: RunConfig,
    pub source: SourceConfig,
}

/// `[graph]` section: upload destinations and credentials.
#[derive(Clone, Deserialize)]
pub struct GraphConfig {
    pub base_url: String,
    /// Token for the offline event set upload.
    pub access_token: String,
    /// Token for the pixel conversion upload.
    pub conversion_token: String,
    pub pixel_id: String,
    pub offline_event_set_id: String,
    pub upload_tag_prefix: String,
    /// Store location code, embedded in offline upload tags.
    pub location: String,
}

impl GraphConfig {
    /// `<prefix>_<location>_<date>`.
    pub fn upload_tag(&self, date: &str) -> String {
        format!("{}_{}_{}", self.upload_tag_prefix, self.location, date)
    }
}

impl std::fmt::Debug for GraphConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .field("conversion_token", &"[REDACTED]")
            .field("pixel_id", &self.pixel_id)
            .field("offline_event_set_id", &self.offline_event_set_id)
            .field("upload_tag_prefix", &self.upload_tag_prefix)
            .field("location", &self.location)
            .finish()
    }
}

/// `[database]` section.
#[derive(Clone, Deserialize)]
pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    /// `host:port`, port optional.
    pub address: String,
    pub name: String,
}

impl DatabaseConfig {
    /// Split `address` into host and port, defaulting the port to 3306.
    pub fn host_port(&self) -> Result<(String, u16), ConfigError> {
        match self.address.rsplit_once(':') {
            None => Ok((self.address.clone(), DEFAULT_MYSQL_PORT)),
            Some((host, port)) => {
                let port = port.parse().map_err(|_| ConfigError::Invalid {
                    key: "database.address",
                    reason: format!("bad port in {:?}", self.address),
                })?;
                Ok((host.to_string(), port))
            }
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("address", &self.address)
            .field("name", &self.name)
            .finish()
    }
}

/// `[run]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// How many days back the reported day is. `1` reports yesterday.
    pub days_ago: u32,
    pub currency: String,
    /// Prefix 11-digit online phone numbers with `+` before hashing.
    pub online_phone_plus: bool,
}

/// `[source]` section: server-side row filters.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub excluded_customer_id: i64,
    pub offline_type_code: String,
    pub online_type_code: String,
}

impl SourceConfig {
    /// Invoice type code for `kind`; an empty code disables the filter.
    pub fn type_code(&self, kind: PurchaseKind) -> Option<&str> {
        let code = match kind {
            PurchaseKind::Offline => &self.offline_type_code,
            PurchaseKind::Online => &self.online_type_code,
        };
        (!code.is_empty()).then_some(code.as_str())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `path` (or `./config.toml`) and the environment, layered on
    /// top of the built-in defaults. An explicit path must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_PATH), false),
        };

        if required && !path.exists() {
            return Err(ConfigError::NotFound(path));
        }

        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                // Values stay strings until deserialization so ids like
                // `007` keep their leading zeros.
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Parse a TOML document layered over the defaults. No file or
    /// environment access.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Check everything the record source needs.
    pub fn validate_database(&self) -> Result<(), ConfigError> {
        require("database.user", &self.database.user)?;
        require("database.name", &self.database.name)?;
        require("database.address", &self.database.address)?;
        self.database.host_port()?;
        require("run.currency", &self.run.currency)
    }

    /// Check everything the uploader needs for the given families.
    pub fn validate_upload(&self, kinds: &[PurchaseKind]) -> Result<(), ConfigError> {
        require("graph.base_url", &self.graph.base_url)?;
        for kind in kinds {
            match kind {
                PurchaseKind::Offline => {
                    require("graph.access_token", &self.graph.access_token)?;
                    require("graph.offline_event_set_id", &self.graph.offline_event_set_id)?;
                    require("graph.location", &self.graph.location)?;
                }
                PurchaseKind::Online => {
                    require("graph.conversion_token", &self.graph.conversion_token)?;
                    require("graph.pixel_id", &self.graph.pixel_id)?;
                }
            }
        }
        Ok(())
    }
}

fn require(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Missing(key));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
