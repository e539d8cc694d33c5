//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Medical-center import configuration.
    #[serde(default)]
    pub import: ImportConfig,
    /// Outbound mail configuration (contact form). Optional; the contact
    /// endpoint reports a configuration error when absent.
    #[serde(default)]
    pub mail: Option<MailConfig>,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public URL of the portal.
    pub public_url: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Configuration for the medical-center import job and the shared
/// administrative API key that protects write endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// URL of the external locations feed.
    #[serde(default = "default_import_source_url")]
    pub source_url: String,
    /// Upper bound on the import fetch, in seconds. The fetch is aborted
    /// past this bound and surfaced as an upstream error; no retry.
    #[serde(default = "default_import_timeout_secs")]
    pub timeout_secs: u64,
    /// Shared secret required in the `X-Api-Key` header of protected
    /// endpoints. When unset, those endpoints report a configuration
    /// error instead of an authorization failure.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_url: default_import_source_url(),
            timeout_secs: default_import_timeout_secs(),
            api_key: None,
        }
    }
}

/// SMTP relay configuration for the contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// SMTP relay hostname.
    pub smtp_host: String,
    /// SMTP username.
    pub smtp_username: String,
    /// SMTP password.
    pub smtp_password: String,
    /// Sender address for relayed messages.
    pub from_address: String,
    /// Foundation inbox receiving contact submissions.
    pub to_address: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

fn default_import_source_url() -> String {
    "https://chorobymozgu.pl/api/map/locations".to_string()
}

const fn default_import_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `FUNDACJA_ENV`)
    /// 3. Environment variables with `FUNDACJA_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("FUNDACJA_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("FUNDACJA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("FUNDACJA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
