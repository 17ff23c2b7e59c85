//! API configuration
//!
//! Every value comes from `API_`-prefixed environment variables (after an
//! optional `.env` is loaded by the binary). Store and admin settings are
//! optional: without them the server still boots and degrades.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use infra_store::StoreConfig;

/// API configuration
#[derive(Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Log level
    pub log_level: String,
    /// Base URL of the hosted store
    pub store_url: Option<String>,
    /// Restricted (anon) store key
    pub store_anon_key: Option<String>,
    /// Elevated (service-role) store key
    pub store_service_key: Option<String>,
    /// Per-request store timeout in seconds
    pub store_timeout_secs: Option<u64>,
    /// Bootstrap admin email
    pub admin_email: Option<String>,
    /// Bootstrap admin password, hashed before it is stored
    pub admin_password: Option<String>,
    /// Display name for the bootstrap admin
    pub admin_name: String,
}

/// The admin account the bootstrap endpoint writes
#[derive(Clone)]
pub struct AdminCredential {
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            store_url: None,
            store_anon_key: None,
            store_service_key: None,
            store_timeout_secs: None,
            admin_email: None,
            admin_password: None,
            admin_name: "Administrator".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = ApiConfig::default();
        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("admin_name", defaults.admin_name)?
            .add_source(config::Environment::with_prefix("API"))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Store settings; blank values count as missing
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::from_parts(
            self.store_url.clone(),
            self.store_anon_key.clone(),
            self.store_service_key.clone(),
        );
        match self.store_timeout_secs {
            Some(secs) => config.timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// The bootstrap credential, if both email and password are set
    pub fn admin_credential(&self) -> Option<AdminCredential> {
        let email = non_blank(&self.admin_email)?;
        let password = non_blank(&self.admin_password)?;
        Some(AdminCredential {
            email,
            password,
            name: self.admin_name.trim().to_string(),
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn secret(value: &Option<String>) -> &'static str {
    match value {
        Some(_) => "<redacted>",
        None => "<unset>",
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("store_url", &self.store_url)
            .field("store_anon_key", &secret(&self.store_anon_key))
            .field("store_service_key", &secret(&self.store_service_key))
            .field("store_timeout_secs", &self.store_timeout_secs)
            .field("admin_email", &self.admin_email)
            .field("admin_password", &secret(&self.admin_password))
            .field("admin_name", &self.admin_name)
            .finish()
    }
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .finish()
    }
}
