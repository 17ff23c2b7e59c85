//! Store connection settings
//!
//! Credentials arrive from the environment and may be missing or blank.
//! Blank values are treated exactly like absent ones, so a half-filled
//! `.env` file degrades to the fallback store instead of producing requests
//! against an empty URL.

use std::fmt;
use std::time::Duration;

/// Connection settings for the remote store
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use infra_store::StoreConfig;
///
/// let config = StoreConfig::new("https://project.supabase.co")
///     .anon_key("public-anon-key")
///     .service_key("service-role-key")
///     .timeout(Duration::from_secs(10));
///
/// assert!(config.is_configured());
/// assert!(config.has_elevated_key());
/// ```
#[derive(Clone, Default)]
pub struct StoreConfig {
    /// Base URL of the store, without the `/rest/v1` suffix
    pub url: Option<String>,
    /// Public key honouring row-level security
    pub anon_key: Option<String>,
    /// Service-role key bypassing row-level security
    pub service_key: Option<String>,
    /// Per-request timeout; unset unless configured
    pub timeout: Option<Duration>,
}

impl StoreConfig {
    /// Creates a configuration for the given base URL with no keys
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: non_blank(Some(url.into())),
            anon_key: None,
            service_key: None,
            timeout: None,
        }
    }

    /// Settings that always resolve to the fallback store
    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Builds settings from raw optional values, dropping blank ones
    pub fn from_parts(
        url: Option<String>,
        anon_key: Option<String>,
        service_key: Option<String>,
    ) -> Self {
        Self {
            url: non_blank(url),
            anon_key: non_blank(anon_key),
            service_key: non_blank(service_key),
            timeout: None,
        }
    }

    /// Sets the restricted (anon) key
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = non_blank(Some(key.into()));
        self
    }

    /// Sets the elevated (service-role) key
    pub fn service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = non_blank(Some(key.into()));
        self
    }

    /// Sets the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// True when both the URL and the restricted key are present
    pub fn is_configured(&self) -> bool {
        self.url.is_some() && self.anon_key.is_some()
    }

    /// True when the URL and the elevated key are present
    pub fn has_elevated_key(&self) -> bool {
        self.url.is_some() && self.service_key.is_some()
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &redact(&self.anon_key))
            .field("service_key", &redact(&self.service_key))
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "<redacted>"
    } else {
        "<unset>"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("https://store.test")
            .anon_key("anon")
            .timeout(Duration::from_secs(5));

        assert_eq!(config.url.as_deref(), Some("https://store.test"));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert!(config.is_configured());
        assert!(!config.has_elevated_key());
    }

    #[test]
    fn test_no_timeout_unless_set() {
        assert_eq!(StoreConfig::new("https://store.test").timeout, None);
        let parts = StoreConfig::from_parts(
            Some("https://store.test".to_string()),
            Some("anon".to_string()),
            None,
        );
        assert_eq!(parts.timeout, None);
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        let config = StoreConfig::from_parts(
            Some("  ".to_string()),
            Some("anon".to_string()),
            Some(String::new()),
        );

        assert_eq!(config.url, None);
        assert_eq!(config.service_key, None);
        assert!(!config.is_configured());
    }

    #[test]
    fn test_debug_never_prints_keys() {
        let config = StoreConfig::new("https://store.test")
            .anon_key("anon-secret")
            .service_key("service-secret");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("anon-secret"));
        assert!(!rendered.contains("service-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
