//! Hosted backend (auth + database) configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Value shipped in `.env.example` for the project URL.
pub const PLACEHOLDER_URL: &str = "your_supabase_project_url";

/// Value shipped in `.env.example` for the anon key.
pub const PLACEHOLDER_ANON_KEY: &str = "your_supabase_anon_key";

fn default_profiles_table() -> String {
    "profiles".to_string()
}

/// Default HTTP timeout in seconds.
const fn default_request_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL (e.g., `https://abcdefgh.supabase.co`).
    #[serde(default)]
    pub url: String,

    /// Public anon key sent as `apikey` on every request.
    #[serde(default)]
    pub anon_key: String,

    /// Table holding one profile row per auth identity.
    #[serde(default = "default_profiles_table")]
    pub profiles_table: String,

    /// Public site URL used to build magic-link and OAuth redirects.
    #[serde(default)]
    pub site_url: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            profiles_table: default_profiles_table(),
            site_url: String::new(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// Check that both credentials are present and not the template placeholders.
    ///
    /// When this is false the app runs with auth disabled.
    pub fn is_configured(&self) -> bool {
        let url = self.url.trim();
        let key = self.anon_key.trim();
        !url.is_empty() && url != PLACEHOLDER_URL && !key.is_empty() && key != PLACEHOLDER_ANON_KEY
    }

    /// Like [`is_configured`](Self::is_configured), but also checks the URL scheme.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when credentials are missing, or
    /// `ConfigError::InvalidValue` when the URL is not http(s).
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        if !self.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "backend".into(),
            });
        }
        let url = self.url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "backend.url".into(),
                reason: format!("expected an http(s) URL, got '{url}'"),
            });
        }
        Ok(())
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    /// Auth API root (`{url}/auth/v1`).
    pub fn auth_url(&self) -> String {
        format!("{}/auth/v1", self.base_url())
    }

    /// Row API root (`{url}/rest/v1`).
    pub fn rest_url(&self) -> String {
        format!("{}/rest/v1", self.base_url())
    }

    /// Where email links and OAuth providers send the user back to.
    ///
    /// Falls back to the project URL when no site URL is configured.
    pub fn callback_url(&self) -> String {
        let site = self.site_url.trim().trim_end_matches('/');
        let root = if site.is_empty() { self.base_url() } else { site };
        format!("{root}/auth/callback")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> BackendConfig {
        BackendConfig {
            url: "https://abcdefgh.supabase.co/".into(),
            anon_key: "eyJhbGciOiJIUzI1NiJ9.anon".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_is_not_configured() {
        let config = BackendConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.profiles_table, "profiles");
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn configured_when_both_credentials_set() {
        assert!(configured().is_configured());
    }

    #[test]
    fn placeholder_url_is_not_configured() {
        let config = BackendConfig {
            url: PLACEHOLDER_URL.into(),
            ..configured()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn placeholder_key_is_not_configured() {
        let config = BackendConfig {
            anon_key: PLACEHOLDER_ANON_KEY.into(),
            ..configured()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn not_configured_when_missing_key() {
        let config = BackendConfig {
            anon_key: "   ".into(),
            ..configured()
        };
        assert!(!config.is_configured());
    }

    #[test]
    fn require_configured_rejects_non_http_url() {
        let config = BackendConfig {
            url: "ftp://example.com".into(),
            ..configured()
        };
        let err = config.require_configured().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(configured().require_configured().is_ok());
    }

    #[test]
    fn endpoint_roots_strip_trailing_slash() {
        let config = configured();
        assert_eq!(config.auth_url(), "https://abcdefgh.supabase.co/auth/v1");
        assert_eq!(config.rest_url(), "https://abcdefgh.supabase.co/rest/v1");
    }

    #[test]
    fn callback_url_prefers_site_url() {
        let mut config = configured();
        assert_eq!(
            config.callback_url(),
            "https://abcdefgh.supabase.co/auth/callback"
        );
        config.site_url = "http://localhost:3000/".into();
        assert_eq!(config.callback_url(), "http://localhost:3000/auth/callback");
    }
}
