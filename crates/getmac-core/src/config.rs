//! Configuration for GetMac clients.
//!
//! A client is built from an ordered list of [`ClientOption`]s applied over
//! the defaults. [`ClientSettings`] is the loadable, validated form a program
//! can keep in its own configuration file and turn into options.

use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use serde::Deserialize;
use validator::Validate;

use crate::error::{Error, Result};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.getmac.io/v1";

/// One construction option. Later options override earlier ones per field.
#[derive(Debug)]
pub enum ClientOption {
    /// API root the request paths are appended to.
    BaseUrl(String),
    /// Bearer token sent on every request.
    Token(SecretString),
    /// Underlying HTTP transport.
    HttpClient(reqwest::Client),
    /// Deadline applied to every request.
    Timeout(Duration),
}

/// Loadable client settings.
#[derive(Clone, Deserialize, Validate)]
pub struct ClientSettings {
    /// API root
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl ClientSettings {
    /// Parse settings from a JSON document and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the document is malformed or a field
    /// is out of range.
    pub fn from_json(input: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(input)
            .map_err(|e| Error::ConfigError(format!("Invalid settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings and convert them into construction options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if validation fails.
    pub fn into_options(self) -> Result<Vec<ClientOption>> {
        self.validate()?;

        let mut options = vec![ClientOption::BaseUrl(self.base_url)];
        if let Some(token) = self.token {
            options.push(ClientOption::Token(SecretString::from(token)));
        }
        if let Some(secs) = self.request_timeout_secs {
            options.push(ClientOption::Timeout(Duration::from_secs(secs)));
        }
        Ok(options)
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for ClientSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientSettings")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_settings_default() {
        let settings = ClientSettings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert!(settings.token.is_none());
        assert!(settings.request_timeout_secs.is_none());
    }

    #[test]
    fn test_settings_from_json_fills_defaults() {
        let settings = ClientSettings::from_json(r#"{"token": "abc"}"#).unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_settings_rejects_bad_url() {
        let err = ClientSettings::from_json(r#"{"base_url": "not a url"}"#).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_settings_rejects_timeout_out_of_range() {
        let settings = ClientSettings {
            request_timeout_secs: Some(0),
            ..ClientSettings::default()
        };
        assert!(matches!(settings.into_options(), Err(Error::ConfigError(_))));
    }

    #[test]
    fn test_settings_rejects_malformed_json() {
        let err = ClientSettings::from_json("{").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_into_options_order() {
        let settings = ClientSettings {
            base_url: "https://staging.getmac.io/v1".to_string(),
            token: Some("t0k".to_string()),
            request_timeout_secs: Some(15),
        };
        let options = settings.into_options().unwrap();
        assert_eq!(options.len(), 3);
        assert!(matches!(&options[0], ClientOption::BaseUrl(url) if url == "https://staging.getmac.io/v1"));
        assert!(matches!(&options[1], ClientOption::Token(token) if token.expose_secret() == "t0k"));
        assert!(matches!(options[2], ClientOption::Timeout(d) if d == Duration::from_secs(15)));
    }

    #[test]
    fn test_debug_redacts_token() {
        let settings = ClientSettings {
            token: Some("super-secret".to_string()),
            ..ClientSettings::default()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
