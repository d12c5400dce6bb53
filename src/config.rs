//! Host configuration surface.
//!
//! The widget is configured by its host environment: a standalone page
//! injects a JSON object, the WordPress plugin adds an AJAX endpoint and a
//! CSRF-style nonce on top. Key spellings follow the host object
//! (`apiUrl`, `welcomeMessage`, `ajaxUrl`, `nonce`).

use serde::{Deserialize, Serialize};

use crate::error::{AmparoError, AmparoResult};

/// Default greeting seeded into the transcript at widget creation.
pub const DEFAULT_WELCOME_MESSAGE: &str = "\u{a1}Hola! Soy Amparo, la asistente virtual de la \
    Defensa P\u{fa}blica. \u{bf}En qu\u{e9} puedo ayudarte hoy?";

/// Default backend base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Configuration for one widget instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetConfig {
    /// Base URL of the assistance backend.
    pub api_url: String,
    /// Assistant greeting shown before the first user message.
    pub welcome_message: String,
    /// Alternate AJAX endpoint when hosted inside WordPress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ajax_url: Option<String>,
    /// CSRF-style token issued by the WordPress host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            ajax_url: None,
            nonce: None,
        }
    }
}

impl WidgetConfig {
    /// Create a new WidgetConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL.
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set the welcome message.
    pub fn with_welcome_message(mut self, message: impl Into<String>) -> Self {
        self.welcome_message = message.into();
        self
    }

    /// Set the WordPress AJAX endpoint.
    pub fn with_ajax_url(mut self, url: impl Into<String>) -> Self {
        self.ajax_url = Some(url.into());
        self
    }

    /// Set the WordPress nonce.
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Create config from environment variables `AMPARO_API_URL` and
    /// `AMPARO_WELCOME_MESSAGE`, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("AMPARO_API_URL") {
            config.api_url = url;
        }
        if let Ok(message) = std::env::var("AMPARO_WELCOME_MESSAGE") {
            config.welcome_message = message;
        }
        config
    }

    /// Deserialize the host-injected JSON configuration object.
    pub fn from_json(json: &str) -> AmparoResult<Self> {
        serde_json::from_str(json).map_err(|e| AmparoError::Config {
            message: format!("invalid host configuration object: {}", e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WidgetConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
        assert!(config.ajax_url.is_none());
        assert!(config.nonce.is_none());
    }

    #[test]
    fn test_builders() {
        let config = WidgetConfig::new()
            .with_api_url("https://api.example.org")
            .with_welcome_message("Hola")
            .with_ajax_url("https://site.example.org/wp-admin/admin-ajax.php")
            .with_nonce("abc123");
        assert_eq!(config.api_url, "https://api.example.org");
        assert_eq!(config.welcome_message, "Hola");
        assert!(config.ajax_url.is_some());
        assert_eq!(config.nonce.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_from_json_host_object() {
        let json = r#"{
            "apiUrl": "https://backend.example.org",
            "welcomeMessage": "Bienvenido",
            "ajaxUrl": "https://site.example.org/wp-admin/admin-ajax.php",
            "nonce": "n-1"
        }"#;
        let config = WidgetConfig::from_json(json).unwrap();
        assert_eq!(config.api_url, "https://backend.example.org");
        assert_eq!(config.welcome_message, "Bienvenido");
        assert_eq!(config.nonce.as_deref(), Some("n-1"));
    }

    #[test]
    fn test_from_json_partial_object_uses_defaults() {
        let config = WidgetConfig::from_json(r#"{"apiUrl":"https://b.example.org"}"#).unwrap();
        assert_eq!(config.api_url, "https://b.example.org");
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = WidgetConfig::from_json("not json");
        assert!(matches!(result, Err(AmparoError::Config { .. })));
    }

    #[test]
    fn test_from_env_uses_distinct_defaults() {
        // Environment variables unset in the test runner fall back cleanly
        let config = WidgetConfig::from_env();
        assert!(!config.api_url.is_empty());
        assert!(!config.welcome_message.is_empty());
    }
}
