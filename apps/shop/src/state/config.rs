//! # Configuration State
//!
//! Where the shop service lives and how long to wait for it.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TRASUA_*`)
//! 2. A `.env` file in the working directory
//! 3. Defaults for the selected environment (this file)
//!
//! Read once at startup; nothing mutates it afterwards.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use trasua_api::ApiConfig;
use trasua_core::Money;

const PRODUCTION_API_URL: &str = "https://trasua-sever.onrender.com/api";
const PRODUCTION_SERVER_URL: &str = "https://trasua-sever.onrender.com";
const DEVELOPMENT_API_URL: &str = "http://localhost:5000/api";
const DEVELOPMENT_SERVER_URL: &str = "http://localhost:5000";

/// Deployment the shell talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    pub environment: Environment,

    /// REST base URL, including `/api`.
    pub api_base_url: String,

    /// Host that serves uploaded product images.
    pub server_base_url: String,

    /// Per-request timeout in seconds.
    /// Default: 30
    pub http_timeout_secs: u64,
}

impl Default for ConfigState {
    /// Development defaults: a shop service on localhost:5000.
    fn default() -> Self {
        ConfigState::for_environment(Environment::Development)
    }
}

impl ConfigState {
    pub fn for_environment(environment: Environment) -> Self {
        let (api_base_url, server_base_url) = match environment {
            Environment::Development => (DEVELOPMENT_API_URL, DEVELOPMENT_SERVER_URL),
            Environment::Production => (PRODUCTION_API_URL, PRODUCTION_SERVER_URL),
        };

        ConfigState {
            environment,
            api_base_url: api_base_url.to_string(),
            server_base_url: server_base_url.to_string(),
            http_timeout_secs: 30,
        }
    }

    /// Creates a ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TRASUA_ENV`: `development` (default) or `production`
    /// - `TRASUA_API_BASE_URL`: Override REST base URL
    /// - `TRASUA_SERVER_BASE_URL`: Override image host
    /// - `TRASUA_HTTP_TIMEOUT_SECS`: Override request timeout
    pub fn from_env() -> Self {
        // A missing .env is normal.
        let _ = dotenvy::dotenv();
        ConfigState::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`] over any key lookup.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let environment = match lookup("TRASUA_ENV") {
            Some(value) => value.parse().unwrap_or_else(|e: String| {
                warn!(error = %e, "Ignoring TRASUA_ENV");
                Environment::default()
            }),
            None => Environment::default(),
        };

        let mut config = ConfigState::for_environment(environment);

        if let Some(url) = lookup("TRASUA_API_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.api_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(url) = lookup("TRASUA_SERVER_BASE_URL").filter(|u| !u.trim().is_empty()) {
            config.server_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(secs) = lookup("TRASUA_HTTP_TIMEOUT_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout_secs = secs,
                _ => warn!(value = %secs, "Ignoring TRASUA_HTTP_TIMEOUT_SECS"),
            }
        }

        config
    }

    /// Client settings for `trasua-api`.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_base_url.clone())
            .timeout(Duration::from_secs(self.http_timeout_secs))
    }

    /// Resolves a product image path to something displayable.
    ///
    /// ## Rules
    /// - empty → empty
    /// - `data:image/...` and `http...` → unchanged
    /// - `/uploads/...` → server URL + path
    /// - anything else → server URL + `/` + path
    pub fn image_url(&self, path: Option<&str>) -> String {
        let path = match path.map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => return String::new(),
        };

        if path.starts_with("data:image/") || path.starts_with("http") {
            return path.to_string();
        }

        if path.starts_with("/uploads/") {
            return format!("{}{}", self.server_base_url, path);
        }

        format!("{}/{}", self.server_base_url, path.trim_start_matches('/'))
    }

    /// Formats an amount the way the storefront shows prices.
    ///
    /// ## Example
    /// ```rust
    /// use trasua_core::Money;
    /// use trasua_shop::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_dong(25_000)), "25.000 ₫");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_development() {
        let config = ConfigState::from_lookup(lookup_from(&[]));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.http_timeout_secs, 30);
    }

    #[test]
    fn test_production_defaults() {
        let config = ConfigState::from_lookup(lookup_from(&[("TRASUA_ENV", "production")]));
        assert_eq!(config.api_base_url, "https://trasua-sever.onrender.com/api");
        assert_eq!(config.server_base_url, "https://trasua-sever.onrender.com");
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = ConfigState::from_lookup(lookup_from(&[
            ("TRASUA_ENV", "staging"),
            ("TRASUA_API_BASE_URL", "http://10.0.0.5:5000/api/"),
            ("TRASUA_HTTP_TIMEOUT_SECS", "abc"),
        ]));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.api_base_url, "http://10.0.0.5:5000/api");
        assert_eq!(config.http_timeout_secs, 30);

        let config = ConfigState::from_lookup(lookup_from(&[("TRASUA_HTTP_TIMEOUT_SECS", "5")]));
        assert_eq!(config.api_config().timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_image_url() {
        let config = ConfigState::for_environment(Environment::Production);
        assert_eq!(config.image_url(None), "");
        assert_eq!(config.image_url(Some("  ")), "");
        assert_eq!(
            config.image_url(Some("data:image/png;base64,AAA")),
            "data:image/png;base64,AAA"
        );
        assert_eq!(
            config.image_url(Some("https://cdn.example.com/a.jpg")),
            "https://cdn.example.com/a.jpg"
        );
        assert_eq!(
            config.image_url(Some("/uploads/ts.jpg")),
            "https://trasua-sever.onrender.com/uploads/ts.jpg"
        );
        assert_eq!(
            config.image_url(Some("//images/ts.jpg")),
            "https://trasua-sever.onrender.com/images/ts.jpg"
        );
    }

    #[test]
    fn test_format_currency() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_dong(1_250_000)), "1.250.000 ₫");
        assert_eq!(config.format_currency(Money::zero()), "0 ₫");
    }
}
