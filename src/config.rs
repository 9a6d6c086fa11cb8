use reqwest::Url;
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://api.blockchair.com";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid BLOCKCHAIR_BASE_URL '{value}': {reason}")]
    InvalidBaseUrl { value: String, reason: String },

    #[error("Invalid PORT '{0}'")]
    InvalidPort(String),

    #[error("Failed to load secrets: {0}")]
    Secrets(String),
}

/// Runtime configuration of the proxy
///
/// The API key is optional on purpose: a missing key is reported on every
/// request rather than preventing startup.
#[derive(Clone)]
pub struct ProxyConfig {
    pub api_key: Option<String>,
    pub base_url: Url,
    pub port: u16,
}

impl ProxyConfig {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            // The constant always parses
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            port: DEFAULT_PORT,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Build from an arbitrary key lookup, e.g. secrets layered over env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup("BLOCKCHAIR_API_KEY"));

        if let Some(base_url) = lookup("BLOCKCHAIR_BASE_URL") {
            config = config.with_base_url(&base_url)?;
        }

        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        Ok(config)
    }
}

// Keep the credential out of logs
impl fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url.as_str())
            .field("port", &self.port)
            .finish()
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidBaseUrl {
        value: value.to_string(),
        reason,
    };

    let url = Url::parse(value.trim()).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("expected an http(s) URL".to_string()));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url.as_str(), "https://api.blockchair.com/");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn test_reads_all_values() {
        let config = ProxyConfig::from_lookup(lookup(&[
            ("BLOCKCHAIR_API_KEY", "secret"),
            ("BLOCKCHAIR_BASE_URL", "http://127.0.0.1:9000"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:9000/");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_blank_api_key_is_treated_as_missing() {
        let config = ProxyConfig::from_lookup(lookup(&[("BLOCKCHAIR_API_KEY", "  ")])).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ProxyConfig::from_lookup(lookup(&[("PORT", "eighty")])),
            Err(ConfigError::InvalidPort(_))
        ));
        assert!(matches!(
            ProxyConfig::from_lookup(lookup(&[("BLOCKCHAIR_BASE_URL", "mailto:ops@example.com")])),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ProxyConfig::new(Some("super-secret".to_string()));
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
