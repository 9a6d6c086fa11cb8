use std::collections::HashMap;
use std::env;
use tracing::info;

use crate::config::{ConfigError, ProxyConfig};

pub const SECRET_ARN_VAR: &str = "BLOCKCHAIR_SECRET_ARN";

/// Load secrets from AWS Secrets Manager
///
/// If BLOCKCHAIR_SECRET_ARN is set, it:
/// 1. Fetches the secret from AWS Secrets Manager
/// 2. Parses the JSON secret string (an object of string values)
/// 3. Returns the key-value pairs
///
/// Called once during Lambda cold start / server startup, before the first request.
pub async fn load_secrets_from_manager() -> Result<HashMap<String, String>, ConfigError> {
    let secret_arn = match env::var(SECRET_ARN_VAR) {
        Ok(arn) => arn,
        Err(_) => {
            info!("{} not set, skipping secrets loading", SECRET_ARN_VAR);
            return Ok(HashMap::new());
        }
    };

    info!("Loading secrets from AWS Secrets Manager: {}", secret_arn);

    let config = aws_config::load_from_env().await;
    let client = aws_sdk_secretsmanager::Client::new(&config);

    let response = client
        .get_secret_value()
        .secret_id(&secret_arn)
        .send()
        .await
        .map_err(|e| ConfigError::Secrets(format!("Failed to fetch secret from Secrets Manager: {}", e)))?;

    let secret_string = response
        .secret_string()
        .ok_or_else(|| ConfigError::Secrets("Secret does not contain a string value".to_string()))?;

    let secrets = parse_secret_string(secret_string)?;
    info!("Loaded {} secrets from Secrets Manager", secrets.len());
    Ok(secrets)
}

pub fn parse_secret_string(secret_string: &str) -> Result<HashMap<String, String>, ConfigError> {
    serde_json::from_str(secret_string)
        .map_err(|e| ConfigError::Secrets(format!("Failed to parse secret JSON: {}", e)))
}

/// Resolve the proxy configuration: secrets first, then the process environment
pub async fn load_config() -> Result<ProxyConfig, ConfigError> {
    dotenv::dotenv().ok();
    let secrets = load_secrets_from_manager().await?;
    config_from_layers(&secrets, |key| env::var(key).ok())
}

pub fn config_from_layers<F>(secrets: &HashMap<String, String>, env_lookup: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    ProxyConfig::from_lookup(|key| secrets.get(key).cloned().or_else(|| env_lookup(key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_secret_string() {
        let secrets = parse_secret_string(r#"{"BLOCKCHAIR_API_KEY": "abc", "PORT": "8080"}"#).unwrap();
        assert_eq!(secrets.get("BLOCKCHAIR_API_KEY").map(String::as_str), Some("abc"));
        assert_eq!(secrets.len(), 2);
    }

    #[test]
    fn test_parse_secret_string_rejects_non_object() {
        let err = parse_secret_string("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("Failed to parse secret JSON"));
    }

    #[test]
    fn test_secrets_take_precedence_over_environment() {
        let secrets = parse_secret_string(r#"{"BLOCKCHAIR_API_KEY": "from-secret"}"#).unwrap();
        let config = config_from_layers(&secrets, |key| match key {
            "BLOCKCHAIR_API_KEY" => Some("from-env".to_string()),
            "PORT" => Some("4000".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.api_key.as_deref(), Some("from-secret"));
        assert_eq!(config.port, 4000);
    }

    #[test]
    fn test_missing_key_everywhere() {
        let config = config_from_layers(&HashMap::new(), |_| None).unwrap();
        assert!(config.api_key.is_none());
    }
}
