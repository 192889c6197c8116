use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {key} has an invalid value: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Settings read once at process start.
#[derive(Clone)]
pub struct AppConfig {
    pub mongo_url: String,
    pub speech_key: String,
    pub speech_region: String,
    pub storage_account_name: String,
    /// decoded storage account key
    pub storage_account_key: Vec<u8>,
    pub queue_endpoint: String,
    pub port: u16,
    pub is_prod: bool,
    pub metrics_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let port = |key: &'static str, default: u16| -> Result<u16, ConfigError> {
            match lookup(key) {
                Some(value) => value.trim().parse::<u16>().map_err(|e| ConfigError::Invalid {
                    key,
                    reason: e.to_string(),
                }),
                None => {
                    tracing::info!("{key} not set, using default {default}");
                    Ok(default)
                }
            }
        };

        let storage_account_name = required("STORAGEACCOUNT_NAME")?;
        let storage_account_key = STANDARD
            .decode(required("STORAGEACCOUNT_KEY")?)
            .map_err(|e| ConfigError::Invalid {
                key: "STORAGEACCOUNT_KEY",
                reason: e.to_string(),
            })?;
        let queue_endpoint = lookup("STORAGEACCOUNT_QUEUE_ENDPOINT")
            .filter(|endpoint| !endpoint.trim().is_empty())
            .map(|endpoint| endpoint.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://{storage_account_name}.queue.core.windows.net"));

        Ok(Self {
            mongo_url: required("MONGO_URL")?,
            speech_key: required("SPEECH_KEY")?,
            speech_region: lookup("SPEECH_REGION")
                .map(|region| region.trim().to_string())
                .filter(|region| !region.is_empty())
                .unwrap_or_else(|| "westus".to_string()),
            storage_account_name,
            storage_account_key,
            queue_endpoint,
            port: port("PORT", 8080)?,
            is_prod: lookup("PROD").is_some_and(|value| value == "true"),
            metrics_port: port("METRICS_PORT", 9898)?,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("mongo_url", &"<redacted>")
            .field("speech_key", &"<redacted>")
            .field("speech_region", &self.speech_region)
            .field("storage_account_name", &self.storage_account_name)
            .field("storage_account_key", &"<redacted>")
            .field("queue_endpoint", &self.queue_endpoint)
            .field("port", &self.port)
            .field("is_prod", &self.is_prod)
            .field("metrics_port", &self.metrics_port)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("MONGO_URL", "mongodb://localhost:27017"),
            ("SPEECH_KEY", "speech-secret"),
            ("STORAGEACCOUNT_NAME", "feedbackacct"),
            ("STORAGEACCOUNT_KEY", "c2VjcmV0LWtleQ=="),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| env.get(key).map(|value| value.to_string()))
    }

    #[test]
    fn applies_defaults_for_optional_values() {
        let config = load(&base_env()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.metrics_port, 9898);
        assert!(!config.is_prod);
        assert_eq!(config.speech_region, "westus");
        assert_eq!(config.storage_account_key, b"secret-key");
        assert_eq!(config.queue_endpoint, "http://feedbackacct.queue.core.windows.net");
    }

    #[test]
    fn endpoint_override_drops_trailing_slash() {
        let mut env = base_env();
        env.insert("STORAGEACCOUNT_QUEUE_ENDPOINT", "http://127.0.0.1:10001/devstoreaccount1/");
        env.insert("PROD", "true");
        env.insert("PORT", "4545");
        let config = load(&env).unwrap();
        assert_eq!(config.queue_endpoint, "http://127.0.0.1:10001/devstoreaccount1");
        assert!(config.is_prod);
        assert_eq!(config.port, 4545);
    }

    #[test]
    fn blank_region_falls_back_and_values_are_trimmed() {
        let mut env = base_env();
        env.insert("SPEECH_REGION", "   ");
        env.insert("MONGO_URL", "  mongodb://db:27017 \n");
        env.insert("SPEECH_KEY", " speech-secret ");
        let config = load(&env).unwrap();
        assert_eq!(config.speech_region, "westus");
        assert_eq!(config.mongo_url, "mongodb://db:27017");
        assert_eq!(config.speech_key, "speech-secret");

        env.insert("SPEECH_REGION", " westeurope ");
        assert_eq!(load(&env).unwrap().speech_region, "westeurope");
    }

    #[test]
    fn missing_required_value_names_the_variable() {
        let mut env = base_env();
        env.remove("MONGO_URL");
        let err = load(&env).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("MONGO_URL")));
    }

    #[test]
    fn rejects_bad_port_and_bad_key() {
        let mut env = base_env();
        env.insert("PORT", "not-a-port");
        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::Invalid { key: "PORT", .. }
        ));

        let mut env = base_env();
        env.insert("STORAGEACCOUNT_KEY", "%%%");
        assert!(matches!(
            load(&env).unwrap_err(),
            ConfigError::Invalid { key: "STORAGEACCOUNT_KEY", .. }
        ));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", load(&base_env()).unwrap());
        assert!(!rendered.contains("speech-secret"));
        assert!(!rendered.contains("mongodb://"));
        assert!(rendered.contains("feedbackacct"));
    }
}
