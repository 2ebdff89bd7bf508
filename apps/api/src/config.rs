use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if AI suggestions are enabled without credentials.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory holding `<TYPE>Competency.json` files.
    pub data_dir: PathBuf,
    /// JSON file backing the assessment store when Redis is not configured.
    pub store_path: PathBuf,
    pub redis_url: Option<String>,
    pub azure_openai: AzureOpenAiSettings,
}

/// Azure OpenAI connection settings. Handed to the client constructor; read-only.
#[derive(Clone)]
pub struct AzureOpenAiSettings {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: String,
    pub deployment_name: String,
    pub timeout: Duration,
}

impl fmt::Debug for AzureOpenAiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureOpenAiSettings")
            .field("enabled", &self.enabled)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment_name", &self.deployment_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = match lookup("AZURE_OPENAI_ENABLED") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("AZURE_OPENAI_ENABLED must be a boolean, got '{raw}'"))?,
            None => false,
        };

        let azure_openai = if enabled {
            AzureOpenAiSettings {
                enabled,
                endpoint: require(&lookup, "AZURE_OPENAI_ENDPOINT")?,
                api_key: require(&lookup, "AZURE_OPENAI_API_KEY")?,
                deployment_name: require(&lookup, "AZURE_OPENAI_DEPLOYMENT")?,
                timeout: timeout_from(&lookup)?,
            }
        } else {
            AzureOpenAiSettings {
                enabled,
                endpoint: lookup("AZURE_OPENAI_ENDPOINT").unwrap_or_default(),
                api_key: lookup("AZURE_OPENAI_API_KEY").unwrap_or_default(),
                deployment_name: lookup("AZURE_OPENAI_DEPLOYMENT").unwrap_or_default(),
                timeout: timeout_from(&lookup)?,
            }
        };

        Ok(Config {
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            data_dir: lookup("COMPETENCY_DATA_DIR")
                .unwrap_or_else(|| "data".to_string())
                .into(),
            store_path: lookup("ASSESSMENT_STORE_PATH")
                .unwrap_or_else(|| "assessment.json".to_string())
                .into(),
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            azure_openai,
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn timeout_from<F>(lookup: &F) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs = lookup("AZURE_OPENAI_TIMEOUT_SECS")
        .unwrap_or_else(|| "30".to_string())
        .parse::<u64>()
        .context("AZURE_OPENAI_TIMEOUT_SECS must be a whole number of seconds")?;
    Ok(Duration::from_secs(secs))
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => bail!("not a boolean"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_empty_environment() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.store_path, PathBuf::from("assessment.json"));
        assert!(config.redis_url.is_none());
        assert!(!config.azure_openai.enabled);
        assert_eq!(config.azure_openai.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_enabled_requires_credentials() {
        let err = Config::from_lookup(lookup_from(&[
            ("AZURE_OPENAI_ENABLED", "true"),
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("AZURE_OPENAI_API_KEY"));
    }

    #[test]
    fn test_enabled_with_credentials() {
        let config = Config::from_lookup(lookup_from(&[
            ("AZURE_OPENAI_ENABLED", "TRUE"),
            ("AZURE_OPENAI_ENDPOINT", "https://example.openai.azure.com"),
            ("AZURE_OPENAI_API_KEY", "secret"),
            ("AZURE_OPENAI_DEPLOYMENT", "gpt-4o"),
            ("AZURE_OPENAI_TIMEOUT_SECS", "12"),
            ("REDIS_URL", "redis://localhost:6379"),
        ]))
        .unwrap();
        assert!(config.azure_openai.enabled);
        assert_eq!(config.azure_openai.deployment_name, "gpt-4o");
        assert_eq!(config.azure_openai.timeout, Duration::from_secs(12));
        assert_eq!(config.redis_url.as_deref(), Some("redis://localhost:6379"));
        assert!(!format!("{:?}", config.azure_openai).contains("secret"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("AZURE_OPENAI_ENABLED", "maybe")])).is_err());
    }
}
