use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Read once at startup; handles built from it live for the whole process.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Database
    pub database_url: String,

    // AI / LLM
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub llm_timeout: Duration,
    pub max_article_bytes: usize,

    // Fetching
    pub fetch_timeout: Duration,

    // Cache
    pub freshness: Duration,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl AppConfig {
    /// Load `.env` (if any) and read the process environment.
    /// A missing database URL or API key is an error; the binary treats it as fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let number = |key: &'static str, default: u64| -> Result<u64, ConfigError> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
                None => Ok(default),
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            google_api_key: required("GOOGLE_API_KEY")?,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: lookup("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            llm_timeout: Duration::from_secs(number("LLM_TIMEOUT_SECS", 60)?),
            max_article_bytes: number("MAX_ARTICLE_BYTES", 100_000)? as usize,
            fetch_timeout: Duration::from_secs(number("FETCH_TIMEOUT_SECS", 20)?),
            freshness: Duration::from_secs(number("FRESHNESS_SECS", 300)?),
            web_host: lookup("WEB_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            web_port: number("WEB_PORT", 8000)?
                .try_into()
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "WEB_PORT",
                    value: lookup("WEB_PORT").unwrap_or_default(),
                })?,
        })
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let head: String = val.chars().take(5).collect();
            format!("{head}...({} chars)", val.len())
        }

        tracing::info!("Config loaded:");
        tracing::info!("  DATABASE_URL: {}", preview(&self.database_url));
        tracing::info!("  GOOGLE_API_KEY: {}", preview(&self.google_api_key));
        tracing::info!("  GEMINI_MODEL: {}", self.gemini_model);
        tracing::info!("  FRESHNESS_SECS: {}", self.freshness.as_secs());
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
    fn defaults_applied() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/finollama"),
            ("GOOGLE_API_KEY", "test-key"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_model, "gemini-1.5-flash");
        assert_eq!(config.freshness, Duration::from_secs(300));
        assert_eq!(config.fetch_timeout, Duration::from_secs(20));
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.web_port, 8000);
        assert_eq!(config.max_article_bytes, 100_000);
    }

    #[test]
    fn missing_api_key_is_error() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://localhost/finollama",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GOOGLE_API_KEY")));
    }

    #[test]
    fn blank_api_key_is_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/finollama"),
            ("GOOGLE_API_KEY", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("GOOGLE_API_KEY")));
    }

    #[test]
    fn bad_number_is_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/finollama"),
            ("GOOGLE_API_KEY", "test-key"),
            ("WEB_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "WEB_PORT", .. }));
    }

    #[test]
    fn overrides_read() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/finollama"),
            ("GOOGLE_API_KEY", "test-key"),
            ("GEMINI_MODEL", "gemini-2.0-flash"),
            ("FRESHNESS_SECS", "60"),
            ("WEB_PORT", "3000"),
        ]))
        .unwrap();
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.freshness, Duration::from_secs(60));
        assert_eq!(config.web_port, 3000);
    }
}
