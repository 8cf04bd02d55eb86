use crate::error::{AgriSenseError, Result};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub source_timeout_ms: u64,
    pub max_retries: u32,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
    pub retry_jitter: bool,
    pub cache_ttl_ms: u64,
    pub top_recommendations: usize,
    pub default_language: String,
    pub custom_settings: HashMap<String, String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_timeout_ms: 8_000,
            max_retries: 2,
            backoff_base_ms: 250,
            backoff_max_ms: 5_000,
            retry_jitter: true,
            cache_ttl_ms: 300_000,
            top_recommendations: 5,
            default_language: "en".to_string(),
            custom_settings: HashMap::new(),
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(timeout) = std::env::var("AGRISENSE_SOURCE_TIMEOUT_MS") {
            config.source_timeout_ms = timeout.parse().map_err(|e| {
                AgriSenseError::ConfigurationError(format!("Invalid source_timeout_ms: {e}"))
            })?;
        }

        if let Ok(retries) = std::env::var("AGRISENSE_MAX_RETRIES") {
            config.max_retries = retries.parse().map_err(|e| {
                AgriSenseError::ConfigurationError(format!("Invalid max_retries: {e}"))
            })?;
        }

        if let Ok(ttl) = std::env::var("AGRISENSE_CACHE_TTL_MS") {
            config.cache_ttl_ms = ttl.parse().map_err(|e| {
                AgriSenseError::ConfigurationError(format!("Invalid cache_ttl_ms: {e}"))
            })?;
        }

        if let Ok(top_n) = std::env::var("AGRISENSE_TOP_RECOMMENDATIONS") {
            config.top_recommendations = top_n.parse().map_err(|e| {
                AgriSenseError::ConfigurationError(format!("Invalid top_recommendations: {e}"))
            })?;
        }

        if let Ok(language) = std::env::var("AGRISENSE_DEFAULT_LANGUAGE") {
            config.default_language = language;
        }

        Ok(config)
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_millis(self.source_timeout_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.top_recommendations, 5);
        assert_eq!(config.cache_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_from_env_override() {
        std::env::set_var("AGRISENSE_MAX_RETRIES", "7");
        let config = PipelineConfig::from_env().unwrap();
        assert_eq!(config.max_retries, 7);
        std::env::remove_var("AGRISENSE_MAX_RETRIES");
    }

    #[test]
    fn test_from_env_rejects_garbage() {
        std::env::set_var("AGRISENSE_CACHE_TTL_MS", "not-a-number");
        let result = PipelineConfig::from_env();
        assert!(matches!(result, Err(AgriSenseError::ConfigurationError(_))));
        std::env::remove_var("AGRISENSE_CACHE_TTL_MS");
    }
}
