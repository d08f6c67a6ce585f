use std::time::Duration;

use askdesk_api::DEFAULT_BASE_URL;
use askdesk_core::POLL_PERIOD_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub base_url: String,
    pub poll_period: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            poll_period: Duration::from_millis(POLL_PERIOD_MS),
        }
    }
}

impl AppConfig {
    /// Resolution order: `--base-url` flag, `ASKDESK_BASE_URL` env var, default.
    pub fn resolve(args: &[String], env_base_url: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(pos) = args.iter().position(|arg| arg == "--base-url") {
            if let Some(value) = args.get(pos + 1) {
                config.base_url = value.clone();
                return config;
            }
        }
        if let Some(value) = env_base_url.filter(|value| !value.is_empty()) {
            config.base_url = value;
        }
        config
    }

    pub fn from_env() -> Self {
        let args: Vec<String> = std::env::args().collect();
        Self::resolve(&args, std::env::var("ASKDESK_BASE_URL").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn defaults_without_flag_or_env() {
        let config = AppConfig::resolve(&args(&["askdesk"]), None);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_period, Duration::from_millis(POLL_PERIOD_MS));
    }

    #[test]
    fn flag_beats_env() {
        let config = AppConfig::resolve(
            &args(&["askdesk", "--base-url", "http://flag:1/api/v1"]),
            Some("http://env:2/api/v1".to_string()),
        );
        assert_eq!(config.base_url, "http://flag:1/api/v1");
    }

    #[test]
    fn env_beats_default() {
        let config = AppConfig::resolve(&args(&["askdesk"]), Some("http://env:2/api/v1".to_string()));
        assert_eq!(config.base_url, "http://env:2/api/v1");
    }

    #[test]
    fn dangling_flag_falls_back_to_env() {
        let config = AppConfig::resolve(
            &args(&["askdesk", "--base-url"]),
            Some("http://env:2/api/v1".to_string()),
        );
        assert_eq!(config.base_url, "http://env:2/api/v1");
    }
}
