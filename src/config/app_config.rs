use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use super::{BaseHttpClientConfig, ServerConfig, TelegramConfig};

/// Application configuration for Herald.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Telegram destination settings.
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Configuration for the base HTTP client.
    #[serde(default)]
    pub http_base_config: BaseHttpClientConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Creates a new `AppConfig` from `<config_dir>/app.yaml` (optional) and
    /// `HERALD__`-prefixed environment variables.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let app_file = Path::new(config_dir_str).join("app");
        let s = Config::builder()
            .add_source(File::with_name(&app_file.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("HERALD").separator("__"))
            .build()?;
        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_app_config_from_file() {
        let config_content = r#"
        telegram:
          bot_token: "123:abc"
          chat_id: "-10042"
          rate_limit_per_minute: 5
          retry:
            max_retries: 4
            initial_backoff_ms: 500
        http_base_config:
          request_timeout: 3
        server:
          listen_address: "127.0.0.1:9000"
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("app.yaml"), config_content).unwrap();

        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();

        assert_eq!(config.telegram.credentials(), Some(("123:abc", "-10042")));
        assert_eq!(config.telegram.rate_limit_per_minute, 5);
        assert_eq!(config.telegram.retry.max_retries, 4);
        assert_eq!(config.telegram.retry.base_for_backoff, 2);
        assert_eq!(config.telegram.retry.initial_backoff_ms, Duration::from_millis(500));
        assert_eq!(config.telegram.parse_mode, "HTML");
        assert_eq!(config.http_base_config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.http_base_config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.server.listen_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_app_config_without_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();

        assert_eq!(config.telegram.api_base_url.as_str(), "https://api.telegram.org/");
        assert_eq!(config.http_base_config.max_idle_per_host, 10);
    }

    #[test]
    fn test_app_config_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("app.yaml"),
            "telegram:\n  rate_limit_per_minute: lots\n",
        )
        .unwrap();

        assert!(AppConfig::new(Some(temp_dir.path().to_str().unwrap())).is_err());
    }

    #[test]
    fn test_app_config_env_var_override() {
        let config_content = r#"
        server:
          metrics_listen_address: "127.0.0.1:9091"
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("app.yaml"), config_content).unwrap();

        unsafe {
            std::env::set_var("HERALD__SERVER__METRICS_LISTEN_ADDRESS", "127.0.0.1:9999");
        }

        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();
        assert_eq!(config.server.metrics_listen_address.as_deref(), Some("127.0.0.1:9999"));

        unsafe {
            std::env::remove_var("HERALD__SERVER__METRICS_LISTEN_ADDRESS");
        }
    }
}
