use serde::Deserialize;

use super::env_or;

/// Configuration for the webhook HTTP server.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address and port for the HTTP server to listen on.
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// Optional separate address that serves only `/metrics`.
    /// Falls back to `0.0.0.0:$METRICS_PORT` when that variable is set.
    #[serde(default = "default_metrics_listen_address")]
    pub metrics_listen_address: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            metrics_listen_address: default_metrics_listen_address(),
        }
    }
}

/// Provides the default value for listen_address, honouring `PORT`.
fn default_listen_address() -> String {
    format!("0.0.0.0:{}", env_or("PORT", 8080u16))
}

fn default_metrics_listen_address() -> Option<String> {
    std::env::var("METRICS_PORT")
        .ok()
        .and_then(|p| p.trim().parse::<u16>().ok())
        .map(|port| format!("0.0.0.0:{port}"))
}

#[cfg(test)]
mod tests {
    use config::Config;

    use super::*;

    #[test]
    fn test_default_server_config() {
        let yaml = r#""#; // Empty YAML should use defaults
        let config = Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize::<ServerConfig>()
            .unwrap();
        assert_eq!(config.listen_address, default_listen_address());
    }

    #[test]
    fn test_custom_server_config() {
        let yaml = r#"
          listen_address: "0.0.0.0:3333"
          metrics_listen_address: "127.0.0.1:9091"
        "#;
        let config = Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize::<ServerConfig>()
            .unwrap();
        assert_eq!(config.listen_address, "0.0.0.0:3333");
        assert_eq!(config.metrics_listen_address.as_deref(), Some("127.0.0.1:9091"));
    }
}
