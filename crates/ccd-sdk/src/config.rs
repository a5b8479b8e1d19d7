//! Client configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use crate::SdkError;

/// Transaction time to live when none is configured
pub const DEFAULT_EXPIRY_SECS: u64 = 600;

/// Node client configuration, usually read from a TOML file
///
/// ```toml
/// endpoint = "https://grpc.testnet.example:20000"
/// timeout_ms = 15000
/// default_expiry_secs = 600
///
/// [headers]
/// authentication = "rpcadmin"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Node gRPC endpoint; `https` enables TLS
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection timeout in milliseconds
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
    /// Metadata sent with every request
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Expiry used for transactions built without one
    #[serde(default = "default_expiry_secs")]
    pub default_expiry_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:20000".to_string()
}

fn default_timeout_ms() -> u64 {
    15_000
}

fn default_expiry_secs() -> u64 {
    DEFAULT_EXPIRY_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: None,
            headers: BTreeMap::new(),
            default_expiry_secs: default_expiry_secs(),
        }
    }
}

impl ClientConfig {
    /// Config for `endpoint` with all other settings at their defaults
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self, SdkError> {
        let config: ClientConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdkError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, SdkError> {
        toml::to_string_pretty(self).map_err(|e| SdkError::Config(e.to_string()))
    }

    /// Check the settings
    pub fn validate(&self) -> Result<(), SdkError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(SdkError::Config(format!(
                "endpoint must start with http:// or https://: {}",
                self.endpoint
            )));
        }
        if self.timeout_ms == 0 {
            return Err(SdkError::Config(
                "timeout_ms must be a positive integer".to_string(),
            ));
        }
        if self.connect_timeout_ms == Some(0) {
            return Err(SdkError::Config(
                "connect_timeout_ms must be a positive integer".to_string(),
            ));
        }
        if self.default_expiry_secs == 0 {
            return Err(SdkError::Config(
                "default_expiry_secs must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether the endpoint uses TLS
    pub fn use_tls(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connection timeout, if set
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    /// Default transaction lifetime
    pub fn default_expiry(&self) -> Duration {
        Duration::from_secs(self.default_expiry_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "http://localhost:20000");
        assert_eq!(config.timeout_ms, 15_000);
        assert_eq!(config.default_expiry_secs, 600);
        assert!(config.validate().is_ok());
        assert!(!config.use_tls());
    }

    #[test]
    fn test_config_deserialize() {
        let config = ClientConfig::from_toml_str(
            r#"
            endpoint = "https://node.example:20000"
            timeout_ms = 5000
            connect_timeout_ms = 1000

            [headers]
            authentication = "rpcadmin"
        "#,
        )
        .unwrap();
        assert_eq!(config.endpoint, "https://node.example:20000");
        assert!(config.use_tls());
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.connect_timeout(), Some(Duration::from_secs(1)));
        assert_eq!(config.headers["authentication"], "rpcadmin");
        assert_eq!(config.default_expiry_secs, 600);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_config_zero_timeout_rejected() {
        let err = ClientConfig::from_toml_str("timeout_ms = 0").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn test_config_bad_endpoint_rejected() {
        assert!(ClientConfig::new("localhost:20000").validate().is_err());
    }

    #[test]
    fn test_config_malformed_toml() {
        let err = ClientConfig::from_toml_str("timeout_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn test_config_round_trip_file() {
        let mut config = ClientConfig::new("http://127.0.0.1:20001");
        config.headers.insert("x-token".to_string(), "abc".to_string());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        assert_eq!(ClientConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_config_load_missing_file() {
        let err = ClientConfig::load("/nonexistent/ccd/client.toml").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }
}
