//! Configuration for the Sonus exporter.

use serde::{Deserialize, Serialize};
use sonus_client::{ClientOptions, Credentials, RetryPolicy};
use sonus_common::LoggingConfig;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::history::DEFAULT_CAPACITY;
use crate::probes::ProbeKind;

/// Environment variable overriding `device.user`.
pub const USER_ENV: &str = "SONUS_USER";
/// Environment variable overriding `device.password`.
pub const PASSWORD_ENV: &str = "SONUS_PASSWORD";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete exporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Probe endpoint settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Device access settings.
    #[serde(default)]
    pub device: DeviceConfig,

    /// What a probe collects and how.
    #[serde(default)]
    pub probes: ProbesConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Address to listen on (default: "0.0.0.0:9116").
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path of the probe endpoint (default: "/probe").
    #[serde(default = "default_probe_path")]
    pub probe_path: String,
}

fn default_listen() -> String {
    "0.0.0.0:9116".to_string()
}

fn default_probe_path() -> String {
    "/probe".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            probe_path: default_probe_path(),
        }
    }
}

/// Device API access.
#[derive(Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,

    /// "https" against devices, "http" against test doubles.
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_true() -> bool {
    true
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            password: String::new(),
            scheme: default_scheme(),
            accept_invalid_certs: true,
            connect_timeout_secs: default_connect_timeout(),
            retry: RetryConfig::default(),
        }
    }
}

impl std::fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("scheme", &self.scheme)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Retry behaviour for 204 "not ready" answers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Upper bound of the random delay before the first call.
    #[serde(default = "default_jitter")]
    pub jitter_ms: u64,

    /// Upper bound of the random delay between attempts.
    #[serde(default = "default_backoff")]
    pub backoff_ms: u64,
}

fn default_attempts() -> u32 {
    3
}

fn default_jitter() -> u64 {
    500
}

fn default_backoff() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            jitter_ms: default_jitter(),
            backoff_ms: default_backoff(),
        }
    }
}

/// Probe behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbesConfig {
    /// Probe kinds run on every invocation.
    #[serde(default = "ProbeKind::defaults")]
    pub kinds: Vec<ProbeKind>,

    /// Zone or context harvests in flight per kind.
    #[serde(default = "default_leaf_concurrency")]
    pub leaf_concurrency: usize,

    /// Subtracted from the scrape timeout to leave room for the response.
    #[serde(default = "default_timeout_offset")]
    pub timeout_offset_secs: f64,

    /// Used when the scraper sends no timeout.
    #[serde(default = "default_timeout")]
    pub default_timeout_secs: f64,

    /// Results retained per target.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_leaf_concurrency() -> usize {
    3
}

fn default_timeout_offset() -> f64 {
    0.5
}

fn default_timeout() -> f64 {
    120.0
}

fn default_history_limit() -> usize {
    DEFAULT_CAPACITY
}

impl Default for ProbesConfig {
    fn default() -> Self {
        Self {
            kinds: ProbeKind::defaults(),
            leaf_concurrency: default_leaf_concurrency(),
            timeout_offset_secs: default_timeout_offset(),
            default_timeout_secs: default_timeout(),
            history_limit: default_history_limit(),
        }
    }
}

impl ExporterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfig = json5::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace device credentials with `SONUS_USER` / `SONUS_PASSWORD` when set.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(user) = lookup(USER_ENV).filter(|v| !v.is_empty()) {
            self.device.user = user;
        }
        if let Some(password) = lookup(PASSWORD_ENV).filter(|v| !v.is_empty()) {
            self.device.password = password;
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid listen address: {}",
                self.http.listen
            )));
        }

        if !self.http.probe_path.starts_with('/') {
            return Err(ConfigError::Validation(
                "Probe path must start with /".to_string(),
            ));
        }

        if self.device.retry.attempts == 0 {
            return Err(ConfigError::Validation(
                "retry.attempts must be >= 1".to_string(),
            ));
        }

        if self.probes.kinds.is_empty() {
            return Err(ConfigError::Validation(
                "At least one probe kind must be enabled".to_string(),
            ));
        }

        if self.probes.leaf_concurrency == 0 {
            return Err(ConfigError::Validation(
                "leaf_concurrency must be >= 1".to_string(),
            ));
        }

        if self.probes.history_limit == 0 {
            return Err(ConfigError::Validation(
                "history_limit must be >= 1".to_string(),
            ));
        }

        let offset = self.probes.timeout_offset_secs;
        if offset.is_nan() || offset < 0.0 {
            return Err(ConfigError::Validation(
                "timeout_offset_secs must be >= 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Transport settings for device sessions.
    pub fn client_options(&self) -> ClientOptions {
        let device = &self.device;
        ClientOptions {
            scheme: device.scheme.clone(),
            accept_invalid_certs: device.accept_invalid_certs,
            connect_timeout: Duration::from_secs(device.connect_timeout_secs),
            retry: RetryPolicy {
                attempts: device.retry.attempts,
                jitter: Duration::from_millis(device.retry.jitter_ms),
                backoff: Duration::from_millis(device.retry.backoff_ms),
            },
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.device.user, &self.device.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonus_common::LogFormat;
    use std::io::Write;

    #[test]
    fn test_parse_minimal_config() {
        let config = ExporterConfig::parse("{}").unwrap();

        assert_eq!(config.http.listen, "0.0.0.0:9116");
        assert_eq!(config.http.probe_path, "/probe");
        assert_eq!(config.device.scheme, "https");
        assert!(config.device.accept_invalid_certs);
        assert_eq!(config.device.retry.attempts, 3);
        assert_eq!(config.probes.kinds, ProbeKind::defaults());
        assert_eq!(config.probes.leaf_concurrency, 3);
        assert_eq!(config.probes.timeout_offset_secs, 0.5);
        assert_eq!(config.probes.default_timeout_secs, 120.0);
        assert_eq!(config.probes.history_limit, 100);
    }

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            http: { listen: "127.0.0.1:9200", probe_path: "/sonus" },
            device: {
                user: "admin",
                password: "secret",
                scheme: "http",
                accept_invalid_certs: false,
                connect_timeout_secs: 3,
                retry: { attempts: 5, jitter_ms: 0, backoff_ms: 250 },
            },
            probes: {
                kinds: ["sip", "zone_stats"],
                leaf_concurrency: 8,
                timeout_offset_secs: 1.5,
                history_limit: 10,
            },
            logging: { level: "debug", format: "json" },
        }"#;

        let config = ExporterConfig::parse(json).unwrap();

        assert_eq!(config.http.probe_path, "/sonus");
        assert_eq!(config.probes.kinds, vec![ProbeKind::Sip, ProbeKind::ZoneStats]);
        assert_eq!(config.probes.leaf_concurrency, 8);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);

        let options = config.client_options();
        assert_eq!(options.scheme, "http");
        assert!(!options.accept_invalid_certs);
        assert_eq!(options.connect_timeout, Duration::from_secs(3));
        assert_eq!(options.retry.attempts, 5);
        assert_eq!(options.retry.jitter, Duration::ZERO);
        assert_eq!(options.retry.backoff, Duration::from_millis(250));
        assert_eq!(config.credentials().user, "admin");
    }

    #[test]
    fn test_unknown_probe_kind_is_parse_error() {
        let result = ExporterConfig::parse(r#"{ probes: { kinds: ["bogus"] } }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_invalid_listen() {
        let err = ExporterConfig::parse(r#"{ http: { listen: "not-an-address" } }"#).unwrap_err();
        assert!(err.to_string().contains("Invalid listen address"));
    }

    #[test]
    fn test_validate_invalid_path() {
        let err = ExporterConfig::parse(r#"{ http: { probe_path: "probe" } }"#).unwrap_err();
        assert!(err.to_string().contains("must start with /"));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        for json in [
            r#"{ device: { retry: { attempts: 0 } } }"#,
            r#"{ probes: { kinds: [] } }"#,
            r#"{ probes: { leaf_concurrency: 0 } }"#,
            r#"{ probes: { history_limit: 0 } }"#,
            r#"{ probes: { timeout_offset_secs: -1 } }"#,
        ] {
            let result = ExporterConfig::parse(json);
            assert!(
                matches!(result, Err(ConfigError::Validation(_))),
                "accepted {}",
                json
            );
        }
    }

    #[test]
    fn test_env_overrides_credentials() {
        let mut config = ExporterConfig::parse(r#"{ device: { user: "file", password: "file" } }"#).unwrap();

        config.apply_env_from(|key| match key {
            USER_ENV => Some("env-user".to_string()),
            PASSWORD_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.device.user, "env-user");
        assert_eq!(config.device.password, "file");
    }

    #[test]
    fn test_password_is_redacted() {
        let config = ExporterConfig::parse(r#"{ device: { password: "hunter2" } }"#).unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{{ probes: {{ leaf_concurrency: 2 }} }}").unwrap();

        let config = ExporterConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.probes.leaf_concurrency, 2);

        let err = ExporterConfig::load_from_file("/nonexistent/sonus.json5").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
