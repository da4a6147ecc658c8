use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::network::{HttpVersion, ProxyConfig, SslVerify};

pub const DEFAULT_CONCURRENCY: usize = 5;
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;
pub const DEFAULT_WORKER_THREADS: usize = 2;

/// Settings for an [`HttpClient`](crate::HttpClient) and its default transport.
///
/// Every field has a default, so a partial JSON document such as
/// `{"concurrency": 10}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Maximum number of requests in flight during one `wait()`.
    pub concurrency: usize,
    /// Per-request timeout in seconds.
    pub timeout: f64,
    /// Report 4xx/5xx answers as `TransportError::Status` from the transport.
    /// They still reach the success path of the client.
    pub http_errors: bool,
    pub http_version: HttpVersion,
    pub proxy: Option<ProxyConfig>,
    pub ssl_verify: SslVerify,
    pub user_agent: Option<String>,
    pub worker_threads: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT_SECS,
            http_errors: true,
            http_version: HttpVersion::Auto,
            proxy: None,
            ssl_verify: SslVerify::default(),
            user_agent: None,
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        // Surface a bad version as itself rather than as a generic parse error.
        if let Some(version) = value.get("http_version").and_then(serde_json::Value::as_str) {
            version.parse::<HttpVersion>()?;
        }
        let config: ClientConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        if self.worker_threads == 0 {
            return Err(ConfigError::InvalidWorkerThreads);
        }
        self.timeout_duration()?;
        Ok(())
    }

    /// The timeout as a [`Duration`]; fails for zero, negative, NaN, or
    /// values too large to represent.
    pub fn timeout_duration(&self) -> Result<Duration, ConfigError> {
        match Duration::try_from_secs_f64(self.timeout) {
            Ok(timeout) if !timeout.is_zero() => Ok(timeout),
            _ => Err(ConfigError::InvalidTimeout(self.timeout)),
        }
    }

    pub fn user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string())
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_http_errors(mut self, enabled: bool) -> Self {
        self.http_errors = enabled;
        self
    }

    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = Some(proxy);
        self
    }
}
