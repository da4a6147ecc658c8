use std::io;
use std::time::Duration;

use reqwest::Response;
use thiserror::Error;

/// Failure reported by a [`Transport`](crate::Transport).
///
/// Only [`TransportError::Status`] carries a response. Everything else means
/// the server never answered.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("server responded with status {}", .0.status())]
    Status(Response),
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("request timeout after {:.2} seconds", .0.as_secs_f64())]
    Timeout(Duration),
    #[error("request error: {0}")]
    Request(#[source] reqwest::Error),
    #[error("transport error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    pub fn other<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        TransportError::Other(error.into())
    }

    pub fn response(&self) -> Option<&Response> {
        match self {
            TransportError::Status(response) => Some(response),
            _ => None,
        }
    }

    pub fn has_response(&self) -> bool {
        self.response().is_some()
    }

    /// Recovers the attached response, or gives the error back unchanged.
    pub fn into_response(self) -> Result<Response, Self> {
        match self {
            TransportError::Status(response) => Ok(response),
            other => Err(other),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            TransportError::Connect(e)
        } else {
            TransportError::Request(e)
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("concurrency must be a positive integer")]
    InvalidConcurrency,
    #[error("worker_threads must be a positive integer")]
    InvalidWorkerThreads,
    #[error("timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),
    #[error("invalid HTTP version: '{0}'. Valid values: AUTO, HTTP1_ONLY, HTTP2, HTTP2_PRIOR_KNOWLEDGE")]
    InvalidHttpVersion(String),
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while assembling an [`HttpClient`](crate::HttpClient).
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("proxy configuration error: {0}")]
    Proxy(#[from] url::ParseError),
    #[error("proxy URL '{0}' cannot carry credentials")]
    ProxyCredentials(String),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("failed to start runtime: {0}")]
    Runtime(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> Response {
        Response::from(http::Response::builder().status(status).body("").unwrap())
    }

    #[test]
    fn status_error_gives_back_its_response() {
        let err = TransportError::Status(response(503));
        assert!(err.has_response());
        assert_eq!(err.to_string(), "server responded with status 503 Service Unavailable");

        let recovered = err.into_response().unwrap();
        assert_eq!(recovered.status().as_u16(), 503);
    }

    #[test]
    fn errors_without_response_stay_errors() {
        let err = TransportError::Timeout(Duration::from_millis(1500));
        assert!(!err.has_response());
        assert_eq!(err.to_string(), "request timeout after 1.50 seconds");

        let err = TransportError::other(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"));
        match err.into_response() {
            Err(TransportError::Other(source)) => assert_eq!(source.to_string(), "refused"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
