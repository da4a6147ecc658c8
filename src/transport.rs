//! The collaborator that actually talks to the network.
//!
//! [`Transport`] is the only seam between the dispatcher and I/O. The client
//! never inspects status codes itself; a transport may report an error status
//! as [`TransportError::Status`], and the response inside is recovered as a
//! success further up.

use std::future::Future;
use std::time::{Duration, SystemTime};

use once_cell::sync::OnceCell;
use reqwest::{Client, Request, Response};

use crate::config::ClientConfig;
use crate::debug::log_exchange;
use crate::error::{BuildError, TransportError};

pub trait Transport: Send + Sync {
    /// Performs one request.
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, TransportError>> + Send;
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response, TransportError>> + Send {
        (**self).execute(request)
    }
}

static SHARED_CLIENT: OnceCell<Client> = OnceCell::new();

pub(crate) fn build_client(config: &ClientConfig) -> Result<Client, BuildError> {
    let mut builder = Client::builder()
        .timeout(config.timeout_duration()?)
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .user_agent(config.user_agent());

    builder = config.http_version.apply_to_builder(builder);
    builder = config.ssl_verify.apply_to_builder(builder);
    if let Some(proxy) = &config.proxy {
        builder = proxy.apply_to_builder(builder)?;
    }

    Ok(builder.build()?)
}

/// [`Transport`] backed by a [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
    http_errors: bool,
    proxy: Option<String>,
}

impl ReqwestTransport {
    pub fn from_config(config: &ClientConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let client = build_client(config)?;
        Self::with_client(client, config)
    }

    /// Uses the process-wide client built from the default configuration.
    pub fn shared() -> Result<Self, BuildError> {
        let config = ClientConfig::default();
        let client = SHARED_CLIENT.get_or_try_init(|| build_client(&config))?.clone();
        Self::with_client(client, &config)
    }

    pub fn with_client(client: Client, config: &ClientConfig) -> Result<Self, BuildError> {
        let proxy = config.proxy.as_ref().and_then(|p| {
            let target = p.all.as_deref().or(p.https.as_deref()).or(p.http.as_deref())?;
            Some(if p.has_auth() {
                format!("{} (with authentication)", target)
            } else {
                target.to_string()
            })
        });
        Ok(Self {
            client,
            timeout: config.timeout_duration()?,
            http_errors: config.http_errors,
            proxy,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        let method = request.method().clone();
        let url = request.url().clone();
        let start = SystemTime::now();

        let result = match tokio::time::timeout(self.timeout, self.client.execute(request)).await {
            Ok(Ok(res)) if self.http_errors && (res.status().is_client_error() || res.status().is_server_error()) => {
                Err(TransportError::Status(res))
            }
            Ok(Ok(res)) => Ok(res),
            Ok(Err(e)) if e.is_timeout() => Err(TransportError::Timeout(self.timeout)),
            Ok(Err(e)) => Err(TransportError::from(e)),
            Err(_) => Err(TransportError::Timeout(self.timeout)),
        };

        log_exchange(&method, &url, start, &result, self.proxy.as_deref());
        result
    }
}
