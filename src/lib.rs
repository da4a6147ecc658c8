//! Blocking and batched HTTP request execution.
//!
//! - [`HttpClient::send`] runs one request and blocks until it completes.
//! - [`HttpClient::send_async`] queues a request with a pair of callbacks, and
//!   [`HttpClient::wait`] drains the queue as one batch, keeping at most
//!   `concurrency` requests in flight.
//!
//! A response with an error status is still a response: it always reaches
//! `on_response` (or `Ok` from `send`). Only transport failures with no
//! response at all reach `on_failure`.
//!
//! Network I/O goes through the [`Transport`] trait; [`ReqwestTransport`] is
//! the default implementation.

pub mod client;
pub mod config;
mod debug;
pub mod error;
pub mod network;
pub mod request;
pub mod transport;
mod utils;

pub use client::HttpClient;
pub use config::ClientConfig;
pub use error::{BuildError, ConfigError, TransportError};
pub use network::{HttpVersion, ProxyConfig, SslVerify};
pub use request::{Batch, BatchSummary, Callbacks, Outcome, PendingRequest, Pool, RequestQueue, ResponseHandler};
pub use transport::{ReqwestTransport, Transport};
