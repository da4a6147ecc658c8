//! Blocking front end over a [`Transport`].
//!
//! ```no_run
//! use rusty_batch::HttpClient;
//! use reqwest::{Method, Request, Url};
//!
//! let client = HttpClient::new()?;
//! for id in 1..=3 {
//!     let url = Url::parse(&format!("https://example.com/items/{}", id))?;
//!     client.send_async(
//!         Request::new(Method::GET, url),
//!         move |response| println!("item {}: {}", id, response.status()),
//!         move |error| eprintln!("item {}: {}", id, error),
//!     );
//! }
//! client.wait();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use futures::StreamExt;
use log::{debug, warn};
use reqwest::{Request, Response};
use tokio::runtime::{Builder, Runtime};

use crate::config::ClientConfig;
use crate::error::{BuildError, TransportError};
use crate::request::{Callbacks, HandlerTable, Outcome, PendingRequest, Pool, RequestQueue, ResponseHandler};
use crate::transport::{ReqwestTransport, Transport};

/// HTTP client with a blocking `send` and a batched `send_async`/`wait` pair.
///
/// The client owns a tokio runtime. `send` and `wait` block the calling
/// thread on it, so they must not be called from inside an async context.
/// Handlers run on the thread that called `wait`, outside the runtime, and
/// may themselves call `send`, `send_async` or `wait`.
pub struct HttpClient<T: Transport = ReqwestTransport> {
    transport: T,
    queue: RequestQueue,
    concurrency: usize,
    runtime: Runtime,
}

impl HttpClient<ReqwestTransport> {
    pub fn new() -> Result<Self, BuildError> {
        Self::from_config(ClientConfig::default())
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, BuildError> {
        let transport = ReqwestTransport::from_config(&config)?;
        Self::with_transport(transport, &config)
    }
}

impl<T: Transport> HttpClient<T> {
    pub fn with_transport(transport: T, config: &ClientConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let runtime = Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .thread_name("rusty-batch-worker")
            .enable_all()
            .build()?;

        Ok(Self {
            transport,
            queue: RequestQueue::new(),
            concurrency: config.concurrency,
            runtime,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Number of requests submitted since the last `wait`.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Executes one request and blocks until it completes.
    ///
    /// Returns `Err` only when no response could be obtained. An error
    /// status is returned as an ordinary response.
    pub fn send(&self, request: Request) -> Result<Response, TransportError> {
        let result = self.runtime.block_on(self.transport.execute(request));
        Outcome::resolve(result).into_result()
    }

    /// Queues a request for the next `wait`. Nothing is sent yet.
    pub fn send_async<R, F>(&self, request: Request, on_response: R, on_failure: F)
    where
        R: FnOnce(Response) + Send + 'static,
        F: FnOnce(TransportError) + Send + 'static,
    {
        self.send_async_with(request, Callbacks::new(on_response, on_failure));
    }

    pub fn send_async_with(&self, request: Request, handler: impl ResponseHandler + 'static) {
        self.queue.push(PendingRequest::new(request, handler));
    }

    /// Sends everything queued so far and blocks until every request of
    /// that batch has been handed to its handler.
    ///
    /// Requests queued while the batch runs are left for the next call. A
    /// handler that calls `wait` itself runs those as a nested batch, which
    /// settles before the handler returns.
    pub fn wait(&self) {
        let batch = self.queue.drain();
        if batch.is_empty() {
            return;
        }

        debug!("dispatching {} request(s), concurrency {}", batch.len(), self.concurrency);
        let (requests, handlers) = batch.into_parts();
        let mut table = HandlerTable::new(handlers);
        let pool = Pool::new(&self.transport, self.concurrency);
        let mut completions = Box::pin(pool.stream(requests));

        // Handlers run between polls, outside the runtime.
        while let Some((index, outcome)) = self.runtime.block_on(completions.next()) {
            if let Outcome::Failure(e) = &outcome {
                warn!("request #{} got no response: {}", index, e);
            }
            table.resolve(index, outcome);
        }

        table.finish();
    }
}
