//! Concurrency-bounded execution of one drained batch.
//!
//! [`Pool::stream`] turns the batch's requests into a lazy stream of work
//! units and keeps at most `concurrency` of them in flight. Completions come
//! out in completion order, tagged with the submission index, and
//! [`HandlerTable`] routes each one back to the handler at that index.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::pin::pin;

use futures::stream::{self, Stream, StreamExt};
use log::{debug, error};
use reqwest::Request;

use super::outcome::Outcome;
use super::pending::ResponseHandler;
use super::queue::Batch;
use crate::transport::Transport;

pub struct Pool<'a, T> {
    transport: &'a T,
    concurrency: usize,
}

impl<'a, T: Transport> Pool<'a, T> {
    pub fn new(transport: &'a T, concurrency: usize) -> Self {
        Self {
            transport,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Executes `requests` with at most `concurrency` in flight.
    ///
    /// A request is handed to the transport only once a slot is free, in
    /// submission order.
    pub fn stream(&self, requests: Vec<Request>) -> impl Stream<Item = (usize, Outcome)> + 'a {
        let transport = self.transport;
        stream::iter(requests.into_iter().enumerate())
            .map(move |(index, request)| async move {
                let result = transport.execute(request).await;
                (index, Outcome::resolve(result))
            })
            .buffer_unordered(self.concurrency)
    }

    /// Runs a batch to completion, resolving handlers inside the caller's
    /// async context.
    pub async fn run(&self, batch: Batch) -> BatchSummary {
        let (requests, handlers) = batch.into_parts();
        let mut table = HandlerTable::new(handlers);
        let mut completions = pin!(self.stream(requests));
        while let Some((index, outcome)) = completions.next().await {
            table.resolve(index, outcome);
        }
        table.finish()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub responses: usize,
    pub failures: usize,
}

/// Handlers of one batch, indexed by submission order.
pub struct HandlerTable {
    handlers: Vec<Option<Box<dyn ResponseHandler>>>,
    summary: BatchSummary,
    panic: Option<Box<dyn Any + Send>>,
}

impl HandlerTable {
    pub fn new(handlers: Vec<Box<dyn ResponseHandler>>) -> Self {
        Self {
            summary: BatchSummary {
                total: handlers.len(),
                ..BatchSummary::default()
            },
            handlers: handlers.into_iter().map(Some).collect(),
            panic: None,
        }
    }

    /// Delivers the outcome of request `index` to its handler.
    ///
    /// A panicking handler does not stop the rest of the batch; the first
    /// panic is resumed by [`HandlerTable::finish`].
    pub fn resolve(&mut self, index: usize, outcome: Outcome) {
        let Some(handler) = self.handlers.get_mut(index).and_then(Option::take) else {
            error!("no pending handler for request #{}", index);
            return;
        };

        match &outcome {
            Outcome::Success(response) => {
                self.summary.responses += 1;
                debug!("request #{} resolved with status {}", index, response.status());
            }
            Outcome::Failure(e) => {
                self.summary.failures += 1;
                debug!("request #{} failed: {}", index, e);
            }
        }

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| outcome.dispatch(handler))) {
            error!("handler for request #{} panicked", index);
            self.panic.get_or_insert(payload);
        }
    }

    pub fn unresolved(&self) -> usize {
        self.handlers.iter().filter(|h| h.is_some()).count()
    }

    pub fn finish(self) -> BatchSummary {
        debug!(
            "batch settled: {} request(s), {} response(s), {} failure(s)",
            self.summary.total, self.summary.responses, self.summary.failures
        );
        if let Some(payload) = self.panic {
            panic::resume_unwind(payload);
        }
        self.summary
    }
}
