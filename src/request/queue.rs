use std::mem;
use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::Request;

use super::pending::{PendingRequest, ResponseHandler};

/// Requests submitted since the last drain, in submission order.
#[derive(Debug, Default)]
pub struct RequestQueue {
    pending: Mutex<Vec<PendingRequest>>,
}

impl RequestQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // Handlers never run under this lock.
    fn lock(&self) -> MutexGuard<'_, Vec<PendingRequest>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, pending: PendingRequest) {
        self.lock().push(pending);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Takes everything queued so far and leaves the queue empty.
    ///
    /// Submissions made after this returns go to the next batch.
    pub fn drain(&self) -> Batch {
        Batch {
            requests: mem::take(&mut *self.lock()),
        }
    }
}

/// Snapshot of the queue taken by [`RequestQueue::drain`].
#[derive(Debug, Default)]
pub struct Batch {
    requests: Vec<PendingRequest>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Splits the batch into requests and handlers that share indices.
    pub fn into_parts(self) -> (Vec<Request>, Vec<Box<dyn ResponseHandler>>) {
        self.requests
            .into_iter()
            .map(|pending| (pending.request, pending.handler))
            .unzip()
    }
}

impl From<Vec<PendingRequest>> for Batch {
    fn from(requests: Vec<PendingRequest>) -> Self {
        Self { requests }
    }
}
