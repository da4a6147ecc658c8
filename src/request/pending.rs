use reqwest::{Request, Response};

use crate::error::TransportError;

/// Receives the outcome of one asynchronously submitted request.
///
/// Both methods consume the handler, so it can be resolved only once.
pub trait ResponseHandler: Send {
    /// Called whenever a response is available, whatever its status.
    fn on_response(self: Box<Self>, response: Response);

    /// Called when the transport produced no response at all.
    fn on_failure(self: Box<Self>, error: TransportError);
}

/// A [`ResponseHandler`] made of two closures.
pub struct Callbacks<R, F> {
    on_response: R,
    on_failure: F,
}

impl<R, F> Callbacks<R, F>
where
    R: FnOnce(Response) + Send,
    F: FnOnce(TransportError) + Send,
{
    pub fn new(on_response: R, on_failure: F) -> Self {
        Self { on_response, on_failure }
    }
}

impl<R, F> ResponseHandler for Callbacks<R, F>
where
    R: FnOnce(Response) + Send,
    F: FnOnce(TransportError) + Send,
{
    fn on_response(self: Box<Self>, response: Response) {
        let Callbacks { on_response, .. } = *self;
        on_response(response)
    }

    fn on_failure(self: Box<Self>, error: TransportError) {
        let Callbacks { on_failure, .. } = *self;
        on_failure(error)
    }
}

/// A request waiting in the queue together with its handler.
pub struct PendingRequest {
    pub request: Request,
    pub handler: Box<dyn ResponseHandler>,
}

impl PendingRequest {
    pub fn new(request: Request, handler: impl ResponseHandler + 'static) -> Self {
        Self {
            request,
            handler: Box::new(handler),
        }
    }
}

impl std::fmt::Debug for PendingRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingRequest")
            .field("method", self.request.method())
            .field("url", &self.request.url().as_str())
            .finish_non_exhaustive()
    }
}
