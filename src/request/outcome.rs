use reqwest::Response;

use super::pending::ResponseHandler;
use crate::error::TransportError;

/// Classified result of executing one request.
///
/// Anything that produced a response is a success, including 4xx and 5xx
/// answers the transport reported as errors.
#[derive(Debug)]
pub enum Outcome {
    Success(Response),
    Failure(TransportError),
}

impl Outcome {
    pub fn resolve(result: Result<Response, TransportError>) -> Self {
        match result.or_else(TransportError::into_response) {
            Ok(response) => Outcome::Success(response),
            Err(error) => Outcome::Failure(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn into_result(self) -> Result<Response, TransportError> {
        match self {
            Outcome::Success(response) => Ok(response),
            Outcome::Failure(error) => Err(error),
        }
    }

    /// Hands the outcome to exactly one of the handler's methods.
    pub fn dispatch(self, handler: Box<dyn ResponseHandler>) {
        match self {
            Outcome::Success(response) => handler.on_response(response),
            Outcome::Failure(error) => handler.on_failure(error),
        }
    }
}

impl From<Result<Response, TransportError>> for Outcome {
    fn from(result: Result<Response, TransportError>) -> Self {
        Outcome::resolve(result)
    }
}
