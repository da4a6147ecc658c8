// request/mod.rs

pub mod outcome;
pub mod pending;
pub mod pool;
pub mod queue;

pub use outcome::Outcome;
pub use pending::{Callbacks, PendingRequest, ResponseHandler};
pub use pool::{BatchSummary, HandlerTable, Pool};
pub use queue::{Batch, RequestQueue};
