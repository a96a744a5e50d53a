//! Message traits: requests (one handler, one response) and notifications
//! (any number of handlers, no response).
//!
//! # Example
//!
//! ```
//! use mediator::{Notification, Request};
//!
//! struct GetTaskNames {
//!     filter: String,
//! }
//!
//! impl Request for GetTaskNames {
//!     type Response = Vec<String>;
//! }
//!
//! struct TaskCompleted(u64);
//!
//! impl Notification for TaskCompleted {}
//! ```

/// A message that expects exactly one handler to answer it.
///
/// The response type is declared here, so callers of
/// [`Mediator::send`](crate::Mediator::send) never restate it.
pub trait Request: Send + 'static {
    /// The value the handler produces.
    type Response: Send + 'static;
}

/// A message broadcast to every registered listener.
pub trait Notification: Send + Sync + 'static {}
