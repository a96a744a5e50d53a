//! Typed handler traits and closure handlers.

use std::sync::Arc;

use crate::error::BoxError;
use crate::message::{Notification, Request};

/// Result type for handler functions.
pub type HandlerResult<T> = std::result::Result<T, BoxError>;

/// Answers one request type.
pub trait RequestHandler<Q: Request>: Send + Sync + 'static {
    /// Handle a request and produce its response.
    fn handle(&self, request: &Q) -> HandlerResult<Q::Response>;
}

/// Listens to one notification type.
pub trait NotificationHandler<N: Notification>: Send + Sync + 'static {
    /// Handle a notification.
    fn handle(&self, notification: &N) -> HandlerResult<()>;
}

impl<Q: Request, H: RequestHandler<Q>> RequestHandler<Q> for Arc<H> {
    fn handle(&self, request: &Q) -> HandlerResult<Q::Response> {
        (**self).handle(request)
    }
}

impl<N: Notification, H: NotificationHandler<N>> NotificationHandler<N> for Arc<H> {
    fn handle(&self, notification: &N) -> HandlerResult<()> {
        (**self).handle(notification)
    }
}

/// Wraps a closure so it can be used as a handler.
///
/// # Example
///
/// ```
/// use mediator::handler::{FnHandler, HandlerResult, RequestHandler};
/// use mediator::Request;
///
/// struct Double(i32);
///
/// impl Request for Double {
///     type Response = i32;
/// }
///
/// let handler = FnHandler::new(|req: &Double| -> HandlerResult<i32> { Ok(req.0 * 2) });
/// assert_eq!(handler.handle(&Double(21)).unwrap(), 42);
/// ```
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    /// Create a new closure handler.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<Q, F> RequestHandler<Q> for FnHandler<F>
where
    Q: Request,
    F: Fn(&Q) -> HandlerResult<Q::Response> + Send + Sync + 'static,
{
    fn handle(&self, request: &Q) -> HandlerResult<Q::Response> {
        (self.f)(request)
    }
}

impl<N, F> NotificationHandler<N> for FnHandler<F>
where
    N: Notification,
    F: Fn(&N) -> HandlerResult<()> + Send + Sync + 'static,
{
    fn handle(&self, notification: &N) -> HandlerResult<()> {
        (self.f)(notification)
    }
}
