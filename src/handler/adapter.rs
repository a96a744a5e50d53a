//! Type-erased handler bindings.
//!
//! The mediator only knows a message's type at the call site, while handlers
//! are generic over the message they accept. Each adapter wraps one concrete
//! handler behind a non-generic signature: the message goes in as `&dyn Any`
//! and the response comes back as `Box<dyn Any + Send>`. Adapters are built
//! once, when a handler is registered; dispatch only calls the erased method.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::{NotificationHandler, RequestHandler};
use crate::binding::{NotificationKey, RequestKey};
use crate::error::{MediatorError, Result};
use crate::message::{Notification, Request};

/// A message of the wrong type reached an adapter.
///
/// `dyn Any` carries no type name, so only the [`TypeId`](std::any::TypeId)
/// of the rejected value can be reported.
fn mismatch(expected: impl fmt::Display, value: &dyn Any) -> MediatorError {
    MediatorError::BindingMismatch {
        expected: expected.to_string(),
        found: format!("unnamed type {:?}", value.type_id()),
    }
}

/// A request handler behind a uniform, non-generic signature.
pub trait DynRequestHandler: Send + Sync {
    /// Key this binding answers.
    fn key(&self) -> RequestKey;

    /// Handle a type-erased request.
    ///
    /// Fails with [`MediatorError::BindingMismatch`] if `request` is not of
    /// the bound type.
    fn handle_dyn(&self, request: &dyn Any) -> Result<Box<dyn Any + Send>>;
}

/// A notification handler behind a uniform, non-generic signature.
pub trait DynNotificationHandler: Send + Sync {
    /// Key this binding listens to.
    fn key(&self) -> NotificationKey;

    /// Handle a type-erased notification.
    fn handle_dyn(&self, notification: &dyn Any) -> Result<()>;
}

/// Binds a [`RequestHandler`] for `Q` to [`DynRequestHandler`].
pub struct RequestAdapter<Q, H> {
    handler: H,
    _phantom: PhantomData<fn(&Q)>,
}

impl<Q, H> RequestAdapter<Q, H>
where
    Q: Request,
    H: RequestHandler<Q>,
{
    /// Create a new adapter.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }

    /// Create a new adapter, ready to hand out from a resolver.
    pub fn shared(handler: H) -> Arc<dyn DynRequestHandler> {
        Arc::new(Self::new(handler))
    }
}

impl<Q, H> DynRequestHandler for RequestAdapter<Q, H>
where
    Q: Request,
    H: RequestHandler<Q>,
{
    fn key(&self) -> RequestKey {
        RequestKey::of::<Q>()
    }

    fn handle_dyn(&self, request: &dyn Any) -> Result<Box<dyn Any + Send>> {
        let request = match request.downcast_ref::<Q>() {
            Some(r) => r,
            None => {
                return Err(mismatch(self.key(), request))
            }
        };

        let response = self.handler.handle(request).map_err(MediatorError::Handler)?;
        Ok(Box::new(response))
    }
}

/// Binds a [`NotificationHandler`] for `N` to [`DynNotificationHandler`].
pub struct NotificationAdapter<N, H> {
    handler: H,
    _phantom: PhantomData<fn(&N)>,
}

impl<N, H> NotificationAdapter<N, H>
where
    N: Notification,
    H: NotificationHandler<N>,
{
    /// Create a new adapter.
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }

    /// Create a new adapter, ready to hand out from a resolver.
    pub fn shared(handler: H) -> Arc<dyn DynNotificationHandler> {
        Arc::new(Self::new(handler))
    }
}

impl<N, H> DynNotificationHandler for NotificationAdapter<N, H>
where
    N: Notification,
    H: NotificationHandler<N>,
{
    fn key(&self) -> NotificationKey {
        NotificationKey::of::<N>()
    }

    fn handle_dyn(&self, notification: &dyn Any) -> Result<()> {
        let notification = match notification.downcast_ref::<N>() {
            Some(n) => n,
            None => {
                return Err(mismatch(self.key(), notification))
            }
        };

        self.handler
            .handle(notification)
            .map_err(MediatorError::Handler)
    }
}
