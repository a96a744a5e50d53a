//! Handler registry: the bundled resolver, populated at startup.
//!
//! The registry maps resolution keys to type-erased bindings. Each request
//! key has at most one binding; registering a second handler for the same
//! key replaces the first (last registration wins, with a warning).
//! Notification handlers accumulate and resolve in registration order.
//!
//! # Example
//!
//! ```
//! use mediator::handler::HandlerRegistry;
//! use mediator::{Notification, Request};
//!
//! struct Echo(String);
//!
//! impl Request for Echo {
//!     type Response = String;
//! }
//!
//! struct Saved;
//!
//! impl Notification for Saved {}
//!
//! let mut registry = HandlerRegistry::new();
//!
//! registry.register_request_fn::<Echo, _>(|req| Ok(req.0.clone()));
//! registry.register_notification_fn::<Saved, _>(|_| Ok(()));
//! registry.register_notification_fn::<Saved, _>(|_| Ok(()));
//!
//! assert!(registry.contains_request::<Echo>());
//! assert_eq!(registry.notification_handler_count::<Saved>(), 2);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use super::{
    DynNotificationHandler, DynRequestHandler, FnHandler, HandlerResult, NotificationAdapter,
    NotificationHandler, RequestAdapter, RequestHandler,
};
use crate::binding::{NotificationKey, RequestKey};
use crate::message::{Notification, Request};
use crate::resolver::{HandlerResolver, ResolveResult};

/// Registry mapping resolution keys to handler bindings.
#[derive(Default)]
pub struct HandlerRegistry {
    /// One binding per request key.
    requests: HashMap<RequestKey, Arc<dyn DynRequestHandler>>,
    /// Bindings per notification key, in registration order.
    notifications: HashMap<NotificationKey, Vec<Arc<dyn DynNotificationHandler>>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the handler for request type `Q`.
    pub fn register_request<Q, H>(&mut self, handler: H)
    where
        Q: Request,
        H: RequestHandler<Q>,
    {
        self.insert_request_binding(RequestAdapter::<Q, H>::shared(handler));
    }

    /// Register a closure as the handler for request type `Q`.
    pub fn register_request_fn<Q, F>(&mut self, f: F)
    where
        Q: Request,
        F: Fn(&Q) -> HandlerResult<Q::Response> + Send + Sync + 'static,
    {
        self.register_request::<Q, _>(FnHandler::new(f));
    }

    /// Register a handler for notification type `N`.
    ///
    /// Handlers run in the order they were registered.
    pub fn register_notification<N, H>(&mut self, handler: H)
    where
        N: Notification,
        H: NotificationHandler<N>,
    {
        self.insert_notification_binding(NotificationAdapter::<N, H>::shared(handler));
    }

    /// Register a closure as a handler for notification type `N`.
    pub fn register_notification_fn<N, F>(&mut self, f: F)
    where
        N: Notification,
        F: Fn(&N) -> HandlerResult<()> + Send + Sync + 'static,
    {
        self.register_notification::<N, _>(FnHandler::new(f));
    }

    /// Insert an already-built request binding under its own key.
    pub fn insert_request_binding(&mut self, binding: Arc<dyn DynRequestHandler>) {
        let key = binding.key();
        if self.requests.insert(key, binding).is_some() {
            tracing::warn!("Replacing existing handler for request {}", key);
        }
    }

    /// Append an already-built notification binding under its own key.
    pub fn insert_notification_binding(&mut self, binding: Arc<dyn DynNotificationHandler>) {
        self.notifications
            .entry(binding.key())
            .or_default()
            .push(binding);
    }

    /// Check whether request type `Q` has a handler.
    pub fn contains_request<Q: Request>(&self) -> bool {
        self.requests.contains_key(&RequestKey::of::<Q>())
    }

    /// Number of handlers registered for notification type `N`.
    pub fn notification_handler_count<N: Notification>(&self) -> usize {
        self.notifications
            .get(&NotificationKey::of::<N>())
            .map_or(0, Vec::len)
    }

    /// Number of request types with a handler.
    pub fn request_len(&self) -> usize {
        self.requests.len()
    }

    /// Check if no handler of either kind is registered.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty() && self.notifications.values().all(Vec::is_empty)
    }
}

impl HandlerResolver for HandlerRegistry {
    fn resolve_one(&self, key: &RequestKey) -> ResolveResult<Option<Arc<dyn DynRequestHandler>>> {
        Ok(self.requests.get(key).cloned())
    }

    fn resolve_all(
        &self,
        key: &NotificationKey,
    ) -> ResolveResult<Vec<Arc<dyn DynNotificationHandler>>> {
        Ok(self.notifications.get(key).cloned().unwrap_or_default())
    }
}
