//! Mediator and its builder.
//!
//! The [`Mediator`] dispatches requests and notifications to the handlers
//! its resolver supplies:
//! - [`Mediator::send`] resolves exactly one handler for the request's
//!   (request, response) key, invokes it once and returns its response.
//!   No handler is a [`MediatorError::HandlerNotFound`].
//! - [`Mediator::publish`] resolves every handler for the notification's key
//!   and invokes them in the order the resolver returned them. No handlers
//!   is a success.
//!
//! The mediator keeps no state between calls and never caches bindings.
//!
//! # Example
//!
//! ```
//! use mediator::{Mediator, Notification, Request};
//!
//! struct GetTaskNames {
//!     filter: String,
//! }
//!
//! impl Request for GetTaskNames {
//!     type Response = Vec<String>;
//! }
//!
//! struct TasksCleared;
//!
//! impl Notification for TasksCleared {}
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let tasks = vec!["Cleaning".to_string(), "Cooking".to_string()];
//!
//! let mediator = Mediator::builder()
//!     .request_fn::<GetTaskNames, _>(move |query| {
//!         let filter = query.filter.to_lowercase();
//!         Ok(tasks
//!             .iter()
//!             .filter(|name| name.to_lowercase().contains(&filter))
//!             .cloned()
//!             .collect())
//!     })
//!     .build();
//!
//! let names = mediator
//!     .send(GetTaskNames { filter: "clean".to_string() })
//!     .await
//!     .unwrap();
//! assert_eq!(names, vec!["Cleaning".to_string()]);
//!
//! // Nobody listens; still a success.
//! mediator.publish(TasksCleared).await.unwrap();
//! # });
//! ```

use std::sync::Arc;

use crate::binding::{NotificationKey, RequestKey};
use crate::config::{MediatorConfig, PublishPolicy};
use crate::error::{MediatorError, Result};
use crate::handler::{
    DynNotificationHandler, DynRequestHandler, HandlerRegistry, HandlerResult,
    NotificationHandler, RequestHandler,
};
use crate::message::{Notification, Request};
use crate::resolver::{FnResolver, HandlerResolver, ResolveResult};

/// Builder for a [`Mediator`] backed by a [`HandlerRegistry`].
///
/// To dispatch through an external resolver, use [`Mediator::new`] or
/// [`Mediator::with_config`] instead.
pub struct MediatorBuilder {
    registry: HandlerRegistry,
    config: MediatorConfig,
}

impl MediatorBuilder {
    /// Create a new mediator builder.
    pub fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
            config: MediatorConfig::default(),
        }
    }

    /// Register the handler for request type `Q`.
    pub fn request_handler<Q, H>(mut self, handler: H) -> Self
    where
        Q: Request,
        H: RequestHandler<Q>,
    {
        self.registry.register_request::<Q, H>(handler);
        self
    }

    /// Register a closure as the handler for request type `Q`.
    pub fn request_fn<Q, F>(mut self, f: F) -> Self
    where
        Q: Request,
        F: Fn(&Q) -> HandlerResult<Q::Response> + Send + Sync + 'static,
    {
        self.registry.register_request_fn::<Q, F>(f);
        self
    }

    /// Register a handler for notification type `N`.
    pub fn notification_handler<N, H>(mut self, handler: H) -> Self
    where
        N: Notification,
        H: NotificationHandler<N>,
    {
        self.registry.register_notification::<N, H>(handler);
        self
    }

    /// Register a closure as a handler for notification type `N`.
    pub fn notification_fn<N, F>(mut self, f: F) -> Self
    where
        N: Notification,
        F: Fn(&N) -> HandlerResult<()> + Send + Sync + 'static,
    {
        self.registry.register_notification_fn::<N, F>(f);
        self
    }

    /// Set the notification failure policy.
    ///
    /// Default: [`PublishPolicy::StopOnFirstError`]
    pub fn publish_policy(mut self, policy: PublishPolicy) -> Self {
        self.config.publish_policy = policy;
        self
    }

    /// Set whether `publish` yields between handlers.
    ///
    /// Default: true
    pub fn yield_between_handlers(mut self, enabled: bool) -> Self {
        self.config.yield_between_handlers = enabled;
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: MediatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the mediator.
    pub fn build(self) -> Mediator {
        Mediator::with_config(self.registry, self.config)
    }
}

impl Default for MediatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Dispatches requests and notifications to resolved handlers.
///
/// Cloning is cheap; clones share the resolver.
#[derive(Clone)]
pub struct Mediator {
    resolver: Arc<dyn HandlerResolver>,
    config: MediatorConfig,
}

impl Mediator {
    /// Create a new mediator builder.
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Create a mediator over `resolver` with the default configuration.
    pub fn new<R: HandlerResolver + 'static>(resolver: R) -> Self {
        Self::with_config(resolver, MediatorConfig::default())
    }

    /// Create a mediator over `resolver`.
    pub fn with_config<R: HandlerResolver + 'static>(resolver: R, config: MediatorConfig) -> Self {
        Self {
            resolver: Arc::new(resolver),
            config,
        }
    }

    /// Create a mediator from a single-instance and a multi-instance lookup.
    ///
    /// See [`FnResolver`].
    pub fn from_fns<One, All>(one: One, all: All) -> Self
    where
        One: Fn(&RequestKey) -> ResolveResult<Option<Arc<dyn DynRequestHandler>>>
            + Send
            + Sync
            + 'static,
        All: Fn(&NotificationKey) -> ResolveResult<Vec<Arc<dyn DynNotificationHandler>>>
            + Send
            + Sync
            + 'static,
    {
        Self::new(FnResolver::new(one, all))
    }

    /// The active configuration.
    pub fn config(&self) -> &MediatorConfig {
        &self.config
    }

    /// Send a request to its handler and return the handler's response.
    ///
    /// # Errors
    ///
    /// - [`MediatorError::HandlerNotFound`] if the resolver has no handler
    ///   for the request; nothing is invoked.
    /// - [`MediatorError::Handler`] with the handler's own error.
    /// - [`MediatorError::Resolver`] with the resolver's own error.
    /// - [`MediatorError::BindingMismatch`] if the resolver returned a
    ///   handler bound to a different key; nothing is invoked.
    pub async fn send<Q: Request>(&self, request: Q) -> Result<Q::Response> {
        let key = RequestKey::for_request(&request);

        let handler = match self
            .resolver
            .resolve_one(&key)
            .map_err(MediatorError::Resolver)?
        {
            Some(h) => h,
            None => {
                tracing::debug!("No handler registered for request {}", key);
                return Err(MediatorError::HandlerNotFound {
                    request: key.request().name(),
                    response: key.response().name(),
                });
            }
        };

        let bound = handler.key();
        if bound != key {
            tracing::warn!("Resolver returned handler for {} when asked for {}", bound, key);
            return Err(MediatorError::BindingMismatch {
                expected: key.to_string(),
                found: bound.to_string(),
            });
        }

        tracing::trace!("Dispatching request {}", key);
        let response = handler.handle_dyn(&request)?;

        match response.downcast::<Q::Response>() {
            Ok(response) => Ok(*response),
            Err(_) => Err(MediatorError::BindingMismatch {
                expected: key.to_string(),
                found: format!("response of handler bound to {}", bound),
            }),
        }
    }

    /// Publish a notification to every handler the resolver returns.
    ///
    /// Handlers run one at a time, in resolver order. Zero handlers is a
    /// success. Failures follow the configured [`PublishPolicy`].
    ///
    /// With `yield_between_handlers` enabled, dropping the returned future
    /// stops the fan-out before the next handler; a handler that has already
    /// started always runs to completion.
    ///
    /// # Errors
    ///
    /// - [`MediatorError::Handler`] with a handler's own error.
    /// - [`MediatorError::PublishFailed`] when several handlers failed under
    ///   [`PublishPolicy::Continue`].
    /// - [`MediatorError::Resolver`] with the resolver's own error; nothing
    ///   is invoked.
    pub async fn publish<N: Notification>(&self, notification: N) -> Result<()> {
        let key = NotificationKey::for_notification(&notification);

        let handlers = self
            .resolver
            .resolve_all(&key)
            .map_err(MediatorError::Resolver)?;

        if handlers.is_empty() {
            tracing::trace!("No handlers for notification {}", key);
            return Ok(());
        }

        tracing::trace!("Publishing {} to {} handler(s)", key, handlers.len());

        let mut failures = Vec::new();

        for (index, handler) in handlers.iter().enumerate() {
            if index > 0 && self.config.yield_between_handlers {
                tokio::task::yield_now().await;
            }

            if let Err(e) = Self::notify(&key, handler.as_ref(), &notification) {
                tracing::debug!(
                    "Handler {} of {} failed for notification {}: {}",
                    index + 1,
                    handlers.len(),
                    key,
                    e
                );
                match self.config.publish_policy {
                    PublishPolicy::StopOnFirstError => return Err(e),
                    PublishPolicy::Continue => failures.push(e),
                }
            }
        }

        if failures.len() > 1 {
            return Err(MediatorError::PublishFailed(failures));
        }

        match failures.pop() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Invoke one notification binding after checking its key.
    fn notify<N: Notification>(
        key: &NotificationKey,
        handler: &dyn DynNotificationHandler,
        notification: &N,
    ) -> Result<()> {
        let bound = handler.key();
        if bound != *key {
            tracing::warn!("Resolver returned handler for {} when asked for {}", bound, key);
            return Err(MediatorError::BindingMismatch {
                expected: key.to_string(),
                found: bound.to_string(),
            });
        }

        handler.handle_dyn(notification)
    }
}
