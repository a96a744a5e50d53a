//! Handler resolution boundary.
//!
//! The mediator does not construct, cache, or validate handlers. It asks a
//! [`HandlerResolver`] for the binding(s) of a key on every call and uses
//! whatever comes back. Implementations decide how instances are built and
//! looked up, which one wins when several could answer a request, and must
//! be safe to call from several tasks at once.
//!
//! [`HandlerRegistry`](crate::handler::HandlerRegistry) is the bundled
//! implementation. [`FnResolver`] adapts a pair of lookup closures, e.g. a
//! service locator or DI container.

use std::sync::Arc;

use crate::binding::{NotificationKey, RequestKey};
use crate::error::BoxError;
use crate::handler::{DynNotificationHandler, DynRequestHandler};

/// Result type for resolver lookups.
pub type ResolveResult<T> = std::result::Result<T, BoxError>;

/// Supplies handler bindings to the mediator.
pub trait HandlerResolver: Send + Sync {
    /// The single binding for a request key, or `None`.
    fn resolve_one(&self, key: &RequestKey) -> ResolveResult<Option<Arc<dyn DynRequestHandler>>>;

    /// Every binding for a notification key, in invocation order.
    fn resolve_all(
        &self,
        key: &NotificationKey,
    ) -> ResolveResult<Vec<Arc<dyn DynNotificationHandler>>>;
}

impl<T: HandlerResolver + ?Sized> HandlerResolver for Arc<T> {
    fn resolve_one(&self, key: &RequestKey) -> ResolveResult<Option<Arc<dyn DynRequestHandler>>> {
        (**self).resolve_one(key)
    }

    fn resolve_all(
        &self,
        key: &NotificationKey,
    ) -> ResolveResult<Vec<Arc<dyn DynNotificationHandler>>> {
        (**self).resolve_all(key)
    }
}

/// Resolver built from two lookup closures.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mediator::handler::{DynNotificationHandler, DynRequestHandler, FnHandler, RequestAdapter};
/// use mediator::binding::RequestKey;
/// use mediator::resolver::{FnResolver, HandlerResolver};
/// use mediator::Request;
///
/// struct Ping;
///
/// impl Request for Ping {
///     type Response = &'static str;
/// }
///
/// let pong = RequestAdapter::<Ping, _>::shared(FnHandler::new(
///     |_: &Ping| -> mediator::handler::HandlerResult<&'static str> { Ok("pong") },
/// ));
///
/// let resolver = FnResolver::new(
///     move |key: &RequestKey| Ok((*key == pong.key()).then(|| pong.clone())),
///     |_| Ok(Vec::<Arc<dyn DynNotificationHandler>>::new()),
/// );
///
/// assert!(resolver.resolve_one(&RequestKey::of::<Ping>()).unwrap().is_some());
/// ```
pub struct FnResolver<One, All> {
    one: One,
    all: All,
}

impl<One, All> FnResolver<One, All>
where
    One: Fn(&RequestKey) -> ResolveResult<Option<Arc<dyn DynRequestHandler>>> + Send + Sync,
    All: Fn(&NotificationKey) -> ResolveResult<Vec<Arc<dyn DynNotificationHandler>>>
        + Send
        + Sync,
{
    /// Create a resolver from a single-instance and a multi-instance lookup.
    pub fn new(one: One, all: All) -> Self {
        Self { one, all }
    }
}

impl<One, All> HandlerResolver for FnResolver<One, All>
where
    One: Fn(&RequestKey) -> ResolveResult<Option<Arc<dyn DynRequestHandler>>> + Send + Sync,
    All: Fn(&NotificationKey) -> ResolveResult<Vec<Arc<dyn DynNotificationHandler>>>
        + Send
        + Sync,
{
    fn resolve_one(&self, key: &RequestKey) -> ResolveResult<Option<Arc<dyn DynRequestHandler>>> {
        (self.one)(key)
    }

    fn resolve_all(
        &self,
        key: &NotificationKey,
    ) -> ResolveResult<Vec<Arc<dyn DynNotificationHandler>>> {
        (self.all)(key)
    }
}
