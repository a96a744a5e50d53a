//! Resolution keys derived from message types.
//!
//! Keys are computed from static type information only; field values are
//! never inspected. A request key carries both the request type and its
//! declared response type, so two requests that share a response type still
//! resolve to different handlers.
//!
//! # Example
//!
//! ```
//! use mediator::binding::RequestKey;
//! use mediator::Request;
//!
//! struct CountOpen;
//! struct CountClosed;
//!
//! impl Request for CountOpen {
//!     type Response = usize;
//! }
//! impl Request for CountClosed {
//!     type Response = usize;
//! }
//!
//! assert_ne!(RequestKey::of::<CountOpen>(), RequestKey::of::<CountClosed>());
//! assert_eq!(RequestKey::for_request(&CountOpen), RequestKey::of::<CountOpen>());
//! ```

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::message::{Notification, Request};

/// Stable descriptor of a Rust type.
///
/// Equality and hashing use the [`TypeId`] alone; the name is kept for
/// diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The type's [`TypeId`].
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type's name, as reported by [`std::any::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Key used to resolve the single handler of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestKey {
    request: TypeTag,
    response: TypeTag,
}

impl RequestKey {
    /// Key for request type `Q`.
    pub fn of<Q: Request>() -> Self {
        Self {
            request: TypeTag::of::<Q>(),
            response: TypeTag::of::<Q::Response>(),
        }
    }

    /// Key for the type of `request`.
    pub fn for_request<Q: Request>(_request: &Q) -> Self {
        Self::of::<Q>()
    }

    /// The request type.
    #[inline]
    pub fn request(&self) -> TypeTag {
        self.request
    }

    /// The declared response type.
    #[inline]
    pub fn response(&self) -> TypeTag {
        self.response
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.request, self.response)
    }
}

/// Key used to resolve every handler of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationKey {
    notification: TypeTag,
}

impl NotificationKey {
    /// Key for notification type `N`.
    pub fn of<N: Notification>() -> Self {
        Self {
            notification: TypeTag::of::<N>(),
        }
    }

    /// Key for the type of `notification`.
    pub fn for_notification<N: Notification>(_notification: &N) -> Self {
        Self::of::<N>()
    }

    /// The notification type.
    #[inline]
    pub fn notification(&self) -> TypeTag {
        self.notification
    }
}

impl fmt::Display for NotificationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.notification, f)
    }
}
