//! Handler module - handler traits, type-erased bindings and the registry.
//!
//! Provides:
//! - [`RequestHandler`] / [`NotificationHandler`] - typed handler traits
//! - [`FnHandler`] - closure handlers
//! - [`DynRequestHandler`] / [`DynNotificationHandler`] - bindings the
//!   resolver hands to the mediator
//! - [`HandlerRegistry`] - the bundled resolver

mod adapter;
mod registry;
mod traits;

pub use adapter::{
    DynNotificationHandler, DynRequestHandler, NotificationAdapter, RequestAdapter,
};
pub use registry::HandlerRegistry;
pub use traits::{FnHandler, HandlerResult, NotificationHandler, RequestHandler};
