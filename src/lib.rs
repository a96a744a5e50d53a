//! # mediator
//!
//! In-process mediator: callers send typed requests and publish
//! notifications without knowing which handlers process them.
//!
//! ## Dispatch
//!
//! - **Requests** ([`Mediator::send`]): resolved by (request type, response
//!   type) to exactly one handler. A missing handler is
//!   [`MediatorError::HandlerNotFound`].
//! - **Notifications** ([`Mediator::publish`]): resolved by notification type
//!   to zero or more handlers, invoked in resolver order. No handlers is a
//!   success.
//!
//! Handlers are looked up on every call through a [`HandlerResolver`]. The
//! bundled [`HandlerRegistry`] is filled at startup; any other lookup
//! (a DI container, a service locator) can be plugged in through
//! [`FnResolver`] or a custom implementation.
//!
//! ## Example
//!
//! ```
//! use mediator::handler::{HandlerResult, RequestHandler};
//! use mediator::{Mediator, MediatorError, Request};
//!
//! struct GetTaskNames {
//!     filter: String,
//! }
//!
//! impl Request for GetTaskNames {
//!     type Response = Vec<String>;
//! }
//!
//! struct TaskNames {
//!     tasks: Vec<String>,
//! }
//!
//! impl RequestHandler<GetTaskNames> for TaskNames {
//!     fn handle(&self, query: &GetTaskNames) -> HandlerResult<Vec<String>> {
//!         Ok(self
//!             .tasks
//!             .iter()
//!             .filter(|t| t.contains(query.filter.as_str()))
//!             .cloned()
//!             .collect())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mediator = Mediator::builder()
//!     .request_handler::<GetTaskNames, _>(TaskNames {
//!         tasks: vec!["cleaning".into(), "cooking".into()],
//!     })
//!     .build();
//!
//! let names = mediator
//!     .send(GetTaskNames { filter: "cook".into() })
//!     .await
//!     .unwrap();
//! assert_eq!(names, vec!["cooking".to_string()]);
//!
//! let empty = Mediator::builder().build();
//! let err = empty
//!     .send(GetTaskNames { filter: "cook".into() })
//!     .await
//!     .unwrap_err();
//! assert!(matches!(err, MediatorError::HandlerNotFound { .. }));
//! # });
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod handler;
pub mod message;
pub mod resolver;

mod mediator;

pub use config::{MediatorConfig, PublishPolicy};
pub use error::{BoxError, MediatorError, Result};
pub use handler::{HandlerRegistry, NotificationHandler, RequestHandler};
pub use mediator::{Mediator, MediatorBuilder};
pub use message::{Notification, Request};
pub use resolver::{FnResolver, HandlerResolver};
