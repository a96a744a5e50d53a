//! Mediator configuration.
//!
//! # Example
//!
//! ```
//! use mediator::config::{MediatorConfig, PublishPolicy};
//!
//! let config = MediatorConfig::from_json(r#"{ "publish_policy": "continue" }"#).unwrap();
//! assert_eq!(config.publish_policy, PublishPolicy::Continue);
//! assert!(config.yield_between_handlers);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What `publish` does when a notification handler fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishPolicy {
    /// Return the first failure unchanged; later handlers are not invoked.
    #[default]
    StopOnFirstError,
    /// Invoke every handler. A single failure is returned unchanged; two or
    /// more are returned together as
    /// [`MediatorError::PublishFailed`](crate::MediatorError::PublishFailed),
    /// in invocation order.
    Continue,
}

/// Mediator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorConfig {
    /// Failure policy for notification fan-out.
    pub publish_policy: PublishPolicy,
    /// Yield to the executor between notification handlers.
    ///
    /// When enabled, dropping a `publish` future stops the fan-out before
    /// the next handler starts.
    pub yield_between_handlers: bool,
}

impl Default for MediatorConfig {
    fn default() -> Self {
        Self {
            publish_policy: PublishPolicy::default(),
            yield_between_handlers: true,
        }
    }
}

impl MediatorConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
