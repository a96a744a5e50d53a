//! Error types for the mediator.

use thiserror::Error;

/// Boxed error returned by handlers and resolvers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for all mediator operations.
#[derive(Debug, Error)]
pub enum MediatorError {
    /// No handler is bound to the request's (request, response) pair.
    #[error("Handler not found for request `{request}` (response `{response}`)")]
    HandlerNotFound {
        /// Type name of the request.
        request: &'static str,
        /// Type name of the declared response.
        response: &'static str,
    },

    /// Error returned by a handler, passed through as-is.
    #[error(transparent)]
    Handler(BoxError),

    /// Error raised by the resolver, passed through as-is.
    #[error(transparent)]
    Resolver(BoxError),

    /// The resolver returned a binding registered for a different key.
    #[error("Binding mismatch: expected `{expected}`, resolver returned `{found}`")]
    BindingMismatch {
        /// Key the mediator derived.
        expected: String,
        /// Key of the binding the resolver returned. When the adapter itself
        /// rejects a message, only the message's `TypeId` is known.
        found: String,
    },

    /// Several notification handlers failed under [`PublishPolicy::Continue`].
    ///
    /// [`PublishPolicy::Continue`]: crate::config::PublishPolicy::Continue
    #[error("{} notification handlers failed", .0.len())]
    PublishFailed(Vec<MediatorError>),

    /// Configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl MediatorError {
    /// Whether this is a [`MediatorError::HandlerNotFound`].
    pub fn is_handler_not_found(&self) -> bool {
        matches!(self, MediatorError::HandlerNotFound { .. })
    }

    /// The original handler error, if this error came from a handler.
    pub fn handler_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            MediatorError::Handler(e) => Some(e.as_ref()),
            _ => None,
        }
    }

    /// Downcast the original handler error to a concrete type.
    pub fn downcast_handler_ref<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.handler_error().and_then(|e| e.downcast_ref::<E>())
    }
}

/// Result type alias using MediatorError.
pub type Result<T> = std::result::Result<T, MediatorError>;
