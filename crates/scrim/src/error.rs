//! Error types for the overlay.

use thiserror::Error;

/// Errors that can occur while driving the overlay.
#[derive(Error, Debug)]
pub enum OverlayError {
    /// The DOM backend failed to apply an operation.
    #[error("dom backend: {0}")]
    Backend(String),

    /// An activation event targeted a proxy with no bound node.
    ///
    /// Happens when the host delivers an event for an element that was
    /// released back to the pool between the DOM event and its delivery.
    #[error("activation event targeted an unbound proxy")]
    UnboundProxy,

    /// The host's input dispatch rejected a forwarded activation event.
    ///
    /// Host errors pass through unchanged; the overlay neither swallows nor
    /// reinterprets them.
    #[error(transparent)]
    Dispatch(Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for overlay operations.
pub type OverlayResult<T> = Result<T, OverlayError>;
