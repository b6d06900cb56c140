//! Scroll engine error types

use thiserror::Error;

/// Misuse of the scroll engine API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScrollError {
    /// `render_now` only makes sense when rendering is deferred to the host
    #[error("render_now() requires the element to be created with lazy_render enabled")]
    LazyRenderDisabled,
}

/// Reasons the host could not capture a pointer for a drag gesture
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureError {
    /// The host has no pointer capture support
    #[error("pointer capture is not supported by the host")]
    Unsupported,

    /// The capture target is no longer attached to the element tree
    #[error("pointer capture target is detached")]
    Detached,
}

/// Result type for scroll engine operations
pub type Result<T> = std::result::Result<T, ScrollError>;
