//! Error types for the render surface.

use thiserror::Error;

/// Errors raised by surface operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A surface was created or resized with a zero dimension.
    #[error("surface dimensions must be non-zero (got {width}x{height})")]
    ZeroSizedSurface { width: u32, height: u32 },
}

/// A specialized Result type for render operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
