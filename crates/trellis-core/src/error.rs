//! Error types for Trellis.

use std::fmt;

/// The main error type for Trellis operations.
///
/// Frame callbacks (layout, update) return this; a returned error aborts
/// the remaining phases of the current frame and is surfaced to the host.
/// Contract violations (for example appending the same child twice in one
/// layout pass) are not represented here; those panic.
#[derive(Debug)]
pub enum TrellisError {
    /// A widget's layout callback failed.
    Layout(Box<dyn std::error::Error + Send + Sync>),
    /// A widget's update callback failed.
    Update(Box<dyn std::error::Error + Send + Sync>),
    /// A widget handle refers to a widget that no longer exists.
    WidgetNotFound,
    /// A required resource (image, style asset) was missing.
    MissingResource(String),
}

impl TrellisError {
    /// Wrap an arbitrary error as a layout failure.
    pub fn layout(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Layout(Box::new(err))
    }

    /// Wrap an arbitrary error as an update failure.
    pub fn update(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Update(Box::new(err))
    }
}

impl fmt::Display for TrellisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "Layout callback failed: {err}"),
            Self::Update(err) => write!(f, "Update callback failed: {err}"),
            Self::WidgetNotFound => {
                write!(f, "Widget handle refers to a widget that no longer exists")
            }
            Self::MissingResource(name) => write!(f, "Missing resource: {name}"),
        }
    }
}

impl std::error::Error for TrellisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) | Self::Update(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// A specialized Result type for Trellis operations.
pub type Result<T> = std::result::Result<T, TrellisError>;
