//! Core services for Trellis.
//!
//! This crate holds the pieces of Trellis that have no dependency on the
//! widget tree or the rendering surface:
//!
//! - [`Context`]: per-frame parameters (device scale, app scale, color mode)
//! - [`TrellisError`]: the error type threaded through frame callbacks
//! - [`logging`]: `tracing` target constants for log filtering
//!
//! The widget runtime lives in the `trellis` crate; geometry and the
//! software surface live in `trellis-render`.

mod context;
mod error;
pub mod logging;

pub use context::{
    default_color_mode, set_default_color_mode, ColorMode, Context, COLOR_MODE_ENV,
};
pub use error::{Result, TrellisError};
