//! Render capability surface for Trellis.
//!
//! The widget runtime in the `trellis` crate is engine-agnostic: it needs
//! geometry types, an accumulated damage region, and a drawing surface
//! that supports sub-region views and alpha compositing. This crate
//! provides those as a small, software-rendered capability surface. A
//! host embedding Trellis in a GPU engine maps [`Canvas`] calls onto its
//! own primitives; the CPU [`Pixmap`] here is what the runtime's own
//! tests and headless hosts draw into.

pub mod damage;
mod error;
mod offscreen;
mod surface;
mod types;

pub use damage::DamageTracker;
pub use error::{RenderError, RenderResult};
pub use offscreen::OffscreenBuffer;
pub use surface::{Canvas, Pixmap, PixmapView};
pub use types::{Color, Point, Rect, Size};
