//! The widget system.
//!
//! This module provides the widget-tree runtime:
//!
//! - [`WidgetBehavior`]: the trait every widget kind implements
//! - [`WidgetTree`] / [`WidgetId`]: arena-backed tree storage and handles
//! - [`ChildAppender`]: per-frame child declaration during layout
//! - [`WidgetState`]: a node's geometry, flags, queue, and redraw state
//! - [`EventQueue`] / [`Event`]: per-widget FIFO event buffers
//! - [`InputState`] / [`InputResult`]: the polled input snapshot and
//!   dispatch outcome
//! - [`widgets`]: a few concrete widgets illustrating the contract
//!
//! Ownership runs strictly parent→children through the per-frame child
//! lists; the parent back-reference on each node is lookup-only and never
//! extends a lifetime. Widget handles are slotmap keys, so a stale
//! [`WidgetId`] fails lookups instead of dangling.

mod appender;
mod events;
mod focus;
mod input;
pub(crate) mod paint;
mod state;
mod traits;
mod tree;
pub mod widgets;


pub use appender::ChildAppender;
pub use events::{Event, EventQueue};
pub use focus::FocusManager;
pub use input::{InputResult, InputState, Key, MouseButton, MouseButtons};
pub use state::WidgetState;
pub use traits::{CursorCx, DrawCx, EventCx, UpdateCx, WidgetBehavior};
pub use tree::{WidgetId, WidgetTree};
