//! Trellis: a retained-mode widget-tree runtime for 2D engines.
//!
//! Trellis manages a tree of widgets with layout, input dispatch, focus
//! management, and damage-tracked redrawing. The tree is retained:
//! widgets are constructed once and persist across frames. Each
//! widget's *child list*, however, is rebuilt from scratch every frame by its
//! behavior's layout callback. Rebuilding instead of diffing trades a
//! little recomputation for the absence of stale-reference bugs, and the
//! redraw-invalidation rules depend on observing a widget's absence in
//! the current frame.
//!
//! # Frame pipeline
//!
//! The host render loop calls [`App::update`] once per tick and
//! [`App::draw`] when it wants pixels. `update` runs the ordered phases:
//! resize detection, tree rebuild, input dispatch, cursor resolution,
//! event propagation, widget update, event-queue clearing, and a final
//! scale-change check. `draw` repaints only the accumulated damage
//! region and is a no-op when nothing changed.
//!
//! # Writing a widget
//!
//! Implement [`WidgetBehavior`] and register it with the [`App`] to get a
//! [`WidgetId`]. Parents declare children each frame through the
//! [`ChildAppender`] handed to their layout callback:
//!
//! ```ignore
//! use trellis::{App, ChildAppender, WidgetBehavior};
//! use trellis_render::Rect;
//!
//! struct Split { left: trellis::WidgetId, right: trellis::WidgetId }
//!
//! impl WidgetBehavior for Split {
//!     fn layout(&mut self, a: &mut ChildAppender<'_>) -> trellis::Result<()> {
//!         let b = a.bounds();
//!         let half = b.width() / 2.0;
//!         a.append(self.left, Rect::new(b.left(), b.top(), half, b.height()));
//!         a.append(self.right, Rect::new(b.left() + half, b.top(), half, b.height()));
//!         Ok(())
//!     }
//!     fn draws(&self) -> bool { false }
//! }
//! ```

mod app;
pub mod widget;

pub use app::App;
pub use widget::widgets::{Button, Panel, Popup};
pub use widget::{
    ChildAppender, CursorCx, DrawCx, Event, EventCx, EventQueue, InputResult, InputState, Key,
    MouseButton, MouseButtons, UpdateCx, WidgetBehavior, WidgetId, WidgetTree,
};

pub use trellis_core::{ColorMode, Context, Result, TrellisError};
pub use trellis_render::{Canvas, Color, DamageTracker, Pixmap, Point, Rect, Size};

pub use cursor_icon::CursorIcon;
