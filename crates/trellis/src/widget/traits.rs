//! The widget behavior contract.
//!
//! [`WidgetBehavior`] is the polymorphic half of a widget: one boxed
//! behavior per tree node, dispatched dynamically. Every method has a
//! default no-op implementation so a widget implements only what it
//! needs: a pure container overrides `layout` and `draws`, a leaf
//! overrides `draw` and maybe `handle_input`.
//!
//! Callbacks receive a context struct naming what that phase may touch:
//! [`EventCx`] (input dispatch, mutable tree access), [`UpdateCx`]
//! (per-frame update, mutable tree access), [`CursorCx`] (cursor
//! resolution, read-only), [`DrawCx`] (paint, read-only). The behavior
//! itself is lifted out of the tree for the duration of a callback,
//! which is what makes the mutable tree borrow sound.

use cursor_icon::CursorIcon;
use trellis_core::{Context, Result};
use trellis_render::{Canvas, Rect};

use super::appender::ChildAppender;
use super::events::Event;
use super::input::{InputResult, InputState};
use super::tree::{WidgetId, WidgetTree};

/// The polymorphic logic bound to exactly one widget.
pub trait WidgetBehavior: 'static {
    /// Re-declare this widget's children for the current frame.
    ///
    /// Called once per frame in pre-order, with the previous child list
    /// already cleared. Append every child wanted this frame with its
    /// bounds; a child not appended drops out of the live tree.
    fn layout(&mut self, appender: &mut ChildAppender<'_>) -> Result<()> {
        let _ = appender;
        Ok(())
    }

    /// React to this frame's input snapshot.
    ///
    /// Runs after all children declined (depth-first, reverse append
    /// order, so the visually topmost widget gets first refusal).
    fn handle_input(&mut self, cx: &mut EventCx<'_>) -> InputResult {
        let _ = cx;
        InputResult::None
    }

    /// Per-frame update hook: state transitions, animation ticks,
    /// deferred redraw flagging.
    fn update(&mut self, cx: &mut UpdateCx<'_>) -> Result<()> {
        let _ = cx;
        Ok(())
    }

    /// The cursor to show while the pointer is over this widget's
    /// visible bounds. `None` defers to widgets below, then the platform
    /// default.
    fn cursor_shape(&self, cx: &CursorCx<'_>) -> Option<CursorIcon> {
        let _ = cx;
        None
    }

    /// Paint this widget's own visuals. Children paint themselves.
    fn draw(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        let _ = (cx, canvas);
    }

    /// Whether this widget type paints anything. Non-drawing widgets
    /// are exempt from appear/move/removal damage. Fixed per-type.
    fn draws(&self) -> bool {
        true
    }

    /// Whether this widget transforms its children's events during the
    /// propagation phase. Fixed per-type.
    fn propagates_events(&self) -> bool {
        false
    }

    /// Transform or drop one event drained from the child `from`.
    ///
    /// Only called when [`WidgetBehavior::propagates_events`] is true.
    /// Returning `Some` re-enqueues the (possibly rewritten) event on
    /// this widget; `None` drops it.
    fn propagate_event(&mut self, from: WidgetId, event: Event) -> Option<Event> {
        let _ = from;
        Some(event)
    }

    /// Whether this widget type escapes ancestor clipping. Fixed
    /// per-type.
    fn is_popup(&self) -> bool {
        false
    }

    /// Short name for tree debug dumps.
    fn debug_name(&self) -> &'static str {
        "widget"
    }
}

/// Context for [`WidgetBehavior::handle_input`].
pub struct EventCx<'a> {
    pub(crate) tree: &'a mut WidgetTree,
    pub(crate) widget: WidgetId,
    /// Frame parameters.
    pub context: &'a Context,
    /// This frame's polled input snapshot.
    pub input: &'a InputState,
}

impl EventCx<'_> {
    /// The widget this callback runs for.
    #[inline]
    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    /// This widget's absolute bounds.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.widget)
    }

    /// This widget's ancestor-clipped visible bounds.
    pub fn visible_bounds(&self) -> Rect {
        self.tree.visible_bounds(self.widget)
    }

    /// Tree-scoped enablement of this widget.
    pub fn is_enabled(&self) -> bool {
        self.tree.is_enabled(self.widget)
    }

    /// Whether this widget holds focus.
    pub fn is_focused(&self) -> bool {
        self.tree.is_focused(self.widget)
    }

    /// Whether the pointer is inside this widget's visible bounds.
    pub fn is_hovered(&self) -> bool {
        self.input
            .cursor
            .is_some_and(|pos| self.visible_bounds().contains(pos))
    }

    /// Try to take the app-wide focus.
    pub fn focus(&mut self) -> bool {
        self.tree.focus(self.widget)
    }

    /// Give up the app-wide focus, if held.
    pub fn blur(&mut self) {
        self.tree.blur(self.widget);
    }

    /// Enqueue an event on this widget's own queue.
    pub fn enqueue(&mut self, event: Event) {
        self.tree.enqueue_event(self.widget, event);
    }

    /// Unconditionally schedule a redraw of this widget.
    pub fn request_redraw(&mut self) {
        self.tree.request_redraw(self.widget);
    }
}

/// Context for [`WidgetBehavior::update`].
pub struct UpdateCx<'a> {
    pub(crate) tree: &'a mut WidgetTree,
    pub(crate) widget: WidgetId,
    /// Frame parameters.
    pub context: &'a Context,
}

impl UpdateCx<'_> {
    /// The widget this callback runs for.
    #[inline]
    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    /// This widget's absolute bounds.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.widget)
    }

    /// This widget's ancestor-clipped visible bounds.
    pub fn visible_bounds(&self) -> Rect {
        self.tree.visible_bounds(self.widget)
    }

    /// Whether this widget holds focus.
    pub fn is_focused(&self) -> bool {
        self.tree.is_focused(self.widget)
    }

    /// Drain this widget's event queue (events enqueued by itself or
    /// bubbled up from children during the propagation phase).
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.tree
            .state_mut(self.widget)
            .map(|s| s.events.drain_all())
            .unwrap_or_default()
    }

    /// Enqueue an event on this widget's own queue.
    pub fn enqueue(&mut self, event: Event) {
        self.tree.enqueue_event(self.widget, event);
    }

    /// Hide this widget (blurring it if focused).
    pub fn hide(&mut self) {
        self.tree.hide(self.widget);
    }

    /// Show this widget.
    pub fn show(&mut self) {
        self.tree.show(self.widget);
    }

    /// Try to take the app-wide focus.
    pub fn focus(&mut self) -> bool {
        self.tree.focus(self.widget)
    }

    /// Give up the app-wide focus, if held.
    pub fn blur(&mut self) {
        self.tree.blur(self.widget);
    }

    /// Unconditionally schedule a redraw of this widget.
    pub fn request_redraw(&mut self) {
        self.tree.request_redraw(self.widget);
    }

    /// Schedule a redraw including extra bounds beyond the visible ones.
    pub fn request_redraw_with_bounds(&mut self, bounds: Rect) {
        self.tree.request_redraw_with_bounds(self.widget, bounds);
    }
}

/// Context for [`WidgetBehavior::cursor_shape`].
pub struct CursorCx<'a> {
    pub(crate) tree: &'a WidgetTree,
    pub(crate) widget: WidgetId,
    /// Frame parameters.
    pub context: &'a Context,
    /// This frame's polled input snapshot.
    pub input: &'a InputState,
}

impl CursorCx<'_> {
    /// The widget this callback runs for.
    #[inline]
    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    /// This widget's ancestor-clipped visible bounds.
    pub fn visible_bounds(&self) -> Rect {
        self.tree.visible_bounds(self.widget)
    }

    /// Tree-scoped enablement of this widget.
    pub fn is_enabled(&self) -> bool {
        self.tree.is_enabled(self.widget)
    }
}

/// Context for [`WidgetBehavior::draw`].
pub struct DrawCx<'a> {
    pub(crate) tree: &'a WidgetTree,
    pub(crate) widget: WidgetId,
    /// Frame parameters.
    pub context: &'a Context,
}

impl DrawCx<'_> {
    /// The widget this callback runs for.
    #[inline]
    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    /// This widget's absolute bounds. Draw in absolute coordinates; the
    /// destination canvas clips to the damage region.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.widget)
    }

    /// This widget's ancestor-clipped visible bounds.
    pub fn visible_bounds(&self) -> Rect {
        self.tree.visible_bounds(self.widget)
    }

    /// Whether this widget holds focus.
    pub fn is_focused(&self) -> bool {
        self.tree.is_focused(self.widget)
    }

    /// Tree-scoped enablement of this widget.
    pub fn is_enabled(&self) -> bool {
        self.tree.is_enabled(self.widget)
    }
}
