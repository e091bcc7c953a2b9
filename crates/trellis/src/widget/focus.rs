//! Focus management.
//!
//! At most one widget holds keyboard focus application-wide. Focus is
//! refused unless the target is tree-scoped visible, tree-scoped
//! enabled, and attached to the live tree; hiding or disabling a
//! focused widget forcibly blurs it (that path lives in the transition
//! setters on [`WidgetTree`]).

use tracing::debug;
use trellis_core::logging::targets;

use super::tree::{WidgetId, WidgetTree};

/// The app-wide focus pointer.
#[derive(Debug, Default)]
pub struct FocusManager {
    focused: Option<WidgetId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently focused widget, if any.
    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    pub(crate) fn set(&mut self, id: WidgetId) {
        self.focused = Some(id);
    }

    pub(crate) fn clear(&mut self) {
        self.focused = None;
    }
}

impl WidgetTree {
    /// Give a widget the app-wide focus.
    ///
    /// A no-op unless the widget is tree-scoped visible, tree-scoped
    /// enabled, and attached to the live tree. Any previously focused
    /// widget is evicted; both widgets go through the redraw machine so
    /// their focus visuals repaint.
    ///
    /// Returns `true` if the widget holds focus afterwards.
    pub fn focus(&mut self, id: WidgetId) -> bool {
        if self.focus.focused() == Some(id) {
            return true;
        }
        if !self.is_attached(id) || !self.is_visible(id) || !self.is_enabled(id) {
            debug!(target: targets::FOCUS, widget = ?id, "focus refused");
            return false;
        }

        if let Some(old) = self.focus.focused() {
            self.set_focused_flag(old, false);
        }
        self.focus.set(id);
        self.set_focused_flag(id, true);
        debug!(target: targets::FOCUS, widget = ?id, "focus set");
        true
    }

    /// Remove focus from a widget, if it holds it.
    pub fn blur(&mut self, id: WidgetId) {
        if self.focus.focused() != Some(id) {
            return;
        }
        self.focus.clear();
        self.set_focused_flag(id, false);
        debug!(target: targets::FOCUS, widget = ?id, "focus cleared");
    }

    /// The currently focused widget, if any.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focus.focused()
    }

    /// Whether a widget holds focus *and* is still tree-scoped visible.
    ///
    /// Hiding always blurs, so a focused-but-hidden widget should be
    /// unreachable; requiring visibility here keeps the invariant
    /// defensible even if a host mutates state in unexpected orders.
    pub fn is_focused(&self, id: WidgetId) -> bool {
        self.focus.focused() == Some(id) && self.is_visible(id)
    }
}
