//! Arena-backed widget tree storage.
//!
//! Widgets have reference identity: every registered widget gets a
//! [`WidgetId`] (a slotmap key) that stays valid until the widget is
//! removed, and lookups through a stale id simply fail. The arena owns
//! both halves of a widget, its [`WidgetState`] and its boxed
//! [`WidgetBehavior`], and the behavior slot is temporarily vacated
//! while a callback runs so the callback can borrow the rest of the tree
//! mutably.

use slotmap::SlotMap;
use tracing::trace;
use trellis_core::logging::{targets, TreeStyle};
use trellis_render::Rect;

use super::events::Event;
use super::focus::FocusManager;
use super::state::WidgetState;
use super::traits::WidgetBehavior;

slotmap::new_key_type! {
    /// Handle to a widget in the tree arena.
    pub struct WidgetId;
}

pub(crate) struct WidgetNode {
    pub(crate) state: WidgetState,
    /// `None` only while a callback on this widget is running.
    pub(crate) behavior: Option<Box<dyn WidgetBehavior>>,
}

/// The widget arena plus the app-wide focus pointer.
///
/// The tree is the only owner of widgets. Parent→child edges are the
/// per-frame `children` lists; the child→parent edge is a lookup-only
/// back-reference.
#[derive(Default)]
pub struct WidgetTree {
    pub(crate) nodes: SlotMap<WidgetId, WidgetNode>,
    pub(crate) focus: FocusManager,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget, taking ownership of its behavior.
    ///
    /// The popup and drawability traits of the behavior are fixed
    /// per-type and snapshotted here.
    pub fn register(&mut self, behavior: Box<dyn WidgetBehavior>) -> WidgetId {
        let state = WidgetState::new(behavior.is_popup(), behavior.draws());
        let id = self.nodes.insert(WidgetNode {
            state,
            behavior: Some(behavior),
        });
        trace!(target: targets::TREE, widget = ?id, "registered widget");
        id
    }

    /// Remove a widget from the arena.
    ///
    /// The widget simply stops existing; if a parent still appends the
    /// stale id next frame, that append panics as a contract violation.
    pub fn remove(&mut self, id: WidgetId) {
        if self.focus.focused() == Some(id) {
            self.focus.clear();
        }
        self.nodes.remove(id);
    }

    /// Whether the id refers to a registered widget.
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of registered widgets (live or not).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The state of a widget.
    pub fn state(&self, id: WidgetId) -> Option<&WidgetState> {
        self.nodes.get(id).map(|n| &n.state)
    }

    pub(crate) fn state_mut(&mut self, id: WidgetId) -> Option<&mut WidgetState> {
        self.nodes.get_mut(id).map(|n| &mut n.state)
    }

    /// Absolute bounds (`Rect::ZERO` for an unknown id).
    pub fn bounds(&self, id: WidgetId) -> Rect {
        self.state(id).map(|s| s.bounds).unwrap_or(Rect::ZERO)
    }

    /// Ancestor-clipped visible bounds (`Rect::ZERO` for an unknown id).
    pub fn visible_bounds(&self, id: WidgetId) -> Rect {
        self.state(id)
            .map(|s| s.visible_bounds)
            .unwrap_or(Rect::ZERO)
    }

    /// The parent a widget was appended under this frame.
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.state(id).and_then(|s| s.parent)
    }

    /// This frame's children of a widget, in append (= paint) order.
    pub fn children(&self, id: WidgetId) -> Vec<WidgetId> {
        self.state(id).map(|s| s.children.clone()).unwrap_or_default()
    }

    // =========================================================================
    // Tree-scoped state queries
    // =========================================================================

    /// Tree-scoped visibility: the widget and every ancestor up to the
    /// root must be unhidden. A root with no parent reduces to its own
    /// flag. Unknown ids are not visible.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(state) = self.state(cur) else {
                return false;
            };
            if state.hidden {
                return false;
            }
            current = state.parent;
        }
        true
    }

    /// Tree-scoped enablement, analogous to [`WidgetTree::is_visible`].
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(state) = self.state(cur) else {
                return false;
            };
            if state.disabled {
                return false;
            }
            current = state.parent;
        }
        true
    }

    /// Whether the widget and all of its ancestors were appended this
    /// frame, i.e. the widget is reachable from the live root.
    pub(crate) fn is_attached(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(state) = self.state(cur) else {
                return false;
            };
            if !state.live {
                return false;
            }
            current = state.parent;
        }
        true
    }

    // =========================================================================
    // Transition setters
    //
    // Every setter snapshots the visual state before mutating and feeds
    // the snapshot through the redraw machine, so state that ping-pongs
    // within one frame schedules no repaint.
    // =========================================================================

    /// Clear the hidden flag.
    pub fn show(&mut self, id: WidgetId) {
        let Some(state) = self.state_mut(id) else {
            return;
        };
        let before = state.visual_state();
        state.hidden = false;
        state.note_transition(before);
    }

    /// Set the hidden flag. A hidden widget that held focus loses it.
    pub fn hide(&mut self, id: WidgetId) {
        let held_focus = self.focus.focused() == Some(id);
        let Some(state) = self.state_mut(id) else {
            return;
        };
        let before = state.visual_state();
        state.hidden = true;
        if held_focus {
            state.focused = false;
        }
        state.note_transition(before);
        if held_focus {
            self.focus.clear();
        }
    }

    /// Clear the disabled flag.
    pub fn enable(&mut self, id: WidgetId) {
        let Some(state) = self.state_mut(id) else {
            return;
        };
        let before = state.visual_state();
        state.disabled = false;
        state.note_transition(before);
    }

    /// Set the disabled flag. A disabled widget that held focus loses it.
    pub fn disable(&mut self, id: WidgetId) {
        let held_focus = self.focus.focused() == Some(id);
        let Some(state) = self.state_mut(id) else {
            return;
        };
        let before = state.visual_state();
        state.disabled = true;
        if held_focus {
            state.focused = false;
        }
        state.note_transition(before);
        if held_focus {
            self.focus.clear();
        }
    }

    /// Set transparency (0 = opaque, 1 = invisible), clamped.
    pub fn set_transparency(&mut self, id: WidgetId, transparency: f32) {
        let Some(state) = self.state_mut(id) else {
            return;
        };
        let before = state.visual_state();
        state.transparency = transparency.clamp(0.0, 1.0);
        state.note_transition(before);
    }

    pub(crate) fn set_focused_flag(&mut self, id: WidgetId, focused: bool) {
        let Some(state) = self.state_mut(id) else {
            return;
        };
        let before = state.visual_state();
        state.focused = focused;
        state.note_transition(before);
    }

    // =========================================================================
    // Redraw requests
    // =========================================================================

    /// Unconditionally schedule a redraw of the widget's visible bounds
    /// (plus any extra bounds set earlier this frame).
    ///
    /// Popup descendants render outside the normal parent-clips-child
    /// geometry, so they are independently flagged, however deeply
    /// nested.
    pub fn request_redraw(&mut self, id: WidgetId) {
        let Some(state) = self.state_mut(id) else {
            return;
        };
        state.force_redraw();
        for child in self.children(id) {
            self.request_redraw_if_popup(child);
        }
    }

    /// Like [`WidgetTree::request_redraw`] with extra bounds unioned into
    /// the scheduled region.
    pub fn request_redraw_with_bounds(&mut self, id: WidgetId, bounds: Rect) {
        let Some(state) = self.state_mut(id) else {
            return;
        };
        state.redraw_bounds = state.redraw_bounds.union(&bounds);
        state.force_redraw();
        for child in self.children(id) {
            self.request_redraw_if_popup(child);
        }
    }

    fn request_redraw_if_popup(&mut self, id: WidgetId) {
        if let Some(state) = self.state_mut(id) {
            if state.popup {
                state.force_redraw();
            }
        }
        for child in self.children(id) {
            self.request_redraw_if_popup(child);
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Enqueue an event on a widget's queue.
    pub fn enqueue_event(&mut self, id: WidgetId, event: Event) {
        if let Some(state) = self.state_mut(id) {
            state.events.enqueue(event);
        }
    }

    /// Remove and return the oldest event on a widget's queue.
    pub fn dequeue_event(&mut self, id: WidgetId) -> Option<Event> {
        self.state_mut(id).and_then(|s| s.events.dequeue())
    }

    // =========================================================================
    // Debugging
    // =========================================================================

    /// Render the live tree under `root` as an indented listing.
    pub fn format_tree(&self, root: WidgetId, style: TreeStyle) -> String {
        let mut out = String::new();
        self.format_node(root, style, "", true, true, &mut out);
        out
    }

    fn format_node(
        &self,
        id: WidgetId,
        style: TreeStyle,
        prefix: &str,
        is_last: bool,
        is_root: bool,
        out: &mut String,
    ) {
        let Some(state) = self.state(id) else {
            return;
        };
        let name = self
            .nodes
            .get(id)
            .and_then(|n| n.behavior.as_ref())
            .map(|b| b.debug_name())
            .unwrap_or("widget");

        if is_root {
            out.push_str(&format!("{name} {:?} {:?}\n", id, state.bounds));
        } else {
            let branch = if is_last {
                style.last_branch()
            } else {
                style.branch()
            };
            out.push_str(&format!(
                "{prefix}{branch}{name} {:?} {:?}\n",
                id, state.bounds
            ));
        }

        let children = &state.children;
        for (i, child) in children.iter().enumerate() {
            let last = i + 1 == children.len();
            let child_prefix = if is_root {
                String::new()
            } else if is_last {
                format!("{prefix}{}", style.space())
            } else {
                format!("{prefix}{}", style.pipe())
            };
            self.format_node(*child, style, &child_prefix, last, false, out);
        }
    }
}
