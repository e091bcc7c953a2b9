//! Per-frame child declaration.
//!
//! During the tree-rebuild phase every live widget's `layout` runs with
//! a [`ChildAppender`] scoped to it. The appender is the only way to
//! attach a child for the current frame: it assigns bounds, computes the
//! ancestor-clipped visible bounds, marks the child live, and records
//! appear/move damage.

use tracing::trace;
use trellis_core::logging::targets;
use trellis_core::Context;
use trellis_render::{DamageTracker, Rect};

use super::tree::{WidgetId, WidgetTree};

/// Child-declaration handle passed to [`WidgetBehavior::layout`].
///
/// [`WidgetBehavior::layout`]: super::traits::WidgetBehavior::layout
pub struct ChildAppender<'a> {
    pub(crate) tree: &'a mut WidgetTree,
    pub(crate) damage: &'a mut DamageTracker,
    pub(crate) widget: WidgetId,
    /// Frame parameters.
    pub context: &'a Context,
}

impl ChildAppender<'_> {
    /// The widget whose children are being declared.
    #[inline]
    pub fn widget(&self) -> WidgetId {
        self.widget
    }

    /// The declaring widget's absolute bounds.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.widget)
    }

    /// The declaring widget's ancestor-clipped visible bounds.
    pub fn visible_bounds(&self) -> Rect {
        self.tree.visible_bounds(self.widget)
    }

    /// Attach `child` under the current widget for this frame, at the
    /// given absolute bounds.
    ///
    /// Re-appending keeps the child's persistent state (flags, focus,
    /// queue, compositing buffer) intact. If the child newly appeared or
    /// its bounds changed, the affected regions are damaged: clipped to
    /// the parent's visible bounds for ordinary widgets, unclipped for
    /// popups.
    ///
    /// # Panics
    ///
    /// Panics if `child` is not registered, or was already appended this
    /// frame (by this parent or any other). Both are composition bugs
    /// in the caller, not recoverable conditions.
    pub fn append(&mut self, child: WidgetId, bounds: Rect) {
        let parent_visible = self.tree.visible_bounds(self.widget);

        let Some(state) = self.tree.state_mut(child) else {
            panic!("appended an unregistered widget: {child:?}");
        };
        if state.live {
            panic!("widget {child:?} appended twice within one frame");
        }

        let old_bounds = state.bounds;
        let was_live = state.was_live;
        let popup = state.popup;
        let draws = state.draws;

        let visible = if popup {
            bounds
        } else {
            bounds.intersect(&parent_visible).unwrap_or(Rect::ZERO)
        };

        if draws && (!was_live || old_bounds != bounds) {
            if popup {
                self.damage.add(bounds);
                if was_live {
                    self.damage.add(old_bounds);
                }
            } else {
                if let Some(region) = bounds.intersect(&parent_visible) {
                    self.damage.add(region);
                }
                if was_live {
                    if let Some(region) = old_bounds.intersect(&parent_visible) {
                        self.damage.add(region);
                    }
                }
            }
            trace!(
                target: targets::DAMAGE,
                widget = ?child,
                ?bounds,
                "child appeared or moved"
            );
        }

        if let Some(state) = self.tree.state_mut(child) {
            state.parent = Some(self.widget);
            state.bounds = bounds;
            state.visible_bounds = visible;
            state.live = true;
        }

        if let Some(parent) = self.tree.state_mut(self.widget) {
            parent.children.push(child);
        }
    }
}
