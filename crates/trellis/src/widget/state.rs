//! Per-widget state.
//!
//! `WidgetState` is the data half of a widget: geometry assigned by the
//! parent during layout, the local visibility/enablement/transparency
//! flags, the event queue, liveness bookkeeping for the per-frame child
//! rebuild, and the redraw-tracking state machine described below.
//!
//! # Redraw tracking
//!
//! The observable "visual state" of a widget is the tuple
//! `{hidden, disabled, transparency, focused}`. Every transition setter
//! snapshots the state before mutating and feeds the snapshot to
//! [`WidgetState::note_transition`]:
//!
//! - no net change: nothing happens;
//! - first change this frame: the redraw flag is armed and the
//!   *pre-change* state is recorded as the baseline;
//! - a later change that lands back on the baseline disarms the flag,
//!   so state that ping-pongs within one frame (hide then show) costs
//!   no repaint;
//! - an explicit redraw request arms the flag with a `Forced` baseline
//!   that no state transition can cancel.
//!
//! The armed flag is consumed once per frame after the update phase,
//! merging the widget's visible bounds (plus any explicitly requested
//! extra bounds) into the global damage region.

use trellis_render::{OffscreenBuffer, Rect};

use super::events::EventQueue;
use super::tree::WidgetId;

/// The redraw-relevant visual state of a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VisualState {
    pub hidden: bool,
    pub disabled: bool,
    pub transparency: f32,
    pub focused: bool,
}

/// Pending-redraw flag plus its coalescing baseline.
///
/// `Forced` replaces the original implementation's never-equal sentinel
/// state: it means "always differs", so no later transition can cancel
/// the pending redraw.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum RedrawBaseline {
    /// No redraw pending.
    #[default]
    Clean,
    /// Redraw pending; cancelled if the visual state returns to the
    /// recorded pre-change baseline before the next draw.
    State(VisualState),
    /// Redraw pending unconditionally.
    Forced,
}

/// The data half of a widget node.
///
/// Behaviors read this through the context types; the tree and the app
/// driver mutate it through the transition setters on
/// [`WidgetTree`](super::tree::WidgetTree) so every change goes through
/// the redraw machine.
#[derive(Debug)]
pub struct WidgetState {
    /// Absolute bounds, assigned by the parent during layout.
    pub(crate) bounds: Rect,
    /// Bounds intersected with every ancestor's visible bounds. For
    /// popups this equals `bounds` (popups escape clipping).
    pub(crate) visible_bounds: Rect,
    /// Local hidden flag; effective visibility ANDs ancestors.
    pub(crate) hidden: bool,
    /// Local disabled flag; effective enablement ANDs ancestors.
    pub(crate) disabled: bool,
    /// 0 = opaque, 1 = fully transparent.
    pub(crate) transparency: f32,
    /// Whether this widget holds the app-wide focus.
    pub(crate) focused: bool,
    /// Fixed per-type: popups escape ancestor clipping.
    pub(crate) popup: bool,
    /// Fixed per-type: whether the behavior paints anything.
    pub(crate) draws: bool,
    /// Lookup-only back-reference; never extends a lifetime.
    pub(crate) parent: Option<WidgetId>,
    /// This frame's children, in append (= paint) order.
    pub(crate) children: Vec<WidgetId>,
    /// The widget's event queue.
    pub(crate) events: EventQueue,
    /// Redraw flag + coalescing baseline.
    pub(crate) redraw: RedrawBaseline,
    /// Extra explicitly requested redraw bounds (empty = none).
    pub(crate) redraw_bounds: Rect,
    /// Appended by a parent this frame.
    pub(crate) live: bool,
    /// Was appended last frame.
    pub(crate) was_live: bool,
    /// Compositing buffer for opacity < 1, exclusively owned.
    pub(crate) offscreen: OffscreenBuffer,
}

impl WidgetState {
    pub(crate) fn new(popup: bool, draws: bool) -> Self {
        Self {
            bounds: Rect::ZERO,
            visible_bounds: Rect::ZERO,
            hidden: false,
            disabled: false,
            transparency: 0.0,
            focused: false,
            popup,
            draws,
            parent: None,
            children: Vec::new(),
            events: EventQueue::new(),
            redraw: RedrawBaseline::Clean,
            redraw_bounds: Rect::ZERO,
            live: false,
            was_live: false,
            offscreen: OffscreenBuffer::new(),
        }
    }

    /// Absolute bounds assigned by the parent.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Bounds clipped by ancestors (popups: own bounds, unclipped).
    #[inline]
    pub fn visible_bounds(&self) -> Rect {
        self.visible_bounds
    }

    /// The local hidden flag (not the tree-scoped visibility).
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// The local disabled flag (not the tree-scoped enablement).
    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Transparency, 0 = opaque.
    #[inline]
    pub fn transparency(&self) -> f32 {
        self.transparency
    }

    /// Whether this widget type escapes ancestor clipping.
    #[inline]
    pub fn is_popup(&self) -> bool {
        self.popup
    }

    /// This frame's children, in paint order.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The parent this widget was appended under, if any.
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    pub(crate) fn visual_state(&self) -> VisualState {
        VisualState {
            hidden: self.hidden,
            disabled: self.disabled,
            transparency: self.transparency,
            focused: self.focused,
        }
    }

    /// Feed a completed mutation into the redraw machine. `before` is the
    /// visual state captured before the mutation.
    pub(crate) fn note_transition(&mut self, before: VisualState) {
        let after = self.visual_state();
        if after == before {
            return;
        }
        match self.redraw {
            RedrawBaseline::Clean => {
                self.redraw = RedrawBaseline::State(before);
            }
            RedrawBaseline::State(baseline) if after == baseline => {
                // Net effect over the frame cancelled out.
                self.redraw = RedrawBaseline::Clean;
                self.redraw_bounds = Rect::ZERO;
            }
            _ => {}
        }
    }

    /// Arm the redraw flag unconditionally.
    pub(crate) fn force_redraw(&mut self) {
        self.redraw = RedrawBaseline::Forced;
    }

    /// Whether a redraw is pending.
    pub(crate) fn redraw_pending(&self) -> bool {
        self.redraw != RedrawBaseline::Clean
    }

    /// Consume the pending redraw, returning the region to damage.
    pub(crate) fn take_redraw(&mut self) -> Option<Rect> {
        if !self.redraw_pending() {
            return None;
        }
        let region = self.visible_bounds.union(&self.redraw_bounds);
        self.redraw = RedrawBaseline::Clean;
        self.redraw_bounds = Rect::ZERO;
        Some(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_transition_no_flag() {
        let mut s = WidgetState::new(false, true);
        let before = s.visual_state();
        // No mutation at all.
        s.note_transition(before);
        assert!(!s.redraw_pending());
    }

    #[test]
    fn test_transition_arms_flag() {
        let mut s = WidgetState::new(false, true);
        let before = s.visual_state();
        s.hidden = true;
        s.note_transition(before);
        assert!(s.redraw_pending());
    }

    #[test]
    fn test_roundtrip_coalesces() {
        let mut s = WidgetState::new(false, true);

        let before = s.visual_state();
        s.hidden = true;
        s.note_transition(before);

        let before = s.visual_state();
        s.hidden = false;
        s.note_transition(before);

        assert!(!s.redraw_pending());
    }

    #[test]
    fn test_forced_never_coalesces() {
        let mut s = WidgetState::new(false, true);
        s.force_redraw();

        let before = s.visual_state();
        s.hidden = true;
        s.note_transition(before);
        let before = s.visual_state();
        s.hidden = false;
        s.note_transition(before);

        assert!(s.redraw_pending());
    }

    #[test]
    fn test_take_redraw_unions_extra_bounds() {
        let mut s = WidgetState::new(false, true);
        s.visible_bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        s.redraw_bounds = Rect::new(20.0, 0.0, 10.0, 10.0);
        s.force_redraw();

        assert_eq!(s.take_redraw(), Some(Rect::new(0.0, 0.0, 30.0, 10.0)));
        assert!(!s.redraw_pending());
        assert_eq!(s.take_redraw(), None);
    }
}
