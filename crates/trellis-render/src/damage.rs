//! Damage tracking for partial redrawing.
//!
//! [`DamageTracker`] accumulates dirty rectangles into a single bounding
//! union. Over-approximation is fine (a few extra pixels repaint);
//! under-approximation is not, so callers always add the full rectangle
//! they might have changed. The tracker clips damage to a viewport when
//! one is set, which keeps clearing redraws for widgets dragged
//! off-screen from inflating the union.

use crate::types::Rect;

/// Tracks damaged (dirty) regions that need repainting.
///
/// All damage is accumulated into a single bounding rectangle. Adding an
/// empty rectangle is a no-op. [`DamageTracker::take_region`] hands the
/// accumulated region to the draw pass and resets the tracker.
#[derive(Debug, Clone, Default)]
pub struct DamageTracker {
    /// The accumulated damage region (union of all dirty rects).
    damage: Option<Rect>,
    /// Whether the whole viewport must repaint regardless of `damage`.
    full_repaint: bool,
    /// Viewport bounds used for clipping and full-repaint resolution.
    viewport: Option<Rect>,
}

impl DamageTracker {
    /// Create a new damage tracker with no viewport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport bounds. Call when the window or surface resizes.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = Some(viewport);
    }

    /// Add a damaged region that needs repainting.
    pub fn add(&mut self, rect: Rect) {
        if rect.is_empty() {
            return;
        }
        let rect = match &self.viewport {
            Some(viewport) => match rect.intersect(viewport) {
                Some(clipped) => clipped,
                None => return,
            },
            None => rect,
        };
        self.damage = Some(match self.damage {
            Some(existing) => existing.union(&rect),
            None => rect,
        });
    }

    /// Mark the entire viewport dirty.
    pub fn invalidate_all(&mut self) {
        self.full_repaint = true;
    }

    /// Check if any damage is pending.
    pub fn has_pending(&self) -> bool {
        self.full_repaint || self.damage.is_some()
    }

    /// The pending damage region, without clearing it.
    ///
    /// A full repaint resolves to the viewport (or the accumulated union
    /// if no viewport is set).
    pub fn region(&self) -> Option<Rect> {
        if self.full_repaint {
            return self.viewport.or(self.damage);
        }
        self.damage
    }

    /// Take the pending damage region and reset the tracker.
    pub fn take_region(&mut self) -> Option<Rect> {
        let region = self.region();
        self.clear();
        region
    }

    /// Clear all pending damage.
    pub fn clear(&mut self) {
        self.damage = None;
        self.full_repaint = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker() {
        let tracker = DamageTracker::new();
        assert!(!tracker.has_pending());
        assert!(tracker.region().is_none());
    }

    #[test]
    fn test_union_accumulation() {
        let mut tracker = DamageTracker::new();
        tracker.add(Rect::new(0.0, 0.0, 50.0, 50.0));
        tracker.add(Rect::new(25.0, 25.0, 50.0, 50.0));

        assert_eq!(tracker.region(), Some(Rect::new(0.0, 0.0, 75.0, 75.0)));
    }

    #[test]
    fn test_empty_rects_ignored() {
        let mut tracker = DamageTracker::new();
        tracker.add(Rect::new(0.0, 0.0, 0.0, 50.0));
        tracker.add(Rect::new(0.0, 0.0, 50.0, 0.0));
        assert!(!tracker.has_pending());
    }

    #[test]
    fn test_viewport_clipping() {
        let mut tracker = DamageTracker::new();
        tracker.set_viewport(Rect::new(0.0, 0.0, 100.0, 100.0));

        tracker.add(Rect::new(50.0, 50.0, 200.0, 200.0));
        assert_eq!(tracker.region(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));

        tracker.add(Rect::new(500.0, 500.0, 10.0, 10.0));
        assert_eq!(tracker.region(), Some(Rect::new(50.0, 50.0, 50.0, 50.0)));
    }

    #[test]
    fn test_invalidate_all_resolves_to_viewport() {
        let mut tracker = DamageTracker::new();
        tracker.set_viewport(Rect::new(0.0, 0.0, 1024.0, 768.0));
        tracker.add(Rect::new(0.0, 0.0, 10.0, 10.0));
        tracker.invalidate_all();

        assert_eq!(tracker.region(), Some(Rect::new(0.0, 0.0, 1024.0, 768.0)));
    }

    #[test]
    fn test_take_region_clears() {
        let mut tracker = DamageTracker::new();
        tracker.add(Rect::new(0.0, 0.0, 10.0, 10.0));

        assert!(tracker.take_region().is_some());
        assert!(!tracker.has_pending());
        assert!(tracker.take_region().is_none());
    }
}
