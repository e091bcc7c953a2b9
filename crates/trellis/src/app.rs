//! The application driver.
//!
//! [`App`] owns the widget tree, the frame context, and the damage
//! tracker, and runs the per-frame pipeline. The host render loop calls
//! [`App::update`] once per tick with the current surface size, device
//! scale, and polled input, then [`App::draw`] when it wants pixels.
//!
//! `update` runs these phases in order:
//!
//! 1. resize / monitor-scale detection (full repaint on change)
//! 2. tree rebuild: liveness flip, then pre-order layout, then removal
//!    damage for widgets that dropped out
//! 3. input dispatch, depth-first with children before parents and
//!    later-appended (topmost) siblings first
//! 4. cursor resolution over the widget under the pointer
//! 5. event propagation, post-order, for parents that opt in
//! 6. widget update, pre-order, merging each widget's pending redraw
//!    into the damage region after its subtree finishes
//! 7. event-queue clearing tree-wide
//! 8. app-scale / color-mode change detection (full repaint on change)
//!
//! `draw` is a no-op when no damage accumulated; otherwise it repaints
//! the tree through a view clipped to the damage region.

use cursor_icon::CursorIcon;
use tracing::{debug, trace};
use trellis_core::logging::targets;
use trellis_core::{ColorMode, Context, Result};
use trellis_render::{DamageTracker, Pixmap, Rect, Size};

use crate::widget::paint;
use crate::widget::{
    ChildAppender, CursorCx, EventCx, InputResult, InputState, UpdateCx, WidgetBehavior, WidgetId,
    WidgetTree,
};

/// The widget runtime for one window.
pub struct App {
    tree: WidgetTree,
    root: WidgetId,
    context: Context,
    damage: DamageTracker,
    screen_size: Size,
    cursor_shape: CursorIcon,
    // Last values the damage state was computed against.
    seen_app_scale: f32,
    seen_color_mode: ColorMode,
}

impl App {
    /// Create an app with the given root behavior.
    ///
    /// The root is always live and always occupies the full surface; its
    /// layout callback declares the rest of the tree.
    pub fn new(root: impl WidgetBehavior) -> Self {
        let mut tree = WidgetTree::new();
        let root = tree.register(Box::new(root));
        let context = Context::new();
        let seen_app_scale = context.app_scale();
        let seen_color_mode = context.color_mode();
        Self {
            tree,
            root,
            context,
            damage: DamageTracker::new(),
            screen_size: Size::ZERO,
            cursor_shape: CursorIcon::Default,
            seen_app_scale,
            seen_color_mode,
        }
    }

    /// Register a widget, taking ownership of its behavior.
    pub fn register(&mut self, behavior: impl WidgetBehavior) -> WidgetId {
        self.tree.register(Box::new(behavior))
    }

    /// The root widget.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably. Hosts use this to flip widget state
    /// (show/hide, enable/disable, focus) between frames.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The frame context.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// The frame context, mutably (app scale, color mode override).
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// The cursor shape resolved by the last update.
    #[inline]
    pub fn cursor_shape(&self) -> CursorIcon {
        self.cursor_shape
    }

    /// The damage accumulated since the last draw, if any.
    pub fn pending_damage(&self) -> Option<Rect> {
        self.damage.region()
    }

    /// Convert an outer surface size in physical pixels to the logical
    /// size the tree lays out in.
    pub fn drawable_size(&self, outer: Size, device_scale: f32) -> Size {
        let scale = device_scale * self.context.app_scale();
        Size::new(outer.width / scale, outer.height / scale)
    }

    /// Run one frame of the update pipeline.
    ///
    /// `size` is the logical surface size, `device_scale` the monitor's
    /// pixel scale, `input` this frame's polled input snapshot. An error
    /// from a layout or update callback aborts the remaining phases; the
    /// tree is left consistent and the next frame may retry.
    pub fn update(&mut self, size: Size, device_scale: f32, input: &InputState) -> Result<()> {
        // Phase 1: surface geometry changes invalidate everything.
        if size != self.screen_size || device_scale != self.context.device_scale() {
            debug!(
                target: targets::FRAME,
                ?size,
                device_scale,
                "surface changed, full repaint"
            );
            self.screen_size = size;
            self.context.set_device_scale(device_scale);
            self.damage.set_viewport(Rect::from_size(size));
            self.damage.invalidate_all();
        }

        // Phase 2: rebuild the live tree.
        self.rebuild_tree(size)?;

        // Phase 3: input dispatch.
        self.dispatch_input(self.root, input);

        // Phase 4: cursor resolution.
        self.cursor_shape = self.resolve_cursor(input);

        // Phase 5: event propagation.
        self.propagate_events(self.root);

        // Phase 6: widget update + redraw harvesting.
        self.update_widgets(self.root)?;

        // Phase 7: queues do not survive the frame.
        for node in self.tree.nodes.values_mut() {
            node.state.events.clear();
        }

        // Phase 8: an app-scale or color-mode change since the last
        // frame we accounted for invalidates everything, same as a
        // resize.
        let app_scale = self.context.app_scale();
        let color_mode = self.context.color_mode();
        if app_scale != self.seen_app_scale || color_mode != self.seen_color_mode {
            debug!(target: targets::FRAME, "context changed, full repaint");
            self.damage.invalidate_all();
        }
        self.seen_app_scale = app_scale;
        self.seen_color_mode = color_mode;

        Ok(())
    }

    /// Repaint the damage accumulated by [`App::update`] onto `surface`.
    ///
    /// A no-op when nothing changed. Painting is clipped to the damage
    /// region, so unchanged pixels are untouched.
    pub fn draw(&mut self, surface: &mut Pixmap) {
        let Some(region) = self.damage.take_region() else {
            return;
        };
        debug!(target: targets::FRAME, ?region, "repainting");
        let mut view = surface.view(region);
        paint::paint_tree(&mut self.tree, &self.context, self.root, &mut view);
    }

    // =========================================================================
    // Pipeline phases
    // =========================================================================

    fn rebuild_tree(&mut self, size: Size) -> Result<()> {
        for node in self.tree.nodes.values_mut() {
            let state = &mut node.state;
            state.was_live = state.live;
            state.live = false;
            state.children.clear();
        }

        // The root is live by fiat and spans the surface. Its bounds only
        // change on resize, which already forced a full repaint.
        let bounds = Rect::from_size(size);
        if let Some(state) = self.tree.state_mut(self.root) {
            state.bounds = bounds;
            state.visible_bounds = bounds;
            state.live = true;
        }

        self.layout_widget(self.root)?;

        // Widgets that were live last frame but not re-appended leave
        // stale pixels at their last bounds.
        let removed: Vec<Rect> = self
            .tree
            .nodes
            .values()
            .filter(|n| n.state.was_live && !n.state.live && n.state.draws)
            .map(|n| n.state.bounds)
            .collect();
        for bounds in removed {
            trace!(target: targets::DAMAGE, ?bounds, "widget removed");
            self.damage.add(bounds);
        }
        Ok(())
    }

    fn layout_widget(&mut self, id: WidgetId) -> Result<()> {
        let Some(mut behavior) = self.take_behavior(id) else {
            return Ok(());
        };
        let mut appender = ChildAppender {
            tree: &mut self.tree,
            damage: &mut self.damage,
            widget: id,
            context: &self.context,
        };
        let result = behavior.layout(&mut appender);
        self.put_behavior(id, behavior);
        result?;

        for child in self.tree.children(id) {
            self.layout_widget(child)?;
        }
        Ok(())
    }

    fn dispatch_input(&mut self, id: WidgetId, input: &InputState) -> InputResult {
        let Some(state) = self.tree.state(id) else {
            return InputResult::None;
        };
        if state.is_hidden() {
            return InputResult::None;
        }

        // Later-appended siblings paint on top, so they get the input
        // first; children always precede their parent.
        for child in self.tree.children(id).into_iter().rev() {
            let result = self.dispatch_input(child, input);
            if !result.is_none() {
                return result;
            }
        }

        let Some(mut behavior) = self.take_behavior(id) else {
            return InputResult::None;
        };
        let mut cx = EventCx {
            tree: &mut self.tree,
            widget: id,
            context: &self.context,
            input,
        };
        let result = behavior.handle_input(&mut cx);
        self.put_behavior(id, behavior);
        result
    }

    fn resolve_cursor(&self, input: &InputState) -> CursorIcon {
        let Some(pos) = input.cursor else {
            return CursorIcon::Default;
        };
        self.cursor_for(self.root, pos, input)
            .unwrap_or(CursorIcon::Default)
    }

    fn cursor_for(
        &self,
        id: WidgetId,
        pos: trellis_render::Point,
        input: &InputState,
    ) -> Option<CursorIcon> {
        let state = self.tree.state(id)?;
        if state.is_hidden() {
            return None;
        }
        for child in state.children().iter().rev() {
            if let Some(shape) = self.cursor_for(*child, pos, input) {
                return Some(shape);
            }
        }
        if !state.visible_bounds().contains(pos) {
            return None;
        }
        let behavior = self.tree.nodes.get(id)?.behavior.as_ref()?;
        let cx = CursorCx {
            tree: &self.tree,
            widget: id,
            context: &self.context,
            input,
        };
        behavior.cursor_shape(&cx)
    }

    fn propagate_events(&mut self, id: WidgetId) {
        for child in self.tree.children(id) {
            self.propagate_events(child);
        }

        let propagates = self
            .tree
            .nodes
            .get(id)
            .and_then(|n| n.behavior.as_ref())
            .is_some_and(|b| b.propagates_events());
        if !propagates {
            return;
        }
        let Some(mut behavior) = self.take_behavior(id) else {
            return;
        };
        for child in self.tree.children(id) {
            let events = self
                .tree
                .state_mut(child)
                .map(|s| s.events.drain_all())
                .unwrap_or_default();
            for event in events {
                if let Some(event) = behavior.propagate_event(child, event) {
                    self.tree.enqueue_event(id, event);
                }
            }
        }
        self.put_behavior(id, behavior);
    }

    fn update_widgets(&mut self, id: WidgetId) -> Result<()> {
        let Some(mut behavior) = self.take_behavior(id) else {
            return Ok(());
        };
        let mut cx = UpdateCx {
            tree: &mut self.tree,
            widget: id,
            context: &self.context,
        };
        let result = behavior.update(&mut cx);
        self.put_behavior(id, behavior);
        result?;

        for child in self.tree.children(id) {
            self.update_widgets(child)?;
        }

        // The subtree is settled: whatever redraw survived coalescing
        // becomes damage.
        if let Some(region) = self.tree.state_mut(id).and_then(|s| s.take_redraw()) {
            trace!(target: targets::DAMAGE, widget = ?id, ?region, "redraw");
            self.damage.add(region);
        }
        Ok(())
    }

    fn take_behavior(&mut self, id: WidgetId) -> Option<Box<dyn WidgetBehavior>> {
        self.tree.nodes.get_mut(id).and_then(|n| n.behavior.take())
    }

    fn put_behavior(&mut self, id: WidgetId, behavior: Box<dyn WidgetBehavior>) {
        if let Some(node) = self.tree.nodes.get_mut(id) {
            node.behavior = Some(behavior);
        }
    }
}
