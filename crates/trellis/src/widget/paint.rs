//! The paint pass.
//!
//! Painting walks the live tree in pre-order: each widget paints its own
//! visuals, then its children on top, in append order. A widget with
//! transparency between 0 and 1 routes its whole subtree through its
//! persistent offscreen buffer and composites the result onto the
//! destination with alpha `1 - transparency`, so overlapping children
//! fade as one group instead of blending individually.
//!
//! The destination canvas is already clipped to the frame's damage
//! region; painting outside it is silently discarded.

use std::mem;

use trellis_core::Context;
use trellis_render::Canvas;

use super::traits::DrawCx;
use super::tree::{WidgetId, WidgetTree};

/// Paint the live tree rooted at `root` onto `dst`.
pub(crate) fn paint_tree(
    tree: &mut WidgetTree,
    context: &Context,
    root: WidgetId,
    dst: &mut dyn Canvas,
) {
    paint_widget(tree, context, root, dst);
}

fn paint_widget(tree: &mut WidgetTree, context: &Context, id: WidgetId, dst: &mut dyn Canvas) {
    let Some(state) = tree.state(id) else {
        return;
    };
    if state.is_hidden() || state.visible_bounds().is_empty() {
        return;
    }
    let transparency = state.transparency();
    if transparency >= 1.0 {
        return;
    }

    if transparency > 0.0 {
        // The subtree paints into the widget's own buffer, which shares
        // the destination's coordinate space, then lands in one
        // composite.
        let mut buffer = {
            let Some(state) = tree.state_mut(id) else {
                return;
            };
            mem::take(&mut state.offscreen)
        };
        if let Some(pixmap) = buffer.prepare(dst.size()) {
            paint_self(tree, context, id, pixmap);
            for child in tree.children(id) {
                paint_widget(tree, context, child, pixmap);
            }
            dst.composite(pixmap, 1.0 - transparency);
        }
        if let Some(state) = tree.state_mut(id) {
            state.offscreen = buffer;
        }
    } else {
        paint_self(tree, context, id, dst);
        for child in tree.children(id) {
            paint_widget(tree, context, child, dst);
        }
    }
}

fn paint_self(tree: &mut WidgetTree, context: &Context, id: WidgetId, dst: &mut dyn Canvas) {
    let Some(node) = tree.nodes.get(id) else {
        return;
    };
    if !node.state.draws {
        return;
    }
    let Some(behavior) = tree.nodes.get_mut(id).and_then(|n| n.behavior.take()) else {
        return;
    };
    let cx = DrawCx {
        tree,
        widget: id,
        context,
    };
    behavior.draw(&cx, dst);
    if let Some(node) = tree.nodes.get_mut(id) {
        node.behavior = Some(behavior);
    }
}
