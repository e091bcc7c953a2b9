//! A fixed-layout container.

use trellis_core::Result;
use trellis_render::{Canvas, Color, Rect};

use crate::widget::appender::ChildAppender;
use crate::widget::traits::{DrawCx, WidgetBehavior};
use crate::widget::tree::WidgetId;

/// A container that places each child at a fixed offset within itself.
///
/// Child rectangles are relative to the panel's own origin, so a panel
/// moved by its parent carries its children along. With a background
/// color the panel paints an opaque base; without one it is pure layout
/// and exempt from damage bookkeeping.
pub struct Panel {
    children: Vec<(WidgetId, Rect)>,
    background: Option<Color>,
}

impl Panel {
    /// An empty, non-drawing panel.
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
            background: None,
        }
    }

    /// Give the panel an opaque background.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Add a child at an offset relative to the panel's origin.
    pub fn with_child(mut self, child: WidgetId, bounds: Rect) -> Self {
        self.children.push((child, bounds));
        self
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBehavior for Panel {
    fn layout(&mut self, appender: &mut ChildAppender<'_>) -> Result<()> {
        let bounds = appender.bounds();
        for (child, rel) in &self.children {
            appender.append(*child, rel.offset(bounds.left(), bounds.top()));
        }
        Ok(())
    }

    fn draw(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        if let Some(color) = self.background {
            canvas.fill_rect(cx.bounds(), color);
        }
    }

    fn draws(&self) -> bool {
        self.background.is_some()
    }

    fn debug_name(&self) -> &'static str {
        "panel"
    }
}
