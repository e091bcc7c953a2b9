//! A floating container that escapes ancestor clipping.

use trellis_core::Result;
use trellis_render::{Canvas, Color, Rect};

use crate::widget::appender::ChildAppender;
use crate::widget::events::Event;
use crate::widget::input::{InputResult, Key};
use crate::widget::traits::{DrawCx, EventCx, WidgetBehavior};
use crate::widget::tree::WidgetId;

/// A popup container: a panel that may extend outside its parent.
///
/// Its visible bounds equal its full bounds, so a dropdown or tooltip
/// anchored to a small widget still paints (and receives input) in
/// full. Pressing Escape enqueues [`Event::Closed`]; the owner reacts
/// by no longer appending the popup.
pub struct Popup {
    children: Vec<(WidgetId, Rect)>,
    background: Color,
}

impl Popup {
    pub fn new(background: Color) -> Self {
        Self {
            children: Vec::new(),
            background,
        }
    }

    /// Add a child at an offset relative to the popup's origin.
    pub fn with_child(mut self, child: WidgetId, bounds: Rect) -> Self {
        self.children.push((child, bounds));
        self
    }
}

impl WidgetBehavior for Popup {
    fn layout(&mut self, appender: &mut ChildAppender<'_>) -> Result<()> {
        let bounds = appender.bounds();
        for (child, rel) in &self.children {
            appender.append(*child, rel.offset(bounds.left(), bounds.top()));
        }
        Ok(())
    }

    fn handle_input(&mut self, cx: &mut EventCx<'_>) -> InputResult {
        if cx.input.keys.contains(&Key::Escape) {
            let widget = cx.widget();
            cx.enqueue(Event::Closed(widget));
            return InputResult::Handled(widget);
        }
        InputResult::None
    }

    fn draw(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        canvas.fill_rect(cx.bounds(), self.background);
    }

    fn is_popup(&self) -> bool {
        true
    }

    fn debug_name(&self) -> &'static str {
        "popup"
    }
}
