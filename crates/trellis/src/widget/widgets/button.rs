//! A clickable button.

use cursor_icon::CursorIcon;
use trellis_core::ColorMode;
use trellis_render::{Canvas, Color, Rect};

use crate::widget::events::Event;
use crate::widget::input::{InputResult, MouseButton};
use crate::widget::traits::{CursorCx, DrawCx, EventCx, WidgetBehavior};

/// A push button.
///
/// Emits [`Event::ButtonPressed`] and takes focus when clicked. The
/// pressed visual follows the held mouse button; enablement and focus
/// feed into the fill color.
pub struct Button {
    label: String,
    pressed: bool,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pressed: false,
        }
    }

    /// The button label.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn fill_color(&self, mode: ColorMode, enabled: bool) -> Color {
        match (mode, enabled, self.pressed) {
            (ColorMode::Light, false, _) => Color::from_rgb8(0xd0, 0xd0, 0xd0),
            (ColorMode::Light, true, false) => Color::from_rgb8(0xe8, 0xe8, 0xe8),
            (ColorMode::Light, true, true) => Color::from_rgb8(0xc0, 0xc0, 0xc0),
            (ColorMode::Dark, false, _) => Color::from_rgb8(0x30, 0x30, 0x30),
            (ColorMode::Dark, true, false) => Color::from_rgb8(0x48, 0x48, 0x48),
            (ColorMode::Dark, true, true) => Color::from_rgb8(0x60, 0x60, 0x60),
        }
    }
}

impl WidgetBehavior for Button {
    fn handle_input(&mut self, cx: &mut EventCx<'_>) -> InputResult {
        if !cx.is_enabled() {
            return InputResult::None;
        }
        let hovered = cx.is_hovered();

        let pressed = hovered && cx.input.pressed.contains(MouseButton::Left);
        if pressed != self.pressed {
            self.pressed = pressed;
            cx.request_redraw();
        }

        if hovered && cx.input.just_pressed.contains(MouseButton::Left) {
            let widget = cx.widget();
            cx.focus();
            cx.enqueue(Event::ButtonPressed(widget));
            return InputResult::Handled(widget);
        }
        InputResult::None
    }

    fn cursor_shape(&self, cx: &CursorCx<'_>) -> Option<CursorIcon> {
        cx.is_enabled().then_some(CursorIcon::Pointer)
    }

    fn draw(&self, cx: &DrawCx<'_>, canvas: &mut dyn Canvas) {
        let bounds = cx.bounds();
        let mode = cx.context.color_mode();
        canvas.fill_rect(bounds, self.fill_color(mode, cx.is_enabled()));

        if cx.is_focused() {
            // A one-pixel ring along the inside of the bounds.
            let ring = match mode {
                ColorMode::Light => Color::from_rgb8(0x30, 0x60, 0xc0),
                ColorMode::Dark => Color::from_rgb8(0x80, 0xb0, 0xff),
            };
            let (l, t, w, h) = (bounds.left(), bounds.top(), bounds.width(), bounds.height());
            canvas.fill_rect(Rect::new(l, t, w, 1.0), ring);
            canvas.fill_rect(Rect::new(l, t + h - 1.0, w, 1.0), ring);
            canvas.fill_rect(Rect::new(l, t, 1.0, h), ring);
            canvas.fill_rect(Rect::new(l + w - 1.0, t, 1.0, h), ring);
        }
    }

    fn debug_name(&self) -> &'static str {
        "button"
    }
}
