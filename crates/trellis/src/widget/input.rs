//! Polled input state and dispatch results.
//!
//! The host polls its platform layer once at the top of each frame and
//! hands the runtime an [`InputState`] snapshot valid for that frame.
//! There is no event stream inside the core: widgets inspect the
//! snapshot during the input-dispatch phase.

use trellis_render::Point;

use super::tree::WidgetId;

/// A mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn bit(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
            Self::Middle => 4,
        }
    }
}

/// A set of mouse buttons, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseButtons(u8);

impl MouseButtons {
    /// The empty set.
    pub const NONE: Self = Self(0);

    /// Check membership.
    #[inline]
    pub fn contains(&self, button: MouseButton) -> bool {
        self.0 & button.bit() != 0
    }

    /// Add a button to the set.
    pub fn insert(&mut self, button: MouseButton) {
        self.0 |= button.bit();
    }

    /// Whether no button is in the set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        Self(button.bit())
    }
}

/// A pressed key, reduced to what the runtime's own widgets care about.
/// Hosts with richer keyboard needs keep their own key state and feed
/// widgets through application events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Space,
    Backspace,
    Char(char),
}

/// The input snapshot for one frame.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Pointer position in logical coordinates, if the pointer is inside
    /// the window.
    pub cursor: Option<Point>,
    /// Buttons currently held.
    pub pressed: MouseButtons,
    /// Buttons that went down since the previous frame.
    pub just_pressed: MouseButtons,
    /// Scroll wheel delta for this frame, in logical units.
    pub wheel: Point,
    /// Keys that went down since the previous frame.
    pub keys: Vec<Key>,
}

impl InputState {
    /// A snapshot with no input at all.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Outcome of dispatching the input snapshot to a widget subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputResult {
    /// Nobody claimed the input.
    #[default]
    None,
    /// The named widget consumed the input.
    Handled(WidgetId),
    /// Stop dispatching to everyone else, including ancestors.
    Abort,
}

impl InputResult {
    /// Whether dispatch should continue past this result.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_set() {
        let mut set = MouseButtons::NONE;
        assert!(set.is_empty());

        set.insert(MouseButton::Left);
        assert!(set.contains(MouseButton::Left));
        assert!(!set.contains(MouseButton::Right));

        set.insert(MouseButton::Right);
        assert!(set.contains(MouseButton::Right));
    }
}
