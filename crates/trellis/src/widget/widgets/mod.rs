//! A few concrete widgets.
//!
//! These are deliberately small: enough for a host to assemble a working
//! overlay (panels with buttons, a popup) and enough to show how the
//! [`WidgetBehavior`](super::WidgetBehavior) contract is meant to be
//! used. Anything fancier belongs in the host.

mod button;
mod panel;
mod popup;

pub use button::Button;
pub use panel::Panel;
pub use popup::Popup;
