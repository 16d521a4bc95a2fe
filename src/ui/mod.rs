//! Presentation adapter
//!
//! Turns the controller's view models into iced widgets and maps widget
//! interactions back to [`crate::Message`]s. No derivation logic lives here.

pub mod browse;
pub mod overlay;

use iced::widget::button;
use iced::Theme;

use crate::state::lightbox::FocusTarget;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Highlight the element that opened the overlay that was just closed
fn focus_style(focus: Option<&FocusTarget>, target: &FocusTarget) -> ButtonStyle {
    if focus == Some(target) {
        button::primary
    } else {
        button::secondary
    }
}
