//! Input mapping from raw window events
//!
//! Maps the left mouse button and cursor motion to [`PointerEvent`]s for the
//! card, and a few keys to application actions.

use foilcard_input::PointerEvent;
use foilcard_math::Vec2;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Snap the card back to rest (R key)
    ResetCard,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Toggle the title-bar readout (G key)
    ToggleOverlay,
}

/// Maps raw input events to actions and pointer events
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` on press of a bound key, `None` otherwise
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCard),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyG => Some(InputAction::ToggleOverlay),
            _ => None,
        }
    }

    /// Map a mouse button to a pointer event at the last known cursor position
    ///
    /// Only the left button drives the card.
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor: Vec2,
    ) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }

        match state {
            ElementState::Pressed => Some(PointerEvent::Down(cursor)),
            ElementState::Released => Some(PointerEvent::Up(cursor)),
        }
    }

    /// Map cursor motion (window pixels) to a pointer event
    pub fn map_cursor_moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move(Vec2::from((x, y)))
    }
}
