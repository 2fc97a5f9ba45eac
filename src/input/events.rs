//! Mouse event model delivered by the host.
//!
//! Plain data and host-independent, so a scripted session can be replayed
//! through the dispatcher in tests and in the demo binary.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Mouse buttons a host reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifiers held while a mouse event fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
    };

    /// True when Alt is held and nothing else is.
    ///
    /// Gating uses exact equality, not containment: Alt+Shift does not
    /// count as Alt.
    #[inline]
    pub fn is_exactly_alt(&self) -> bool {
        self.alt && !self.shift && !self.control
    }
}

/// What happened; press and release carry the button.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Move,
    /// The cursor left the viewport client area
    Leave,
}

/// One mouse event as delivered to listeners.
///
/// `cancel` starts false. A handler sets it to claim the event, which
/// suppresses the host's default handling (drag-select on a left press).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    /// Client position in pixels, origin top-left
    pub position: DVec2,
    pub modifiers: Modifiers,
    pub cancel: bool,
}

impl MouseEvent {
    pub fn down(button: MouseButton, position: DVec2, modifiers: Modifiers) -> Self {
        Self {
            kind: MouseEventKind::Down(button),
            position,
            modifiers,
            cancel: false,
        }
    }

    pub fn up(button: MouseButton, position: DVec2, modifiers: Modifiers) -> Self {
        Self {
            kind: MouseEventKind::Up(button),
            position,
            modifiers,
            cancel: false,
        }
    }

    pub fn moved(position: DVec2, modifiers: Modifiers) -> Self {
        Self {
            kind: MouseEventKind::Move,
            position,
            modifiers,
            cancel: false,
        }
    }

    pub fn leave(position: DVec2) -> Self {
        Self {
            kind: MouseEventKind::Leave,
            position,
            modifiers: Modifiers::NONE,
            cancel: false,
        }
    }
}
