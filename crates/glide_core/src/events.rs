//! Input events supplied by the host
//!
//! The engine never talks to a windowing system. Hosts translate their native
//! pointer and wheel events into these plain structs and feed them in.

use serde::{Deserialize, Serialize};

/// Opaque identifier of the host element an event was dispatched to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TargetId(pub u64);

/// Pointer button that changed state for a down/up event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum PointerButton {
    /// Left mouse button, pen contact or touch
    #[default]
    Primary,
    /// Middle mouse button / wheel press
    Auxiliary,
    /// Right mouse button
    Secondary,
    /// Any other button, by index
    Other(u8),
}

/// Bitmask of buttons currently held, in the DOM `buttons` layout
pub mod buttons {
    pub const NONE: u16 = 0;
    pub const PRIMARY: u16 = 0b0001;
    pub const SECONDARY: u16 = 0b0010;
    pub const AUXILIARY: u16 = 0b0100;
}

/// A pointer down/move/up event in page coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Button whose state changed (meaningless for moves)
    pub button: PointerButton,
    /// Buttons held while the event was generated
    pub buttons: u16,
    pub page_x: f64,
    pub page_y: f64,
    pub pointer_id: u32,
    pub target: TargetId,
}

impl PointerEvent {
    /// Primary-button press at a page position
    pub fn primary_down(target: TargetId, page_x: f64, page_y: f64) -> Self {
        Self {
            button: PointerButton::Primary,
            buttons: buttons::PRIMARY,
            page_x,
            page_y,
            pointer_id: 1,
            target,
        }
    }

    /// Same pointer, moved to a new page position with the same buttons held
    pub fn moved_to(&self, page_x: f64, page_y: f64) -> Self {
        Self {
            page_x,
            page_y,
            ..*self
        }
    }

    /// Same pointer, all buttons released
    pub fn released(&self) -> Self {
        Self {
            buttons: buttons::NONE,
            ..*self
        }
    }

    pub fn is_primary(&self) -> bool {
        self.button == PointerButton::Primary
    }
}

/// Keyboard modifier flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000; // Cmd on macOS, Win on Windows

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub const fn shift() -> Self {
        Self { bits: Self::SHIFT }
    }

    pub const fn alt() -> Self {
        Self { bits: Self::ALT }
    }

    pub fn is_shift(&self) -> bool {
        self.bits & Self::SHIFT != 0
    }

    pub fn is_ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub fn is_alt(&self) -> bool {
        self.bits & Self::ALT != 0
    }

    pub fn is_meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// A mouse wheel / trackpad scroll event
///
/// Deltas use the "standard wheel" convention: a positive `delta_y` moves the
/// viewport toward the start of the content (scroll up), a positive `delta_x`
/// toward the left edge. Hosts receiving DOM-style deltas negate them.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct WheelEvent {
    pub delta_x: f64,
    pub delta_y: f64,
    pub modifiers: Modifiers,
    /// Host timestamp in milliseconds
    pub timestamp: f64,
    /// Set once some handler decided the event should not scroll anything else
    pub default_prevented: bool,
    pub propagation_stopped: bool,
}

impl WheelEvent {
    pub fn new(delta_x: f64, delta_y: f64) -> Self {
        Self {
            delta_x,
            delta_y,
            ..Default::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
