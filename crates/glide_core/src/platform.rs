//! Platform detection
//!
//! A handful of input behaviors differ per operating system. They are
//! collected here so hosts and tests can pin a platform explicitly instead of
//! relying on the compile target.

use serde::{Deserialize, Serialize};

/// Orthogonal pointer distance at which a slider drag snaps back (Windows only)
pub const POINTER_DRAG_RESET_DISTANCE: f64 = 140.0;

/// Operating system family the engine is running on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// Platform of the current compile target
    pub const fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(any(target_os = "macos", target_os = "ios")) {
            Platform::MacOs
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    pub fn is_macos(&self) -> bool {
        matches!(self, Platform::MacOs)
    }

    pub fn is_linux(&self) -> bool {
        matches!(self, Platform::Linux)
    }

    /// Whether wheel deltas arrive multiplied by the OS zoom factor
    pub fn wheel_deltas_include_zoom(&self) -> bool {
        matches!(self, Platform::Windows | Platform::Linux)
    }

    /// Whether shift+wheel must be turned into horizontal scrolling by us.
    /// macOS already does this before the event reaches the application.
    pub fn converts_shift_wheel(&self) -> bool {
        !self.is_macos()
    }

    /// Distance at which an off-axis slider drag resets, if the platform does that
    pub fn pointer_drag_reset_distance(&self) -> Option<f64> {
        match self {
            Platform::Windows => Some(POINTER_DRAG_RESET_DISTANCE),
            _ => None,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}
