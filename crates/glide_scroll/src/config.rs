//! Scrollable element configuration
//!
//! Options deserialize from any serde format; every field is optional and
//! falls back to the default listed on it.

use serde::{Deserialize, Serialize};

use crate::visibility::ScrollbarVisibility;

/// Pixels scrolled per unit of wheel delta
pub const SCROLL_WHEEL_SENSITIVITY: f64 = 50.0;

/// Delay before auto-hiding scrollbars after activity, in milliseconds
pub const HIDE_TIMEOUT: f64 = 500.0;

/// Construction options of a [`ScrollableElement`](crate::element::ScrollableElement)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollableElementOptions {
    /// Defer rendering until `render_now()` is called. Default false.
    pub lazy_render: bool,
    /// Emit shadow class names when scrolled away from the start. Default false.
    pub use_shadows: bool,
    /// Default true
    pub handle_mouse_wheel: bool,
    /// Animate wheel scrolling from physical wheels. Default true.
    pub mouse_wheel_smooth_scroll: bool,
    /// Treat vertical wheel deltas as horizontal and vice versa. Default false.
    pub flip_axes: bool,
    /// Scroll horizontally on vertical wheel input. Default false.
    pub scroll_y_to_x: bool,
    /// Consume wheel events whenever a scrollbar is needed. Default false.
    pub consume_mouse_wheel_if_scrollbar_is_needed: bool,
    /// Consume wheel events even when nothing scrolled. Default false.
    pub always_consume_mouse_wheel: bool,
    /// Multiplier on wheel deltas. Default 1.
    pub mouse_wheel_scroll_sensitivity: f64,
    /// Extra multiplier while Alt is held. Default 5.
    pub fast_scroll_sensitivity: f64,
    /// Only scroll the dominant axis of diagonal wheel input. Default true.
    pub scroll_predominant_axis: bool,
    /// Arrow button length. Default 11.
    pub arrow_size: f64,
    pub horizontal: ScrollbarVisibility,
    /// Height of the horizontal scrollbar. Default 10.
    pub horizontal_scrollbar_size: f64,
    /// Thickness of the horizontal slider. Defaults to the scrollbar size.
    pub horizontal_slider_size: Option<f64>,
    pub horizontal_has_arrows: bool,
    pub vertical: ScrollbarVisibility,
    /// Width of the vertical scrollbar. Default 10.
    pub vertical_scrollbar_size: f64,
    /// Thickness of the vertical slider. Defaults to the scrollbar size.
    pub vertical_slider_size: Option<f64>,
    pub vertical_has_arrows: bool,
    /// Track presses move by a page instead of jumping. Default false.
    pub scroll_by_page: bool,
    /// Reveal scrollbars on every scroll change. Default true.
    pub reveal_on_scroll: bool,
    pub hide_timeout_ms: f64,
}

impl Default for ScrollableElementOptions {
    fn default() -> Self {
        Self {
            lazy_render: false,
            use_shadows: false,
            handle_mouse_wheel: true,
            mouse_wheel_smooth_scroll: true,
            flip_axes: false,
            scroll_y_to_x: false,
            consume_mouse_wheel_if_scrollbar_is_needed: false,
            always_consume_mouse_wheel: false,
            mouse_wheel_scroll_sensitivity: 1.0,
            fast_scroll_sensitivity: 5.0,
            scroll_predominant_axis: true,
            arrow_size: 11.0,
            horizontal: ScrollbarVisibility::Auto,
            horizontal_scrollbar_size: 10.0,
            horizontal_slider_size: None,
            horizontal_has_arrows: false,
            vertical: ScrollbarVisibility::Auto,
            vertical_scrollbar_size: 10.0,
            vertical_slider_size: None,
            vertical_has_arrows: false,
            scroll_by_page: false,
            reveal_on_scroll: true,
            hide_timeout_ms: HIDE_TIMEOUT,
        }
    }
}

impl ScrollableElementOptions {
    pub fn horizontal_slider_size(&self) -> f64 {
        self.horizontal_slider_size
            .unwrap_or(self.horizontal_scrollbar_size)
    }

    pub fn vertical_slider_size(&self) -> f64 {
        self.vertical_slider_size.unwrap_or(self.vertical_scrollbar_size)
    }

    /// Track thickness actually occupied by the horizontal scrollbar
    pub fn effective_horizontal_scrollbar_size(&self) -> f64 {
        if self.horizontal == ScrollbarVisibility::Hidden {
            0.0
        } else {
            self.horizontal_scrollbar_size
        }
    }

    /// Track thickness actually occupied by the vertical scrollbar
    pub fn effective_vertical_scrollbar_size(&self) -> f64 {
        if self.vertical == ScrollbarVisibility::Hidden {
            0.0
        } else {
            self.vertical_scrollbar_size
        }
    }

    /// Fold a runtime change into these options
    pub fn apply(&mut self, change: &ScrollableElementChangeOptions) {
        if let Some(value) = change.handle_mouse_wheel {
            self.handle_mouse_wheel = value;
        }
        if let Some(value) = change.mouse_wheel_scroll_sensitivity {
            self.mouse_wheel_scroll_sensitivity = value;
        }
        if let Some(value) = change.fast_scroll_sensitivity {
            self.fast_scroll_sensitivity = value;
        }
        if let Some(value) = change.scroll_predominant_axis {
            self.scroll_predominant_axis = value;
        }
        if let Some(value) = change.horizontal {
            self.horizontal = value;
        }
        if let Some(value) = change.vertical {
            self.vertical = value;
        }
        if let Some(value) = change.horizontal_scrollbar_size {
            self.horizontal_scrollbar_size = value;
        }
        if let Some(value) = change.vertical_scrollbar_size {
            self.vertical_scrollbar_size = value;
        }
        if let Some(value) = change.scroll_by_page {
            self.scroll_by_page = value;
        }
    }
}

/// Subset of options that may change after construction. `None` leaves a field as is.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollableElementChangeOptions {
    pub handle_mouse_wheel: Option<bool>,
    pub mouse_wheel_scroll_sensitivity: Option<f64>,
    pub fast_scroll_sensitivity: Option<f64>,
    pub scroll_predominant_axis: Option<bool>,
    pub horizontal: Option<ScrollbarVisibility>,
    pub vertical: Option<ScrollbarVisibility>,
    pub horizontal_scrollbar_size: Option<f64>,
    pub vertical_scrollbar_size: Option<f64>,
    pub scroll_by_page: Option<bool>,
}
