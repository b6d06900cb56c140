//! Scrollbar geometry
//!
//! Maps one scroll axis (viewport size, content size, position) onto a
//! scrollbar track: how large the slider is, where it sits, and the inverse
//! mapping from a pointer location on the track back to a scroll position.
//!
//! All inputs are whole pixels. Setters round their argument and recompute
//! the derived [`ScrollbarGeometry`] immediately, so the geometry is never
//! stale with respect to the inputs.

/// The minimal size of the slider, such that it can still be grabbed.
/// Sliders are artificially enlarged up to this size.
pub const MINIMUM_SLIDER_SIZE: f64 = 20.0;

/// Derived values of a [`ScrollbarState`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollbarGeometry {
    /// `visible_size - opposite_scrollbar_size`, never negative
    pub available_size: f64,
    /// `scroll_size > 0 && scroll_size > visible_size`
    pub is_needed: bool,
    pub slider_size: f64,
    /// Slider pixels moved per content pixel scrolled
    pub slider_ratio: f64,
    pub slider_position: f64,
}

/// Compute the slider geometry for one axis
pub fn compute_geometry(
    opposite_scrollbar_size: f64,
    arrow_size: f64,
    visible_size: f64,
    scroll_size: f64,
    scroll_position: f64,
) -> ScrollbarGeometry {
    let available_size = (visible_size - opposite_scrollbar_size).max(0.0);
    let representable_size = (available_size - 2.0 * arrow_size).max(0.0);
    let is_needed = scroll_size > 0.0 && scroll_size > visible_size;

    if !is_needed {
        return ScrollbarGeometry {
            available_size: available_size.round(),
            is_needed,
            slider_size: representable_size.round(),
            slider_ratio: 0.0,
            slider_position: 0.0,
        };
    }

    let slider_size = MINIMUM_SLIDER_SIZE
        .max((visible_size * representable_size / scroll_size).floor())
        .round();

    // The slider travels 0..(representable - slider) while the position
    // travels 0..(scroll - visible).
    let slider_ratio = (representable_size - slider_size) / (scroll_size - visible_size);
    let slider_position = (scroll_position * slider_ratio).round();

    ScrollbarGeometry {
        available_size: available_size.round(),
        is_needed,
        slider_size,
        slider_ratio,
        slider_position,
    }
}

/// Rounds to whole pixels; negative and non-finite input becomes zero
fn normalize(value: f64) -> f64 {
    if value.is_finite() {
        value.round().max(0.0)
    } else {
        0.0
    }
}

/// Scrollbar inputs and derived geometry for one axis
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollbarState {
    /// Width of a vertical scrollbar, height of a horizontal one
    scrollbar_size: f64,
    /// Thickness of the scrollbar on the other axis, which eats into the track
    opposite_scrollbar_size: f64,
    /// Length of each arrow button at the ends of the track
    arrow_size: f64,
    /// Viewport extent along this axis
    visible_size: f64,
    /// Content extent along this axis
    scroll_size: f64,
    scroll_position: f64,
    geometry: ScrollbarGeometry,
}

impl ScrollbarState {
    pub fn new(
        arrow_size: f64,
        scrollbar_size: f64,
        opposite_scrollbar_size: f64,
        visible_size: f64,
        scroll_size: f64,
        scroll_position: f64,
    ) -> Self {
        let mut state = Self {
            scrollbar_size: normalize(scrollbar_size),
            opposite_scrollbar_size: normalize(opposite_scrollbar_size),
            arrow_size: normalize(arrow_size),
            visible_size: normalize(visible_size),
            scroll_size: normalize(scroll_size),
            scroll_position: normalize(scroll_position),
            geometry: ScrollbarGeometry::default(),
        };
        state.refresh();
        state
    }

    fn refresh(&mut self) {
        self.geometry = compute_geometry(
            self.opposite_scrollbar_size,
            self.arrow_size,
            self.visible_size,
            self.scroll_size,
            self.scroll_position,
        );
    }

    /// Returns true if the value changed
    pub fn set_visible_size(&mut self, visible_size: f64) -> bool {
        let visible_size = normalize(visible_size);
        if self.visible_size == visible_size {
            return false;
        }
        self.visible_size = visible_size;
        self.refresh();
        true
    }

    /// Returns true if the value changed
    pub fn set_scroll_size(&mut self, scroll_size: f64) -> bool {
        let scroll_size = normalize(scroll_size);
        if self.scroll_size == scroll_size {
            return false;
        }
        self.scroll_size = scroll_size;
        self.refresh();
        true
    }

    /// Returns true if the value changed
    pub fn set_scroll_position(&mut self, scroll_position: f64) -> bool {
        let scroll_position = normalize(scroll_position);
        if self.scroll_position == scroll_position {
            return false;
        }
        self.scroll_position = scroll_position;
        self.refresh();
        true
    }

    pub fn set_scrollbar_size(&mut self, scrollbar_size: f64) {
        self.scrollbar_size = normalize(scrollbar_size);
    }

    pub fn set_opposite_scrollbar_size(&mut self, opposite_scrollbar_size: f64) {
        self.opposite_scrollbar_size = normalize(opposite_scrollbar_size);
        self.refresh();
    }

    pub fn geometry(&self) -> ScrollbarGeometry {
        self.geometry
    }

    pub fn arrow_size(&self) -> f64 {
        self.arrow_size
    }

    pub fn visible_size(&self) -> f64 {
        self.visible_size
    }

    pub fn scroll_size(&self) -> f64 {
        self.scroll_size
    }

    pub fn scroll_position(&self) -> f64 {
        self.scroll_position
    }

    /// Track length along the axis
    pub fn rectangle_large_size(&self) -> f64 {
        self.geometry.available_size
    }

    /// Track thickness
    pub fn rectangle_small_size(&self) -> f64 {
        self.scrollbar_size
    }

    pub fn is_needed(&self) -> bool {
        self.geometry.is_needed
    }

    pub fn slider_size(&self) -> f64 {
        self.geometry.slider_size
    }

    pub fn slider_ratio(&self) -> f64 {
        self.geometry.slider_ratio
    }

    pub fn slider_position(&self) -> f64 {
        self.geometry.slider_position
    }

    /// Scroll position that puts the center of the slider on `offset`.
    ///
    /// `offset` is measured from the start of the track, arrows included.
    pub fn desired_scroll_position_from_offset(&self, offset: f64) -> f64 {
        if !self.geometry.is_needed {
            return 0.0;
        }
        let desired_slider_position = offset - self.arrow_size - self.geometry.slider_size / 2.0;
        (desired_slider_position / self.geometry.slider_ratio).round()
    }

    /// Scroll position one page before or after the current one, depending on
    /// whether `offset` lies before the slider.
    pub fn desired_scroll_position_from_offset_paged(&self, offset: f64) -> f64 {
        if !self.geometry.is_needed {
            return 0.0;
        }
        let corrected_offset = offset - self.arrow_size;
        if corrected_offset < self.geometry.slider_position {
            self.scroll_position - self.visible_size
        } else {
            self.scroll_position + self.visible_size
        }
    }

    /// Scroll position after moving the slider by `delta` pixels
    pub fn desired_scroll_position_from_delta(&self, delta: f64) -> f64 {
        if !self.geometry.is_needed {
            return 0.0;
        }
        let desired_slider_position = self.geometry.slider_position + delta;
        (desired_slider_position / self.geometry.slider_ratio).round()
    }
}
