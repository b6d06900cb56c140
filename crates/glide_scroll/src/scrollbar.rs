//! Per-axis scrollbar controller
//!
//! A [`Scrollbar`] keeps a [`ScrollbarState`] in sync with the scroll model,
//! turns track and slider presses into scroll positions, runs slider drags
//! and owns the fade state of one scrollbar.

use std::rc::Rc;

use glide_core::{Platform, PointerEvent};
use serde::Serialize;

use crate::pointer_monitor::{PointerCapture, PointerMoveMonitor, PointerMoveOutcome};
use crate::scrollable::{NewScrollPosition, ScrollEvent, Scrollable};
use crate::scrollbar_state::ScrollbarState;
use crate::visibility::{ScrollbarVisibility, ScrollbarVisibilityController, VisibilityPhase};

/// Which axis a scrollbar controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollbarAxis {
    Horizontal,
    Vertical,
}

impl ScrollbarAxis {
    pub fn class_name(self) -> &'static str {
        match self {
            ScrollbarAxis::Horizontal => "horizontal",
            ScrollbarAxis::Vertical => "vertical",
        }
    }

    /// Pointer coordinate along the axis
    fn pointer_position(self, event: &PointerEvent) -> f64 {
        match self {
            ScrollbarAxis::Horizontal => event.page_x,
            ScrollbarAxis::Vertical => event.page_y,
        }
    }

    /// Pointer coordinate across the axis
    fn orthogonal_pointer_position(self, event: &PointerEvent) -> f64 {
        match self {
            ScrollbarAxis::Horizontal => event.page_y,
            ScrollbarAxis::Vertical => event.page_x,
        }
    }

    fn pick(self, x: f64, y: f64) -> f64 {
        match self {
            ScrollbarAxis::Horizontal => x,
            ScrollbarAxis::Vertical => y,
        }
    }

    fn write_scroll_position(self, position: f64) -> NewScrollPosition {
        match self {
            ScrollbarAxis::Horizontal => NewScrollPosition::left(position),
            ScrollbarAxis::Vertical => NewScrollPosition::top(position),
        }
    }

    /// (scroll size, scroll position, visible size) of this axis
    fn read_event(self, e: &ScrollEvent) -> (f64, f64, f64) {
        match self {
            ScrollbarAxis::Horizontal => (e.scroll_width, e.scroll_left, e.width),
            ScrollbarAxis::Vertical => (e.scroll_height, e.scroll_top, e.height),
        }
    }
}

/// Construction parameters of a [`Scrollbar`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarOptions {
    pub axis: ScrollbarAxis,
    pub visibility: ScrollbarVisibility,
    /// Arrow button length; only used when `has_arrows`
    pub arrow_size: f64,
    pub has_arrows: bool,
    pub scrollbar_size: f64,
    pub opposite_scrollbar_size: f64,
    /// Slider thickness across the axis
    pub slider_size: f64,
    pub scroll_by_page: bool,
    pub platform: Platform,
}

impl ScrollbarOptions {
    pub fn new(axis: ScrollbarAxis) -> Self {
        Self {
            axis,
            visibility: ScrollbarVisibility::Auto,
            arrow_size: 0.0,
            has_arrows: false,
            scrollbar_size: 10.0,
            opposite_scrollbar_size: 0.0,
            slider_size: 10.0,
            scroll_by_page: false,
            platform: Platform::current(),
        }
    }
}

/// Drag lifecycle change caused by a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragChange {
    None,
    Started,
    Ended,
}

/// What the host needs to draw one scrollbar
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScrollbarRender {
    /// Track length along the axis
    pub rectangle_large_size: f64,
    /// Track thickness across the axis
    pub rectangle_small_size: f64,
    pub slider_size: f64,
    /// Slider start along the track, arrow included
    pub slider_position: f64,
    pub slider_thickness: f64,
    pub is_needed: bool,
    pub is_visible: bool,
    pub class_name: String,
}

#[derive(Debug, Clone)]
struct DragSession {
    initial_pointer_position: f64,
    initial_orthogonal_position: f64,
    /// State when the drag began; every move is computed against it
    initial_state: ScrollbarState,
}

#[derive(Debug)]
pub struct Scrollbar {
    axis: ScrollbarAxis,
    scrollable: Scrollable,
    state: ScrollbarState,
    visibility: ScrollbarVisibilityController,
    monitor: PointerMoveMonitor,
    drag: Option<DragSession>,
    slider_thickness: f64,
    scroll_by_page: bool,
    platform: Platform,
    /// Page position of the track's start corner
    track_origin: (f64, f64),
    should_render: bool,
    rendered: ScrollbarRender,
}

impl Scrollbar {
    pub fn new(options: ScrollbarOptions, scrollable: Scrollable, capture: Rc<dyn PointerCapture>) -> Self {
        let dims = scrollable.get_scroll_dimensions();
        let position = scrollable.get_current_scroll_position();
        let (visible_size, scroll_size, scroll_position) = match options.axis {
            ScrollbarAxis::Horizontal => (dims.width, dims.scroll_width, position.scroll_left),
            ScrollbarAxis::Vertical => (dims.height, dims.scroll_height, position.scroll_top),
        };

        let arrow_size = if options.has_arrows {
            options.arrow_size
        } else {
            0.0
        };
        let state = ScrollbarState::new(
            arrow_size,
            options.scrollbar_size,
            options.opposite_scrollbar_size,
            visible_size,
            scroll_size,
            scroll_position,
        );

        let mut visibility =
            ScrollbarVisibilityController::for_scrollbar(options.visibility, options.axis.class_name());
        visibility.set_is_needed(state.is_needed());

        Self {
            axis: options.axis,
            scrollable,
            state,
            visibility,
            monitor: PointerMoveMonitor::new(capture),
            drag: None,
            slider_thickness: options.slider_size,
            scroll_by_page: options.scroll_by_page,
            platform: options.platform,
            track_origin: (0.0, 0.0),
            should_render: true,
            rendered: ScrollbarRender::default(),
        }
    }

    pub fn axis(&self) -> ScrollbarAxis {
        self.axis
    }

    pub fn state(&self) -> &ScrollbarState {
        &self.state
    }

    pub fn is_needed(&self) -> bool {
        self.state.is_needed()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn visibility_phase(&self) -> VisibilityPhase {
        self.visibility.phase()
    }

    pub fn class_name(&self) -> &str {
        self.visibility.class_name()
    }

    /// Whether a slider drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn should_render(&self) -> bool {
        self.should_render
    }

    /// Tell the scrollbar where its track starts on the page
    pub fn set_track_origin(&mut self, page_x: f64, page_y: f64) {
        self.track_origin = (page_x, page_y);
    }

    pub fn set_visibility(&mut self, visibility: ScrollbarVisibility) {
        self.visibility.set_visibility(visibility);
    }

    pub fn set_scroll_by_page(&mut self, scroll_by_page: bool) {
        self.scroll_by_page = scroll_by_page;
    }

    pub fn update_scrollbar_size(&mut self, scrollbar_size: f64) {
        self.state.set_scrollbar_size(scrollbar_size);
        self.should_render = true;
    }

    pub fn update_opposite_scrollbar_size(&mut self, opposite_scrollbar_size: f64) {
        self.state.set_opposite_scrollbar_size(opposite_scrollbar_size);
        self.should_render = true;
    }

    pub fn set_slider_thickness(&mut self, slider_thickness: f64) {
        self.slider_thickness = slider_thickness;
        self.should_render = true;
    }

    /// Sync with a committed scroll change. Returns whether a render is pending.
    pub fn on_did_scroll(&mut self, e: &ScrollEvent) -> bool {
        let (scroll_size, scroll_position, visible_size) = self.axis.read_event(e);

        let mut changed = self.state.set_scroll_size(scroll_size);
        changed |= self.state.set_scroll_position(scroll_position);
        changed |= self.state.set_visible_size(visible_size);

        if changed {
            self.visibility.set_is_needed(self.state.is_needed());
            self.should_render = true;
        }
        self.should_render
    }

    pub fn begin_reveal(&mut self) {
        self.visibility.set_should_be_visible(true);
    }

    pub fn begin_hide(&mut self) {
        self.visibility.set_should_be_visible(false);
    }

    /// Apply a deferred reveal; see [`ScrollbarVisibilityController::tick`]
    pub fn tick(&mut self) -> bool {
        self.visibility.tick()
    }

    pub fn needs_tick(&self) -> bool {
        self.visibility.needs_tick()
    }

    /// Recompute the render output if anything changed since the last render
    pub fn render(&mut self) -> bool {
        if !self.should_render {
            return false;
        }
        self.should_render = false;
        self.rendered = ScrollbarRender {
            rectangle_large_size: self.state.rectangle_large_size(),
            rectangle_small_size: self.state.rectangle_small_size(),
            slider_size: self.state.slider_size(),
            slider_position: self.state.arrow_size() + self.state.slider_position(),
            slider_thickness: self.slider_thickness,
            ..Default::default()
        };
        true
    }

    /// Last rendered geometry with the live visibility state
    pub fn render_output(&self) -> ScrollbarRender {
        ScrollbarRender {
            is_needed: self.state.is_needed(),
            is_visible: self.visibility.is_visible(),
            class_name: self.visibility.class_name().to_string(),
            ..self.rendered.clone()
        }
    }

    /// Press on the track (outside the slider)
    pub fn on_track_pointer_down(&mut self, event: &PointerEvent) -> DragChange {
        let offset = self.axis.pick(
            event.page_x - self.track_origin.0,
            event.page_y - self.track_origin.1,
        );
        let desired = if self.scroll_by_page {
            self.state.desired_scroll_position_from_offset_paged(offset)
        } else {
            self.state.desired_scroll_position_from_offset(offset)
        };
        self.set_desired_scroll_position_now(desired);

        if event.is_primary() {
            self.start_slider_drag(event)
        } else {
            DragChange::None
        }
    }

    /// Press on the slider itself
    pub fn on_slider_pointer_down(&mut self, event: &PointerEvent) -> DragChange {
        if event.is_primary() {
            self.start_slider_drag(event)
        } else {
            DragChange::None
        }
    }

    /// Press forwarded from elsewhere; hit-tests the slider first
    pub fn delegate_pointer_down(&mut self, event: &PointerEvent) -> DragChange {
        let track_start = self.axis.pick(self.track_origin.0, self.track_origin.1);
        let slider_start = track_start + self.state.slider_position();
        let slider_stop = slider_start + self.state.slider_size();
        let pointer = self.axis.pointer_position(event);

        if slider_start <= pointer && pointer <= slider_stop {
            self.on_slider_pointer_down(event)
        } else {
            self.on_track_pointer_down(event)
        }
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> DragChange {
        match self.monitor.on_pointer_move(event) {
            PointerMoveOutcome::Moved => {
                self.apply_drag(event);
                DragChange::None
            }
            PointerMoveOutcome::Stopped => self.end_drag(),
            PointerMoveOutcome::Ignored => DragChange::None,
        }
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> DragChange {
        match self.monitor.on_pointer_up(event) {
            PointerMoveOutcome::Stopped => self.end_drag(),
            _ => DragChange::None,
        }
    }

    /// Abort any drag without reporting it as ended
    pub fn dispose(&mut self) {
        self.monitor.stop();
        self.drag = None;
    }

    fn start_slider_drag(&mut self, event: &PointerEvent) -> DragChange {
        // A track press may have just moved the model; drag from there
        let position = self.scrollable.get_current_scroll_position();
        let scroll_position = self.axis.pick(position.scroll_left, position.scroll_top);
        if self.state.set_scroll_position(scroll_position) {
            self.should_render = true;
        }

        self.monitor.start(event);
        self.drag = Some(DragSession {
            initial_pointer_position: self.axis.pointer_position(event),
            initial_orthogonal_position: self.axis.orthogonal_pointer_position(event),
            initial_state: self.state.clone(),
        });
        DragChange::Started
    }

    fn apply_drag(&mut self, event: &PointerEvent) {
        let Some(drag) = &self.drag else {
            return;
        };

        let orthogonal_delta =
            (self.axis.orthogonal_pointer_position(event) - drag.initial_orthogonal_position).abs();
        let desired = match self.platform.pointer_drag_reset_distance() {
            // Pointer wandered off the scrollbar: snap back
            Some(reset_distance) if orthogonal_delta > reset_distance => {
                drag.initial_state.scroll_position()
            }
            _ => {
                let delta = self.axis.pointer_position(event) - drag.initial_pointer_position;
                drag.initial_state.desired_scroll_position_from_delta(delta)
            }
        };
        self.set_desired_scroll_position_now(desired);
    }

    fn end_drag(&mut self) -> DragChange {
        if self.drag.take().is_some() {
            DragChange::Ended
        } else {
            DragChange::None
        }
    }

    fn set_desired_scroll_position_now(&self, desired: f64) {
        tracing::trace!(axis = ?self.axis, desired, "scrollbar sets scroll position");
        self.scrollable
            .set_scroll_position_now(self.axis.write_scroll_position(desired));
    }
}
