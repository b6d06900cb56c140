//! Scrollable element: input handling around a [`Scrollable`]
//!
//! [`ScrollableElement`] owns the two scrollbars of a region and the wheel
//! classifier, routes wheel and pointer input into the scroll model, and
//! drives scrollbar reveal/hide.
//!
//! Scroll model changes are queued by a listener and folded into the
//! scrollbars after every input call and on [`ScrollableElement::tick`]. The
//! host calls `tick` after each [`FrameScheduler::run_frame`](glide_animation::FrameScheduler::run_frame)
//! and whenever [`ScrollableElement::next_deadline`] passes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use glide_animation::{SharedClock, TimeoutTimer};
use glide_core::{Platform, PointerEvent, WheelEvent};
use serde::Serialize;

use crate::config::{ScrollableElementChangeOptions, ScrollableElementOptions, SCROLL_WHEEL_SENSITIVITY};
use crate::error::{Result, ScrollError};
use crate::pointer_monitor::PointerCapture;
use crate::scrollable::{NewScrollDimensions, NewScrollPosition, ScrollEvent, ScrollListenerId, Scrollable};
use crate::scrollbar::{DragChange, Scrollbar, ScrollbarAxis, ScrollbarOptions, ScrollbarRender};
use crate::wheel_classifier::MouseWheelClassifier;

/// Shadow class names, empty when the shadow is off
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ShadowClasses {
    pub left: String,
    pub top: String,
    pub top_left_corner: String,
}

/// Everything the host needs to draw the scrollbars of one element
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScrollableElementRender {
    pub horizontal: ScrollbarRender,
    pub vertical: ScrollbarRender,
    pub shadows: ShadowClasses,
}

type ElementScrollListener = Box<dyn FnMut(&ScrollEvent)>;

pub struct ScrollableElement {
    options: ScrollableElementOptions,
    scrollable: Scrollable,
    clock: SharedClock,
    platform: Platform,
    device_pixel_ratio: f64,
    classifier: MouseWheelClassifier,
    horizontal: Scrollbar,
    vertical: Scrollbar,
    /// Model changes not yet folded into the scrollbars
    pending: Rc<RefCell<VecDeque<ScrollEvent>>>,
    model_listener: ScrollListenerId,
    listeners: Vec<ElementScrollListener>,
    hide_timer: TimeoutTimer,
    mouse_is_over: bool,
    is_dragging: bool,
    should_render: bool,
    shadows: ShadowClasses,
    disposed: bool,
}

impl ScrollableElement {
    pub fn new(
        options: ScrollableElementOptions,
        scrollable: Scrollable,
        clock: SharedClock,
        capture: Rc<dyn PointerCapture>,
    ) -> Self {
        Self::with_platform(options, scrollable, clock, capture, Platform::current())
    }

    pub fn with_platform(
        options: ScrollableElementOptions,
        scrollable: Scrollable,
        clock: SharedClock,
        capture: Rc<dyn PointerCapture>,
        platform: Platform,
    ) -> Self {
        let horizontal = Scrollbar::new(
            ScrollbarOptions {
                axis: ScrollbarAxis::Horizontal,
                visibility: options.horizontal,
                arrow_size: options.arrow_size,
                has_arrows: options.horizontal_has_arrows,
                scrollbar_size: options.effective_horizontal_scrollbar_size(),
                opposite_scrollbar_size: options.effective_vertical_scrollbar_size(),
                slider_size: options.horizontal_slider_size(),
                scroll_by_page: options.scroll_by_page,
                platform,
            },
            scrollable.clone(),
            capture.clone(),
        );
        let vertical = Scrollbar::new(
            ScrollbarOptions {
                axis: ScrollbarAxis::Vertical,
                visibility: options.vertical,
                arrow_size: options.arrow_size,
                has_arrows: options.vertical_has_arrows,
                scrollbar_size: options.effective_vertical_scrollbar_size(),
                opposite_scrollbar_size: options.effective_horizontal_scrollbar_size(),
                slider_size: options.vertical_slider_size(),
                scroll_by_page: options.scroll_by_page,
                platform,
            },
            scrollable.clone(),
            capture,
        );

        let pending = Rc::new(RefCell::new(VecDeque::new()));
        let queue = pending.clone();
        let model_listener = scrollable.on_scroll(move |e| queue.borrow_mut().push_back(*e));

        let mut element = Self {
            hide_timer: TimeoutTimer::new(options.hide_timeout_ms),
            options,
            scrollable,
            clock,
            platform,
            device_pixel_ratio: 1.0,
            classifier: MouseWheelClassifier::new(),
            horizontal,
            vertical,
            pending,
            model_listener,
            listeners: Vec::new(),
            mouse_is_over: false,
            is_dragging: false,
            should_render: true,
            shadows: ShadowClasses::default(),
            disposed: false,
        };
        if !element.options.lazy_render {
            element.render();
        }
        element
    }

    pub fn scrollable(&self) -> &Scrollable {
        &self.scrollable
    }

    pub fn options(&self) -> &ScrollableElementOptions {
        &self.options
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn classifier(&self) -> &MouseWheelClassifier {
        &self.classifier
    }

    pub fn scrollbar(&self, axis: ScrollbarAxis) -> &Scrollbar {
        match axis {
            ScrollbarAxis::Horizontal => &self.horizontal,
            ScrollbarAxis::Vertical => &self.vertical,
        }
    }

    fn scrollbar_mut(&mut self, axis: ScrollbarAxis) -> &mut Scrollbar {
        match axis {
            ScrollbarAxis::Horizontal => &mut self.horizontal,
            ScrollbarAxis::Vertical => &mut self.vertical,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn mouse_is_over(&self) -> bool {
        self.mouse_is_over
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Used to undo OS zoom scaling of wheel deltas on Windows and Linux
    pub fn set_device_pixel_ratio(&mut self, device_pixel_ratio: f64) {
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            self.device_pixel_ratio = device_pixel_ratio;
        }
    }

    /// Called with every model change, after the scrollbars have caught up
    pub fn on_scroll<F: FnMut(&ScrollEvent) + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    pub fn set_scroll_dimensions(&mut self, dimensions: NewScrollDimensions, use_raw_scroll_position: bool) {
        self.scrollable
            .set_scroll_dimensions(dimensions, use_raw_scroll_position);
        self.process_scroll_events();
    }

    pub fn update_options(&mut self, change: ScrollableElementChangeOptions) {
        self.options.apply(&change);

        let horizontal_size = self.options.effective_horizontal_scrollbar_size();
        let vertical_size = self.options.effective_vertical_scrollbar_size();
        let horizontal_visibility = self.options.horizontal;
        let vertical_visibility = self.options.vertical;
        let scroll_by_page = self.options.scroll_by_page;

        if change.horizontal_scrollbar_size.is_some() || change.horizontal.is_some() {
            self.horizontal.update_scrollbar_size(horizontal_size);
            self.vertical.update_opposite_scrollbar_size(horizontal_size);
        }
        if change.vertical_scrollbar_size.is_some() || change.vertical.is_some() {
            self.vertical.update_scrollbar_size(vertical_size);
            self.horizontal.update_opposite_scrollbar_size(vertical_size);
        }
        self.horizontal.set_visibility(horizontal_visibility);
        self.vertical.set_visibility(vertical_visibility);
        self.horizontal.set_scroll_by_page(scroll_by_page);
        self.vertical.set_scroll_by_page(scroll_by_page);

        self.should_render = true;
        if !self.options.lazy_render {
            self.render();
        }
    }

    // ------------------------------------------------------------------
    // Wheel
    // ------------------------------------------------------------------

    /// Handle a wheel event. Returns whether the event was consumed.
    pub fn on_mouse_wheel(&mut self, event: &mut WheelEvent) -> bool {
        if self.disposed || !self.options.handle_mouse_wheel || event.default_prevented {
            return false;
        }

        self.classifier
            .accept_wheel_event(event, self.platform, self.device_pixel_ratio);

        let mut did_scroll = false;

        if event.delta_x != 0.0 || event.delta_y != 0.0 {
            let options = &self.options;
            let mut delta_y = event.delta_y * options.mouse_wheel_scroll_sensitivity;
            let mut delta_x = event.delta_x * options.mouse_wheel_scroll_sensitivity;

            if options.scroll_predominant_axis {
                if options.scroll_y_to_x && delta_x + delta_y == 0.0 {
                    // Equal and opposite: no axis can be picked
                    delta_x = 0.0;
                    delta_y = 0.0;
                } else if delta_y.abs() >= delta_x.abs() {
                    delta_x = 0.0;
                } else {
                    delta_y = 0.0;
                }
            }

            if options.flip_axes {
                std::mem::swap(&mut delta_x, &mut delta_y);
            }

            // macOS converts shift+wheel before we see it
            let shift_convert = self.platform.converts_shift_wheel() && event.modifiers.is_shift();
            if (options.scroll_y_to_x || shift_convert) && delta_x == 0.0 {
                delta_x = delta_y;
                delta_y = 0.0;
            }

            if event.modifiers.is_alt() {
                delta_x *= options.fast_scroll_sensitivity;
                delta_y *= options.fast_scroll_sensitivity;
            }

            let future = self.scrollable.get_future_scroll_position();
            let mut desired = NewScrollPosition::default();
            if delta_y != 0.0 {
                desired.scroll_top = Some(future.scroll_top - round_away_from_zero(SCROLL_WHEEL_SENSITIVITY * delta_y));
            }
            if delta_x != 0.0 {
                desired.scroll_left = Some(future.scroll_left - round_away_from_zero(SCROLL_WHEEL_SENSITIVITY * delta_x));
            }
            let desired = self.scrollable.validate_scroll_position(desired);

            let moves_left = desired.scroll_left.is_some_and(|left| left != future.scroll_left);
            let moves_top = desired.scroll_top.is_some_and(|top| top != future.scroll_top);
            if moves_left || moves_top {
                let smooth = self.options.mouse_wheel_smooth_scroll && self.classifier.is_physical_mouse_wheel();
                tracing::trace!(?desired, smooth, "wheel scroll");
                if smooth {
                    self.scrollable.set_scroll_position_smooth(desired);
                } else {
                    self.scrollable.set_scroll_position_now(desired);
                }
                did_scroll = true;
            }
        }

        let consume = did_scroll
            || self.options.always_consume_mouse_wheel
            || (self.options.consume_mouse_wheel_if_scrollbar_is_needed
                && (self.vertical.is_needed() || self.horizontal.is_needed()));
        if consume {
            event.prevent_default();
            event.stop_propagation();
        }

        self.process_scroll_events();
        consume
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    pub fn on_track_pointer_down(&mut self, axis: ScrollbarAxis, event: &PointerEvent) {
        let change = self.scrollbar_mut(axis).on_track_pointer_down(event);
        self.after_pointer_event(change);
    }

    pub fn on_slider_pointer_down(&mut self, axis: ScrollbarAxis, event: &PointerEvent) {
        let change = self.scrollbar_mut(axis).on_slider_pointer_down(event);
        self.after_pointer_event(change);
    }

    /// Pointer down forwarded from outside the scrollbar (e.g. a minimap)
    pub fn delegate_pointer_down(&mut self, axis: ScrollbarAxis, event: &PointerEvent) {
        let change = self.scrollbar_mut(axis).delegate_pointer_down(event);
        self.after_pointer_event(change);
    }

    pub fn on_pointer_move(&mut self, event: &PointerEvent) {
        let change = match self.horizontal.on_pointer_move(event) {
            DragChange::None => self.vertical.on_pointer_move(event),
            change => change,
        };
        self.after_pointer_event(change);
    }

    pub fn on_pointer_up(&mut self, event: &PointerEvent) {
        let change = match self.horizontal.on_pointer_up(event) {
            DragChange::None => self.vertical.on_pointer_up(event),
            change => change,
        };
        self.after_pointer_event(change);
    }

    fn after_pointer_event(&mut self, change: DragChange) {
        self.process_scroll_events();
        match change {
            DragChange::Started => self.on_scrollbar_drag_start(),
            DragChange::Ended => self.on_scrollbar_drag_end(),
            DragChange::None => {}
        }
    }

    pub fn on_scrollbar_drag_start(&mut self) {
        tracing::debug!("scrollbar drag started");
        self.is_dragging = true;
        self.reveal();
    }

    pub fn on_scrollbar_drag_end(&mut self) {
        tracing::debug!("scrollbar drag ended");
        self.is_dragging = false;
        self.hide();
    }

    pub fn on_mouse_over(&mut self) {
        self.mouse_is_over = true;
        self.reveal();
    }

    pub fn on_mouse_leave(&mut self) {
        self.mouse_is_over = false;
        self.hide();
    }

    // ------------------------------------------------------------------
    // Fade in / fade out
    // ------------------------------------------------------------------

    fn reveal(&mut self) {
        self.horizontal.begin_reveal();
        self.vertical.begin_reveal();
        self.schedule_hide();
    }

    fn hide(&mut self) {
        if !self.mouse_is_over && !self.is_dragging {
            self.horizontal.begin_hide();
            self.vertical.begin_hide();
        }
    }

    fn schedule_hide(&mut self) {
        if !self.mouse_is_over && !self.is_dragging {
            self.hide_timer.start(self.clock.now());
        }
    }

    /// When the host should call [`tick`](Self::tick) next, if a timer is armed
    pub fn next_deadline(&self) -> Option<f64> {
        self.hide_timer.deadline()
    }

    /// Whether [`tick`](Self::tick) has immediate work
    pub fn needs_tick(&self) -> bool {
        !self.pending.borrow().is_empty() || self.horizontal.needs_tick() || self.vertical.needs_tick()
    }

    /// Catch up with the model, fire the hide timer and finish pending reveals.
    /// Returns whether anything visible changed.
    pub fn tick(&mut self) -> bool {
        let mut changed = self.process_scroll_events();

        if self.hide_timer.poll(self.clock.now()) {
            self.hide();
            changed = true;
        }

        changed |= self.horizontal.tick();
        changed |= self.vertical.tick();
        changed
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Fold queued model changes into the scrollbars. Returns whether there were any.
    fn process_scroll_events(&mut self) -> bool {
        let mut processed = false;
        loop {
            let Some(event) = self.pending.borrow_mut().pop_front() else {
                break;
            };
            self.on_did_scroll(&event);
            processed = true;
        }
        processed
    }

    fn on_did_scroll(&mut self, e: &ScrollEvent) {
        if self.horizontal.on_did_scroll(e) {
            self.should_render = true;
        }
        if self.vertical.on_did_scroll(e) {
            self.should_render = true;
        }
        if self.options.use_shadows {
            self.should_render = true;
        }

        if self.options.reveal_on_scroll {
            self.reveal();
        }

        if !self.options.lazy_render {
            self.render();
        }

        for listener in self.listeners.iter_mut() {
            listener(e);
        }
    }

    /// Render on demand; only valid with `lazy_render`.
    /// Returns whether anything was re-rendered.
    pub fn render_now(&mut self) -> Result<bool> {
        if !self.options.lazy_render {
            return Err(ScrollError::LazyRenderDisabled);
        }
        self.process_scroll_events();
        Ok(self.render())
    }

    fn render(&mut self) -> bool {
        if !self.should_render {
            return false;
        }
        self.should_render = false;

        self.horizontal.render();
        self.vertical.render();

        self.shadows = if self.options.use_shadows {
            let position = self.scrollable.get_current_scroll_position();
            shadow_classes(position.scroll_left > 0.0, position.scroll_top > 0.0)
        } else {
            ShadowClasses::default()
        };
        true
    }

    /// Output of the last render, with live visibility state
    pub fn render_output(&self) -> ScrollableElementRender {
        ScrollableElementRender {
            horizontal: self.horizontal.render_output(),
            vertical: self.vertical.render_output(),
            shadows: self.shadows.clone(),
        }
    }

    /// Tear down: stop gestures and timers and dispose the model. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.horizontal.dispose();
        self.vertical.dispose();
        self.hide_timer.stop();
        self.scrollable.remove_listener(self.model_listener);
        self.scrollable.dispose();
        self.pending.borrow_mut().clear();
        self.listeners.clear();
    }
}

impl std::fmt::Debug for ScrollableElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollableElement")
            .field("scrollable", &self.scrollable)
            .field("horizontal", &self.horizontal)
            .field("vertical", &self.vertical)
            .field("mouse_is_over", &self.mouse_is_over)
            .field("is_dragging", &self.is_dragging)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

/// Rounds fractional wheel deltas outward so slow scrolling still moves
fn round_away_from_zero(value: f64) -> f64 {
    if value < 0.0 {
        value.floor()
    } else {
        value.ceil()
    }
}

fn shadow_classes(enable_left: bool, enable_top: bool) -> ShadowClasses {
    let left = if enable_left { "left" } else { "" };
    let top = if enable_top { "top" } else { "" };

    let mut corner: Vec<&str> = Vec::new();
    if enable_left || enable_top {
        corner.push("top-left-corner");
    }
    corner.extend([top, left].into_iter().filter(|c| !c.is_empty()));

    ShadowClasses {
        left: left.to_string(),
        top: top.to_string(),
        top_left_corner: corner.join(" "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer_monitor::NoPointerCapture;
    use crate::scrollable::ScrollableOptions;
    use crate::visibility::{ScrollbarVisibility, VisibilityPhase};
    use glide_animation::{FrameScheduler, ManualClock};
    use glide_core::Modifiers;

    struct Fixture {
        element: ScrollableElement,
        scheduler: FrameScheduler,
        clock: Rc<ManualClock>,
    }

    fn fixture(options: ScrollableElementOptions, platform: Platform) -> Fixture {
        let scheduler = FrameScheduler::new();
        let clock = ManualClock::new(0.0);
        let scrollable = Scrollable::new(ScrollableOptions::default(), scheduler.clone(), clock.clone());
        let mut element = ScrollableElement::with_platform(
            options,
            scrollable,
            clock.clone(),
            Rc::new(NoPointerCapture),
            platform,
        );
        element.set_scroll_dimensions(NewScrollDimensions::new(100.0, 1000.0, 100.0, 1000.0), false);
        Fixture {
            element,
            scheduler,
            clock,
        }
    }

    fn position(f: &Fixture) -> (f64, f64) {
        let p = f.element.scrollable().get_current_scroll_position();
        (p.scroll_left, p.scroll_top)
    }

    fn jump(f: &mut Fixture, left: f64, top: f64) {
        f.element
            .scrollable()
            .set_scroll_position_now(NewScrollPosition::new(left, top));
        f.element.tick();
    }

    fn instant() -> ScrollableElementOptions {
        ScrollableElementOptions {
            mouse_wheel_smooth_scroll: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_wheel_scrolls_by_fifty_per_unit() {
        let mut f = fixture(instant(), Platform::Linux);
        jump(&mut f, 0.0, 500.0);

        let mut event = WheelEvent::new(0.0, 3.0);
        assert!(f.element.on_mouse_wheel(&mut event));
        assert_eq!(position(&f), (0.0, 350.0));
        assert!(event.default_prevented);
        assert!(event.propagation_stopped);

        let mut event = WheelEvent::new(0.0, -1.0);
        f.element.on_mouse_wheel(&mut event);
        assert_eq!(position(&f), (0.0, 400.0));
    }

    #[test]
    fn test_fractional_delta_rounds_outward() {
        let mut f = fixture(instant(), Platform::Linux);
        jump(&mut f, 0.0, 500.0);

        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 0.001));
        assert_eq!(position(&f), (0.0, 499.0));
        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, -0.001));
        assert_eq!(position(&f), (0.0, 500.0));
    }

    #[test]
    fn test_predominant_axis_wins() {
        let mut f = fixture(instant(), Platform::Linux);
        jump(&mut f, 500.0, 500.0);

        f.element.on_mouse_wheel(&mut WheelEvent::new(1.0, 2.0));
        assert_eq!(position(&f), (500.0, 400.0));

        f.element.on_mouse_wheel(&mut WheelEvent::new(2.0, 1.0));
        assert_eq!(position(&f), (400.0, 400.0));

        // Ties keep the vertical axis
        f.element.on_mouse_wheel(&mut WheelEvent::new(1.0, 1.0));
        assert_eq!(position(&f), (400.0, 350.0));
    }

    #[test]
    fn test_both_axes_without_predominant_axis() {
        let options = ScrollableElementOptions {
            scroll_predominant_axis: false,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        jump(&mut f, 500.0, 500.0);

        f.element.on_mouse_wheel(&mut WheelEvent::new(1.0, 2.0));
        assert_eq!(position(&f), (450.0, 400.0));
    }

    #[test]
    fn test_scroll_y_to_x() {
        let options = ScrollableElementOptions {
            scroll_y_to_x: true,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        jump(&mut f, 500.0, 500.0);

        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 2.0));
        assert_eq!(position(&f), (400.0, 500.0));

        // Equal and opposite deltas cancel out entirely
        let mut event = WheelEvent::new(1.0, -1.0);
        assert!(!f.element.on_mouse_wheel(&mut event));
        assert_eq!(position(&f), (400.0, 500.0));
        assert!(!event.default_prevented);
    }

    #[test]
    fn test_shift_converts_except_on_macos() {
        let mut f = fixture(instant(), Platform::Windows);
        jump(&mut f, 500.0, 500.0);
        f.element
            .on_mouse_wheel(&mut WheelEvent::new(0.0, 1.0).with_modifiers(Modifiers::shift()));
        assert_eq!(position(&f), (450.0, 500.0));

        let mut f = fixture(instant(), Platform::MacOs);
        jump(&mut f, 500.0, 500.0);
        f.element
            .on_mouse_wheel(&mut WheelEvent::new(0.0, 1.0).with_modifiers(Modifiers::shift()));
        assert_eq!(position(&f), (500.0, 450.0));
    }

    #[test]
    fn test_flip_axes() {
        let options = ScrollableElementOptions {
            flip_axes: true,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        jump(&mut f, 500.0, 500.0);

        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 1.0));
        assert_eq!(position(&f), (450.0, 500.0));
    }

    #[test]
    fn test_alt_scrolls_fast() {
        let mut f = fixture(instant(), Platform::Linux);
        jump(&mut f, 0.0, 500.0);
        f.element
            .on_mouse_wheel(&mut WheelEvent::new(0.0, 1.0).with_modifiers(Modifiers::alt()));
        assert_eq!(position(&f), (0.0, 250.0));
    }

    #[test]
    fn test_sensitivity_multiplier() {
        let options = ScrollableElementOptions {
            mouse_wheel_scroll_sensitivity: 2.0,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        jump(&mut f, 0.0, 500.0);
        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 1.0));
        assert_eq!(position(&f), (0.0, 400.0));
    }

    #[test]
    fn test_boundary_wheel_is_not_consumed() {
        let mut f = fixture(instant(), Platform::Linux);
        let mut event = WheelEvent::new(0.0, 3.0);
        assert!(!f.element.on_mouse_wheel(&mut event));
        assert!(!event.default_prevented);
        assert!(!event.propagation_stopped);
    }

    #[test]
    fn test_consume_policies() {
        let options = ScrollableElementOptions {
            always_consume_mouse_wheel: true,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        let mut event = WheelEvent::new(0.0, 3.0);
        assert!(f.element.on_mouse_wheel(&mut event));
        assert!(event.default_prevented);

        let options = ScrollableElementOptions {
            consume_mouse_wheel_if_scrollbar_is_needed: true,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        assert!(f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 3.0)));

        f.element
            .set_scroll_dimensions(NewScrollDimensions::new(100.0, 100.0, 100.0, 100.0), false);
        assert!(!f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 3.0)));
    }

    #[test]
    fn test_ignored_wheel_events() {
        let mut f = fixture(instant(), Platform::Linux);
        jump(&mut f, 0.0, 500.0);

        let mut prevented = WheelEvent::new(0.0, 3.0);
        prevented.prevent_default();
        assert!(!f.element.on_mouse_wheel(&mut prevented));
        assert!(f.element.classifier().is_empty());

        f.element.update_options(ScrollableElementChangeOptions {
            handle_mouse_wheel: Some(false),
            ..Default::default()
        });
        assert!(!f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 3.0)));
        assert_eq!(position(&f), (0.0, 500.0));
    }

    #[test]
    fn test_physical_wheel_scrolls_smoothly() {
        let mut f = fixture(ScrollableElementOptions::default(), Platform::Linux);
        jump(&mut f, 0.0, 500.0);

        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 3.0));
        assert!(f.element.scrollable().has_pending_scroll_animation());
        assert_eq!(position(&f), (0.0, 500.0));

        // A second notch accumulates on the animation target
        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 1.0));
        assert_eq!(f.element.scrollable().get_future_scroll_position().scroll_top, 300.0);

        while f.scheduler.needs_frame() {
            f.clock.advance(16.0);
            f.scheduler.run_frame();
            f.element.tick();
        }
        assert_eq!(position(&f), (0.0, 300.0));
        assert_eq!(f.element.scrollbar(ScrollbarAxis::Vertical).state().scroll_position(), 300.0);
    }

    #[test]
    fn test_trackpad_scrolls_instantly() {
        let mut f = fixture(ScrollableElementOptions::default(), Platform::Linux);
        jump(&mut f, 0.0, 500.0);

        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 0.5));
        assert!(!f.element.scrollable().has_pending_scroll_animation());
        assert_eq!(position(&f), (0.0, 475.0));
    }

    #[test]
    fn test_scroll_reveals_then_hides_after_timeout() {
        let mut f = fixture(instant(), Platform::Linux);
        f.element.tick();
        f.element.on_mouse_over();
        f.element.on_mouse_leave();
        assert!(!f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());

        f.clock.set(1000.0);
        f.element
            .scrollable()
            .set_scroll_position_now(NewScrollPosition::top(100.0));
        assert!(f.element.needs_tick());

        // Syncs, reveals and applies the deferred class switch
        assert!(f.element.tick());
        let vertical = f.element.scrollbar(ScrollbarAxis::Vertical);
        assert!(vertical.is_visible());
        assert_eq!(vertical.class_name(), "visible scrollbar vertical");
        assert_eq!(f.element.next_deadline(), Some(1500.0));

        f.clock.set(1499.0);
        f.element.tick();
        assert!(f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());

        f.clock.set(1500.0);
        assert!(f.element.tick());
        assert_eq!(
            f.element.scrollbar(ScrollbarAxis::Vertical).visibility_phase(),
            VisibilityPhase::FadingOut
        );
    }

    #[test]
    fn test_mouse_over_keeps_scrollbars_visible() {
        let mut f = fixture(instant(), Platform::Linux);
        f.element.on_mouse_over();
        assert!(f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());

        jump(&mut f, 0.0, 100.0);
        f.clock.advance(1000.0);
        f.element.tick();
        assert!(f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());

        f.element.on_mouse_leave();
        assert!(!f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());
    }

    #[test]
    fn test_drag_reveals_and_end_hides() {
        let mut f = fixture(instant(), Platform::Linux);
        let down = PointerEvent::primary_down(glide_core::TargetId(1), 95.0, 5.0);
        f.element.on_slider_pointer_down(ScrollbarAxis::Vertical, &down);
        assert!(f.element.is_dragging());
        assert!(f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());

        // Track of 90 (horizontal scrollbar takes 10): 40 / (70 / 900)
        f.element.on_pointer_move(&down.moved_to(95.0, 45.0));
        assert_eq!(position(&f), (0.0, 514.0));

        f.clock.advance(1000.0);
        f.element.tick();
        assert!(f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());

        f.element.on_pointer_up(&down.released());
        assert!(!f.element.is_dragging());
        assert!(!f.element.scrollbar(ScrollbarAxis::Vertical).is_visible());
    }

    #[test]
    fn test_hidden_policy_frees_opposite_track() {
        let options = ScrollableElementOptions {
            horizontal: ScrollbarVisibility::Hidden,
            ..instant()
        };
        let f = fixture(options, Platform::Linux);
        let output = f.element.render_output();
        assert_eq!(output.vertical.rectangle_large_size, 100.0);
        assert_eq!(output.horizontal.rectangle_large_size, 90.0);
    }

    #[test]
    fn test_render_now_requires_lazy_render() {
        let mut f = fixture(instant(), Platform::Linux);
        assert_eq!(f.element.render_now(), Err(ScrollError::LazyRenderDisabled));

        let options = ScrollableElementOptions {
            lazy_render: true,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        assert_eq!(f.element.render_output().vertical.slider_size, 0.0);
        assert_eq!(f.element.render_now(), Ok(true));
        assert_eq!(f.element.render_output().vertical.slider_size, 20.0);
        assert_eq!(f.element.render_now(), Ok(false));
    }

    #[test]
    fn test_shadows() {
        let options = ScrollableElementOptions {
            use_shadows: true,
            ..instant()
        };
        let mut f = fixture(options, Platform::Linux);
        assert_eq!(f.element.render_output().shadows, ShadowClasses::default());

        jump(&mut f, 0.0, 10.0);
        let shadows = f.element.render_output().shadows;
        assert_eq!(shadows.top, "top");
        assert_eq!(shadows.left, "");
        assert_eq!(shadows.top_left_corner, "top-left-corner top");

        jump(&mut f, 10.0, 10.0);
        assert_eq!(
            f.element.render_output().shadows.top_left_corner,
            "top-left-corner top left"
        );
    }

    #[test]
    fn test_element_listeners_see_synced_scrollbars() {
        let mut f = fixture(instant(), Platform::Linux);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        f.element.on_scroll(move |e| sink.borrow_mut().push(e.scroll_top));

        f.element.scrollable().set_scroll_position_now(NewScrollPosition::top(200.0));
        assert!(seen.borrow().is_empty());
        f.element.tick();
        assert_eq!(*seen.borrow(), vec![200.0]);
    }

    #[test]
    fn test_update_options_resizes_scrollbars() {
        let mut f = fixture(instant(), Platform::Linux);
        f.element.update_options(ScrollableElementChangeOptions {
            vertical_scrollbar_size: Some(14.0),
            ..Default::default()
        });
        let output = f.element.render_output();
        assert_eq!(output.vertical.rectangle_small_size, 14.0);
        assert_eq!(output.horizontal.rectangle_large_size, 86.0);
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut f = fixture(ScrollableElementOptions::default(), Platform::Linux);
        jump(&mut f, 0.0, 500.0);
        f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 3.0));

        f.element.dispose();
        f.element.dispose();
        assert!(f.element.is_disposed());
        assert!(f.element.scrollable().is_disposed());
        assert_eq!(f.scheduler.pending_count(), 0);
        assert!(!f.element.on_mouse_wheel(&mut WheelEvent::new(0.0, 3.0)));
    }

    #[test]
    fn test_round_away_from_zero() {
        assert_eq!(round_away_from_zero(0.3), 1.0);
        assert_eq!(round_away_from_zero(-0.3), -1.0);
        assert_eq!(round_away_from_zero(150.0), 150.0);
        assert_eq!(round_away_from_zero(0.0), 0.0);
    }
}
