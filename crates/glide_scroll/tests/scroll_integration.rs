//! Integration tests for the scroll pipeline
//!
//! These tests drive a whole element the way a host would:
//! - Input events go into the element
//! - Frames are pumped by hand with a manual clock
//! - Render output is read back after each step

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glide_animation::{FrameScheduler, ManualClock};
use glide_core::{Modifiers, Platform, PointerEvent, TargetId, WheelEvent};
use glide_scroll::{
    compute_geometry, CaptureError, NewScrollDimensions, NewScrollPosition, PointerCapture, ScrollEvent,
    ScrollableElement, ScrollableElementOptions, Scrollable, ScrollableOptions, ScrollbarAxis, ScrollbarState,
    MINIMUM_SLIDER_SIZE,
};

struct Host {
    element: ScrollableElement,
    scheduler: FrameScheduler,
    clock: Rc<ManualClock>,
    events: Rc<RefCell<Vec<ScrollEvent>>>,
}

impl Host {
    fn new(options: ScrollableElementOptions, platform: Platform) -> Self {
        Self::with_capture(options, platform, Rc::new(glide_scroll::NoPointerCapture))
    }

    fn with_capture(options: ScrollableElementOptions, platform: Platform, capture: Rc<dyn PointerCapture>) -> Self {
        let scheduler = FrameScheduler::new();
        let clock = ManualClock::new(0.0);
        let scrollable = Scrollable::new(ScrollableOptions::default(), scheduler.clone(), clock.clone());
        let mut element = ScrollableElement::with_platform(options, scrollable, clock.clone(), capture, platform);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        element.on_scroll(move |e| sink.borrow_mut().push(*e));

        element.set_scroll_dimensions(NewScrollDimensions::new(300.0, 300.0, 100.0, 1000.0), false);
        events.borrow_mut().clear();

        Self {
            element,
            scheduler,
            clock,
            events,
        }
    }

    /// Pump 60fps frames until the scheduler goes idle
    fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.scheduler.needs_frame() && frames < 600 {
            self.clock.advance(16.0);
            self.scheduler.run_frame();
            self.element.tick();
            frames += 1;
        }
        frames
    }

    fn scroll_top(&self) -> f64 {
        self.element.scrollable().get_current_scroll_position().scroll_top
    }
}

#[test]
fn test_geometry_scenarios() {
    // Viewport 100 over content 1000, no arrows or opposite scrollbar
    let at_top = ScrollbarState::new(0.0, 10.0, 0.0, 100.0, 1000.0, 0.0);
    assert!(at_top.is_needed());
    assert_eq!(at_top.slider_size(), MINIMUM_SLIDER_SIZE);
    assert_eq!(at_top.slider_position(), 0.0);

    let at_bottom = ScrollbarState::new(0.0, 10.0, 0.0, 100.0, 1000.0, 900.0);
    assert_eq!(at_bottom.slider_position(), 80.0);

    let fits = compute_geometry(0.0, 0.0, 100.0, 100.0, 0.0);
    assert!(!fits.is_needed);
    assert_eq!(fits.slider_position, 0.0);
}

#[test]
fn test_slider_stays_within_track() {
    for visible in [50.0, 100.0, 333.0] {
        for scroll in [60.0, 400.0, 1000.0, 25_000.0] {
            let max_position = f64::max(scroll - visible, 0.0);
            for step in 0..=10 {
                let position = (max_position * step as f64 / 10.0).round();
                let state = ScrollbarState::new(0.0, 10.0, 0.0, visible, scroll, position);
                if !state.is_needed() {
                    continue;
                }
                assert!(state.slider_size() >= MINIMUM_SLIDER_SIZE);
                assert!(state.slider_position() >= 0.0);
                assert!(state.slider_position() <= state.rectangle_large_size() - state.slider_size());
            }
        }
    }
}

#[test]
fn test_wheel_notches_animate_to_exact_target() {
    let mut host = Host::new(ScrollableElementOptions::default(), Platform::Linux);
    host.element
        .scrollable()
        .set_scroll_position_now(NewScrollPosition::top(500.0));
    host.element.tick();
    host.events.borrow_mut().clear();

    let mut wheel = WheelEvent::new(0.0, 3.0).at(16.0);
    assert!(host.element.on_mouse_wheel(&mut wheel));
    assert!(wheel.default_prevented);
    assert_eq!(host.element.scrollable().get_future_scroll_position().scroll_top, 350.0);

    let frames = host.settle();
    assert!(frames > 1);
    assert_eq!(host.scroll_top(), 350.0);

    let events = host.events.borrow();
    assert!(events.len() > 1);
    assert!(events.iter().all(|e| e.in_smooth_scrolling && e.scroll_top_changed));
    assert_eq!(events.last().map(|e| e.scroll_top), Some(350.0));

    let vertical = host.element.render_output().vertical;
    assert_eq!(
        vertical.slider_position,
        host.element.scrollbar(ScrollbarAxis::Vertical).state().slider_position()
    );
}

#[test]
fn test_trackpad_input_is_applied_immediately() {
    let mut host = Host::new(ScrollableElementOptions::default(), Platform::MacOs);
    for i in 0..5 {
        let mut wheel = WheelEvent::new(0.0, -0.5).at(i as f64 * 8.0);
        host.element.on_mouse_wheel(&mut wheel);
    }
    assert!(!host.scheduler.needs_frame());
    assert_eq!(host.scroll_top(), 125.0);
    assert_eq!(host.events.borrow().len(), 5);
}

#[test]
fn test_shift_wheel_scrolls_horizontally() {
    let mut host = Host::new(
        ScrollableElementOptions {
            mouse_wheel_smooth_scroll: false,
            ..Default::default()
        },
        Platform::Linux,
    );
    host.element
        .set_scroll_dimensions(NewScrollDimensions::new(100.0, 1000.0, 100.0, 1000.0), false);

    let mut wheel = WheelEvent::new(0.0, -2.0).with_modifiers(Modifiers::shift());
    host.element.on_mouse_wheel(&mut wheel);
    let position = host.element.scrollable().get_current_scroll_position();
    assert_eq!(position.scroll_left, 100.0);
    assert_eq!(position.scroll_top, 0.0);
}

#[derive(Default)]
struct CountingCapture {
    acquired: Cell<u32>,
    released: Cell<u32>,
}

impl PointerCapture for CountingCapture {
    fn set_pointer_capture(&self, _target: TargetId, _pointer_id: u32) -> Result<(), CaptureError> {
        self.acquired.set(self.acquired.get() + 1);
        Ok(())
    }

    fn release_pointer_capture(&self, _target: TargetId, _pointer_id: u32) -> Result<(), CaptureError> {
        self.released.set(self.released.get() + 1);
        Ok(())
    }
}

#[test]
fn test_slider_drag_with_reset_on_windows() {
    let capture = Rc::new(CountingCapture::default());
    let options = ScrollableElementOptions {
        horizontal: glide_scroll::ScrollbarVisibility::Hidden,
        ..Default::default()
    };
    let mut host = Host::with_capture(options, Platform::Windows, capture.clone());

    let slider = TargetId(42);
    let down = PointerEvent::primary_down(slider, 295.0, 10.0);
    host.element.on_slider_pointer_down(ScrollbarAxis::Vertical, &down);
    assert!(host.element.is_dragging());
    assert_eq!(capture.acquired.get(), 1);

    // Track 100, slider 20: ratio 80 / 900
    host.element.on_pointer_move(&down.moved_to(295.0, 50.0));
    assert_eq!(host.scroll_top(), 450.0);

    // Wander off sideways: snaps back to where the drag began
    host.element.on_pointer_move(&down.moved_to(100.0, 50.0));
    assert_eq!(host.scroll_top(), 0.0);

    host.element.on_pointer_move(&down.moved_to(290.0, 90.0));
    assert_eq!(host.scroll_top(), 900.0);

    host.element.on_pointer_up(&down.released());
    assert!(!host.element.is_dragging());
    assert_eq!(capture.released.get(), 1);
}

#[test]
fn test_page_clicks_on_track() {
    let options = ScrollableElementOptions {
        scroll_by_page: true,
        horizontal: glide_scroll::ScrollbarVisibility::Hidden,
        ..Default::default()
    };
    let mut host = Host::new(options, Platform::Linux);

    let mut press = PointerEvent::primary_down(TargetId(1), 295.0, 80.0);
    press.button = glide_core::PointerButton::Secondary;
    host.element.on_track_pointer_down(ScrollbarAxis::Vertical, &press);
    assert_eq!(host.scroll_top(), 100.0);
    host.element.on_track_pointer_down(ScrollbarAxis::Vertical, &press);
    assert_eq!(host.scroll_top(), 200.0);

    // Slider now at round(200 * 80 / 900) = 18: a press above it pages back
    let mut above = PointerEvent::primary_down(TargetId(1), 295.0, 5.0);
    above.button = glide_core::PointerButton::Secondary;
    host.element.on_track_pointer_down(ScrollbarAxis::Vertical, &above);
    assert_eq!(host.scroll_top(), 100.0);
}

#[test]
fn test_config_from_json_drives_element() {
    let options: ScrollableElementOptions = serde_json::from_str(
        r#"{
            "lazy_render": true,
            "use_shadows": true,
            "vertical": "visible",
            "mouse_wheel_smooth_scroll": false
        }"#,
    )
    .unwrap();
    let mut host = Host::new(options, Platform::Linux);

    let mut wheel = WheelEvent::new(0.0, -1.0);
    host.element.on_mouse_wheel(&mut wheel);
    assert_eq!(host.scroll_top(), 50.0);

    // Nothing rendered until asked
    assert_eq!(host.element.render_output().shadows.top, "");
    assert_eq!(host.element.render_now(), Ok(true));

    let output = host.element.render_output();
    assert_eq!(output.shadows.top, "top");
    assert!(output.vertical.is_visible);
    assert!(!output.horizontal.is_needed);
}

#[test]
fn test_frame_requester_is_notified_once_per_batch() {
    let mut host = Host::new(ScrollableElementOptions::default(), Platform::Linux);
    let requests = Rc::new(Cell::new(0));
    let counter = requests.clone();
    host.scheduler.set_frame_requester(move || counter.set(counter.get() + 1));

    host.element.on_mouse_wheel(&mut WheelEvent::new(0.0, -3.0));
    host.element.on_mouse_wheel(&mut WheelEvent::new(0.0, -3.0));
    assert_eq!(requests.get(), 1);

    let frames = host.settle();
    assert_eq!(requests.get() as usize, frames);
    assert_eq!(host.scroll_top(), 300.0);
}

#[test]
fn test_scrollbars_hide_after_activity() {
    let mut host = Host::new(ScrollableElementOptions::default(), Platform::Linux);
    host.element.on_mouse_wheel(&mut WheelEvent::new(0.0, -1.0));
    host.settle();
    assert!(host.element.render_output().vertical.is_visible);

    let deadline = host.element.next_deadline().unwrap();
    host.clock.set(deadline);
    host.element.tick();

    let vertical = host.element.render_output().vertical;
    assert!(!vertical.is_visible);
    assert!(vertical.class_name.ends_with("fade"));
}
