//! Glide Scroll
//!
//! Scrolling engine for custom scrollbar widgets. The host feeds viewport and
//! content sizes, wheel and pointer input, display frames and a clock; the
//! engine keeps the scroll position, animates it, and tells the host how to
//! draw the scrollbars.
//!
//! # Features
//!
//! - **Scroll Model**: validated position and dimensions with smooth scrolling
//! - **Scrollbar Geometry**: slider size/position and their inverse mapping
//! - **Wheel Classification**: physical mouse wheel vs trackpad detection
//! - **Visibility**: fade-in / fade-out with auto-hide
//! - **Interaction**: wheel, track and slider drag handling per element
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use glide_animation::{FrameScheduler, ManualClock};
//! use glide_core::WheelEvent;
//! use glide_scroll::{
//!     NewScrollDimensions, NoPointerCapture, Scrollable, ScrollableElement,
//!     ScrollableElementOptions, ScrollableOptions,
//! };
//!
//! let scheduler = FrameScheduler::new();
//! let clock = ManualClock::new(0.0);
//! let scrollable = Scrollable::new(ScrollableOptions::default(), scheduler.clone(), clock.clone());
//! let mut element = ScrollableElement::new(
//!     ScrollableElementOptions::default(),
//!     scrollable,
//!     clock.clone(),
//!     Rc::new(NoPointerCapture),
//! );
//! element.set_scroll_dimensions(NewScrollDimensions::new(400.0, 400.0, 300.0, 3000.0), false);
//!
//! // Scroll down three notches
//! element.on_mouse_wheel(&mut WheelEvent::new(0.0, -3.0));
//! while scheduler.needs_frame() {
//!     clock.advance(16.0);
//!     scheduler.run_frame();
//!     element.tick();
//! }
//! assert_eq!(element.scrollable().get_current_scroll_position().scroll_top, 150.0);
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod pointer_monitor;
pub mod scrollable;
pub mod scrollbar;
pub mod scrollbar_state;
pub mod visibility;
pub mod wheel_classifier;

pub use config::{
    ScrollableElementChangeOptions, ScrollableElementOptions, HIDE_TIMEOUT, SCROLL_WHEEL_SENSITIVITY,
};
pub use element::{ScrollableElement, ScrollableElementRender, ShadowClasses};
pub use error::{CaptureError, Result, ScrollError};
pub use pointer_monitor::{EventSource, NoPointerCapture, PointerCapture, PointerMoveMonitor, PointerMoveOutcome};
pub use scrollable::{
    NewScrollDimensions, NewScrollPosition, ScrollDimensions, ScrollEvent, ScrollListenerId, ScrollPosition,
    ScrollState, Scrollable, ScrollableOptions, DEFAULT_SMOOTH_SCROLL_DURATION,
};
pub use scrollbar::{DragChange, Scrollbar, ScrollbarAxis, ScrollbarOptions, ScrollbarRender};
pub use scrollbar_state::{compute_geometry, ScrollbarGeometry, ScrollbarState, MINIMUM_SLIDER_SIZE};
pub use visibility::{ScrollbarVisibility, ScrollbarVisibilityController, VisibilityPhase};
pub use wheel_classifier::MouseWheelClassifier;
