//! Glide Animation System
//!
//! Timing substrate for the scrolling engine.
//!
//! # Features
//!
//! - **Easing**: Ease-out cubic curve for time-boxed animations
//! - **Frame Scheduler**: Priority-ordered, batched per-frame callbacks
//! - **Clocks**: System and manual time sources
//! - **Timers**: Polled one-shot timeouts

pub mod clock;
pub mod easing;
pub mod scheduler;
pub mod timer;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use easing::Easing;
pub use scheduler::{FrameCallbackId, FrameHandle, FrameScheduler};
pub use timer::TimeoutTimer;
