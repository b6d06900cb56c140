//! Pointer-move monitoring for drag gestures
//!
//! A [`PointerMoveMonitor`] tracks at most one gesture. While a gesture is
//! active the host forwards pointer moves and pointer-ups to it; the monitor
//! decides when the gesture ends. Pointer capture is requested from the host
//! through [`PointerCapture`]; when capture is unavailable the gesture falls
//! back to listening at window level.

use std::rc::Rc;

use glide_core::{PointerEvent, TargetId};

use crate::error::CaptureError;

/// Host pointer capture
pub trait PointerCapture {
    fn set_pointer_capture(&self, target: TargetId, pointer_id: u32) -> Result<(), CaptureError>;
    fn release_pointer_capture(&self, target: TargetId, pointer_id: u32) -> Result<(), CaptureError>;
}

/// Host without pointer capture; every gesture listens at window level
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPointerCapture;

impl PointerCapture for NoPointerCapture {
    fn set_pointer_capture(&self, _target: TargetId, _pointer_id: u32) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn release_pointer_capture(&self, _target: TargetId, _pointer_id: u32) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }
}

/// Where the host should deliver move/up events for the active gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSource {
    /// The captured target
    Target(TargetId),
    /// Capture failed; listen on the whole window
    Window,
}

/// What a forwarded pointer event did to the gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerMoveOutcome {
    /// No gesture, or the event belongs to another pointer
    Ignored,
    /// Gesture continues; the owner should apply the move
    Moved,
    /// Gesture ended (button state changed or pointer released)
    Stopped,
}

#[derive(Debug, Clone, Copy)]
struct Gesture {
    target: TargetId,
    pointer_id: u32,
    initial_buttons: u16,
    source: EventSource,
}

/// Single-slot drag gesture tracker
pub struct PointerMoveMonitor {
    capture: Rc<dyn PointerCapture>,
    gesture: Option<Gesture>,
}

impl PointerMoveMonitor {
    pub fn new(capture: Rc<dyn PointerCapture>) -> Self {
        Self {
            capture,
            gesture: None,
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn source(&self) -> Option<EventSource> {
        self.gesture.map(|g| g.source)
    }

    /// Begin a gesture for `event`'s pointer.
    ///
    /// A gesture already in progress is stopped first, without counting as a
    /// user stop; returns true when that happened.
    pub fn start(&mut self, event: &PointerEvent) -> bool {
        let interrupted = self.stop();
        if interrupted {
            tracing::debug!("pointer gesture interrupted by a new one");
        }

        let source = match self
            .capture
            .set_pointer_capture(event.target, event.pointer_id)
        {
            Ok(()) => EventSource::Target(event.target),
            Err(err) => {
                tracing::debug!("pointer capture unavailable ({err}), listening on window");
                EventSource::Window
            }
        };

        self.gesture = Some(Gesture {
            target: event.target,
            pointer_id: event.pointer_id,
            initial_buttons: event.buttons,
            source,
        });
        tracing::debug!(pointer_id = event.pointer_id, ?source, "pointer gesture started");

        interrupted
    }

    /// Forward a pointer move
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> PointerMoveOutcome {
        let Some(gesture) = self.gesture else {
            return PointerMoveOutcome::Ignored;
        };
        if event.pointer_id != gesture.pointer_id {
            return PointerMoveOutcome::Ignored;
        }
        if event.buttons != gesture.initial_buttons {
            self.stop();
            return PointerMoveOutcome::Stopped;
        }
        PointerMoveOutcome::Moved
    }

    /// Forward a pointer release
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> PointerMoveOutcome {
        match self.gesture {
            Some(gesture) if gesture.pointer_id == event.pointer_id => {
                self.stop();
                PointerMoveOutcome::Stopped
            }
            _ => PointerMoveOutcome::Ignored,
        }
    }

    /// End the current gesture and release capture. Returns whether one was active.
    pub fn stop(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };

        if let EventSource::Target(target) = gesture.source {
            if let Err(err) = self.capture.release_pointer_capture(target, gesture.pointer_id) {
                tracing::trace!("release_pointer_capture failed: {err}");
            }
        }
        tracing::debug!(pointer_id = gesture.pointer_id, "pointer gesture stopped");
        true
    }
}

impl std::fmt::Debug for PointerMoveMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerMoveMonitor")
            .field("gesture", &self.gesture)
            .finish()
    }
}

impl Drop for PointerMoveMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}
