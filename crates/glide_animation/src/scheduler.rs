//! Frame scheduler
//!
//! Batches callbacks until the next display frame. The host calls
//! [`FrameScheduler::run_frame`] once per vsync (or whenever
//! [`FrameScheduler::needs_frame`] reports pending work); every callback queued
//! before that call runs exactly once, highest priority first. Callbacks queued
//! while a frame is running land in the following batch.
//!
//! Ordering between callbacks of equal priority is unspecified.

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

new_key_type! {
    pub struct FrameCallbackId;
}

type FrameRunner = Box<dyn FnOnce()>;

struct QueuedCallback {
    runner: FrameRunner,
    priority: i32,
}

#[derive(Default)]
struct SchedulerInner {
    callbacks: SlotMap<FrameCallbackId, QueuedCallback>,
    /// Callbacks waiting for the next frame, in enqueue order
    next_batch: Vec<FrameCallbackId>,
    /// Whether a frame was requested from the host since the last run
    frame_requested: bool,
    /// Host hook invoked when a batch goes from empty to non-empty
    frame_requester: Option<Rc<dyn Fn()>>,
    frames_run: u64,
}

/// Shared, single-threaded frame scheduler
///
/// Cloning yields another handle to the same queue.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the hook used to ask the host for a frame (e.g. request a redraw)
    pub fn set_frame_requester<F: Fn() + 'static>(&self, requester: F) {
        self.inner.borrow_mut().frame_requester = Some(Rc::new(requester));
    }

    /// Queue `runner` for the next frame
    pub fn schedule<F: FnOnce() + 'static>(&self, runner: F, priority: i32) -> FrameHandle {
        let (id, requester) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.callbacks.insert(QueuedCallback {
                runner: Box::new(runner),
                priority,
            });
            inner.next_batch.push(id);

            let requester = if inner.frame_requested {
                None
            } else {
                inner.frame_requested = true;
                inner.frame_requester.clone()
            };
            (id, requester)
        };

        // Called without the borrow held; the host may inspect the scheduler
        if let Some(requester) = requester {
            requester();
        }

        FrameHandle {
            id,
            scheduler: Rc::downgrade(&self.inner),
        }
    }

    /// Whether work is waiting for the next frame
    pub fn needs_frame(&self) -> bool {
        self.inner.borrow().frame_requested
    }

    /// Number of live (not cancelled) callbacks waiting for the next frame
    pub fn pending_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner
            .next_batch
            .iter()
            .filter(|id| inner.callbacks.contains_key(**id))
            .count()
    }

    /// Number of frames run so far
    pub fn frames_run(&self) -> u64 {
        self.inner.borrow().frames_run
    }

    /// Run the current batch. Returns how many callbacks executed.
    pub fn run_frame(&self) -> usize {
        let mut batch: SmallVec<[(FrameCallbackId, i32); 8]> = {
            let mut inner = self.inner.borrow_mut();
            inner.frame_requested = false;
            inner.frames_run += 1;
            let queued = std::mem::take(&mut inner.next_batch);
            queued
                .into_iter()
                .filter_map(|id| inner.callbacks.get(id).map(|cb| (id, cb.priority)))
                .collect()
        };

        // Largest priority first
        batch.sort_unstable_by(|a, b| b.1.cmp(&a.1));

        let mut executed = 0;
        for (id, _) in batch {
            // Removed before running so the runner can schedule freely and a
            // cancel from inside another runner of this batch still works.
            let callback = self.inner.borrow_mut().callbacks.remove(id);
            if let Some(callback) = callback {
                (callback.runner)();
                executed += 1;
            }
        }

        tracing::trace!("frame scheduler ran {} callbacks", executed);
        executed
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameScheduler")
            .field("pending", &inner.next_batch.len())
            .field("frame_requested", &inner.frame_requested)
            .field("frames_run", &inner.frames_run)
            .finish()
    }
}

/// Cancellation handle for a scheduled frame callback
#[derive(Debug, Clone)]
pub struct FrameHandle {
    id: FrameCallbackId,
    scheduler: Weak<RefCell<SchedulerInner>>,
}

impl FrameHandle {
    /// Cancel the callback. Safe to call repeatedly and after it already ran.
    pub fn cancel(&self) {
        if let Some(inner) = self.scheduler.upgrade() {
            inner.borrow_mut().callbacks.remove(self.id);
        }
    }

    /// Whether the callback is still waiting to run
    pub fn is_pending(&self) -> bool {
        self.scheduler
            .upgrade()
            .map(|inner| inner.borrow().callbacks.contains_key(self.id))
            .unwrap_or(false)
    }
}
