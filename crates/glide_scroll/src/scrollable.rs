//! Scroll model
//!
//! [`Scrollable`] is the single owner of a region's scroll position and
//! dimensions. Every committed change produces a [`ScrollEvent`]. Smooth
//! scrolling is a time-boxed eased animation driven by the
//! [`FrameScheduler`]: each frame commits an interpolated position until the
//! exact target is committed on the last one.
//!
//! # Example
//!
//! ```rust
//! use glide_animation::{FrameScheduler, ManualClock};
//! use glide_scroll::scrollable::{NewScrollDimensions, NewScrollPosition, Scrollable, ScrollableOptions};
//!
//! let scheduler = FrameScheduler::new();
//! let clock = ManualClock::new(0.0);
//! let scrollable = Scrollable::new(ScrollableOptions::default(), scheduler.clone(), clock.clone());
//!
//! scrollable.set_scroll_dimensions(NewScrollDimensions::new(100.0, 100.0, 100.0, 1000.0), false);
//! scrollable.set_scroll_position_now(NewScrollPosition::top(2000.0));
//! assert_eq!(scrollable.get_current_scroll_position().scroll_top, 900.0);
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::Rc;

use glide_animation::{Easing, FrameHandle, FrameScheduler, SharedClock};

/// Base duration of a smooth scroll, in milliseconds
pub const DEFAULT_SMOOTH_SCROLL_DURATION: f64 = 125.0;

/// Long animations never take longer than this multiple of the base duration
const MAX_DURATION_FACTOR: f64 = 2.0;

/// Jumps longer than this many viewports use the two-segment curve
const LONG_JUMP_VIEWPORTS: f64 = 2.5;

/// Part of the viewport covered by each segment of a long jump
const LONG_JUMP_SEGMENT: f64 = 0.75;

/// Share of the animation time spent on the first segment of a long jump
const LONG_JUMP_CUT: f64 = 0.33;

/// A full scroll position
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollPosition {
    pub scroll_left: f64,
    pub scroll_top: f64,
}

/// A partial scroll position update. `None` axes are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NewScrollPosition {
    pub scroll_left: Option<f64>,
    pub scroll_top: Option<f64>,
}

impl NewScrollPosition {
    pub fn new(scroll_left: f64, scroll_top: f64) -> Self {
        Self {
            scroll_left: Some(scroll_left),
            scroll_top: Some(scroll_top),
        }
    }

    pub fn left(scroll_left: f64) -> Self {
        Self {
            scroll_left: Some(scroll_left),
            scroll_top: None,
        }
    }

    pub fn top(scroll_top: f64) -> Self {
        Self {
            scroll_left: None,
            scroll_top: Some(scroll_top),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scroll_left.is_none() && self.scroll_top.is_none()
    }
}

impl From<ScrollPosition> for NewScrollPosition {
    fn from(position: ScrollPosition) -> Self {
        Self::new(position.scroll_left, position.scroll_top)
    }
}

/// Viewport and content extents
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDimensions {
    pub width: f64,
    pub scroll_width: f64,
    pub height: f64,
    pub scroll_height: f64,
}

/// A partial dimensions update. `None` fields keep their value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NewScrollDimensions {
    pub width: Option<f64>,
    pub scroll_width: Option<f64>,
    pub height: Option<f64>,
    pub scroll_height: Option<f64>,
}

impl NewScrollDimensions {
    pub fn new(width: f64, scroll_width: f64, height: f64, scroll_height: f64) -> Self {
        Self {
            width: Some(width),
            scroll_width: Some(scroll_width),
            height: Some(height),
            scroll_height: Some(scroll_height),
        }
    }
}

impl From<ScrollDimensions> for NewScrollDimensions {
    fn from(dims: ScrollDimensions) -> Self {
        Self::new(dims.width, dims.scroll_width, dims.height, dims.scroll_height)
    }
}

/// Notification of a committed scroll state change
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollEvent {
    pub in_smooth_scrolling: bool,

    pub old_width: f64,
    pub old_scroll_width: f64,
    pub old_scroll_left: f64,
    pub old_height: f64,
    pub old_scroll_height: f64,
    pub old_scroll_top: f64,

    pub width: f64,
    pub scroll_width: f64,
    pub scroll_left: f64,
    pub height: f64,
    pub scroll_height: f64,
    pub scroll_top: f64,

    pub width_changed: bool,
    pub scroll_width_changed: bool,
    pub scroll_left_changed: bool,
    pub height_changed: bool,
    pub scroll_height_changed: bool,
    pub scroll_top_changed: bool,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Validated dimensions and position
///
/// The raw (unclamped) position is kept alongside so that a position
/// requested before the dimensions are known survives until they are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    force_integer_values: bool,
    raw_scroll_left: f64,
    raw_scroll_top: f64,

    pub width: f64,
    pub scroll_width: f64,
    pub scroll_left: f64,
    pub height: f64,
    pub scroll_height: f64,
    pub scroll_top: f64,
}

impl ScrollState {
    pub fn new(
        force_integer_values: bool,
        width: f64,
        scroll_width: f64,
        scroll_left: f64,
        height: f64,
        scroll_height: f64,
        scroll_top: f64,
    ) -> Self {
        let sanitize = |value: f64| {
            let value = finite_or_zero(value);
            if force_integer_values {
                value.round()
            } else {
                value
            }
        };

        let width = sanitize(width).max(0.0);
        let scroll_width = sanitize(scroll_width).max(0.0);
        let height = sanitize(height).max(0.0);
        let scroll_height = sanitize(scroll_height).max(0.0);

        let raw_scroll_left = sanitize(scroll_left);
        let raw_scroll_top = sanitize(scroll_top);

        let scroll_left = raw_scroll_left.min(scroll_width - width).max(0.0);
        let scroll_top = raw_scroll_top.min(scroll_height - height).max(0.0);

        Self {
            force_integer_values,
            raw_scroll_left,
            raw_scroll_top,
            width,
            scroll_width,
            scroll_left,
            height,
            scroll_height,
            scroll_top,
        }
    }

    pub fn empty(force_integer_values: bool) -> Self {
        Self::new(force_integer_values, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0)
    }

    pub fn position(&self) -> ScrollPosition {
        ScrollPosition {
            scroll_left: self.scroll_left,
            scroll_top: self.scroll_top,
        }
    }

    pub fn dimensions(&self) -> ScrollDimensions {
        ScrollDimensions {
            width: self.width,
            scroll_width: self.scroll_width,
            height: self.height,
            scroll_height: self.scroll_height,
        }
    }

    pub fn with_scroll_dimensions(
        &self,
        update: NewScrollDimensions,
        use_raw_scroll_positions: bool,
    ) -> Self {
        let (scroll_left, scroll_top) = if use_raw_scroll_positions {
            (self.raw_scroll_left, self.raw_scroll_top)
        } else {
            (self.scroll_left, self.scroll_top)
        };
        Self::new(
            self.force_integer_values,
            update.width.unwrap_or(self.width),
            update.scroll_width.unwrap_or(self.scroll_width),
            scroll_left,
            update.height.unwrap_or(self.height),
            update.scroll_height.unwrap_or(self.scroll_height),
            scroll_top,
        )
    }

    pub fn with_scroll_position(&self, update: NewScrollPosition) -> Self {
        Self::new(
            self.force_integer_values,
            self.width,
            self.scroll_width,
            update.scroll_left.unwrap_or(self.raw_scroll_left),
            self.height,
            self.scroll_height,
            update.scroll_top.unwrap_or(self.raw_scroll_top),
        )
    }

    pub fn create_scroll_event(&self, previous: &ScrollState, in_smooth_scrolling: bool) -> ScrollEvent {
        ScrollEvent {
            in_smooth_scrolling,

            old_width: previous.width,
            old_scroll_width: previous.scroll_width,
            old_scroll_left: previous.scroll_left,
            old_height: previous.height,
            old_scroll_height: previous.scroll_height,
            old_scroll_top: previous.scroll_top,

            width: self.width,
            scroll_width: self.scroll_width,
            scroll_left: self.scroll_left,
            height: self.height,
            scroll_height: self.scroll_height,
            scroll_top: self.scroll_top,

            width_changed: self.width != previous.width,
            scroll_width_changed: self.scroll_width != previous.scroll_width,
            scroll_left_changed: self.scroll_left != previous.scroll_left,
            height_changed: self.height != previous.height,
            scroll_height_changed: self.scroll_height != previous.scroll_height,
            scroll_top_changed: self.scroll_top != previous.scroll_top,
        }
    }
}

// ============================================================================
// Smooth scrolling
// ============================================================================

/// Eased motion along one axis
#[derive(Debug, Clone, Copy, PartialEq)]
enum AxisAnimation {
    Single {
        from: f64,
        to: f64,
    },
    /// Long jumps: ease across the first part of a viewport, cut, then ease
    /// into the target from a viewport-ish away.
    Composed {
        from: f64,
        first_stop: f64,
        second_stop: f64,
        to: f64,
    },
}

impl AxisAnimation {
    fn new(from: f64, to: f64, viewport_size: f64) -> Self {
        let delta = (from - to).abs();
        if delta > LONG_JUMP_VIEWPORTS * viewport_size {
            let segment = LONG_JUMP_SEGMENT * viewport_size;
            let (first_stop, second_stop) = if from < to {
                (from + segment, to - segment)
            } else {
                (from - segment, to + segment)
            };
            AxisAnimation::Composed {
                from,
                first_stop,
                second_stop,
                to,
            }
        } else {
            AxisAnimation::Single { from, to }
        }
    }

    fn sample(&self, completion: f64) -> f64 {
        let easing = Easing::EaseOutCubic;
        match *self {
            AxisAnimation::Single { from, to } => easing.interpolate(from, to, completion),
            AxisAnimation::Composed {
                from,
                first_stop,
                second_stop,
                to,
            } => {
                if completion < LONG_JUMP_CUT {
                    easing.interpolate(from, first_stop, completion / LONG_JUMP_CUT)
                } else {
                    easing.interpolate(
                        second_stop,
                        to,
                        (completion - LONG_JUMP_CUT) / (1.0 - LONG_JUMP_CUT),
                    )
                }
            }
        }
    }
}

/// Animation duration for a move between two positions
///
/// Grows with the distance measured in viewports, capped at
/// [`MAX_DURATION_FACTOR`] times the base duration.
fn smooth_scroll_duration(
    base_duration: f64,
    from: ScrollPosition,
    to: ScrollPosition,
    dims: ScrollDimensions,
) -> f64 {
    let pages = |delta: f64, viewport: f64| {
        if viewport > 0.0 {
            delta.abs() / viewport
        } else {
            0.0
        }
    };
    let distance = pages(to.scroll_left - from.scroll_left, dims.width)
        .max(pages(to.scroll_top - from.scroll_top, dims.height));
    base_duration * (1.0 + distance).sqrt().min(MAX_DURATION_FACTOR)
}

/// Result of sampling a smooth scroll at some point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScrollingUpdate {
    pub position: ScrollPosition,
    pub is_done: bool,
}

#[derive(Debug)]
struct SmoothScrollingOperation {
    /// Distinguishes retargeted operations from the one a frame was scheduled for
    generation: u64,
    from: ScrollPosition,
    to: ScrollPosition,
    viewport: ScrollDimensions,
    start_time: f64,
    duration: f64,
    left: AxisAnimation,
    top: AxisAnimation,
    frame: Option<FrameHandle>,
}

impl SmoothScrollingOperation {
    fn start(
        generation: u64,
        from: &ScrollState,
        to: ScrollPosition,
        base_duration: f64,
        now: f64,
    ) -> Self {
        let viewport = from.dimensions();
        let from = from.position();
        let duration = smooth_scroll_duration(base_duration, from, to, viewport);
        let mut op = Self {
            generation,
            from,
            to,
            viewport,
            start_time: now,
            duration,
            left: AxisAnimation::Single { from: 0.0, to: 0.0 },
            top: AxisAnimation::Single { from: 0.0, to: 0.0 },
            frame: None,
        };
        op.init_animations();
        op
    }

    fn init_animations(&mut self) {
        self.left = AxisAnimation::new(self.from.scroll_left, self.to.scroll_left, self.viewport.width);
        self.top = AxisAnimation::new(self.from.scroll_top, self.to.scroll_top, self.viewport.height);
    }

    /// Re-validate the target after the dimensions changed mid-flight
    fn accept_scroll_dimensions(&mut self, state: &ScrollState) {
        self.to = state.with_scroll_position(self.to.into()).position();
        self.viewport = state.dimensions();
        self.init_animations();
    }

    fn tick(&self, now: f64) -> SmoothScrollingUpdate {
        let completion = if self.duration > 0.0 {
            (now - self.start_time) / self.duration
        } else {
            1.0
        };

        if completion < 1.0 {
            SmoothScrollingUpdate {
                position: ScrollPosition {
                    scroll_left: self.left.sample(completion),
                    scroll_top: self.top.sample(completion),
                },
                is_done: false,
            }
        } else {
            SmoothScrollingUpdate {
                position: self.to,
                is_done: true,
            }
        }
    }

    fn cancel_frame(&mut self) {
        if let Some(frame) = self.frame.take() {
            frame.cancel();
        }
    }
}

// ============================================================================
// Scrollable
// ============================================================================

/// Construction options for a [`Scrollable`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollableOptions {
    /// Round every dimension and position to whole pixels
    pub force_integer_values: bool,
    /// Base smooth scroll duration in ms; 0 disables animation
    pub smooth_scroll_duration: f64,
}

impl Default for ScrollableOptions {
    fn default() -> Self {
        Self {
            force_integer_values: true,
            smooth_scroll_duration: DEFAULT_SMOOTH_SCROLL_DURATION,
        }
    }
}

new_key_type! {
    pub struct ScrollListenerId;
}

type ScrollListener = Rc<RefCell<dyn FnMut(&ScrollEvent)>>;

struct ScrollableInner {
    smooth_scroll_duration: f64,
    state: ScrollState,
    smooth: Option<SmoothScrollingOperation>,
    next_generation: u64,
    disposed: bool,
}

struct ScrollableShared {
    inner: RefCell<ScrollableInner>,
    listeners: RefCell<SlotMap<ScrollListenerId, ScrollListener>>,
    scheduler: FrameScheduler,
    clock: SharedClock,
}

/// Shared handle to the scroll model of one region
///
/// Cloning is cheap and yields a handle to the same model.
#[derive(Clone)]
pub struct Scrollable {
    shared: Rc<ScrollableShared>,
}

impl Scrollable {
    pub fn new(options: ScrollableOptions, scheduler: FrameScheduler, clock: SharedClock) -> Self {
        Self {
            shared: Rc::new(ScrollableShared {
                inner: RefCell::new(ScrollableInner {
                    smooth_scroll_duration: options.smooth_scroll_duration.max(0.0),
                    state: ScrollState::empty(options.force_integer_values),
                    smooth: None,
                    next_generation: 0,
                    disposed: false,
                }),
                listeners: RefCell::new(SlotMap::with_key()),
                scheduler,
                clock,
            }),
        }
    }

    /// Register a listener for committed changes
    pub fn on_scroll<F: FnMut(&ScrollEvent) + 'static>(&self, listener: F) -> ScrollListenerId {
        self.shared
            .listeners
            .borrow_mut()
            .insert(Rc::new(RefCell::new(listener)))
    }

    pub fn remove_listener(&self, id: ScrollListenerId) -> bool {
        self.shared.listeners.borrow_mut().remove(id).is_some()
    }

    /// Cancel any animation and drop all listeners. Idempotent.
    pub fn dispose(&self) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            if let Some(mut smooth) = inner.smooth.take() {
                smooth.cancel_frame();
            }
        }
        self.shared.listeners.borrow_mut().clear();
        tracing::debug!("scrollable disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.inner.borrow().disposed
    }

    pub fn set_smooth_scroll_duration(&self, duration: f64) {
        self.shared.inner.borrow_mut().smooth_scroll_duration = duration.max(0.0);
    }

    /// Clamp the provided axes into the scrollable range. Omitted axes stay omitted.
    pub fn validate_scroll_position(&self, candidate: NewScrollPosition) -> NewScrollPosition {
        let validated = self.shared.inner.borrow().state.with_scroll_position(candidate);
        NewScrollPosition {
            scroll_left: candidate.scroll_left.map(|_| validated.scroll_left),
            scroll_top: candidate.scroll_top.map(|_| validated.scroll_top),
        }
    }

    pub fn get_scroll_dimensions(&self) -> ScrollDimensions {
        self.shared.inner.borrow().state.dimensions()
    }

    /// Update viewport/content sizes.
    ///
    /// With `use_raw_scroll_position` the originally requested position (not
    /// the one clamped to the old bounds) is validated against the new bounds.
    pub fn set_scroll_dimensions(&self, dimensions: NewScrollDimensions, use_raw_scroll_position: bool) {
        let (new_state, in_smooth) = {
            let inner = self.shared.inner.borrow();
            if inner.disposed {
                tracing::warn!("set_scroll_dimensions on a disposed scrollable");
                return;
            }
            (
                inner
                    .state
                    .with_scroll_dimensions(dimensions, use_raw_scroll_position),
                inner.smooth.is_some(),
            )
        };
        self.set_state(new_state, in_smooth);

        // The in-flight target may be out of bounds now
        let mut inner = self.shared.inner.borrow_mut();
        let state = inner.state;
        if let Some(smooth) = inner.smooth.as_mut() {
            smooth.accept_scroll_dimensions(&state);
        }
    }

    /// Where the scroll position is heading: the animation target while
    /// animating, the committed position otherwise.
    pub fn get_future_scroll_position(&self) -> ScrollPosition {
        let inner = self.shared.inner.borrow();
        match &inner.smooth {
            Some(smooth) => smooth.to,
            None => inner.state.position(),
        }
    }

    /// The committed position (interpolated while animating)
    pub fn get_current_scroll_position(&self) -> ScrollPosition {
        self.shared.inner.borrow().state.position()
    }

    pub fn has_pending_scroll_animation(&self) -> bool {
        self.shared.inner.borrow().smooth.is_some()
    }

    /// Jump to `update`, cancelling any animation
    pub fn set_scroll_position_now(&self, update: NewScrollPosition) {
        let new_state = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                tracing::warn!("set_scroll_position_now on a disposed scrollable");
                return;
            }
            let new_state = inner.state.with_scroll_position(update);
            if let Some(mut smooth) = inner.smooth.take() {
                smooth.cancel_frame();
            }
            new_state
        };
        self.set_state(new_state, false);
    }

    /// Animate toward `update`, retargeting a running animation if any
    pub fn set_scroll_position_smooth(&self, update: NewScrollPosition) {
        let now = self.shared.clock.now();
        {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                tracing::warn!("set_scroll_position_smooth on a disposed scrollable");
                return;
            }
            if inner.smooth_scroll_duration <= 0.0 {
                drop(inner);
                self.set_scroll_position_now(update);
                return;
            }

            let update = match &inner.smooth {
                // Omitted axes keep heading where they were heading
                Some(smooth) => NewScrollPosition {
                    scroll_left: update.scroll_left.or(Some(smooth.to.scroll_left)),
                    scroll_top: update.scroll_top.or(Some(smooth.to.scroll_top)),
                },
                None => update,
            };
            let target = inner.state.with_scroll_position(update).position();

            let current_position = inner.state.position();
            match inner.smooth.as_mut() {
                Some(smooth) if smooth.to == target => return,
                Some(smooth) => smooth.cancel_frame(),
                None if current_position == target => return,
                None => {}
            }

            // Timing restarts from the current (possibly interpolated) position
            let generation = inner.next_generation;
            inner.next_generation += 1;
            let op = SmoothScrollingOperation::start(
                generation,
                &inner.state,
                target,
                inner.smooth_scroll_duration,
                now,
            );
            tracing::debug!(
                "smooth scroll {:?} -> {:?} over {:.0}ms",
                op.from,
                op.to,
                op.duration
            );
            inner.smooth = Some(op);
        }

        let frame = self.schedule_smooth_frame();
        if let Some(smooth) = self.shared.inner.borrow_mut().smooth.as_mut() {
            smooth.frame = Some(frame);
        }
    }

    fn schedule_smooth_frame(&self) -> FrameHandle {
        let weak = Rc::downgrade(&self.shared);
        self.shared.scheduler.schedule(
            move || {
                if let Some(shared) = weak.upgrade() {
                    Scrollable { shared }.perform_smooth_scrolling();
                }
            },
            0,
        )
    }

    fn perform_smooth_scrolling(&self) {
        let now = self.shared.clock.now();
        let (generation, new_state, is_done) = {
            let mut inner = self.shared.inner.borrow_mut();
            let state = inner.state;
            let Some(smooth) = inner.smooth.as_mut() else {
                return;
            };
            smooth.frame = None;
            let update = smooth.tick(now);
            (
                smooth.generation,
                state.with_scroll_position(update.position.into()),
                update.is_done,
            )
        };

        self.set_state(new_state, true);

        let still_current = {
            let mut inner = self.shared.inner.borrow_mut();
            let current = inner
                .smooth
                .as_ref()
                .is_some_and(|smooth| smooth.generation == generation);
            if current && is_done {
                inner.smooth = None;
                tracing::debug!("smooth scroll finished at {:?}", new_state.position());
            }
            current && !is_done
        };

        // A listener may have retargeted or cancelled; that path schedules itself
        if still_current {
            let frame = self.schedule_smooth_frame();
            if let Some(smooth) = self.shared.inner.borrow_mut().smooth.as_mut() {
                smooth.frame = Some(frame);
            }
        }
    }

    fn set_state(&self, new_state: ScrollState, in_smooth_scrolling: bool) {
        let event = {
            let mut inner = self.shared.inner.borrow_mut();
            let old_state = inner.state;
            inner.state = new_state;
            // Raw positions are kept but never announced
            if old_state.position() == new_state.position()
                && old_state.dimensions() == new_state.dimensions()
            {
                return;
            }
            new_state.create_scroll_event(&old_state, in_smooth_scrolling)
        };
        self.emit(&event);
    }

    fn emit(&self, event: &ScrollEvent) {
        let listeners: SmallVec<[ScrollListener; 4]> =
            self.shared.listeners.borrow().values().cloned().collect();

        for listener in listeners {
            match listener.try_borrow_mut() {
                Ok(mut listener) => (*listener)(event),
                // Re-entrant commit from inside this listener
                Err(_) => tracing::trace!("skipping scroll listener already running"),
            }
        }
    }
}

impl std::fmt::Debug for Scrollable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.shared.inner.borrow();
        f.debug_struct("Scrollable")
            .field("state", &inner.state)
            .field("animating", &inner.smooth.is_some())
            .field("disposed", &inner.disposed)
            .finish()
    }
}
