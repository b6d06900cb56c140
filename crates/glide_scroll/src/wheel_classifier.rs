//! Mouse wheel classification
//!
//! Guesses whether recent wheel input comes from a physical, notched mouse
//! wheel (which benefits from smooth scrolling) or from a trackpad/magic
//! mouse (which already delivers fine-grained deltas).

use glide_core::{Platform, WheelEvent};

/// Number of recent wheel samples considered
pub const CLASSIFIER_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseWheelClassifierItem {
    pub timestamp: f64,
    pub delta_x: f64,
    pub delta_y: f64,
    /// 0 looks like a physical wheel, 1 looks like a trackpad
    pub score: f64,
}

/// Ring buffer of the most recent wheel samples
#[derive(Debug, Clone, Default)]
pub struct MouseWheelClassifier {
    memory: [MouseWheelClassifierItem; CLASSIFIER_CAPACITY],
    /// Index of the oldest retained sample
    front: usize,
    count: usize,
}

impl MouseWheelClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.front = 0;
        self.count = 0;
    }

    /// Record a wheel event as delivered by the host.
    ///
    /// On platforms that scale wheel deltas by the OS zoom factor the deltas
    /// are divided by `device_pixel_ratio` first.
    pub fn accept_wheel_event(&mut self, event: &WheelEvent, platform: Platform, device_pixel_ratio: f64) {
        if platform.wheel_deltas_include_zoom() && device_pixel_ratio > 0.0 {
            self.accept(
                event.timestamp,
                event.delta_x / device_pixel_ratio,
                event.delta_y / device_pixel_ratio,
            );
        } else {
            self.accept(event.timestamp, event.delta_x, event.delta_y);
        }
    }

    /// Record a sample, dropping the oldest when full
    pub fn accept(&mut self, timestamp: f64, delta_x: f64, delta_y: f64) {
        let mut item = MouseWheelClassifierItem {
            timestamp,
            delta_x,
            delta_y,
            score: 0.0,
        };
        item.score = compute_score(&item);

        if self.count == CLASSIFIER_CAPACITY {
            self.memory[self.front] = item;
            self.front = (self.front + 1) % CLASSIFIER_CAPACITY;
        } else {
            let rear = (self.front + self.count) % CLASSIFIER_CAPACITY;
            self.memory[rear] = item;
            self.count += 1;
        }

        tracing::trace!(delta_x, delta_y, score = item.score, "wheel sample");
    }

    /// Weighted vote of the retained samples.
    ///
    /// The newest sample weighs 1/2, the one before 1/4 and so on; the
    /// oldest retained sample takes whatever weight remains. An empty
    /// history is not considered a physical wheel.
    pub fn is_physical_mouse_wheel(&self) -> bool {
        if self.count == 0 {
            return false;
        }

        let mut remaining_influence = 1.0;
        let mut score = 0.0;
        let mut weight = 0.5;

        // Newest to oldest
        for age in 0..self.count {
            let index = (self.front + self.count - 1 - age) % CLASSIFIER_CAPACITY;
            let is_oldest = age == self.count - 1;
            let influence = if is_oldest { remaining_influence } else { weight };
            remaining_influence -= influence;
            score += self.memory[index].score * influence;
            weight /= 2.0;
        }

        score <= 0.5
    }

    /// Retained samples, oldest first
    pub fn items(&self) -> impl Iterator<Item = &MouseWheelClassifierItem> + '_ {
        (0..self.count).map(move |i| &self.memory[(self.front + i) % CLASSIFIER_CAPACITY])
    }
}

fn is_almost_int(value: f64) -> bool {
    (value.round() - value).abs() < 0.01
}

fn compute_score(item: &MouseWheelClassifierItem) -> f64 {
    if item.delta_x.abs() > 0.0 && item.delta_y.abs() > 0.0 {
        // Both axes at once: not a notched wheel
        return 1.0;
    }

    let mut score: f64 = 0.5;
    if !is_almost_int(item.delta_x) || !is_almost_int(item.delta_y) {
        score += 0.25;
    }
    score.clamp(0.0, 1.0)
}
