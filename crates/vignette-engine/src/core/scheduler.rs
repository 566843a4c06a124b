// core/scheduler.rs
//
// Trigger primitives for stage transitions. Timers and gates are plain
// values ticked by their owner with frame dt — no wall clock, no host
// callbacks. Dropping the owner cancels everything it armed.

/// One-shot countdown. Fires exactly once, then disarms.
#[derive(Debug, Clone)]
pub struct OneShot {
    remaining: f32,
    armed: bool,
}

impl OneShot {
    /// Arm a timer that fires `duration` seconds from now.
    /// Non-positive durations fire on the next tick.
    pub fn after(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
            armed: true,
        }
    }

    /// Advance by `dt`. Returns true on the tick the countdown reaches zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.armed {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.armed = false;
            return true;
        }
        false
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Seconds left before firing (0 when disarmed).
    pub fn remaining(&self) -> f32 {
        if self.armed {
            self.remaining.max(0.0)
        } else {
            0.0
        }
    }
}

/// Scroll geometry reported by the scrollable container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Scroll offset from the top, in pixels.
    pub top: f32,
    /// Visible height of the container.
    pub viewport: f32,
    /// Total scrollable content height.
    pub content: f32,
}

impl ScrollMetrics {
    /// Whether the visible bottom edge is within `margin` of the content end.
    pub fn at_bottom(&self, margin: f32) -> bool {
        self.top + self.viewport >= self.content - margin
    }
}

/// Fires once when a scroll sample crosses the bottom threshold.
/// Later qualifying samples are no-ops until `reset`.
#[derive(Debug, Clone)]
pub struct ThresholdGate {
    margin: f32,
    fired: bool,
}

impl ThresholdGate {
    pub fn new(margin: f32) -> Self {
        Self {
            margin,
            fired: false,
        }
    }

    /// Evaluate one scroll sample. True exactly once, on the first sample
    /// that satisfies the threshold.
    pub fn observe(&mut self, metrics: &ScrollMetrics) -> bool {
        if self.fired {
            return false;
        }
        if metrics.at_bottom(self.margin) {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    pub fn reset(&mut self) {
        self.fired = false;
    }
}
