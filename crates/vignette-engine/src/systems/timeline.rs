// systems/timeline.rs
//
// Declarative animation cues sampled by the stage clock. The timeline
// only writes view channels; nothing here feeds back into the
// sequencer.
//
// Usage:
//   let tl = Timeline::new()
//       .fade(CH_ENTER_ALPHA, Fade::new(0.0, 1.5, Easing::Linear))
//       .drift(CH_GIFT_OFFSET_Y, Drift { amplitude: 10.0, period: 4.0, phase: 0.0 });
//   tl.sample(stage_time, &mut view);

use std::f32::consts::TAU;

use crate::bridge::view::ViewBuffer;
use crate::extensions::easing::{ease, Easing};

/// A single animated value: waits `delay` seconds, then eases
/// `from` -> `to` over `duration`, holding `to` afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    pub delay: f32,
    pub duration: f32,
    pub from: f32,
    pub to: f32,
    pub easing: Easing,
}

impl Fade {
    /// A 0 -> 1 fade.
    pub fn new(delay: f32, duration: f32, easing: Easing) -> Self {
        Self {
            delay,
            duration,
            from: 0.0,
            to: 1.0,
            easing,
        }
    }

    pub fn with_range(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Sample at stage-clock time `t`.
    pub fn value(&self, t: f32) -> f32 {
        if self.duration <= 0.0 {
            return if t >= self.delay { self.to } else { self.from };
        }
        let progress = ((t - self.delay) / self.duration).clamp(0.0, 1.0);
        ease(self.from, self.to, progress, self.easing)
    }

    /// Whether the cue has reached its final value at time `t`.
    pub fn is_done(&self, t: f32) -> bool {
        t >= self.delay + self.duration
    }
}

/// Endless sine oscillation around zero (the floating gift).
#[derive(Debug, Clone, Copy)]
pub struct Drift {
    pub amplitude: f32,
    /// Seconds per full cycle.
    pub period: f32,
    /// Cycle offset in [0, 1).
    pub phase: f32,
}

impl Drift {
    pub fn value(&self, t: f32) -> f32 {
        if self.period <= 0.0 {
            return 0.0;
        }
        self.amplitude * ((t / self.period + self.phase) * TAU).sin()
    }
}

/// A stage's animation plan: which channel gets which cue.
#[derive(Debug, Default)]
pub struct Timeline {
    fades: Vec<(usize, Fade)>,
    drifts: Vec<(usize, Drift)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fade(mut self, channel: usize, fade: Fade) -> Self {
        self.fades.push((channel, fade));
        self
    }

    pub fn drift(mut self, channel: usize, drift: Drift) -> Self {
        self.drifts.push((channel, drift));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fades.is_empty() && self.drifts.is_empty()
    }

    /// Write every cue's value at time `t` into the view buffer.
    pub fn sample(&self, t: f32, view: &mut ViewBuffer) {
        for (channel, fade) in &self.fades {
            view.set(*channel, fade.value(t));
        }
        for (channel, drift) in &self.drifts {
            view.set(*channel, drift.value(t));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::ViewLayout;

    #[test]
    fn fade_waits_for_delay() {
        let fade = Fade::new(0.5, 0.8, Easing::Linear);
        assert_eq!(fade.value(0.0), 0.0);
        assert_eq!(fade.value(0.5), 0.0);
        assert!((fade.value(0.9) - 0.5).abs() < 0.001);
        assert!((fade.value(1.3) - 1.0).abs() < 0.001);
        assert_eq!(fade.value(100.0), 1.0);
    }

    #[test]
    fn fade_range_can_run_downward() {
        let fade = Fade::new(0.0, 1.0, Easing::Linear).with_range(1.0, 0.0);
        assert_eq!(fade.value(0.0), 1.0);
        assert!((fade.value(0.5) - 0.5).abs() < 0.001);
        assert_eq!(fade.value(1.0), 0.0);
        assert!(fade.is_done(1.0));
    }

    #[test]
    fn zero_duration_fade_steps() {
        let fade = Fade::new(1.0, 0.0, Easing::Linear);
        assert_eq!(fade.value(0.9), 0.0);
        assert_eq!(fade.value(1.0), 1.0);
    }

    #[test]
    fn drift_oscillates() {
        let drift = Drift {
            amplitude: 10.0,
            period: 4.0,
            phase: 0.0,
        };
        assert!(drift.value(0.0).abs() < 0.001);
        assert!((drift.value(1.0) - 10.0).abs() < 0.001);
        assert!((drift.value(3.0) + 10.0).abs() < 0.001);
    }

    #[test]
    fn timeline_writes_channels() {
        let mut view = ViewBuffer::new(ViewLayout::new(4, 0, 0));
        let tl = Timeline::new()
            .fade(2, Fade::new(0.0, 1.0, Easing::Linear))
            .drift(6, Drift {
                amplitude: 10.0,
                period: 4.0,
                phase: 0.0,
            });
        tl.sample(1.0, &mut view);
        assert_eq!(view.get(2), 1.0);
        assert!((view.get(6) - 10.0).abs() < 0.001);
    }
}
