//! Ambient sparkle field for the opening screen.
//!
//! Positions are normalized to [0, 1); the DOM layer scales them to the
//! viewport. Twinkle cycles are seeded so the field is identical on
//! every load.

use std::f32::consts::PI;

use crate::bridge::view::ViewBuffer;
use crate::systems::rng::Rng;

const SCALE_MIN: f32 = 0.5;
const SCALE_MAX: f32 = 1.5;
const PERIOD_MIN: f32 = 2.0;
const PERIOD_MAX: f32 = 5.0;

/// One twinkling sparkle.
#[derive(Debug, Clone)]
struct Sparkle {
    x: f32,
    y: f32,
    scale: f32,
    /// Seconds per twinkle cycle.
    period: f32,
    /// Cycle offset in [0, 1).
    phase: f32,
}

impl Sparkle {
    /// Brightness at time `t`: rises from 0 to 1 and back each cycle.
    fn alpha(&self, t: f32) -> f32 {
        let cycle = (t / self.period + self.phase).fract();
        (cycle * PI).sin()
    }
}

/// The whole field, ticked once per frame and written out as
/// `x, y, scale, alpha` records.
#[derive(Debug)]
pub struct SparkleField {
    sparkles: Vec<Sparkle>,
    time: f32,
}

impl SparkleField {
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let sparkles = (0..count)
            .map(|_| Sparkle {
                x: rng.next_f32(),
                y: rng.next_f32(),
                scale: rng.range(SCALE_MIN, SCALE_MAX),
                period: rng.range(PERIOD_MIN, PERIOD_MAX),
                phase: rng.next_f32(),
            })
            .collect();
        Self {
            sparkles,
            time: 0.0,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
    }

    pub fn len(&self) -> usize {
        self.sparkles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sparkles.is_empty()
    }

    /// Write every sparkle's current record into the view buffer.
    pub fn write_to(&self, view: &mut ViewBuffer) {
        for (i, sparkle) in self.sparkles.iter().enumerate() {
            view.set_sparkle(i, sparkle.x, sparkle.y, sparkle.scale, sparkle.alpha(self.time));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::protocol::{ViewLayout, SPARKLE_FLOATS};

    #[test]
    fn field_is_deterministic_for_a_seed() {
        let mut a = SparkleField::new(8, 2026);
        let mut b = SparkleField::new(8, 2026);
        a.tick(1.25);
        b.tick(1.25);

        let layout = ViewLayout::new(0, 8, 0);
        let mut view_a = ViewBuffer::new(layout.clone());
        let mut view_b = ViewBuffer::new(layout);
        a.write_to(&mut view_a);
        b.write_to(&mut view_b);

        for i in 0..8 * SPARKLE_FLOATS {
            let offset = view_a.layout().sparkle_offset + i;
            assert_eq!(view_a.get(offset), view_b.get(offset));
        }
    }

    #[test]
    fn alphas_stay_normalized() {
        let mut field = SparkleField::new(16, 7);
        let mut view = ViewBuffer::new(ViewLayout::new(0, 16, 0));
        for _ in 0..100 {
            field.tick(0.1);
            field.write_to(&mut view);
            for i in 0..16 {
                let alpha = view.get(view.layout().sparkle_offset + i * SPARKLE_FLOATS + 3);
                assert!((0.0..=1.0).contains(&alpha), "alpha out of range: {}", alpha);
            }
        }
    }

    #[test]
    fn overflow_writes_are_dropped() {
        let field = SparkleField::new(4, 1);
        let mut view = ViewBuffer::new(ViewLayout::new(0, 2, 0));
        field.write_to(&mut view);
        assert_eq!(field.len(), 4);
    }
}
