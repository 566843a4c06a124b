// core/sequencer.rs
//
// The stage machine behind a scripted card: four stages, each with one
// exit trigger, always moving forward.
//
//   Opening   -- hold timer (lines x 1s + 3s) --> Journey
//   Journey   -- scroll to bottom, then 1s    --> Interlude
//   Interlude -- hold timer (lines x 2.5s + 1s) --> Box
//   Box       -- gift click sets the open flag; terminal

use crate::core::scheduler::{OneShot, ScrollMetrics, ThresholdGate};

/// Pixel margin for the journey's bottom-of-scroll detection.
pub const SCROLL_MARGIN_PX: f32 = 50.0;

const OPENING_SECS_PER_LINE: f32 = 1.0;
const OPENING_TAIL_SECS: f32 = 3.0;
const INTERLUDE_SECS_PER_LINE: f32 = 2.5;
const INTERLUDE_TAIL_SECS: f32 = 1.0;
const JOURNEY_EXIT_DELAY_SECS: f32 = 1.0;

/// The four display stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Opening,
    Journey,
    Interlude,
    Box,
}

impl Stage {
    /// The stage after this one, if any. Transitions never go backward.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Opening => Some(Stage::Journey),
            Stage::Journey => Some(Stage::Interlude),
            Stage::Interlude => Some(Stage::Box),
            Stage::Box => None,
        }
    }

    /// Stable numeric encoding for the view buffer.
    pub fn index(self) -> u32 {
        match self {
            Stage::Opening => 0,
            Stage::Journey => 1,
            Stage::Interlude => 2,
            Stage::Box => 3,
        }
    }
}

/// A completed transition, reported once from `tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub from: Stage,
    pub to: Stage,
}

/// The active stage's exit trigger. Owned by the stage: leaving a stage
/// drops its trigger, so nothing can fire against a stale stage.
#[derive(Debug)]
enum ExitTrigger {
    /// Opening / Interlude: hold for a fixed duration.
    Hold(OneShot),
    /// Journey: bottom-of-scroll gate, then a short delayed exit.
    Scroll {
        gate: ThresholdGate,
        exit: Option<OneShot>,
    },
    /// Box: terminal. Waits for the gift click, which only flips the
    /// open flag and never changes stage.
    Click,
}

/// Owns the current stage and walks it forward, one trigger at a time.
#[derive(Debug)]
pub struct StageSequencer {
    stage: Stage,
    stage_time: f32,
    trigger: ExitTrigger,
    box_open: bool,
    opening_hold: f32,
    interlude_hold: f32,
    photo_count: usize,
}

impl StageSequencer {
    /// Build a sequencer for the given content counts. Holds are derived
    /// from the line counts; empty sequences shorten them to the constant
    /// tail rather than erroring.
    pub fn new(opening_lines: usize, interlude_lines: usize, photo_count: usize) -> Self {
        let opening_hold = opening_lines as f32 * OPENING_SECS_PER_LINE + OPENING_TAIL_SECS;
        let interlude_hold = interlude_lines as f32 * INTERLUDE_SECS_PER_LINE + INTERLUDE_TAIL_SECS;
        Self {
            stage: Stage::Opening,
            stage_time: 0.0,
            trigger: ExitTrigger::Hold(OneShot::after(opening_hold)),
            box_open: false,
            opening_hold,
            interlude_hold,
            photo_count,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Seconds since the current stage was entered.
    pub fn stage_time(&self) -> f32 {
        self.stage_time
    }

    pub fn is_box_open(&self) -> bool {
        self.box_open
    }

    pub fn opening_hold(&self) -> f32 {
        self.opening_hold
    }

    pub fn interlude_hold(&self) -> f32 {
        self.interlude_hold
    }

    /// Advance the stage clock. At most one transition per call; dt left
    /// over after a transition belongs to the old stage and is not
    /// carried into the new one.
    pub fn tick(&mut self, dt: f32) -> Option<StageChange> {
        self.stage_time += dt;
        let fired = match &mut self.trigger {
            ExitTrigger::Hold(hold) => hold.tick(dt),
            ExitTrigger::Scroll { exit, .. } => exit.as_mut().is_some_and(|timer| timer.tick(dt)),
            ExitTrigger::Click => false,
        };
        if fired {
            self.advance()
        } else {
            None
        }
    }

    /// Feed one scroll sample. Only meaningful during Journey; the first
    /// qualifying sample schedules the delayed exit, every later one is
    /// a no-op.
    pub fn observe_scroll(&mut self, metrics: ScrollMetrics) {
        if let ExitTrigger::Scroll { gate, exit } = &mut self.trigger {
            if gate.observe(&metrics) && exit.is_none() {
                *exit = Some(OneShot::after(JOURNEY_EXIT_DELAY_SECS));
                log::debug!("journey scroll threshold reached; exit scheduled");
            }
        }
    }

    /// The gift click. Only meaningful during Box; true on the call that
    /// opens the box, false on every other click in any stage.
    pub fn open_box(&mut self) -> bool {
        if self.stage == Stage::Box && !self.box_open {
            self.box_open = true;
            log::info!("gift box opened");
            return true;
        }
        false
    }

    fn advance(&mut self) -> Option<StageChange> {
        let from = self.stage;
        let to = from.next()?;
        self.stage = to;
        self.stage_time = 0.0;
        self.trigger = match to {
            Stage::Journey => ExitTrigger::Scroll {
                gate: ThresholdGate::new(SCROLL_MARGIN_PX),
                // A journey with nothing to scroll must still move on.
                exit: (self.photo_count == 0).then(|| OneShot::after(JOURNEY_EXIT_DELAY_SECS)),
            },
            Stage::Interlude => ExitTrigger::Hold(OneShot::after(self.interlude_hold)),
            Stage::Box | Stage::Opening => ExitTrigger::Click,
        };
        log::info!("stage {:?} -> {:?}", from, to);
        Some(StageChange { from, to })
    }
}
