use vignette_engine::{
    Drift, Easing, EngineContext, Experience, ExperienceConfig, Fade, InputEvent, InputQueue,
    Script, ScrollMetrics, SparkleField, Stage, StageChange, StageSequencer, Timeline, UiEvent,
    CH_BOX_OPEN, CH_ENTER_ALPHA, CH_EXIT_ALPHA, CH_GIFT_OFFSET_Y, CH_GIFT_ROTATION,
    CH_LETTER_ALPHA, CH_SCROLL_HINT_ALPHA, CH_STAGE, CH_STAGE_TIME,
};

use crate::content;

// UI event kinds (Rust → DOM)
pub const EVENT_STAGE_CHANGED: u32 = 1;
pub const EVENT_BOX_OPENED: u32 = 2;

// Stage cross-fade (seconds)
const STAGE_FADE_IN: f32 = 1.5;
const STAGE_FADE_OUT: f32 = 1.0;

// Opening lines: staggered reveal
const OPENING_LINE_DELAY: f32 = 0.5;
const OPENING_LINE_STEP: f32 = 0.8;
const OPENING_LINE_FADE: f32 = 0.8;

// Interlude lines: slow blur-in pacing
const INTERLUDE_LINE_STEP: f32 = 2.5;
const INTERLUDE_LINE_FADE: f32 = 1.5;

// "Scroll gently down" hint
const SCROLL_HINT_DELAY: f32 = 0.5;
const SCROLL_HINT_FADE: f32 = 1.0;

// Gift idle motion: slow bob and rock while it waits for the click
const GIFT_BOB_AMPLITUDE: f32 = 10.0;
const GIFT_BOB_PERIOD: f32 = 4.0;
const GIFT_ROCK_DEGREES: f32 = 2.0;

// Letter reveal once the box opens
const LETTER_DELAY: f32 = 0.5;
const LETTER_FADE: f32 = 1.0;

const SPARKLE_COUNT: usize = 20;
const SPARKLE_SEED: u64 = 20260101;

/// The greeting card: a fixed four-stage script walked forward by the
/// sequencer, with per-stage timelines publishing animation values for
/// the DOM layer.
pub struct NewYearCard {
    script: Script,
    sequencer: StageSequencer,
    sparkles: SparkleField,
    plan: Timeline,
    exit_fade: Option<Fade>,
    letter_fade: Fade,
    box_opened_at: Option<f32>,
    line_offset: usize,
    max_lines: usize,
}

impl NewYearCard {
    pub fn new() -> Self {
        Self::with_script(content::script())
    }

    pub fn with_script(script: Script) -> Self {
        let sequencer = StageSequencer::new(
            script.opening_lines.len(),
            script.interlude_lines.len(),
            script.photos.len(),
        );
        Self {
            sequencer,
            sparkles: SparkleField::new(SPARKLE_COUNT, SPARKLE_SEED),
            plan: Timeline::new(),
            exit_fade: None,
            letter_fade: Fade::new(LETTER_DELAY, LETTER_FADE, Easing::QuadOut),
            box_opened_at: None,
            line_offset: 0,
            max_lines: 0,
            script,
        }
    }

    pub fn script(&self) -> &Script {
        &self.script
    }

    /// The animation plan for a stage. Line slots are shared: the plan
    /// only covers lines the entered stage owns.
    fn stage_plan(&self, stage: Stage) -> Timeline {
        let mut plan = Timeline::new().fade(
            CH_ENTER_ALPHA,
            Fade::new(0.0, STAGE_FADE_IN, Easing::Linear),
        );
        match stage {
            Stage::Opening => {
                for i in 0..self.script.opening_lines.len().min(self.max_lines) {
                    plan = plan.fade(
                        self.line_offset + i,
                        Fade::new(
                            OPENING_LINE_DELAY + i as f32 * OPENING_LINE_STEP,
                            OPENING_LINE_FADE,
                            Easing::QuadOut,
                        ),
                    );
                }
            }
            Stage::Journey => {
                plan = plan.fade(
                    CH_SCROLL_HINT_ALPHA,
                    Fade::new(SCROLL_HINT_DELAY, SCROLL_HINT_FADE, Easing::Linear),
                );
            }
            Stage::Interlude => {
                for i in 0..self.script.interlude_lines.len().min(self.max_lines) {
                    plan = plan.fade(
                        self.line_offset + i,
                        Fade::new(
                            i as f32 * INTERLUDE_LINE_STEP,
                            INTERLUDE_LINE_FADE,
                            Easing::SineInOut,
                        ),
                    );
                }
            }
            Stage::Box => {
                plan = plan
                    .drift(
                        CH_GIFT_OFFSET_Y,
                        Drift {
                            amplitude: GIFT_BOB_AMPLITUDE,
                            period: GIFT_BOB_PERIOD,
                            phase: 0.0,
                        },
                    )
                    .drift(
                        CH_GIFT_ROTATION,
                        Drift {
                            amplitude: GIFT_ROCK_DEGREES,
                            period: GIFT_BOB_PERIOD,
                            phase: 0.5,
                        },
                    );
            }
        }
        plan
    }

    fn enter_stage(&mut self, change: StageChange, ctx: &mut EngineContext) {
        // Line slots are shared between stages; clear the old stage's
        // values before the new plan starts writing its own.
        for i in 0..self.max_lines {
            ctx.view.set(self.line_offset + i, 0.0);
        }
        self.plan = self.stage_plan(change.to);
        self.exit_fade = Some(Fade::new(0.0, STAGE_FADE_OUT, Easing::Linear).with_range(1.0, 0.0));
        ctx.emit(UiEvent::new(EVENT_STAGE_CHANGED).with_a(change.to.index() as f32));
    }
}

impl Default for NewYearCard {
    fn default() -> Self {
        Self::new()
    }
}

impl Experience for NewYearCard {
    fn config(&self) -> ExperienceConfig {
        ExperienceConfig {
            max_sparkles: SPARKLE_COUNT,
            ..ExperienceConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        self.line_offset = ctx.view.layout().line_offset;
        self.max_lines = ctx.view.layout().max_lines;
        self.plan = self.stage_plan(Stage::Opening);
        ctx.view.set(CH_STAGE, Stage::Opening.index() as f32);
        log::info!(
            "card ready: {} opening lines, {} photos, {} interlude lines",
            self.script.opening_lines.len(),
            self.script.photos.len(),
            self.script.interlude_lines.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
        // Route input to the sequencer. Clicks only reach the core from
        // the gift element, so any press during Box is the gift click.
        for event in input.iter() {
            match *event {
                InputEvent::PointerDown { .. } => {
                    if self.sequencer.open_box() {
                        self.box_opened_at = Some(self.sequencer.stage_time());
                        ctx.emit(UiEvent::new(EVENT_BOX_OPENED));
                    }
                }
                InputEvent::Scroll {
                    top,
                    viewport,
                    content,
                } => {
                    self.sequencer.observe_scroll(ScrollMetrics {
                        top,
                        viewport,
                        content,
                    });
                }
                _ => {}
            }
        }

        if let Some(change) = self.sequencer.tick(dt) {
            self.enter_stage(change, ctx);
        }

        let stage = self.sequencer.stage();
        let t = self.sequencer.stage_time();

        // Cosmetic layers. Nothing below feeds back into the sequencer.
        if stage == Stage::Opening {
            self.sparkles.tick(dt);
            self.sparkles.write_to(&mut ctx.view);
        }

        self.plan.sample(t, &mut ctx.view);

        if let Some(fade) = self.exit_fade {
            ctx.view.set(CH_EXIT_ALPHA, fade.value(t));
            if fade.is_done(t) {
                self.exit_fade = None;
            }
        }

        if let Some(opened_at) = self.box_opened_at {
            ctx.view
                .set(CH_LETTER_ALPHA, self.letter_fade.value(t - opened_at));
        }

        ctx.view.set(CH_STAGE, stage.index() as f32);
        ctx.view.set(CH_STAGE_TIME, t);
        ctx.view.set(
            CH_BOX_OPEN,
            if self.sequencer.is_box_open() { 1.0 } else { 0.0 },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(card: &mut NewYearCard, ctx: &mut EngineContext, input: &mut InputQueue, dt: f32) {
        ctx.view.clear_events();
        card.update(ctx, input, dt);
        input.drain();
    }

    fn scroll_to_end(input: &mut InputQueue) {
        input.push(InputEvent::Scroll {
            top: 3600.0,
            viewport: 800.0,
            content: 4400.0,
        });
    }

    #[test]
    fn full_card_walkthrough() {
        let mut card = NewYearCard::new();
        let config = card.config();
        let mut ctx = EngineContext::new(&config);
        let mut input = InputQueue::new();
        card.init(&mut ctx);

        assert_eq!(ctx.view.get(CH_STAGE), 0.0);

        // A click this early must do nothing.
        input.push(InputEvent::PointerDown { x: 10.0, y: 10.0 });
        step(&mut card, &mut ctx, &mut input, 0.25);
        assert_eq!(ctx.view.get(CH_BOX_OPEN), 0.0);
        assert_eq!(ctx.view.event_count(), 0);

        // First opening line is fully visible after its stagger.
        for _ in 0..5 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        let line0 = ctx.view.line_channel(0).unwrap();
        assert_eq!(ctx.view.get(line0), 1.0);

        // Opening holds for 4 x 1s + 3s = 7s total.
        for _ in 0..21 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 0.0);
        step(&mut card, &mut ctx, &mut input, 0.25);
        assert_eq!(ctx.view.get(CH_STAGE), 1.0);
        let event = ctx.view.event(0).unwrap();
        assert_eq!(event.kind, EVENT_STAGE_CHANGED as f32);
        assert_eq!(event.a, 1.0);
        // Old stage's line alphas were cleared for the new stage.
        assert_eq!(ctx.view.get(line0), 0.0);

        // Scrolling partway does not end the journey.
        input.push(InputEvent::Scroll {
            top: 500.0,
            viewport: 800.0,
            content: 4400.0,
        });
        for _ in 0..8 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 1.0);

        // Reaching the bottom schedules a one-second exit — once, no
        // matter how often the threshold keeps being reported.
        scroll_to_end(&mut input);
        step(&mut card, &mut ctx, &mut input, 0.25);
        scroll_to_end(&mut input);
        step(&mut card, &mut ctx, &mut input, 0.25);
        step(&mut card, &mut ctx, &mut input, 0.25);
        assert_eq!(ctx.view.get(CH_STAGE), 1.0);
        step(&mut card, &mut ctx, &mut input, 0.25);
        assert_eq!(ctx.view.get(CH_STAGE), 2.0);

        // Interlude holds for 3 x 2.5s + 1s = 8.5s.
        for _ in 0..33 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 2.0);
        step(&mut card, &mut ctx, &mut input, 0.25);
        assert_eq!(ctx.view.get(CH_STAGE), 3.0);

        // The gift bobs while waiting: one quarter period reaches the
        // full amplitude.
        for _ in 0..4 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert!((ctx.view.get(CH_GIFT_OFFSET_Y) - GIFT_BOB_AMPLITUDE).abs() < 0.01);

        // No timer ever opens the box.
        for _ in 0..400 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 3.0);
        assert_eq!(ctx.view.get(CH_BOX_OPEN), 0.0);

        // The click does.
        input.push(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        step(&mut card, &mut ctx, &mut input, 0.25);
        assert_eq!(ctx.view.get(CH_BOX_OPEN), 1.0);
        let event = ctx.view.event(0).unwrap();
        assert_eq!(event.kind, EVENT_BOX_OPENED as f32);

        // Repeat clicks stay silent.
        input.push(InputEvent::PointerDown { x: 400.0, y: 300.0 });
        step(&mut card, &mut ctx, &mut input, 0.25);
        assert_eq!(ctx.view.event_count(), 0);
        assert_eq!(ctx.view.get(CH_BOX_OPEN), 1.0);

        // The letter fades in after the reveal delay.
        for _ in 0..8 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert!(ctx.view.get(CH_LETTER_ALPHA) > 0.99);
    }

    #[test]
    fn empty_photo_journey_still_reaches_the_box() {
        let script = Script {
            recipient: "Bestie".to_string(),
            current_year: 2025,
            next_year: 2026,
            opening_lines: Vec::new(),
            photos: Vec::new(),
            interlude_lines: Vec::new(),
            letter: "hi".to_string(),
        };
        let mut card = NewYearCard::with_script(script);
        let config = card.config();
        let mut ctx = EngineContext::new(&config);
        let mut input = InputQueue::new();
        card.init(&mut ctx);

        // Opening: constant tail only (3s).
        for _ in 0..12 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 1.0);

        // Journey auto-advances after 1s with nothing to scroll.
        for _ in 0..4 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 2.0);

        // Interlude: constant tail only (1s).
        for _ in 0..4 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 3.0);
    }

    #[test]
    fn exit_fade_runs_after_each_transition() {
        let mut card = NewYearCard::new();
        let config = card.config();
        let mut ctx = EngineContext::new(&config);
        let mut input = InputQueue::new();
        card.init(&mut ctx);

        for _ in 0..28 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_STAGE), 1.0);
        // Right after the hand-off the old stage is still fully visible.
        assert_eq!(ctx.view.get(CH_EXIT_ALPHA), 1.0);
        for _ in 0..2 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert!((ctx.view.get(CH_EXIT_ALPHA) - 0.5).abs() < 0.001);
        for _ in 0..2 {
            step(&mut card, &mut ctx, &mut input, 0.25);
        }
        assert_eq!(ctx.view.get(CH_EXIT_ALPHA), 0.0);
    }
}
