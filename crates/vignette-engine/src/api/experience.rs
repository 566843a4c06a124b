use crate::bridge::protocol::ViewLayout;
use crate::bridge::view::{UiEvent, ViewBuffer};
use crate::input::queue::InputQueue;

/// Engine capacities and limits, provided by the experience.
#[derive(Debug, Clone)]
pub struct ExperienceConfig {
    /// Text-line alpha slots in the view buffer.
    pub max_lines: usize,
    /// Sparkle slots in the view buffer.
    pub max_sparkles: usize,
    /// Maximum UI events per frame.
    pub max_events: usize,
    /// Upper bound on a single frame's dt, in seconds. A tab waking up
    /// from the background must not fast-forward the script.
    pub max_dt: f32,
}

impl Default for ExperienceConfig {
    fn default() -> Self {
        Self {
            max_lines: 16,
            max_sparkles: 32,
            max_events: 8,
            max_dt: 0.1,
        }
    }
}

/// The core contract every experience must fulfill.
pub trait Experience {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> ExperienceConfig {
        ExperienceConfig::default()
    }

    /// Publish initial view state. Called once before the first tick.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The per-frame step: consume input, advance the script, publish
    /// view values.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Mutable access to engine state, passed to Experience::init and
/// Experience::update.
pub struct EngineContext {
    pub view: ViewBuffer,
}

impl EngineContext {
    pub fn new(config: &ExperienceConfig) -> Self {
        Self {
            view: ViewBuffer::new(ViewLayout::from_config(config)),
        }
    }

    /// Queue a discrete notification for the DOM layer.
    pub fn emit(&mut self, event: UiEvent) {
        if !self.view.push_event(event) {
            log::warn!("ui event dropped: frame queue full");
        }
    }
}
