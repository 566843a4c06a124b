pub mod api;
pub mod audio;
pub mod bridge;
pub mod content;
pub mod core;
pub mod extensions;
pub mod input;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::experience::{EngineContext, Experience, ExperienceConfig};
pub use audio::{AudioSink, AudioToggle, PlaybackError};
pub use bridge::protocol::{
    ViewLayout, CH_AUDIO_PLAYING, CH_BOX_OPEN, CH_ENTER_ALPHA, CH_EVENT_COUNT, CH_EXIT_ALPHA,
    CH_GIFT_OFFSET_Y, CH_GIFT_ROTATION, CH_LETTER_ALPHA, CH_SCROLL_HINT_ALPHA, CH_STAGE,
    CH_STAGE_TIME, CH_VERSION, EVENT_FLOATS, HEADER_CHANNELS, SPARKLE_FLOATS, VIEW_VERSION,
};
pub use bridge::view::{UiEvent, ViewBuffer};
pub use content::script::{PhotoEntry, Script, ScriptError};
pub use core::scheduler::{OneShot, ScrollMetrics, ThresholdGate};
pub use core::sequencer::{Stage, StageChange, StageSequencer, SCROLL_MARGIN_PX};
pub use extensions::easing::{ease, lerp, Easing};
pub use input::queue::{InputEvent, InputQueue};
pub use systems::rng::Rng;
pub use systems::sparkles::SparkleField;
pub use systems::timeline::{Drift, Fade, Timeline};
