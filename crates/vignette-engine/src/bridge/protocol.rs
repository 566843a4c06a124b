/// View buffer layout shared with the DOM layer.
/// Must stay in sync with the TypeScript reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 channels]
/// [Line alphas: max_lines x 1 float]
/// [Sparkles: max_sparkles x 4 floats]
/// [Events: max_events x 4 floats]
/// ```
///
/// Capacities are fixed at init; the DOM reader fetches the offsets once
/// through the exported accessors and then reads the buffer every frame.
use crate::api::experience::ExperienceConfig;

/// Number of channels in the header section.
pub const HEADER_CHANNELS: usize = 16;

/// Header channel indices.
pub const CH_STAGE: usize = 0;
pub const CH_STAGE_TIME: usize = 1;
pub const CH_ENTER_ALPHA: usize = 2;
pub const CH_EXIT_ALPHA: usize = 3;
pub const CH_BOX_OPEN: usize = 4;
pub const CH_AUDIO_PLAYING: usize = 5;
pub const CH_GIFT_OFFSET_Y: usize = 6;
pub const CH_GIFT_ROTATION: usize = 7;
pub const CH_LETTER_ALPHA: usize = 8;
pub const CH_SCROLL_HINT_ALPHA: usize = 9;
pub const CH_EVENT_COUNT: usize = 10;
pub const CH_VERSION: usize = 11;

/// Version written into the header at init.
pub const VIEW_VERSION: f32 = 1.0;

/// Floats per sparkle: x, y, scale, alpha (wire format — never changes).
pub const SPARKLE_FLOATS: usize = 4;

/// Floats per UI event: kind, a, b, c (wire format — never changes).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewLayout {
    /// Maximum text-line alpha slots.
    pub max_lines: usize,
    /// Maximum sparkle slots.
    pub max_sparkles: usize,
    /// Maximum UI events per frame.
    pub max_events: usize,

    /// Offset (in floats) where line alphas begin.
    pub line_offset: usize,
    /// Offset (in floats) where sparkle data begins.
    pub sparkle_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_offset: usize,

    /// Total buffer size in floats.
    pub total_floats: usize,
    /// Total buffer size in bytes.
    pub total_bytes: usize,
}

impl ViewLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_lines: usize, max_sparkles: usize, max_events: usize) -> Self {
        let line_offset = HEADER_CHANNELS;
        let sparkle_offset = line_offset + max_lines;
        let event_offset = sparkle_offset + max_sparkles * SPARKLE_FLOATS;
        let total_floats = event_offset + max_events * EVENT_FLOATS;

        Self {
            max_lines,
            max_sparkles,
            max_events,
            line_offset,
            sparkle_offset,
            event_offset,
            total_floats,
            total_bytes: total_floats * 4,
        }
    }

    /// Compute layout from an ExperienceConfig.
    pub fn from_config(config: &ExperienceConfig) -> Self {
        Self::new(config.max_lines, config.max_sparkles, config.max_events)
    }
}
