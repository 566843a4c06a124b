// audio.rs
//
// Play/pause toggle for the background track. Independent of the stage
// machine: toggling never touches stages, stages never touch audio.

use thiserror::Error;

/// Playback failed to start (for example, the platform blocked
/// autoplay). The one fallible operation in the whole system.
#[derive(Debug, Error)]
#[error("audio playback rejected: {reason}")]
pub struct PlaybackError {
    reason: String,
}

impl PlaybackError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Where the sound actually comes from. The WASM bridge wraps an
/// `<audio>` element; tests substitute a scripted sink.
pub trait AudioSink {
    /// Request playback. May be rejected by the host environment.
    fn play(&mut self) -> Result<(), PlaybackError>;
    /// Stop playback. Always succeeds.
    fn pause(&mut self);
}

/// The play/pause state, flipped only by user action.
#[derive(Debug, Default)]
pub struct AudioToggle {
    playing: bool,
}

impl AudioToggle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the UI should show the "playing" state. This is intent,
    /// not ground truth: a rejected play request still flips it, so the
    /// icon can claim playback while the platform stays silent (see
    /// DESIGN.md).
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between play and pause. A play rejection is logged and
    /// swallowed; it never propagates and never blocks the flip.
    /// Returns the new intent state.
    pub fn toggle<S: AudioSink>(&mut self, sink: &mut S) -> bool {
        if self.playing {
            sink.pause();
        } else if let Err(err) = sink.play() {
            log::warn!("{err}");
        }
        self.playing = !self.playing;
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct ScriptedSink {
        plays: usize,
        pauses: usize,
        reject_play: bool,
    }

    impl AudioSink for ScriptedSink {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.plays += 1;
            if self.reject_play {
                Err(PlaybackError::new("autoplay blocked"))
            } else {
                Ok(())
            }
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }
    }

    #[test]
    fn toggle_round_trip_returns_to_paused() {
        let mut toggle = AudioToggle::new();
        let mut sink = ScriptedSink::default();

        assert!(toggle.toggle(&mut sink));
        assert!(toggle.is_playing());
        assert_eq!(sink.plays, 1);

        assert!(!toggle.toggle(&mut sink));
        assert!(!toggle.is_playing());
        assert_eq!(sink.pauses, 1);
    }

    #[test]
    fn rejected_play_still_flips_to_playing() {
        let mut toggle = AudioToggle::new();
        let mut sink = ScriptedSink {
            reject_play: true,
            ..ScriptedSink::default()
        };

        assert!(toggle.toggle(&mut sink));
        assert!(toggle.is_playing());
        assert_eq!(sink.plays, 1);
        assert_eq!(sink.pauses, 0);
    }

    #[test]
    fn pause_never_calls_play() {
        let mut toggle = AudioToggle::new();
        let mut sink = ScriptedSink::default();
        toggle.toggle(&mut sink);
        toggle.toggle(&mut sink);
        assert_eq!(sink.plays, 1);
        assert_eq!(sink.pauses, 1);
    }
}
