use vignette_engine::{
    AudioSink, AudioToggle, EngineContext, Experience, ExperienceConfig, InputEvent, InputQueue,
    PlaybackError, CH_AUDIO_PLAYING,
};
use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

/// Audio sink backed by an `<audio>` element.
pub struct DomAudioSink {
    element: HtmlAudioElement,
}

impl DomAudioSink {
    pub fn new(src: &str) -> Result<Self, JsValue> {
        let element = HtmlAudioElement::new_with_src(src)?;
        element.set_loop(true);
        Ok(Self { element })
    }
}

impl AudioSink for DomAudioSink {
    fn play(&mut self) -> Result<(), PlaybackError> {
        // play() hands back a promise; an asynchronous rejection
        // (autoplay policy) stays on the JS side.
        match self.element.play() {
            Ok(_promise) => Ok(()),
            Err(err) => Err(PlaybackError::new(format!("{err:?}"))),
        }
    }

    fn pause(&mut self) {
        // pause() itself never fails.
        let _ = self.element.pause();
    }
}

/// Generic experience runner that wires up the engine loop.
///
/// Each concrete experience (e.g., `new-year-card`) creates a
/// `thread_local!` ExperienceRunner and exports free functions via
/// `#[wasm_bindgen]`, because wasm-bindgen cannot export generic
/// structs directly.
pub struct ExperienceRunner<E: Experience> {
    experience: E,
    ctx: EngineContext,
    input: InputQueue,
    audio: AudioToggle,
    sink: Option<DomAudioSink>,
    config: ExperienceConfig,
    initialized: bool,
}

impl<E: Experience> ExperienceRunner<E> {
    pub fn new(experience: E) -> Self {
        let config = experience.config();
        Self {
            ctx: EngineContext::new(&config),
            experience,
            input: InputQueue::new(),
            audio: AudioToggle::new(),
            sink: None,
            config,
            initialized: false,
        }
    }

    /// Initialize the experience. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.experience.config();
        self.ctx = EngineContext::new(&self.config);
        self.experience.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame tick: clear last frame's events, step the
    /// experience, drain input.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.view.clear_events();

        // Clamp dt so a backgrounded tab cannot fast-forward the script.
        let dt = dt.clamp(0.0, self.config.max_dt);
        self.experience.update(&mut self.ctx, &self.input, dt);

        // Drain input after update
        self.input.drain();

        self.ctx
            .view
            .set(CH_AUDIO_PLAYING, if self.audio.is_playing() { 1.0 } else { 0.0 });
    }

    /// Create the backing `<audio>` element for the toggle.
    pub fn attach_audio(&mut self, src: &str) {
        match DomAudioSink::new(src) {
            Ok(sink) => self.sink = Some(sink),
            Err(err) => log::warn!("audio element unavailable: {err:?}"),
        }
    }

    /// Flip play/pause. Returns the new intent state.
    pub fn toggle_audio(&mut self) -> bool {
        match &mut self.sink {
            Some(sink) => self.audio.toggle(sink),
            None => {
                log::warn!("audio toggle with no attached source");
                self.audio.is_playing()
            }
        }
    }

    pub fn is_audio_playing(&self) -> bool {
        self.audio.is_playing()
    }

    // ---- Pointer accessors for the DOM reader ----

    pub fn view_ptr(&self) -> *const f32 {
        self.ctx.view.as_ptr()
    }

    pub fn view_len(&self) -> u32 {
        self.ctx.view.len_floats() as u32
    }

    // ---- Layout accessors (read once by TypeScript at startup) ----

    pub fn line_offset(&self) -> u32 {
        self.ctx.view.layout().line_offset as u32
    }

    pub fn sparkle_offset(&self) -> u32 {
        self.ctx.view.layout().sparkle_offset as u32
    }

    pub fn event_offset(&self) -> u32 {
        self.ctx.view.layout().event_offset as u32
    }

    pub fn max_lines(&self) -> u32 {
        self.ctx.view.layout().max_lines as u32
    }

    pub fn max_sparkles(&self) -> u32 {
        self.ctx.view.layout().max_sparkles as u32
    }

    pub fn max_events(&self) -> u32 {
        self.ctx.view.layout().max_events as u32
    }
}
