pub mod runner;

pub use runner::{DomAudioSink, ExperienceRunner};

/// Generate all `#[wasm_bindgen]` exports for an experience.
///
/// Generates:
/// - `thread_local!` storage for the ExperienceRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (experience_init, experience_tick, input
///   handlers, audio toggle, view-buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use vignette_engine::*;
///
/// mod card;
/// use card::NewYearCard;
///
/// vignette_web::export_experience!(NewYearCard, "new-year-card");
/// ```
///
/// # Arguments
///
/// - `$experience_type`: The struct type that implements
///   `vignette_engine::Experience`
/// - `$experience_name`: A string literal used in the initialization log
///   message
///
/// The `scripted` variant additionally exports `experience_load`, which
/// rebuilds the experience from a JSON script at runtime; it requires an
/// inherent `with_script(Script) -> Self` constructor on the type.
#[macro_export]
macro_rules! export_experience {
    ($experience_type:ty, $experience_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::ExperienceRunner<$experience_type>>> =
                RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::ExperienceRunner<$experience_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .expect("Experience not initialized. Call experience_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn experience_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let experience = <$experience_type>::new();
            let runner = $crate::ExperienceRunner::new(experience);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $experience_name);
        }

        #[wasm_bindgen]
        pub fn experience_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn scroll(top: f32, viewport: f32, content: f32) {
            with_runner(|r| {
                r.push_input(InputEvent::Scroll {
                    top,
                    viewport,
                    content,
                })
            });
        }

        #[wasm_bindgen]
        pub fn custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Audio ----

        #[wasm_bindgen]
        pub fn audio_attach(src: &str) {
            with_runner(|r| r.attach_audio(src));
        }

        #[wasm_bindgen]
        pub fn audio_toggle() -> bool {
            with_runner(|r| r.toggle_audio())
        }

        #[wasm_bindgen]
        pub fn audio_is_playing() -> bool {
            with_runner(|r| r.is_audio_playing())
        }

        // ---- View buffer accessors ----

        #[wasm_bindgen]
        pub fn get_view_ptr() -> *const f32 {
            with_runner(|r| r.view_ptr())
        }

        #[wasm_bindgen]
        pub fn get_view_len() -> u32 {
            with_runner(|r| r.view_len())
        }

        #[wasm_bindgen]
        pub fn get_line_offset() -> u32 {
            with_runner(|r| r.line_offset())
        }

        #[wasm_bindgen]
        pub fn get_sparkle_offset() -> u32 {
            with_runner(|r| r.sparkle_offset())
        }

        #[wasm_bindgen]
        pub fn get_event_offset() -> u32 {
            with_runner(|r| r.event_offset())
        }

        #[wasm_bindgen]
        pub fn get_max_lines() -> u32 {
            with_runner(|r| r.max_lines())
        }

        #[wasm_bindgen]
        pub fn get_max_sparkles() -> u32 {
            with_runner(|r| r.max_sparkles())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };

    // Variant with runtime script loading
    ($experience_type:ty, $experience_name:literal, scripted) => {
        $crate::export_experience!($experience_type, $experience_name);

        /// Rebuild the experience from a JSON script. Returns false (and
        /// keeps the current experience) when the script is rejected.
        #[wasm_bindgen]
        pub fn experience_load(script_json: &str) -> bool {
            match vignette_engine::Script::from_json(script_json) {
                Ok(script) => {
                    let runner =
                        $crate::ExperienceRunner::new(<$experience_type>::with_script(script));
                    RUNNER.with(|cell| {
                        *cell.borrow_mut() = Some(runner);
                    });
                    with_runner(|r| r.init());
                    log::info!("{}: script loaded", $experience_name);
                    true
                }
                Err(err) => {
                    log::error!("{}: {err}", $experience_name);
                    false
                }
            }
        }
    };
}
