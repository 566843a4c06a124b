// ── Customization zone ───────────────────────────────────────────────
// Everything the card displays lives here. Swap the strings, years and
// photo paths to make it yours; `experience_load` accepts the same
// shape as JSON at runtime.

use vignette_engine::{PhotoEntry, Script};

pub const RECIPIENT_NAME: &str = "Bestie";
pub const CURRENT_YEAR: u32 = 2025;
pub const NEXT_YEAR: u32 = 2026;

const OPENING_LINES: [&str; 4] = [
    "Hey...",
    "Before the clock strikes twelve...",
    "I needed to stop for a moment.",
    "And just think about you.",
];

const INTERLUDE_LINES: [&str; 3] = [
    "We have walked a long way together.",
    "And even though years change...",
    "Some things remain timeless.",
];

const LETTER: &str = "Dearest {recipient},\n\n\
As this year closes, I realized I couldn't let it end without acknowledging \
the massive impact you've had on my life.\n\n\
Looking back, there were so many moments where I might have crumbled if I \
didn't know you were just a text away. Some feelings are complicated and old, \
but what isn't complicated is how incredibly effective you are at being a \
beautiful human being in my life.\n\n\
You made the hard days bearable and the good days unforgettable. Thank you \
for being my safety net, my reality check, and my greatest cheerleader.\n\n\
I don't know what {next_year} holds, but I know it will be okay as long as \
you are part of my world.\n\n\
Happy New Year. You mean the world to me.\n\n\
With all my love,\nMuhammad";

/// The built-in script.
pub fn script() -> Script {
    Script {
        recipient: RECIPIENT_NAME.to_string(),
        current_year: CURRENT_YEAR,
        next_year: NEXT_YEAR,
        opening_lines: OPENING_LINES.iter().map(|s| s.to_string()).collect(),
        photos: vec![
            PhotoEntry {
                id: 1,
                src: "/p1.jpg".to_string(),
                caption: "The Anchor. When everything felt chaotic this year, you were \
                          the one steady thing I could hold onto."
                    .to_string(),
            },
            PhotoEntry {
                id: 2,
                src: "/p2.jpg".to_string(),
                caption: "The Lightbringer. You have this frustratingly good ability to \
                          make me laugh even when I absolutely don't want to."
                    .to_string(),
            },
            PhotoEntry {
                id: 3,
                src: "/p3.jpg".to_string(),
                caption: "The Silent Supporter. You didn't always have to say much. Just \
                          knowing you were in my corner changed everything."
                    .to_string(),
            },
            PhotoEntry {
                id: 4,
                src: "/p4.jpg".to_string(),
                caption: "The Constant. Things changed, people drifted, but you remained. \
                          My best friend."
                    .to_string(),
            },
        ],
        interlude_lines: INTERLUDE_LINES.iter().map(|s| s.to_string()).collect(),
        letter: LETTER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_script_is_complete() {
        let script = script();
        assert_eq!(script.opening_lines.len(), 4);
        assert_eq!(script.photos.len(), 4);
        assert_eq!(script.interlude_lines.len(), 3);
        assert_eq!(script.photos[0].src, "/p1.jpg");
    }

    #[test]
    fn letter_renders_with_recipient_and_year() {
        let script = script();
        let letter = script.letter_text();
        assert!(letter.starts_with("Dearest Bestie,"));
        assert!(letter.contains("2026"));
        assert!(!letter.contains('{'));
    }
}
