use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything the experience displays: recipient, year labels, and the
/// four content payloads. Supplied once at startup, read-only afterwards.
/// Loaded from a JSON document or built directly in Rust.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub recipient: String,
    pub current_year: u32,
    pub next_year: u32,
    /// Lines revealed one by one on the opening screen.
    #[serde(default)]
    pub opening_lines: Vec<String>,
    /// The scrollable photo journey, in display order.
    #[serde(default)]
    pub photos: Vec<PhotoEntry>,
    /// Lines revealed during the interlude.
    #[serde(default)]
    pub interlude_lines: Vec<String>,
    /// Letter body shown inside the opened gift. Supports `{recipient}`
    /// and `{next_year}` placeholders.
    pub letter: String,
}

/// One photo in the journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub id: u32,
    /// Relative path to the image asset, resolved by the DOM layer.
    pub src: String,
    pub caption: String,
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid script JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Script {
    /// Parse a script from a JSON string. Empty sequences are legal and
    /// simply render nothing; only malformed JSON is an error.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Letter body with the placeholders filled in.
    pub fn letter_text(&self) -> String {
        self.letter
            .replace("{recipient}", &self.recipient)
            .replace("{next_year}", &self.next_year.to_string())
    }
}
