use wasm_bindgen::prelude::*;
use vignette_engine::*;

mod card;
mod content;

use card::NewYearCard;

vignette_web::export_experience!(NewYearCard, "new-year-card", scripted);
