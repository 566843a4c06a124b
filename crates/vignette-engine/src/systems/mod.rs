pub mod rng;
pub mod sparkles;
pub mod timeline;
