//! Understanding layer: turns upstream model output into something the relay can return.

pub mod classify;
pub mod normalize;

pub use classify::{HttpImageClassifier, DEFAULT_CLASSIFIER_URL};
pub use normalize::{normalize_line, parse_pokemon_names};
