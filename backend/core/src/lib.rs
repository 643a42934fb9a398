pub mod error;
pub mod traits;
pub mod types;

pub use error::PokeError;
pub use traits::{ImageClassifier, InlineImage, LlmProvider, LlmRequest, LlmResponse};
pub use types::{
    Classification, IdentificationResult, IdentifiedPokemon, ImageUpload, PLACEHOLDER_NAME,
    TARGET_COUNT,
};
