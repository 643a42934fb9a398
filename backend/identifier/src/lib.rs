pub mod identifier;
pub mod providers;

pub use identifier::{description_prompt, PokemonIdentifier, DEFAULT_MAX_ATTEMPTS};
pub use providers::{GeminiProvider, MockProvider, OpenRouterProvider, ProviderRegistry};
