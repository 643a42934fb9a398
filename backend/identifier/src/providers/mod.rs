pub mod gemini;
pub mod mock;
pub mod openrouter;

use std::collections::HashMap;
use std::sync::Arc;

use pokelens_core::LlmProvider;

pub use gemini::GeminiProvider;
pub use mock::MockProvider;
pub use openrouter::OpenRouterProvider;

/// Registry of LLM providers, looked up by name.
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn LlmProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider under its own name.
    pub fn register(&mut self, provider: Arc<dyn LlmProvider>) {
        self.providers.insert(provider.name().to_string(), provider);
    }

    /// Look up a provider by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<Arc<dyn LlmProvider>> {
        self.providers.get(&name.to_ascii_lowercase()).cloned()
    }

    /// Get all registered provider names, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<_> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(MockProvider::new("gemini")));
        registry.register(Arc::new(MockProvider::new("openrouter")));

        assert!(registry.get("Gemini").is_some());
        assert!(registry.get("ollama").is_none());
        assert_eq!(registry.list(), ["gemini", "openrouter"]);
    }
}
