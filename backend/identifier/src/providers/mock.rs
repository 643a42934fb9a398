use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use pokelens_core::{LlmProvider, LlmRequest, LlmResponse};

/// A mock LLM provider that returns canned responses.
///
/// Queued responses are served in order; once the queue is drained the
/// fixed response (or a default list) is repeated.
pub struct MockProvider {
    name: String,
    queued: Mutex<VecDeque<Result<String, String>>>,
    fixed_response: Option<String>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            queued: Mutex::new(VecDeque::new()),
            fixed_response: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Queue a one-off response served before the fixed one.
    pub fn then_respond(self, response: impl Into<String>) -> Self {
        self.push(Ok(response.into()));
        self
    }

    /// Queue a one-off failure.
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.push(Err(message.into()));
        self
    }

    /// How many times `complete` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn push(&self, item: Result<String, String>) {
        if let Ok(mut queue) = self.queued.lock() {
            queue.push_back(item);
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, req: &LlmRequest) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = self.queued.lock().ok().and_then(|mut q| q.pop_front());
        let content = match next {
            Some(Ok(content)) => content,
            Some(Err(message)) => anyhow::bail!("{message}"),
            None => self
                .fixed_response
                .clone()
                .unwrap_or_else(|| "Pikachu\nBulbasaur\nCharmander\nSquirtle\nEevee".to_string()),
        };

        Ok(LlmResponse {
            content,
            provider: self.name.clone(),
            model: req.model.clone(),
            latency_ms: 0,
        })
    }
}
