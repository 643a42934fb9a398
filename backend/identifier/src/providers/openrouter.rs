use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pokelens_core::{LlmProvider, LlmRequest, LlmResponse};

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// OpenRouter.ai LLM provider (OpenAI-compatible chat completions).
pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse> {
        let start = Instant::now();

        let content = match &request.image {
            None => MessageContent::Text(request.prompt.clone()),
            Some(image) => MessageContent::Parts(vec![
                ContentPart::Text {
                    text: request.prompt.clone(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{};base64,{}", image.mime_type, image.data_base64),
                    },
                },
            ]),
        };

        let body = ChatRequest {
            model: request.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content,
            }],
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
        };

        debug!(
            model = %request.model,
            with_image = request.image.is_some(),
            "Sending request to OpenRouter"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("OpenRouter HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenRouter returned {}: {}", status, error_body);
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse OpenRouter response")?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .context("OpenRouter response contained no choices")?
            .message
            .content
            .unwrap_or_default();

        Ok(LlmResponse {
            content,
            provider: "openrouter".to_string(),
            model: request.model.clone(),
            latency_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use pokelens_core::InlineImage;
    use serde_json::{json, Value};

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn chat(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            == Some("Bearer or-key");
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": {"message": "No auth"}})));
        }
        let content = &body["messages"][0]["content"];
        let reply = if content.is_array() {
            format!("parts:{}", content.as_array().map(Vec::len).unwrap_or(0))
        } else {
            content.as_str().unwrap_or_default().to_string()
        };
        (
            StatusCode::OK,
            Json(json!({"choices": [{"message": {"role": "assistant", "content": reply}}]})),
        )
    }

    #[tokio::test]
    async fn sends_plain_text_content() {
        let base = spawn_mock(Router::new().route("/chat/completions", post(chat))).await;
        let provider = OpenRouterProvider::new("or-key").with_base_url(base);

        let resp = provider
            .complete(&LlmRequest::text("openai/gpt-4o-mini", "Pikachu, Raichu"))
            .await
            .unwrap();
        assert_eq!(resp.content, "Pikachu, Raichu");
        assert_eq!(resp.provider, "openrouter");
    }

    #[tokio::test]
    async fn sends_image_as_content_parts() {
        let base = spawn_mock(Router::new().route("/chat/completions", post(chat))).await;
        let provider = OpenRouterProvider::new("or-key").with_base_url(base);
        let request = LlmRequest::text("openai/gpt-4o-mini", "who").with_image(InlineImage {
            mime_type: "image/jpeg".into(),
            data_base64: "/9j/4AAQ".into(),
        });

        let resp = provider.complete(&request).await.unwrap();
        assert_eq!(resp.content, "parts:2");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let base = spawn_mock(Router::new().route("/chat/completions", post(chat))).await;
        let provider = OpenRouterProvider::new("bad-key").with_base_url(base);

        let err = provider
            .complete(&LlmRequest::text("openai/gpt-4o-mini", "hi"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("401"));
    }
}
