//! Image classification: label an image using a hosted vision model.
//!
//! Speaks the Hugging Face Inference API shape: raw image bytes in, a list of
//! `{label, score}` candidates out. Only the best-scoring label is kept.
use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use tracing::{debug, info};

use pokelens_core::{Classification, ImageClassifier, ImageUpload};

/// Default classification endpoint.
pub const DEFAULT_CLASSIFIER_URL: &str =
    "https://api-inference.huggingface.co/models/google/vit-base-patch16-224";

pub struct HttpImageClassifier {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl HttpImageClassifier {
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build classifier HTTP client")?;
        Ok(Self {
            client,
            url: url.into(),
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
struct UpstreamError {
    error: String,
}

#[async_trait]
impl ImageClassifier for HttpImageClassifier {
    fn name(&self) -> &str {
        "classifier"
    }

    async fn classify(&self, image: &ImageUpload) -> Result<Classification> {
        info!(
            bytes = image.data.len(),
            mime = %image.mime_type,
            "[Classify] Sending image to classification model"
        );

        let mut request = self
            .client
            .post(&self.url)
            .header(header::CONTENT_TYPE, image.mime_type.as_str())
            .body(image.data.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .context("Classifier HTTP request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<UpstreamError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            bail!("Classifier returned {}: {}", status, detail);
        }

        let labels: Vec<LabelScore> = response
            .json()
            .await
            .context("Failed to parse classifier response")?;
        debug!(candidates = labels.len(), "[Classify] Received labels");

        top_label(labels)
    }
}

fn top_label(labels: Vec<LabelScore>) -> Result<Classification> {
    let best = labels
        .into_iter()
        .max_by(|a, b| a.score.total_cmp(&b.score))
        .context("Classifier returned no labels")?;

    Ok(Classification {
        predicted_class: best.label,
        confidence: Some(best.score),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use bytes::Bytes;
    use serde_json::json;

    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/classify")
    }

    fn png_upload() -> ImageUpload {
        ImageUpload {
            filename: Some("pikachu.png".into()),
            mime_type: "image/png".into(),
            data: Bytes::from_static(b"\x89PNG\r\n\x1a\nrest"),
        }
    }

    #[tokio::test]
    async fn picks_highest_score() {
        let router = Router::new().route(
            "/classify",
            post(|| async {
                Json(json!([
                    {"label": "tabby cat", "score": 0.12},
                    {"label": "electric ray", "score": 0.81},
                    {"label": "hamster", "score": 0.07}
                ]))
            }),
        );
        let url = spawn_mock(router).await;
        let classifier =
            HttpImageClassifier::new(url, Some("hf_test".into()), Duration::from_secs(5)).unwrap();

        let result = classifier.classify(&png_upload()).await.unwrap();
        assert_eq!(result.predicted_class, "electric ray");
        assert_eq!(result.confidence, Some(0.81));
    }

    #[tokio::test]
    async fn surfaces_upstream_error_message() {
        let router = Router::new().route(
            "/classify",
            post(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({"error": "Model is currently loading"})),
                )
            }),
        );
        let url = spawn_mock(router).await;
        let classifier = HttpImageClassifier::new(url, None, Duration::from_secs(5)).unwrap();

        let err = classifier.classify(&png_upload()).await.unwrap_err();
        assert!(err.to_string().contains("Model is currently loading"));
    }

    #[test]
    fn empty_label_list_is_an_error() {
        assert!(top_label(Vec::new()).is_err());
    }
}
