use crate::ai::{GeneratorError, TextGenerator};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// REST client for the Gemini `generateContent` endpoint. The API key is
/// taken as given; acquiring it is the caller's concern.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        base_url: Url,
        api_key: String,
        model: String,
        request_timeout: Duration,
    ) -> Result<Self, GeneratorError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| GeneratorError::Network(e.to_string()))?;
        Ok(GeminiClient {
            http,
            base_url,
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url.as_str().trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GeneratorError> {
        let payload = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}]
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeneratorError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Service(format!(
                "generateContent returned {}: {}",
                status, body
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GeneratorError::Service(e.to_string()))?;

        value
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|text| text.as_str())
            .map(|text| text.to_string())
            .ok_or(GeneratorError::EmptyResponse)
    }
}
