use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_ENV: &str = "GEMINI_API_KEY";

// Fixed sampling policy: focused prose with moderate diversity.
const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.8;
const TOP_K: u32 = 40;

/// Client for Google's Gemini generative API.
///
/// The model name is validated against the backend's model listing at
/// construction time; an unrecognized name is a fatal configuration error.
#[derive(Debug)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub async fn connect(api_key: Option<String>, model: String) -> AppResult<Self> {
        Self::connect_to(DEFAULT_BASE_URL, api_key, model).await
    }

    pub(crate) async fn connect_to(
        base_url: &str,
        api_key: Option<String>,
        model: String,
    ) -> AppResult<Self> {
        let api_key = api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "Gemini API key not configured; set it via `config init` or {API_KEY_ENV}"
                ))
            })?;

        let client = Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        };
        client.verify_model().await?;
        Ok(client)
    }

    async fn verify_model(&self) -> AppResult<()> {
        let url = format!("{}/models?key={}", self.base_url, self.api_key);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| AppError::Configuration(format!("failed to list models: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Configuration(format!(
                "model listing responded with {status}: {body}"
            )));
        }

        let listing: ListModelsResponse = response.json().await.map_err(|err| {
            AppError::Configuration(format!("failed to parse model listing: {err}"))
        })?;

        let known = listing.models.iter().any(|model| {
            model.name == self.model
                || model.name.strip_prefix("models/") == Some(self.model.as_str())
        });
        if !known {
            let available = listing
                .models
                .iter()
                .map(|model| model.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(AppError::Configuration(format!(
                "invalid model name: {}. Available models: {available}",
                self.model
            )));
        }

        debug!(model = %self.model, "model name accepted by backend");
        Ok(())
    }

    fn generate_endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl LanguageModelService for GeminiClient {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> AppResult<String> {
        let request_body = GenerateContentRequest::new(prompt, max_tokens);

        debug!(model = %self.model, max_tokens, "requesting generation");
        let response = self
            .http
            .post(self.generate_endpoint())
            .json(&request_body)
            .send()
            .await
            .map_err(|err| AppError::LanguageModel(format!("failed to call Gemini: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::LanguageModel(format!(
                "Gemini responded with {status}: {body}"
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|err| {
            AppError::LanguageModel(format!("failed to parse Gemini response: {err}"))
        })?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AppError::LanguageModel("empty response from model".to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn new(prompt: &str, max_tokens: u32) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: max_tokens,
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f64,
    top_p: f64,
    top_k: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ModelInfo {
    name: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn mock_model_listing(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    { "name": "models/gemini-2.0-flash" },
                    { "name": "models/gemini-1.5-pro" },
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn rejects_unknown_model_and_lists_alternatives() {
        let server = MockServer::start().await;
        mock_model_listing(&server).await;

        let err = GeminiClient::connect_to(
            &server.uri(),
            Some("key".to_string()),
            "no-such-model".to_string(),
        )
        .await
        .expect_err("construction should fail");

        let text = err.to_string();
        assert!(matches!(err, AppError::Configuration(_)));
        assert!(text.contains("no-such-model"));
        assert!(text.contains("gemini-2.0-flash"));
    }

    #[tokio::test]
    async fn accepts_model_listed_with_resource_prefix() {
        let server = MockServer::start().await;
        mock_model_listing(&server).await;

        let client = GeminiClient::connect_to(
            &server.uri(),
            Some("key".to_string()),
            "gemini-2.0-flash".to_string(),
        )
        .await
        .expect("construction should succeed");
        assert_eq!(client.model, "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn sends_fixed_sampling_config_and_returns_text() {
        let server = MockServer::start().await;
        mock_model_listing(&server).await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "maxOutputTokens": 300,
                    "temperature": 0.7,
                    "topP": 0.8,
                    "topK": 40,
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "Title\n\nBody." }] }
                }]
            })))
            .mount(&server)
            .await;

        let client = GeminiClient::connect_to(
            &server.uri(),
            Some("key".to_string()),
            "gemini-2.0-flash".to_string(),
        )
        .await
        .expect("connect");

        let text = client.generate("prompt", 300).await.expect("generate");
        assert_eq!(text, "Title\n\nBody.");
    }

    #[tokio::test]
    async fn surfaces_backend_failure_as_language_model_error() {
        let server = MockServer::start().await;
        mock_model_listing(&server).await;

        Mock::given(method("POST"))
            .and(path("/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = GeminiClient::connect_to(
            &server.uri(),
            Some("key".to_string()),
            "gemini-2.0-flash".to_string(),
        )
        .await
        .expect("connect");

        let err = client.generate("prompt", 300).await.expect_err("should fail");
        assert!(matches!(err, AppError::LanguageModel(_)));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
