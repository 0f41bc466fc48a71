//! LLM Client: the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: handlers never talk to the model server directly.
//! They receive an `Arc<dyn Generator>` from `AppState`; production wires in
//! `OllamaClient`, tests wire in a canned generator.
//!
//! Output is free text and is never trusted: LaTeX goes through
//! `latex::sanitize`, JSON goes through `generate_json`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GENERATE_PATH: &str = "/api/generate";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unavailable after {retries} retries")]
    Unavailable { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Per-call sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the server to constrain output to a JSON value.
    pub json: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 4096,
            json: false,
        }
    }
}

impl GenerationOptions {
    pub fn json(&self) -> Self {
        Self {
            json: true,
            ..self.clone()
        }
    }
}

/// A text-completion capability: prompt in, free text out.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions)
        -> Result<String, LlmError>;
}

/// Calls the generator in JSON mode and deserializes the reply.
/// The prompt must instruct the model to return valid JSON.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn Generator,
    prompt: &str,
    options: &GenerationOptions,
) -> Result<T, LlmError> {
    let text = generator.generate(prompt, &options.json()).await?;

    // Models wrap JSON in fences even in JSON mode
    let text = strip_json_fences(&text);
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    serde_json::from_str(text).map_err(LlmError::Parse)
}

// ────────────────────────────────────────────────────────────────────────────
// Ollama-compatible HTTP backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    options: SamplingOptions,
}

#[derive(Debug, Serialize)]
struct SamplingOptions {
    temperature: f32,
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ServerError {
    error: String,
}

/// Generator backed by an Ollama-compatible `/api/generate` endpoint.
/// Retries connection failures, 429 and 5xx with exponential backoff.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl Generator for OllamaClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        let url = format!("{}{GENERATE_PATH}", self.base_url);
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format: options.json.then_some("json"),
            options: SamplingOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
            },
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM server returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ServerError>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generated: GenerateResponse = response.json().await?;

            debug!(
                "LLM call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
                self.model, generated.prompt_eval_count, generated.eval_count
            );

            if generated.response.trim().is_empty() {
                return Err(LlmError::EmptyContent);
            }
            return Ok(generated.response);
        }

        Err(last_error.unwrap_or(LlmError::Unavailable {
            retries: MAX_RETRIES,
        }))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test doubles
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub mod fakes {
    use std::sync::Mutex;

    use super::*;

    /// Replies with a fixed text, or fails like an unreachable server.
    /// Records every prompt it receives.
    pub struct CannedGenerator {
        reply: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl CannedGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Generator for CannedGenerator {
        async fn generate(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().ok_or(LlmError::Api {
                status: 503,
                message: "model server unavailable".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::fakes::CannedGenerator;
    use super::*;

    async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> OllamaClient {
        OllamaClient::new(base_url, "mistral:latest", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_json_options_keep_sampling_parameters() {
        let options = GenerationOptions {
            temperature: 0.2,
            max_tokens: 512,
            json: false,
        };
        let json = options.json();
        assert!(json.json);
        assert_eq!(json.temperature, 0.2);
        assert_eq!(json.max_tokens, 512);
    }

    #[tokio::test]
    async fn test_generate_sends_ollama_request() {
        let router = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "mistral:latest");
                assert_eq!(body["stream"], false);
                assert!(body.get("format").is_none());
                assert_eq!(body["options"]["num_predict"], 4096);
                let prompt = body["prompt"].as_str().unwrap_or_default().to_string();
                Json(json!({ "response": format!("echo: {prompt}"), "eval_count": 3 }))
            }),
        );
        let base_url = spawn_server(router).await;

        let text = client(&base_url)
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(text, "echo: hello");
    }

    #[tokio::test]
    async fn test_json_mode_sets_format() {
        let router = Router::new().route(
            "/api/generate",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["format"], "json");
                Json(json!({ "response": "```json\n{\"answer\": 42}\n```" }))
            }),
        );
        let base_url = spawn_server(router).await;
        let client = client(&base_url);

        let value: Value = generate_json(&client, "q", &GenerationOptions::default())
            .await
            .unwrap();
        assert_eq!(value["answer"], 42);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": "model 'mistral:latest' not found" })),
                )
            }),
        );
        let base_url = spawn_server(router).await;

        let err = client(&base_url)
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model 'mistral:latest' not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({ "response": "  " })) }),
        );
        let base_url = spawn_server(router).await;

        let err = client(&base_url)
            .generate("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_generate_json_rejects_prose() {
        let generator = CannedGenerator::replying("Sure! Here is your analysis.");
        let result: Result<Value, _> =
            generate_json(&generator, "q", &GenerationOptions::default()).await;
        assert!(matches!(result, Err(LlmError::Parse(_))));
    }
}
