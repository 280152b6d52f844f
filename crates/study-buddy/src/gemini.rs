//! Client for the Gemini `generateContent` API.
//!
//! The API is treated as an opaque text oracle: one prompt in, one block of
//! markdown-ish text out. Handlers depend on the [`TextGenerator`] trait so
//! they can be exercised without the network.

use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;

use crate::config::Config;

/// Errors from a single generation call.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The API answered with a non-success status.
    #[error("Gemini API returned status {status}")]
    Upstream {
        status: u16,
        details: serde_json::Value,
    },

    /// The API answered 2xx but without candidate text.
    #[error("unexpected response format from Gemini API")]
    UnexpectedFormat,

    /// The request could not be sent or the body could not be read.
    #[error("error calling Gemini API: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// reqwest-backed Gemini client.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiClient {
    /// Create a client for the model and endpoint named in `config`.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.gemini_api_base, config.gemini_model
            ),
            api_key: config.gemini_api_key.clone(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_output_tokens,
            },
        };

        // The key travels in the query string, so strip URLs from errors.
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", &self.api_key)])
            .json(&body)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            let details = serde_json::from_str(&text)
                .unwrap_or_else(|_| serde_json::Value::String(text.clone()));
            tracing::error!(status = status.as_u16(), details = %details, "Gemini API error response");
            return Err(GenerateError::Upstream {
                status: status.as_u16(),
                details,
            });
        }

        let data: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(error = %e, "Gemini API returned invalid JSON");
            GenerateError::UnexpectedFormat
        })?;

        extract_text(&data).map(str::to_string).ok_or_else(|| {
            tracing::error!(response = %data, "unexpected response format from Gemini API");
            GenerateError::UnexpectedFormat
        })
    }
}

/// Pull `candidates[0].content.parts[0].text` out of a response body.
fn extract_text(data: &serde_json::Value) -> Option<&str> {
    data.pointer("/candidates/0/content/parts/0/text")
        .and_then(serde_json::Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    const PATH: &str = "/models/gemini-test:generateContent";

    fn test_config(base: &str) -> Config {
        Config {
            bind_addr: "127.0.0.1:0".to_string(),
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-test".to_string(),
            gemini_api_base: base.to_string(),
            temperature: 0.7,
            max_output_tokens: 1000,
            request_timeout: Duration::from_secs(5),
            static_dir: None,
            plan_cache_ttl: Duration::ZERO,
        }
    }

    #[test]
    fn extract_text_happy_path() {
        let data = json!({"candidates":[{"content":{"parts":[{"text":"hello"}]}}]});
        assert_eq!(extract_text(&data), Some("hello"));
    }

    #[test]
    fn extract_text_missing_parts() {
        assert_eq!(extract_text(&json!({"candidates":[]})), None);
        assert_eq!(extract_text(&json!({"candidates":[{"content":{}}]})), None);
        assert_eq!(
            extract_text(&json!({"candidates":[{"content":{"parts":[{"text":7}]}}]})),
            None
        );
    }

    #[test]
    fn debug_redacts_key() {
        let client = GeminiClient::new(&test_config("http://localhost")).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-key"));
    }

    #[tokio::test]
    async fn generate_sends_prompt_and_returns_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_body(Matcher::PartialJson(json!({
                "contents": [{"parts": [{"text": "make a plan"}]}],
                "generationConfig": {"maxOutputTokens": 1000}
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"{"candidates":[{"content":{"parts":[{"text":"# Week 1"}]}}]}"##)
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(&server.url())).unwrap();
        let text = client.generate("make a plan").await.unwrap();

        assert_eq!(text, "# Week 1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn generate_reports_upstream_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error":{"code":429,"message":"quota"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(&server.url())).unwrap();
        let err = client.generate("p").await.unwrap_err();

        match err {
            GenerateError::Upstream { status, details } => {
                assert_eq!(status, 429);
                assert_eq!(details["error"]["message"], "quota");
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn generate_keeps_non_json_error_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(&server.url())).unwrap();
        let err = client.generate("p").await.unwrap_err();

        assert!(matches!(
            err,
            GenerateError::Upstream { status: 503, ref details } if details == "overloaded"
        ));
    }

    #[tokio::test]
    async fn generate_rejects_missing_candidates() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#)
            .create_async()
            .await;

        let client = GeminiClient::new(&test_config(&server.url())).unwrap();
        let err = client.generate("p").await.unwrap_err();

        assert!(matches!(err, GenerateError::UnexpectedFormat));
    }

    #[tokio::test]
    async fn generate_transport_error_hides_key() {
        // Nothing listens on port 9 of localhost.
        let client = GeminiClient::new(&test_config("http://127.0.0.1:9")).unwrap();
        let err = client.generate("p").await.unwrap_err();

        assert!(matches!(err, GenerateError::Transport(_)));
        assert!(!err.to_string().contains("test-key"));
    }
}
