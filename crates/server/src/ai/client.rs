//! Chat-completion client for the Hugging Face inference router
//!
//! The router speaks the OpenAI chat-completions protocol, so any compatible
//! endpoint can be configured through `LLM_API_URL`.

use async_trait::async_trait;
use ecare_core::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::config::LlmConfig;

pub const DEFAULT_API_URL: &str = "https://router.huggingface.co/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "meta-llama/Llama-3.1-8B-Instruct:novita";

const MAX_TOKENS: u32 = 500;
const TEMPERATURE: f32 = 0.5;

/// Something that turns a rendered prompt into a model answer
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint
#[derive(Clone)]
pub struct HuggingFaceClient {
    http: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for the chat-completions API
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// Response from the chat-completions API
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl HuggingFaceClient {
    /// Create a client with the given API key and endpoint settings
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key,
            api_url: config.api_url.clone(),
            model: config.model.clone(),
        })
    }

    /// Build the request body for a single-prompt completion
    pub fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    /// Send a request, single attempt
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, GatewayError> {
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Provider(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Provider(format!(
                "API error ({}): {}",
                status,
                error_message(&body)
            )));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| GatewayError::Provider(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl ChatCompletion for HuggingFaceClient {
    async fn complete(&self, prompt: &str) -> Result<String, GatewayError> {
        let request = self.build_request(prompt);
        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Sending chat completion");

        let response = self.send(&request).await?;
        first_choice_text(response)
    }
}

/// Extract the first completion's text
pub fn first_choice_text(response: ChatResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::Provider("No completion content in response".to_string()))
}

/// Pull a readable message out of a provider error body.
/// Handles `{"error": "..."}` and `{"error": {"message": "..."}}`.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<JsonValue>(body) else {
        return body.to_string();
    };

    match value.get("error") {
        Some(JsonValue::String(msg)) => msg.clone(),
        Some(err) => err
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn client() -> HuggingFaceClient {
        HuggingFaceClient::new("hf_test".to_string(), &Config::default().llm).unwrap()
    }

    #[test]
    fn test_request_body() {
        let body = serde_json::to_value(client().build_request("Explain this")).unwrap();
        assert_eq!(
            body,
            json!({
                "model": DEFAULT_MODEL,
                "messages": [{"role": "user", "content": "Explain this"}],
                "max_tokens": 500,
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_first_choice_text() {
        let response: ChatResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "First"}},
                {"index": 1, "message": {"role": "assistant", "content": "Second"}}
            ]
        }))
        .unwrap();
        assert_eq!(first_choice_text(response).unwrap(), "First");
    }

    #[test]
    fn test_empty_choices_is_provider_error() {
        let response: ChatResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(matches!(
            first_choice_text(response),
            Err(GatewayError::Provider(_))
        ));
    }

    #[test]
    fn test_error_message_shapes() {
        assert_eq!(error_message(r#"{"error": "Invalid token"}"#), "Invalid token");
        assert_eq!(
            error_message(r#"{"error": {"message": "Rate limited", "code": 429}}"#),
            "Rate limited"
        );
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }
}
