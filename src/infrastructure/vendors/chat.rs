//! Chat completion (Together.ai, OpenAI compatible)

use serde::{Deserialize, Serialize};

use super::{Auth, VendorClient, VendorRequest, VendorResult};
use crate::application::errors::{Capability, VendorError};
use crate::infrastructure::config::ChatVendorConfig;

/// Chat message sent to the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Role: "system" or "user"
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }
}

/// API request structure
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

/// API response structure, only the fields we read
#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Build the completion request for one question
pub fn completion_request(config: &ChatVendorConfig, api_key: &str, question: &str) -> VendorRequest {
    let body = ChatRequest {
        model: &config.model,
        messages: vec![
            ChatMessage::system(config.system_prompt.as_str()),
            ChatMessage::user(question),
        ],
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    };

    VendorRequest::post(Capability::Chat, config.url.as_str())
        .with_auth(Auth::Bearer(api_key.to_string()))
        .with_json(serde_json::to_value(&body).unwrap_or_default())
}

fn first_completion(response: ChatResponse) -> VendorResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| VendorError::unavailable(Capability::Chat, "no completion in response"))
}

impl VendorClient {
    /// Ask the model a single question, no history
    pub async fn chat_completion(&self, api_key: &str, question: &str) -> VendorResult<String> {
        let request = completion_request(&self.config().vendors.chat, api_key, question);
        let response: ChatResponse = self.execute_json(request).await?;
        let content = first_completion(response)?;

        tracing::info!(operation = "chat", chars = content.chars().count(), "Completion received");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_model_and_messages() {
        let config = ChatVendorConfig::default();
        let request = completion_request(&config, "key-1", "What is DeFi?");

        assert_eq!(request.auth, Auth::Bearer("key-1".to_string()));
        let body = request.body.expect("json body");
        assert_eq!(body["model"], "meta-llama/Llama-3-70b-chat-hf");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "What is DeFi?");
        assert!((body["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn first_choice_is_used() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"first"}},{"message":{"content":"second"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_completion(response).unwrap(), "first");
    }

    #[test]
    fn missing_choices_is_unavailable() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(first_completion(response), Err(VendorError::Unavailable { .. })));

        let response: ChatResponse = serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert!(first_completion(response).is_err());
    }
}
