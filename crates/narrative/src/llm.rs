//! LLM provider contract and message types.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Speaker of a chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    #[serde(alias = "assistant")]
    Model,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One chat turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            content: content.into(),
        }
    }
}

/// Conversation sent to a provider
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LlmRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl LlmRequest {
    /// Single user turn.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            ..Default::default()
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Text generation backend
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a reply to the conversation.
    async fn generate(&self, request: &LlmRequest) -> Result<String>;

    /// Provider name.
    fn name(&self) -> &str;

    /// Model used for generation.
    fn model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role": "assistant", "content": "hi"}"#).unwrap();
        assert_eq!(msg.role, ChatRole::Model);
        assert_eq!(
            serde_json::to_value(ChatMessage::user("q")).unwrap()["role"],
            "user"
        );
    }

    #[test]
    fn test_from_prompt() {
        let request = LlmRequest::from_prompt("hello").with_temperature(0.2);
        assert_eq!(request.messages, vec![ChatMessage::user("hello")]);
        assert_eq!(request.temperature, Some(0.2));
    }
}
