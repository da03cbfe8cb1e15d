//! Role-tagged messages for the message-array wire shapes
//!
//! Chat-completions style providers (OpenAI, OpenRouter, NVIDIA) take the
//! system instruction as its own message; Anthropic takes only the user turn.

use serde::{Deserialize, Serialize};

/// Who a message is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
}

/// One entry of a `messages` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// System instruction followed by the user prompt
    pub fn exchange(system: impl Into<String>, prompt: impl Into<String>) -> Vec<Self> {
        vec![Self::system(system), Self::user(prompt)]
    }
}
