use serde::{Deserialize, Serialize};

use crate::domain::chat::ChatMessage;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessageDto {
    pub role: String,
    pub content: String,
}

impl From<&ChatMessage> for ChatMessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

/// Body of `POST /assistant/chat`; the backend holds the completion-API
/// credential and proxies the call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessageDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}
