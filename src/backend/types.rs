use serde::{Deserialize, Serialize};

/// Message in a backend conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Message role on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Request body for the Messages API
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
}

/// Response body from the Messages API
#[derive(Debug, Clone, Deserialize)]
pub struct MessagesResponse {
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// One block of generated content
#[derive(Debug, Clone, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub text: String,
}

/// Token usage information
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

impl MessagesRequest {
    /// Create a request with a single user message
    pub fn new(model: impl Into<String>, max_tokens: u32, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            max_tokens,
            system: None,
            messages,
        }
    }

    /// Set the system instruction
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

impl MessagesResponse {
    /// First text block of the completion, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .map(|b| b.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let msg = ChatMessage::user("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "user");

        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn test_request_omits_missing_system() {
        let req = MessagesRequest::new("test-model", 100, vec![ChatMessage::user("x")]);
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("system").is_none());

        let req = req.with_system("be brief");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["system"], "be brief");
    }

    #[test]
    fn test_first_text_skips_non_text_blocks() {
        let resp: MessagesResponse = serde_json::from_value(serde_json::json!({
            "content": [
                {"type": "tool_use", "text": ""},
                {"type": "text", "text": "the completion"}
            ]
        }))
        .unwrap();
        assert_eq!(resp.first_text(), Some("the completion"));
    }

    #[test]
    fn test_first_text_empty_content() {
        let resp: MessagesResponse =
            serde_json::from_value(serde_json::json!({ "content": [] })).unwrap();
        assert_eq!(resp.first_text(), None);
    }
}
