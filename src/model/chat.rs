use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Speaker of a prior conversation turn
///
/// Role names are matched case-insensitively. Roles the provider does not
/// understand deserialize to `Unknown` and are not forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
    Unknown,
}

impl ChatRole {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "user" => ChatRole::User,
            "assistant" => ChatRole::Assistant,
            "system" => ChatRole::System,
            _ => ChatRole::Unknown,
        }
    }

    /// Provider role name, or `None` when the turn should be dropped
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            ChatRole::User => Some("user"),
            ChatRole::Assistant => Some("assistant"),
            ChatRole::System => Some("system"),
            ChatRole::Unknown => None,
        }
    }
}

impl<'de> Deserialize<'de> for ChatRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map_or(ChatRole::Unknown, ChatRole::from_label))
    }
}

/// One prior turn of a chat widget's conversation
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Body of `POST /v1/chat`
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
}

/// Body of `POST /v1/vision-chat`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct VisionChatRequest {
    #[serde(default)]
    pub message: String,
    /// Data URI, http(s) URL, or bare base64 image data
    pub image: Option<String>,
    /// Free-text context prepended to the message (e.g. the current page)
    pub context: Option<String>,
}

/// Successful relay response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_camel_case_history() {
        let json = r#"{
            "message": "What is drusen?",
            "conversationHistory": [
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "Hello!"}
            ]
        }"#;
        let req: ChatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.message, "What is drusen?");
        assert_eq!(req.conversation_history.len(), 2);
        assert_eq!(req.conversation_history[1].role, ChatRole::Assistant);
    }

    #[test]
    fn test_missing_fields_default() {
        let req: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(req.message.is_empty());
        assert!(req.conversation_history.is_empty());

        let req: VisionChatRequest = serde_json::from_str(r#"{"message": "x"}"#).unwrap();
        assert!(req.image.is_none());
        assert!(req.context.is_none());
    }

    #[test]
    fn test_roles_are_lenient() {
        let json = r#"[
            {"role": "System", "content": "a"},
            {"role": "USER", "content": "b"},
            {"role": "tool", "content": "c"},
            {"role": null, "content": "d"}
        ]"#;
        let turns: Vec<ChatTurn> = serde_json::from_str(json).unwrap();
        let roles: Vec<ChatRole> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::System, ChatRole::User, ChatRole::Unknown, ChatRole::Unknown]
        );
        assert_eq!(ChatRole::Unknown.as_str(), None);
    }
}
