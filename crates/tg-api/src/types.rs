//! Telegram Bot API types
//!
//! Only the fields the gateway actually reads are modeled; everything else in
//! the payload is ignored during deserialization.

use serde::{Deserialize, Serialize};

/// Response envelope returned by every Bot API method.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One inbound update. Update kinds other than plain messages (edited
/// messages, callback queries, ...) deserialize with `message: None` and are
/// skipped by the routers, but their `update_id` still advances the poll
/// offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

/// An inbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

/// Message sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

impl User {
    /// The `@`-prefixed handle, if the account has a username.
    pub fn handle(&self) -> Option<String> {
        self.username.as_ref().map(|u| format!("@{u}"))
    }
}

/// The chat a message belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_deserialization() {
        let payload = r#"{
            "update_id": 1001,
            "message": {
                "message_id": 7,
                "from": {"id": 200, "username": "bob", "first_name": "Bob"},
                "chat": {"id": 200},
                "text": "/start"
            }
        }"#;

        let update: Update = serde_json::from_str(payload).unwrap();
        assert_eq!(update.update_id, 1001);

        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 200);
        assert_eq!(message.text.as_deref(), Some("/start"));
        assert_eq!(message.from.unwrap().handle().as_deref(), Some("@bob"));
    }

    #[test]
    fn test_unknown_update_kind_keeps_id() {
        // An edited_message update carries no "message" field.
        let payload = r#"{"update_id": 1002, "edited_message": {"message_id": 8}}"#;

        let update: Update = serde_json::from_str(payload).unwrap();
        assert_eq!(update.update_id, 1002);
        assert!(update.message.is_none());
    }

    #[test]
    fn test_error_envelope_deserialization() {
        let payload = r#"{"ok": false, "error_code": 409, "description": "Conflict"}"#;

        let resp: ApiResponse<Vec<Update>> = serde_json::from_str(payload).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error_code, Some(409));
        assert_eq!(resp.description.as_deref(), Some("Conflict"));
        assert!(resp.result.is_none());
    }

    #[test]
    fn test_handle_requires_username() {
        let user = User {
            id: 1,
            username: None,
            first_name: Some("Ann".to_string()),
        };
        assert!(user.handle().is_none());
    }
}
