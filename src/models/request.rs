//! Request bodies sent to the backend.

use serde::{Deserialize, Serialize};

/// Request structure for both the streaming and non-streaming chat calls.
///
/// `session_id` is serialized as `null` when absent; the backend generates
/// one and reports it back in a metadata event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    /// The user's message.
    pub message: String,
    /// Session ID correlating this request with backend conversation state.
    pub session_id: Option<String>,
}

impl ChatRequest {
    /// Create a request for a conversation without a session yet.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: None,
        }
    }

    /// Create a request continuing an existing session.
    pub fn with_session(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: Some(session_id.into()),
        }
    }
}
