//! Non-streaming response body.

use serde::{Deserialize, Serialize};

/// Response from the non-streaming chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// The agent's full reply.
    pub response: String,
    /// Session ID assigned or confirmed by the backend.
    pub session_id: String,
    /// Name of the agent that produced the reply.
    #[serde(default)]
    pub agent: Option<String>,
    /// Server-side timestamp, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
