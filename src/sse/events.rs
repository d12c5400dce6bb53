//! SSE event types and definitions.
//!
//! Contains the ServerEvent enum with the event variants the assistance
//! backend sends over its streaming endpoint.

use serde::{Deserialize, Serialize};

use crate::models::StructuredContent;

/// Payload of a content event: either a plain text fragment or an already
/// structured object carrying a `components` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPayload {
    /// Structured payload sent whole in one event.
    Structured(StructuredContent),
    /// Plain text fragment; may also be a piece of a larger JSON document
    /// arriving across many events.
    Text(String),
    /// Object payload without a `components` list. The backend schema always
    /// includes one, but if it ever goes missing the summary text still
    /// renders as a fragment instead of dropping the event.
    ObjectText { content: String },
}

/// Typed SSE events from the assistance backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Session metadata sent at the start of each response.
    Metadata {
        session_id: String,
        #[serde(default)]
        agent: Option<String>,
    },
    /// A piece of the response.
    Content { content: ContentPayload },
    /// The response is finished.
    End {
        #[serde(default)]
        timestamp: Option<String>,
    },
    /// Backend-reported failure; `message` is already user-facing.
    Error {
        #[serde(default)]
        error: Option<String>,
        message: String,
    },
}

impl ServerEvent {
    /// Returns the event type name as a string for debugging purposes.
    pub fn event_type_name(&self) -> &'static str {
        match self {
            ServerEvent::Metadata { .. } => "metadata",
            ServerEvent::Content { .. } => "content",
            ServerEvent::End { .. } => "end",
            ServerEvent::Error { .. } => "error",
        }
    }
}

/// Errors that can occur during SSE decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum SseParseError {
    /// Invalid JSON in an event block's data payload.
    InvalidJson { source: String },
}

impl std::fmt::Display for SseParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SseParseError::InvalidJson { source } => {
                write!(f, "Invalid JSON in event data: {}", source)
            }
        }
    }
}

impl std::error::Error for SseParseError {}
