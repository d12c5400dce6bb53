//! Transcript messages.
//!
//! The widget keeps an in-memory transcript so a host can re-render the full
//! conversation at any time, including the assistant message currently being
//! streamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::agent::Agent;
use super::component::UIComponent;

/// Role of a message in the conversation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the widget transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Locally generated message ID.
    pub id: String,
    /// Role of the message sender.
    pub role: Role,
    /// Final content of the message.
    pub content: String,
    /// Structured components, when the assistant answered with them.
    pub components: Vec<UIComponent>,
    /// Agent that produced the message, for the routing badge.
    pub agent: Option<Agent>,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
    /// Whether the message is currently being streamed.
    pub is_streaming: bool,
    /// Best-effort text accumulated so far during streaming.
    pub partial_content: String,
}

impl Message {
    /// Create a finished user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::User,
            content: content.into(),
            components: Vec::new(),
            agent: None,
            created_at: Utc::now(),
            is_streaming: false,
            partial_content: String::new(),
        }
    }

    /// Create a finished assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: Role::Assistant,
            content: content.into(),
            components: Vec::new(),
            agent: None,
            created_at: Utc::now(),
            is_streaming: false,
            partial_content: String::new(),
        }
    }

    /// Create an empty assistant message that will fill in as the stream
    /// produces instructions.
    pub fn streaming_placeholder() -> Self {
        let mut msg = Self::assistant("");
        msg.is_streaming = true;
        msg
    }

    /// Update the best-effort text shown while streaming.
    pub fn set_partial(&mut self, text: impl Into<String>) {
        self.partial_content = text.into();
    }

    /// Replace the message with structured content; this ends streaming.
    pub fn replace_with_structured(
        &mut self,
        summary: Option<String>,
        components: Vec<UIComponent>,
    ) {
        self.content = summary.unwrap_or_default();
        self.components = components;
        self.partial_content.clear();
        self.is_streaming = false;
    }

    /// Promote the accumulated partial text to final content.
    pub fn finalize(&mut self) {
        if self.is_streaming {
            self.content = std::mem::take(&mut self.partial_content);
            self.is_streaming = false;
        }
    }

    /// The text a host should display right now: partial content while
    /// streaming, final content otherwise.
    pub fn display_text(&self) -> &str {
        if self.is_streaming {
            &self.partial_content
        } else {
            &self.content
        }
    }

    /// Whether this message carries structured components.
    pub fn is_structured(&self) -> bool {
        !self.components.is_empty()
    }
}
