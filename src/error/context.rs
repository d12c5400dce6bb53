//! Error context for enriched error information.
//!
//! Context structures attached to errors provide additional debugging
//! information: which operation failed, for which session, and when.

use chrono::{DateTime, Utc};
use std::fmt;

/// Context information attached to errors for debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Human-readable description of the operation that failed.
    pub operation: String,

    /// Session ID if the error occurred within a conversation.
    pub session_id: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Optional component/module where the error originated.
    pub component: Option<String>,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            session_id: None,
            timestamp: Utc::now(),
            component: None,
        }
    }

    /// Set the session ID for this context.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Set the component for this context.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation={}", self.operation)?;
        if let Some(ref session_id) = self.session_id {
            write!(f, " session={}", session_id)?;
        }
        if let Some(ref component) = self.component {
            write!(f, " component={}", component)?;
        }
        Ok(())
    }
}
