//! Streaming-related error types.
//!
//! Errors that occur while consuming the SSE response stream: framing and
//! decoding problems, backend-reported failures, and widget-side send gating.

use std::fmt;

/// Stream-specific error variants.
#[derive(Debug, Clone)]
pub enum StreamError {
    /// Stream connection was lost unexpectedly.
    ConnectionLost {
        message: String,
    },

    /// Invalid JSON in an event block.
    InvalidEvent {
        message: String,
    },

    /// Backend reported an error via the SSE stream.
    BackendReported {
        detail: Option<String>,
        message: String,
    },

    /// A send was attempted while another one is still in flight.
    SendInFlight,

    /// Generic stream error.
    Other {
        message: String,
    },
}

impl StreamError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StreamError::ConnectionLost { .. })
    }

    /// Get a user-friendly error message.
    ///
    /// These strings are shown directly in the chat transcript, so they use
    /// the widget's language (Spanish) and tone.
    pub fn user_message(&self) -> String {
        match self {
            StreamError::ConnectionLost { .. } => {
                "Disculpa, estoy teniendo problemas de conexi\u{f3}n. Por favor, \
                 intenta nuevamente o contacta al 0800-555-JUSTICIA."
                    .to_string()
            }
            StreamError::InvalidEvent { .. } => {
                "Disculpa, recib\u{ed} una respuesta que no pude interpretar. \
                 Por favor, intenta nuevamente."
                    .to_string()
            }
            // The backend composes its own user-facing message for error events.
            StreamError::BackendReported { message, .. } => message.clone(),
            StreamError::SendInFlight => {
                "Espera a que termine la respuesta actual antes de enviar otra consulta."
                    .to_string()
            }
            StreamError::Other { .. } => {
                "Disculpa, ocurri\u{f3} un error inesperado. Por favor, intenta nuevamente."
                    .to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::ConnectionLost { .. } => "E_STREAM_CONN",
            StreamError::InvalidEvent { .. } => "E_STREAM_JSON",
            StreamError::BackendReported { .. } => "E_STREAM_BACKEND",
            StreamError::SendInFlight => "E_STREAM_BUSY",
            StreamError::Other { .. } => "E_STREAM_OTHER",
        }
    }
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::ConnectionLost { message } => {
                write!(f, "Stream connection lost: {}", message)
            }
            StreamError::InvalidEvent { message } => {
                write!(f, "Invalid event JSON: {}", message)
            }
            StreamError::BackendReported { detail, message } => match detail {
                Some(d) => write!(f, "Backend error [{}]: {}", d, message),
                None => write!(f, "Backend error: {}", message),
            },
            StreamError::SendInFlight => {
                write!(f, "A send is already in flight for this widget")
            }
            StreamError::Other { message } => {
                write!(f, "Stream error: {}", message)
            }
        }
    }
}

impl std::error::Error for StreamError {}
