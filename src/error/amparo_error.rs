//! Unified error type for the Amparo widget.
//!
//! `AmparoError` consolidates the domain-specific error types into a single
//! enum with uniform categorization, retry logic and user messaging.

use std::fmt;

use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::stream::StreamError;

/// Unified error type for the Amparo widget.
#[derive(Debug)]
pub enum AmparoError {
    /// Network-related errors (connections, HTTP, timeouts).
    Network(NetworkError),

    /// Stream/SSE processing errors.
    Stream(StreamError),

    /// Host configuration errors.
    Config { message: String },

    /// Wrapped error with additional context.
    WithContext {
        error: Box<AmparoError>,
        context: ErrorContext,
    },
}

impl AmparoError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            AmparoError::Network(_) => ErrorCategory::Network,
            AmparoError::Stream(err) => match err {
                StreamError::ConnectionLost { .. } => ErrorCategory::Network,
                StreamError::BackendReported { .. } => ErrorCategory::Server,
                StreamError::SendInFlight => ErrorCategory::User,
                StreamError::InvalidEvent { .. } | StreamError::Other { .. } => {
                    ErrorCategory::Client
                }
            },
            AmparoError::Config { .. } => ErrorCategory::Configuration,
            AmparoError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            AmparoError::Network(err) => err.is_retryable(),
            AmparoError::Stream(err) => err.is_retryable(),
            AmparoError::Config { .. } => false,
            AmparoError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Get a user-friendly error message in the widget's language.
    pub fn user_message(&self) -> String {
        match self {
            AmparoError::Network(err) => err.user_message(),
            AmparoError::Stream(err) => err.user_message(),
            AmparoError::Config { .. } => {
                "El asistente no est\u{e1} configurado correctamente. Por favor, \
                 contacta al administrador del sitio."
                    .to_string()
            }
            AmparoError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AmparoError::Network(err) => err.error_code(),
            AmparoError::Stream(err) => err.error_code(),
            AmparoError::Config { .. } => "E_CONFIG",
            AmparoError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        AmparoError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            AmparoError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the inner error without context.
    pub fn inner(&self) -> &AmparoError {
        match self {
            AmparoError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }
}

impl fmt::Display for AmparoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmparoError::Network(err) => write!(f, "{}", err),
            AmparoError::Stream(err) => write!(f, "{}", err),
            AmparoError::Config { message } => write!(f, "Configuration error: {}", message),
            AmparoError::WithContext { error, context } => {
                write!(f, "{} ({})", error, context)
            }
        }
    }
}

impl std::error::Error for AmparoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AmparoError::Network(err) => Some(err),
            AmparoError::Stream(err) => Some(err),
            AmparoError::Config { .. } => None,
            AmparoError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for AmparoError {
    fn from(err: NetworkError) -> Self {
        AmparoError::Network(err)
    }
}

impl From<StreamError> for AmparoError {
    fn from(err: StreamError) -> Self {
        AmparoError::Stream(err)
    }
}

impl From<serde_json::Error> for AmparoError {
    fn from(err: serde_json::Error) -> Self {
        AmparoError::Stream(StreamError::InvalidEvent {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for AmparoError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        AmparoError::Network(super::network::classify_reqwest_error(&err, &url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_mapping() {
        let err: AmparoError = NetworkError::Timeout {
            operation: "test".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Network);

        let err: AmparoError = StreamError::SendInFlight.into();
        assert_eq!(err.category(), ErrorCategory::User);

        let err: AmparoError = StreamError::BackendReported {
            detail: None,
            message: "msg".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Server);

        let err = AmparoError::Config {
            message: "bad url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: AmparoError = json_err.into();
        assert!(matches!(
            err,
            AmparoError::Stream(StreamError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn test_context_attachment() {
        let err: AmparoError = StreamError::ConnectionLost {
            message: "lost".to_string(),
        }
        .into();
        let with_ctx = err.with_context(
            ErrorContext::new("send_message").with_session_id("sess-1"),
        );

        assert!(with_ctx.context().is_some());
        assert_eq!(with_ctx.context().unwrap().operation, "send_message");

        // Inner error properties still visible through the wrapper
        assert_eq!(with_ctx.category(), ErrorCategory::Network);
        assert!(with_ctx.is_retryable());
        assert_eq!(with_ctx.error_code(), "E_STREAM_CONN");
        assert!(matches!(
            with_ctx.inner(),
            AmparoError::Stream(StreamError::ConnectionLost { .. })
        ));
    }

    #[test]
    fn test_all_variants_have_user_messages() {
        let errors: Vec<AmparoError> = vec![
            NetworkError::ConnectionFailed {
                url: "u".to_string(),
                message: "m".to_string(),
            }
            .into(),
            StreamError::SendInFlight.into(),
            AmparoError::Config {
                message: "m".to_string(),
            },
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
            assert!(!err.error_code().is_empty());
        }
    }
}
