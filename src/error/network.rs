//! Network-related error types.
//!
//! Errors raised while talking to the backend over HTTP: connection and DNS
//! failures, timeouts, TLS problems, and non-success status codes.

use std::fmt;

/// Network-specific error variants.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed {
        url: String,
        message: String,
    },

    /// Request timed out.
    Timeout {
        operation: String,
    },

    /// TLS/SSL error.
    TlsError {
        message: String,
    },

    /// HTTP status error (non-2xx response).
    HttpStatus {
        status: u16,
        message: String,
    },

    /// Response body could not be decoded.
    InvalidResponse {
        message: String,
    },

    /// Generic network error.
    Other {
        message: String,
    },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::TlsError { .. } => false,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// Shown directly in the chat transcript, so uses the widget's language.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. }
            | NetworkError::Timeout { .. }
            | NetworkError::TlsError { .. }
            | NetworkError::Other { .. } => {
                "Disculpa, estoy teniendo problemas de conexi\u{f3}n. Por favor, \
                 intenta nuevamente o contacta al 0800-555-JUSTICIA."
                    .to_string()
            }
            NetworkError::HttpStatus { status, .. } => match *status {
                429 => "Hay demasiadas consultas en este momento. Por favor, \
                        espera un momento e intenta nuevamente."
                    .to_string(),
                500..=599 => "El servicio est\u{e1} experimentando problemas. \
                              Por favor, intenta nuevamente m\u{e1}s tarde."
                    .to_string(),
                _ => "Disculpa, no pude procesar tu consulta. Por favor, \
                      intenta nuevamente."
                    .to_string(),
            },
            NetworkError::InvalidResponse { .. } => {
                "Disculpa, recib\u{ed} una respuesta inv\u{e1}lida del servicio. \
                 Por favor, intenta nuevamente."
                    .to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::TlsError { .. } => "E_NET_TLS",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout { operation } => {
                write!(f, "{} timed out", operation)
            }
            NetworkError::TlsError { message } => {
                write!(f, "TLS error: {}", message)
            }
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => {
                write!(f, "Invalid response: {}", message)
            }
            NetworkError::Other { message } => {
                write!(f, "Network error: {}", message)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

/// Classify a reqwest error into a NetworkError.
pub fn classify_reqwest_error(err: &reqwest::Error, url: &str) -> NetworkError {
    if err.is_connect() {
        NetworkError::ConnectionFailed {
            url: url.to_string(),
            message: err.to_string(),
        }
    } else if err.is_timeout() {
        NetworkError::Timeout {
            operation: "HTTP request".to_string(),
        }
    } else if err.is_status() {
        NetworkError::HttpStatus {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            message: err.to_string(),
        }
    } else if err.is_decode() {
        NetworkError::InvalidResponse {
            message: err.to_string(),
        }
    } else {
        NetworkError::Other {
            message: err.to_string(),
        }
    }
}
