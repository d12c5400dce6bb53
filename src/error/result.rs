//! Result type alias for Amparo operations.

use super::amparo_error::AmparoError;
use super::context::ErrorContext;

/// Type alias for Results using AmparoError.
pub type AmparoResult<T> = Result<T, AmparoError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> AmparoResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> AmparoResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T> ResultExt<T> for AmparoResult<T> {
    fn context(self, ctx: ErrorContext) -> AmparoResult<T> {
        self.map_err(|e| e.with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> AmparoResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for Result<T, reqwest::Error> {
    fn context(self, ctx: ErrorContext) -> AmparoResult<T> {
        self.map_err(|e| {
            let err: AmparoError = e.into();
            err.with_context(ctx)
        })
    }

    fn with_context<F>(self, f: F) -> AmparoResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| {
            let err: AmparoError = e.into();
            err.with_context(f())
        })
    }
}

impl<T> ResultExt<T> for Result<T, serde_json::Error> {
    fn context(self, ctx: ErrorContext) -> AmparoResult<T> {
        self.map_err(|e| {
            let err: AmparoError = e.into();
            err.with_context(ctx)
        })
    }

    fn with_context<F>(self, f: F) -> AmparoResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| {
            let err: AmparoError = e.into();
            err.with_context(f())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AmparoError, StreamError};

    #[test]
    fn test_context_extension() {
        let result: AmparoResult<i32> = Err(AmparoError::Stream(StreamError::SendInFlight));

        let with_ctx = result.context(ErrorContext::new("test_operation"));

        assert!(with_ctx.is_err());
        let err = with_ctx.unwrap_err();
        assert!(err.context().is_some());
        assert_eq!(err.context().unwrap().operation, "test_operation");
    }

    #[test]
    fn test_context_extension_preserves_ok() {
        let result: AmparoResult<i32> = Ok(42);
        let with_ctx = result.context(ErrorContext::new("test_operation"));
        assert_eq!(with_ctx.unwrap(), 42);
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let result: AmparoResult<i32> = Ok(42);
        let mut called = false;

        let with_ctx = result.with_context(|| {
            called = true;
            ErrorContext::new("test")
        });

        assert!(with_ctx.is_ok());
        assert!(!called);
    }

    #[test]
    fn test_context_from_json_error() {
        let json_result: Result<serde_json::Value, serde_json::Error> =
            serde_json::from_str("not json");

        let with_ctx = json_result.context(ErrorContext::new("decode_event"));

        assert!(with_ctx.is_err());
        let err = with_ctx.unwrap_err();
        assert_eq!(err.context().unwrap().operation, "decode_event");
    }
}
