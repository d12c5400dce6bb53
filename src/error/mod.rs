//! Unified error handling for the Amparo widget.
//!
//! This module provides:
//!
//! - **Error Categories**: High-level classification for handling decisions
//! - **Domain-specific Errors**: Network and Stream errors
//! - **Unified Error Type**: `AmparoError` consolidates all error types
//! - **Error Context**: Debugging information attached to errors
//! - **Result Type Alias**: `AmparoResult<T>` for consistent return types
//!
//! All `user_message()` strings are user-facing and written in the widget's
//! language (Spanish); `Display` impls stay in English for logs.

mod amparo_error;
mod category;
mod context;
mod network;
mod result;
mod stream;

pub use amparo_error::AmparoError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::{classify_reqwest_error, NetworkError};
pub use result::{AmparoResult, ResultExt};
pub use stream::StreamError;
