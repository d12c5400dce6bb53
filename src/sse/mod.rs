//! SSE (Server-Sent Events) stream parser
//!
//! Parses the SSE format used by the assistance backend's streaming API:
//! - `data: <json>` - data payload line
//! - Empty line - signals end of event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `events` - Event type definitions (ServerEvent, ContentPayload, SseParseError)
//! - `parser` - Byte-fed parsing logic (SseParser)

mod events;
mod parser;

pub use events::{ContentPayload, ServerEvent, SseParseError};
pub use parser::SseParser;
