//! Wire and transcript data types.
//!
//! # Module structure
//! - `agent` - Backend agent routing identities and badge labels
//! - `component` - Structured UI components carried by agent responses
//! - `message` - Transcript messages with streaming accumulation
//! - `request` - Request bodies sent to the backend
//! - `response` - Non-streaming response body

mod agent;
mod component;
mod message;
mod request;
mod response;

pub use agent::Agent;
pub use component::{AlertLevel, StructuredContent, UIComponent};
pub use message::{Message, Role};
pub use request::ChatRequest;
pub use response::ChatResponse;
