//! Amparo - chat widget client for the Defensa Publica assistance agent
//!
//! This library exposes the streaming-response interpreter, backend client,
//! component renderer and per-instance widget context for use by hosts and
//! integration tests.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod models;
pub mod render;
pub mod sse;
pub mod widget;
