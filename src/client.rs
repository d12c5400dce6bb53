//! HTTP client for the assistance backend.
//!
//! Provides the streaming chat call plus the non-streaming variant, session
//! teardown and the health probe. The streaming call returns decoded server
//! events; interpretation into render instructions happens in the widget (or
//! through `interpreter::process_stream` for hosts that only want
//! instructions).

use std::collections::VecDeque;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::debug;

use crate::config::WidgetConfig;
use crate::error::{classify_reqwest_error, AmparoError, AmparoResult, NetworkError, StreamError};
use crate::models::{ChatRequest, ChatResponse};
use crate::sse::{ServerEvent, SseParser};

/// A stream of decoded server events from one chat response.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ServerEvent, AmparoError>> + Send>>;

/// Raw response body chunks before SSE framing is applied.
type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

/// Client for the assistance backend API.
pub struct BackendClient {
    /// Base URL for the backend API.
    base_url: String,
    /// Reusable HTTP client.
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a client for the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from a widget configuration.
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a chat message and stream the response as decoded events.
    ///
    /// Sends a POST to `/api/chat/stream` and returns a stream of
    /// `Result<ServerEvent, AmparoError>` items. A non-success status fails
    /// the call before any event is produced.
    pub async fn stream_chat(&self, request: &ChatRequest) -> AmparoResult<EventStream> {
        let url = format!("{}/api/chat/stream", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| AmparoError::Network(classify_reqwest_error(&e, &url)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NetworkError::HttpStatus { status, message }.into());
        }

        debug!(url = %url, "chat stream opened");

        struct EventState {
            bytes: ByteStream,
            parser: SseParser,
            pending: VecDeque<Result<ServerEvent, AmparoError>>,
            done: bool,
        }

        let state = EventState {
            bytes: Box::pin(response.bytes_stream()),
            parser: SseParser::new(),
            pending: VecDeque::new(),
            done: false,
        };

        let event_stream = stream::unfold(state, |mut st| async move {
            loop {
                if let Some(item) = st.pending.pop_front() {
                    return Some((item, st));
                }
                if st.done {
                    return None;
                }

                match st.bytes.next().await {
                    Some(Ok(chunk)) => {
                        for result in st.parser.feed(&chunk) {
                            st.pending.push_back(result.map_err(|e| {
                                StreamError::InvalidEvent {
                                    message: e.to_string(),
                                }
                                .into()
                            }));
                        }
                    }
                    Some(Err(err)) => {
                        st.done = true;
                        st.pending.push_back(Err(StreamError::ConnectionLost {
                            message: err.to_string(),
                        }
                        .into()));
                    }
                    None => {
                        st.done = true;
                        if let Some(result) = st.parser.finish() {
                            st.pending.push_back(result.map_err(|e| {
                                StreamError::InvalidEvent {
                                    message: e.to_string(),
                                }
                                .into()
                            }));
                        }
                    }
                }
            }
        });

        Ok(Box::pin(event_stream))
    }

    /// Send a chat message through the non-streaming endpoint.
    ///
    /// For hosts that cannot consume SSE; POST to `/api/chat` returning the
    /// whole reply at once.
    pub async fn send_chat(&self, request: &ChatRequest) -> AmparoResult<ChatResponse> {
        let url = format!("{}/api/chat", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| AmparoError::Network(classify_reqwest_error(&e, &url)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NetworkError::HttpStatus { status, message }.into());
        }

        response.json::<ChatResponse>().await.map_err(|e| {
            NetworkError::InvalidResponse {
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Clear the backend conversation state for a session.
    pub async fn clear_session(&self, session_id: &str) -> AmparoResult<()> {
        let url = format!("{}/api/session/{}", self.base_url, session_id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| AmparoError::Network(classify_reqwest_error(&e, &url)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(NetworkError::HttpStatus { status, message }.into());
        }

        Ok(())
    }

    /// Check if the backend is healthy and reachable.
    pub async fn health_check(&self) -> AmparoResult<bool> {
        let url = format!("{}/api/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AmparoError::Network(classify_reqwest_error(&e, &url)))?;

        Ok(response.status().is_success())
    }
}
