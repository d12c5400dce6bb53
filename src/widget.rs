//! Conversation state for a chat widget host.
//!
//! `ChatWidget` owns the transcript, the backend session identity and the
//! in-flight guard. It drives the HTTP client and the stream interpreter, and
//! reports each render instruction to the host through a callback so any
//! frontend can repaint incrementally.

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::client::BackendClient;
use crate::config::WidgetConfig;
use crate::error::{AmparoError, AmparoResult, ErrorContext, ResultExt, StreamError};
use crate::interpreter::{RenderInstruction, StreamInterpreter};
use crate::models::{Agent, ChatRequest, Message, UIComponent};

/// Stateful chat conversation bound to one backend.
pub struct ChatWidget {
    config: WidgetConfig,
    client: BackendClient,
    /// Conversation history, oldest first. Seeded with the welcome message.
    transcript: Vec<Message>,
    /// Backend session identifier, learned from metadata or a non-streaming
    /// reply.
    session_id: Option<String>,
    /// Agent that handled the most recent reply.
    agent: Option<Agent>,
    /// Guard against overlapping sends.
    in_flight: bool,
}

impl ChatWidget {
    /// Create a widget from a configuration. The transcript starts with the
    /// configured welcome message.
    pub fn new(config: WidgetConfig) -> Self {
        let client = BackendClient::from_config(&config);
        let welcome = Message::assistant(config.welcome_message.clone());
        Self {
            config,
            client,
            transcript: vec![welcome],
            session_id: None,
            agent: None,
            in_flight: false,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Agent that handled the most recent reply.
    pub fn active_agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight
    }

    /// Send a message and stream the reply, reporting each render
    /// instruction to `on_instruction` as it arrives.
    ///
    /// Empty input is ignored. A second send while one is in flight fails
    /// with `StreamError::SendInFlight`. Transport failures do not fail the
    /// call: they surface as an `Error` instruction and a fallback message in
    /// the transcript, so the conversation stays usable.
    pub async fn send_message_streaming<F>(
        &mut self,
        text: &str,
        mut on_instruction: F,
    ) -> AmparoResult<()>
    where
        F: FnMut(&RenderInstruction),
    {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }
        if self.in_flight {
            return Err(StreamError::SendInFlight.into());
        }

        self.in_flight = true;
        let result = self.run_streaming_send(text, &mut on_instruction).await;
        self.in_flight = false;
        result
    }

    async fn run_streaming_send<F>(&mut self, text: &str, on_instruction: &mut F) -> AmparoResult<()>
    where
        F: FnMut(&RenderInstruction),
    {
        self.transcript.push(Message::user(text));

        let request = match &self.session_id {
            Some(id) => ChatRequest::with_session(text, id.clone()),
            None => ChatRequest::new(text),
        };

        self.transcript.push(Message::streaming_placeholder());
        let mut interpreter = StreamInterpreter::new();

        let mut events = match self.client.stream_chat(&request).await {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "chat stream failed to open");
                let instruction = RenderInstruction::Error {
                    message: err.user_message(),
                };
                self.apply_instruction(&instruction);
                on_instruction(&instruction);
                return Ok(());
            }
        };

        while let Some(item) = events.next().await {
            match item {
                Ok(event) => {
                    if let Some(instruction) = interpreter.handle_event(event) {
                        self.apply_instruction(&instruction);
                        on_instruction(&instruction);
                    }
                    self.absorb_session(&interpreter);
                    if interpreter.is_terminal() {
                        break;
                    }
                }
                Err(AmparoError::Stream(StreamError::InvalidEvent { message })) => {
                    // A single malformed event does not abort the stream.
                    warn!(detail = %message, "skipping malformed stream event");
                }
                Err(err) => {
                    warn!(error = %err, "chat stream interrupted");
                    if let Some(instruction) = interpreter.fail(err.to_string()) {
                        self.apply_instruction(&instruction);
                        on_instruction(&instruction);
                    }
                    break;
                }
            }
        }

        if let Some(instruction) = interpreter.finish() {
            self.apply_instruction(&instruction);
            on_instruction(&instruction);
        }
        self.absorb_session(&interpreter);

        Ok(())
    }

    /// Send a message through the non-streaming endpoint and return the
    /// reply that was appended to the transcript.
    pub async fn send_message(&mut self, text: &str) -> AmparoResult<Option<&Message>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        if self.in_flight {
            return Err(StreamError::SendInFlight.into());
        }

        self.in_flight = true;
        self.transcript.push(Message::user(text));

        let request = match &self.session_id {
            Some(id) => ChatRequest::with_session(text, id.clone()),
            None => ChatRequest::new(text),
        };

        let result = self.client.send_chat(&request).await;
        self.in_flight = false;

        match result {
            Ok(response) => {
                self.session_id = Some(response.session_id.clone());
                let agent = response.agent.as_deref().map(Agent::parse);
                self.agent = agent.clone();
                let mut reply = Message::assistant(response.response);
                reply.agent = agent;
                self.transcript.push(reply);
            }
            Err(err) => {
                warn!(error = %err, "chat request failed");
                self.transcript.push(Message::assistant(err.user_message()));
            }
        }

        Ok(self.transcript.last())
    }

    /// Re-submit an action button's payload as a new user message.
    pub async fn activate_button<F>(
        &mut self,
        component: &UIComponent,
        on_instruction: F,
    ) -> AmparoResult<()>
    where
        F: FnMut(&RenderInstruction),
    {
        let payload = component.action_payload().to_string();
        debug!(payload = %payload, "action button activated");
        self.send_message_streaming(&payload, on_instruction).await
    }

    /// Forget the current conversation and start over.
    ///
    /// Local state resets regardless of whether the backend delete succeeds;
    /// a delete failure is still reported to the caller.
    pub async fn clear_conversation(&mut self) -> AmparoResult<()> {
        let previous = self.session_id.take();
        self.agent = None;
        self.transcript.clear();
        self.transcript
            .push(Message::assistant(self.config.welcome_message.clone()));

        if let Some(id) = previous {
            self.client
                .clear_session(&id)
                .await
                .with_context(|| ErrorContext::new("clear_session").with_session_id(id.clone()))?;
        }
        Ok(())
    }

    /// Apply one render instruction to the trailing streaming message.
    fn apply_instruction(&mut self, instruction: &RenderInstruction) {
        let Some(last) = self.transcript.last_mut() else {
            return;
        };
        match instruction {
            RenderInstruction::AppendText(text) => last.set_partial(text.clone()),
            RenderInstruction::ReplaceWithStructured { content, components } => {
                last.replace_with_structured(content.clone(), components.clone());
            }
            RenderInstruction::Complete => last.finalize(),
            RenderInstruction::Error { message } => {
                last.replace_with_structured(None, Vec::new());
                last.content = message.clone();
            }
        }
        if let Some(agent) = &self.agent {
            last.agent = Some(agent.clone());
        }
    }

    /// Copy session identity learned by the interpreter into the widget.
    fn absorb_session(&mut self, interpreter: &StreamInterpreter) {
        if let Some(id) = interpreter.session().session_id() {
            self.session_id = Some(id.to_string());
        }
        if let Some(agent) = interpreter.session().agent() {
            self.agent = Some(agent.clone());
        }
    }
}
