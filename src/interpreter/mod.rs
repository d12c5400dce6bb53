//! Streaming response interpreter.
//!
//! Consumes the backend's server-sent events and produces rendering
//! instructions. The hard part is classification: the stream may carry plain
//! prose typed out chunk by chunk, or a structured JSON payload describing
//! rich UI components, arriving across many partial chunks, without
//! announcing which in advance.
//!
//! The interpreter is exposed two ways:
//! - `StreamInterpreter::handle_event` - a synchronous state machine fed one
//!   decoded event at a time
//! - `process_stream` - an async adapter turning a raw byte stream into a
//!   lazy sequence of `RenderInstruction`s

mod session;
mod stream;

pub use session::StreamSession;
pub use stream::process_stream;

use tracing::{debug, warn};

use crate::error::StreamError;
use crate::models::{Agent, StructuredContent, UIComponent};
use crate::sse::{ContentPayload, ServerEvent};

/// A rendering instruction produced after processing one event.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderInstruction {
    /// Render the accumulated text as the current best-effort content.
    AppendText(String),
    /// Replace the message with structured content. Terminal for the
    /// current message: no further text instructions follow.
    ReplaceWithStructured {
        content: Option<String>,
        components: Vec<UIComponent>,
    },
    /// The response finished normally.
    Complete,
    /// The stream failed; `message` is user-facing.
    Error { message: String },
}

/// Maps decoded server events to render instructions for one send.
///
/// Not restartable: once a terminal instruction (structured replacement,
/// completion or error) has been emitted, further events are ignored.
#[derive(Debug, Default)]
pub struct StreamInterpreter {
    session: StreamSession,
    terminal: bool,
}

impl StreamInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The session state accumulated so far (session id, agent, text).
    pub fn session(&self) -> &StreamSession {
        &self.session
    }

    /// Whether a terminal instruction has been emitted.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Process one decoded event, possibly producing an instruction.
    pub fn handle_event(&mut self, event: ServerEvent) -> Option<RenderInstruction> {
        if self.terminal {
            debug!(
                event_type = event.event_type_name(),
                "ignoring event after terminal instruction"
            );
            return None;
        }

        match event {
            ServerEvent::Metadata { session_id, agent } => {
                self.session.set_session_id(session_id);
                if let Some(name) = agent {
                    self.session.set_agent(Agent::parse(&name));
                }
                None
            }
            ServerEvent::Content {
                content: ContentPayload::Structured(structured),
            } => Some(self.replace_with_structured(structured)),
            ServerEvent::Content {
                content:
                    ContentPayload::Text(fragment)
                    | ContentPayload::ObjectText { content: fragment },
            } => {
                self.session.append(&fragment);

                if self.session.should_attempt_parse() {
                    // Speculative parse of the whole accumulation. Failure is
                    // expected while a structured document is still arriving,
                    // and also covers prose that merely looks like JSON.
                    match serde_json::from_str::<StructuredContent>(self.session.accumulated_text())
                    {
                        Ok(structured) => return Some(self.replace_with_structured(structured)),
                        Err(err) => {
                            debug!(error = %err, "accumulation is not (yet) a structured payload");
                        }
                    }
                }

                Some(RenderInstruction::AppendText(
                    self.session.accumulated_text().to_string(),
                ))
            }
            ServerEvent::End { .. } => {
                self.terminal = true;
                Some(RenderInstruction::Complete)
            }
            ServerEvent::Error { error, message } => {
                let err = StreamError::BackendReported {
                    detail: error,
                    message,
                };
                warn!(code = err.error_code(), error = %err, "backend reported stream error");
                self.terminal = true;
                Some(RenderInstruction::Error {
                    message: err.user_message(),
                })
            }
        }
    }

    /// Signal normal end of stream. Emits `Complete` unless a terminal
    /// instruction was already produced.
    pub fn finish(&mut self) -> Option<RenderInstruction> {
        if self.terminal {
            return None;
        }
        self.terminal = true;
        Some(RenderInstruction::Complete)
    }

    /// Signal a transport-level failure. Emits a terminal `Error` carrying
    /// the static user-facing fallback message.
    pub fn fail(&mut self, detail: impl Into<String>) -> Option<RenderInstruction> {
        if self.terminal {
            return None;
        }
        self.terminal = true;
        let message = StreamError::ConnectionLost {
            message: detail.into(),
        }
        .user_message();
        Some(RenderInstruction::Error { message })
    }

    fn replace_with_structured(&mut self, structured: StructuredContent) -> RenderInstruction {
        self.session.mark_structured();
        self.terminal = true;
        RenderInstruction::ReplaceWithStructured {
            content: structured.content,
            components: structured.components,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_event(fragment: &str) -> ServerEvent {
        ServerEvent::Content {
            content: ContentPayload::Text(fragment.to_string()),
        }
    }

    #[test]
    fn test_metadata_updates_session_without_instruction() {
        let mut interpreter = StreamInterpreter::new();
        let instruction = interpreter.handle_event(ServerEvent::Metadata {
            session_id: "sess-1".to_string(),
            agent: Some("penal".to_string()),
        });
        assert_eq!(instruction, None);
        assert_eq!(interpreter.session().session_id(), Some("sess-1"));
        assert_eq!(interpreter.session().agent(), Some(&Agent::Penal));
    }

    #[test]
    fn test_plain_text_accumulates() {
        let mut interpreter = StreamInterpreter::new();
        assert_eq!(
            interpreter.handle_event(text_event("Hola ")),
            Some(RenderInstruction::AppendText("Hola ".to_string()))
        );
        assert_eq!(
            interpreter.handle_event(text_event("mundo")),
            Some(RenderInstruction::AppendText("Hola mundo".to_string()))
        );
        assert_eq!(interpreter.finish(), Some(RenderInstruction::Complete));
    }

    #[test]
    fn test_structured_payload_sent_whole() {
        let mut interpreter = StreamInterpreter::new();
        let event: ServerEvent = serde_json::from_str(
            r#"{"type":"content","content":{"content":"Hi","components":[]}}"#,
        )
        .unwrap();
        let instruction = interpreter.handle_event(event);
        assert_eq!(
            instruction,
            Some(RenderInstruction::ReplaceWithStructured {
                content: Some("Hi".to_string()),
                components: vec![],
            })
        );
        assert!(interpreter.is_terminal());
        assert!(interpreter.session().rendered_structured());
    }

    #[test]
    fn test_structured_payload_assembled_from_fragments() {
        let mut interpreter = StreamInterpreter::new();

        let first = interpreter.handle_event(text_event("{\"content\":\"Hi\","));
        // Incomplete JSON renders as best-effort text
        assert_eq!(
            first,
            Some(RenderInstruction::AppendText("{\"content\":\"Hi\",".to_string()))
        );

        let second = interpreter.handle_event(text_event("\"components\":[]}"));
        assert_eq!(
            second,
            Some(RenderInstruction::ReplaceWithStructured {
                content: Some("Hi".to_string()),
                components: vec![],
            })
        );
    }

    #[test]
    fn test_structured_is_terminal_for_the_message() {
        let mut interpreter = StreamInterpreter::new();
        interpreter.handle_event(text_event("{\"components\":[]}"));
        assert!(interpreter.is_terminal());

        // Later events for the same response are ignored
        assert_eq!(interpreter.handle_event(text_event("extra")), None);
        assert_eq!(interpreter.handle_event(ServerEvent::End { timestamp: None }), None);
        assert_eq!(interpreter.finish(), None);
    }

    #[test]
    fn test_object_content_without_components_renders_its_text() {
        let mut interpreter = StreamInterpreter::new();
        let event: ServerEvent = serde_json::from_str(
            r#"{"type":"content","content":{"content":"Solo resumen"}}"#,
        )
        .unwrap();
        assert_eq!(
            interpreter.handle_event(event),
            Some(RenderInstruction::AppendText("Solo resumen".to_string()))
        );
        assert!(!interpreter.is_terminal());
    }

    #[test]
    fn test_balanced_json_without_components_is_plain_text() {
        let mut interpreter = StreamInterpreter::new();
        let instruction = interpreter.handle_event(text_event("{\"content\":\"solo texto\"}"));
        assert_eq!(
            instruction,
            Some(RenderInstruction::AppendText(
                "{\"content\":\"solo texto\"}".to_string()
            ))
        );
        assert!(!interpreter.is_terminal());
    }

    #[test]
    fn test_prose_starting_with_brace_renders_as_growing_text() {
        let mut interpreter = StreamInterpreter::new();
        let chunks = ["{la ley dice", " que el plazo", " es de diez dias"];
        let mut expected = String::new();
        for chunk in chunks {
            expected.push_str(chunk);
            assert_eq!(
                interpreter.handle_event(text_event(chunk)),
                Some(RenderInstruction::AppendText(expected.clone()))
            );
        }
        assert_eq!(interpreter.finish(), Some(RenderInstruction::Complete));
    }

    #[test]
    fn test_end_event_completes_once() {
        let mut interpreter = StreamInterpreter::new();
        assert_eq!(
            interpreter.handle_event(ServerEvent::End { timestamp: None }),
            Some(RenderInstruction::Complete)
        );
        // Reader EOF after the end event emits nothing further
        assert_eq!(interpreter.finish(), None);
    }

    #[test]
    fn test_backend_error_event_is_terminal() {
        let mut interpreter = StreamInterpreter::new();
        let instruction = interpreter.handle_event(ServerEvent::Error {
            error: Some("model timeout".to_string()),
            message: "Disculpa, algo fallo.".to_string(),
        });
        assert_eq!(
            instruction,
            Some(RenderInstruction::Error {
                message: "Disculpa, algo fallo.".to_string(),
            })
        );
        assert_eq!(interpreter.finish(), None);
    }

    #[test]
    fn test_transport_failure_uses_fallback_message() {
        let mut interpreter = StreamInterpreter::new();
        interpreter.handle_event(text_event("Hola"));
        let instruction = interpreter.fail("connection reset");
        match instruction {
            Some(RenderInstruction::Error { message }) => {
                assert!(message.contains("0800-555-JUSTICIA"));
            }
            other => panic!("Expected error instruction, got {:?}", other),
        }
        assert_eq!(interpreter.fail("again"), None);
    }
}
