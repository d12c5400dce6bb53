//! Per-send streaming session state.
//!
//! A `StreamSession` is created when a send begins, mutated only by the
//! interpreter processing that send's events, and discarded when the stream
//! completes or errors.

use crate::models::Agent;

/// Tracks brace depth across appended text, ignoring braces inside JSON
/// string literals and escape sequences.
///
/// The interpreter uses this as a parse gate: a speculative parse of the
/// accumulation is only worth attempting once the depth has returned to
/// zero, instead of re-parsing the whole string on every chunk.
#[derive(Debug, Clone, Default)]
struct BraceTracker {
    depth: i64,
    in_string: bool,
    escaped: bool,
}

impl BraceTracker {
    fn scan(&mut self, text: &str) {
        for c in text.chars() {
            if self.escaped {
                self.escaped = false;
                continue;
            }
            match c {
                '\\' if self.in_string => self.escaped = true,
                '"' => self.in_string = !self.in_string,
                '{' if !self.in_string => self.depth += 1,
                '}' if !self.in_string => self.depth -= 1,
                _ => {}
            }
        }
    }

    fn balanced(&self) -> bool {
        self.depth == 0 && !self.in_string
    }
}

/// State for one in-flight send operation.
#[derive(Debug, Default)]
pub struct StreamSession {
    session_id: Option<String>,
    agent: Option<Agent>,
    accumulated: String,
    rendered_structured: bool,
    tracker: BraceTracker,
}

impl StreamSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session ID assigned by the backend, once a metadata event arrived.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn set_session_id(&mut self, id: impl Into<String>) {
        self.session_id = Some(id.into());
    }

    /// Agent the backend routed this conversation to.
    pub fn agent(&self) -> Option<&Agent> {
        self.agent.as_ref()
    }

    pub fn set_agent(&mut self, agent: Agent) {
        self.agent = Some(agent);
    }

    /// The plain text accumulated from content fragments so far.
    pub fn accumulated_text(&self) -> &str {
        &self.accumulated
    }

    /// Whether structured content has been rendered for this message.
    /// Structured rendering is terminal: no further text renders after it.
    pub fn rendered_structured(&self) -> bool {
        self.rendered_structured
    }

    pub fn mark_structured(&mut self) {
        self.rendered_structured = true;
    }

    /// Append a text fragment to the accumulation.
    pub fn append(&mut self, fragment: &str) {
        self.tracker.scan(fragment);
        self.accumulated.push_str(fragment);
    }

    /// Whether a speculative structured parse of the accumulation is worth
    /// attempting: it looks like JSON (starts with `{` after trimming) and
    /// its brace depth has returned to zero.
    pub fn should_attempt_parse(&self) -> bool {
        self.accumulated.trim_start().starts_with('{') && self.tracker.balanced()
    }
}
