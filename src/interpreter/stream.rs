//! Async adapter from a raw byte stream to render instructions.
//!
//! Wraps the byte-fed SSE parser and the event interpreter into a lazy
//! stream, for hosts that want instructions straight from a response body.

use std::collections::VecDeque;

use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use tracing::{error, warn};

use super::{RenderInstruction, StreamInterpreter};
use crate::sse::SseParser;

struct ProcessState<S> {
    bytes: S,
    parser: SseParser,
    interpreter: StreamInterpreter,
    pending: VecDeque<RenderInstruction>,
    done: bool,
}

/// Process a byte stream of server-sent events into a finite, lazy sequence
/// of render instructions. Not restartable.
///
/// Event blocks may be split at arbitrary byte boundaries across reads; the
/// produced instruction sequence is the same as for the unsplit stream.
/// Malformed event blocks are logged and skipped. A transport error turns
/// into a single terminal `Error` instruction.
pub fn process_stream<S, B, E>(byte_stream: S) -> impl Stream<Item = RenderInstruction>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: std::fmt::Display,
{
    let state = ProcessState {
        bytes: byte_stream,
        parser: SseParser::new(),
        interpreter: StreamInterpreter::new(),
        pending: VecDeque::new(),
        done: false,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(instruction) = st.pending.pop_front() {
                return Some((instruction, st));
            }
            if st.done {
                return None;
            }

            match st.bytes.next().await {
                Some(Ok(chunk)) => {
                    for result in st.parser.feed(chunk.as_ref()) {
                        match result {
                            Ok(event) => {
                                if let Some(instruction) = st.interpreter.handle_event(event) {
                                    st.pending.push_back(instruction);
                                }
                            }
                            Err(err) => {
                                warn!(error = %err, "skipping malformed event block");
                            }
                        }
                    }
                }
                Some(Err(err)) => {
                    error!(error = %err, "transport failure while reading stream");
                    st.done = true;
                    if let Some(instruction) = st.interpreter.fail(err.to_string()) {
                        st.pending.push_back(instruction);
                    }
                }
                None => {
                    st.done = true;
                    match st.parser.finish() {
                        Some(Ok(event)) => {
                            if let Some(instruction) = st.interpreter.handle_event(event) {
                                st.pending.push_back(instruction);
                            }
                        }
                        Some(Err(err)) => {
                            warn!(error = %err, "skipping malformed trailing block");
                        }
                        None => {}
                    }
                    if let Some(instruction) = st.interpreter.finish() {
                        st.pending.push_back(instruction);
                    }
                }
            }
        }
    })
}
