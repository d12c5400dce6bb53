//! SSE stream parsing logic.
//!
//! The stateful `SseParser` is fed raw bytes as they arrive from the
//! transport and emits complete decoded events. It buffers both partial
//! UTF-8 sequences and partial event blocks across reads, so the caller may
//! split the stream at any byte boundary.

use tracing::debug;

use super::events::{ServerEvent, SseParseError};

/// Stateful SSE parser that accumulates bytes and emits complete events.
#[derive(Debug, Default)]
pub struct SseParser {
    /// Undecoded bytes; at most the tail of a multi-byte UTF-8 sequence.
    byte_buf: Vec<u8>,
    /// Decoded text that does not yet form a complete event block.
    text_buf: String,
}

impl SseParser {
    /// Create a new SSE parser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of bytes, returning every event completed by it.
    ///
    /// Each returned item is either a decoded event or a parse error for one
    /// malformed block; a bad block never poisons the parser state.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<ServerEvent, SseParseError>> {
        self.byte_buf.extend_from_slice(chunk);
        self.decode_buffered();
        self.drain_blocks()
    }

    /// Signal end of stream, flushing a trailing block that was never
    /// terminated by a blank line.
    pub fn finish(&mut self) -> Option<Result<ServerEvent, SseParseError>> {
        if !self.byte_buf.is_empty() {
            debug!(bytes = self.byte_buf.len(), "dropping incomplete UTF-8 tail at stream end");
            self.byte_buf.clear();
        }
        let block = std::mem::take(&mut self.text_buf);
        parse_block(&block)
    }

    /// Decode as much of `byte_buf` as possible into `text_buf`, keeping an
    /// incomplete trailing UTF-8 sequence buffered for the next read.
    fn decode_buffered(&mut self) {
        loop {
            match std::str::from_utf8(&self.byte_buf) {
                Ok(text) => {
                    self.text_buf.push_str(text);
                    self.byte_buf.clear();
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    if let Ok(text) = std::str::from_utf8(&self.byte_buf[..valid]) {
                        self.text_buf.push_str(text);
                    }
                    match err.error_len() {
                        // Invalid sequence: replace and keep decoding
                        Some(len) => {
                            self.text_buf.push('\u{FFFD}');
                            self.byte_buf.drain(..valid + len);
                        }
                        // Incomplete sequence at the end: wait for more bytes
                        None => {
                            self.byte_buf.drain(..valid);
                            break;
                        }
                    }
                }
            }
        }
        // Normalize CRLF so block boundaries are always "\n\n". A trailing
        // lone '\r' stays buffered until its '\n' arrives.
        if self.text_buf.contains("\r\n") {
            self.text_buf = self.text_buf.replace("\r\n", "\n");
        }
    }

    /// Split off every complete block (terminated by a blank line) and parse it.
    fn drain_blocks(&mut self) -> Vec<Result<ServerEvent, SseParseError>> {
        let mut results = Vec::new();
        while let Some(pos) = self.text_buf.find("\n\n") {
            let block: String = self.text_buf.drain(..pos + 2).collect();
            if let Some(result) = parse_block(&block) {
                results.push(result);
            }
        }
        results
    }
}

/// Parse one event block: collect its `data:` lines, ignore comments and
/// unknown fields, and decode the joined payload as JSON.
fn parse_block(block: &str) -> Option<Result<ServerEvent, SseParseError>> {
    let mut data_lines: Vec<&str> = Vec::new();
    for line in block.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        if let Some(rest) = line.strip_prefix("data:") {
            data_lines.push(rest.trim());
        }
        // Other SSE fields (event:, id:, retry:) are not used by this backend
    }

    if data_lines.is_empty() {
        return None;
    }

    let data = data_lines.join("\n");
    match serde_json::from_str::<ServerEvent>(&data) {
        Ok(event) => {
            debug!(event_type = event.event_type_name(), "decoded SSE event");
            Some(Ok(event))
        }
        Err(err) => Some(Err(SseParseError::InvalidJson {
            source: err.to_string(),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sse::events::ContentPayload;

    fn collect_ok(results: Vec<Result<ServerEvent, SseParseError>>) -> Vec<ServerEvent> {
        results.into_iter().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_single_event_in_one_chunk() {
        let mut parser = SseParser::new();
        let events = collect_ok(parser.feed(b"data: {\"type\":\"content\",\"content\":\"Hola\"}\n\n"));
        assert_eq!(
            events,
            vec![ServerEvent::Content {
                content: ContentPayload::Text("Hola".to_string()),
            }]
        );
    }

    #[test]
    fn test_multiple_events_in_one_chunk() {
        let mut parser = SseParser::new();
        let chunk = b"data: {\"type\":\"content\",\"content\":\"a\"}\n\ndata: {\"type\":\"content\",\"content\":\"b\"}\n\n";
        let events = collect_ok(parser.feed(chunk));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_block_split_across_reads() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b"data: {\"type\":\"cont").is_empty());
        assert!(parser.feed(b"ent\",\"content\":\"Hola\"}\n").is_empty());
        let events = collect_ok(parser.feed(b"\n"));
        assert_eq!(
            events,
            vec![ServerEvent::Content {
                content: ContentPayload::Text("Hola".to_string()),
            }]
        );
    }

    #[test]
    fn test_multibyte_utf8_split_across_reads() {
        let full = "data: {\"type\":\"content\",\"content\":\"se\u{f1}or\"}\n\n".as_bytes();
        // Split inside the two-byte encoding of the letter enye
        let split = full.iter().position(|&b| b == 0xc3).unwrap() + 1;

        let mut parser = SseParser::new();
        assert!(parser.feed(&full[..split]).is_empty());
        let events = collect_ok(parser.feed(&full[split..]));
        assert_eq!(
            events,
            vec![ServerEvent::Content {
                content: ContentPayload::Text("se\u{f1}or".to_string()),
            }]
        );
    }

    #[test]
    fn test_crlf_block_boundaries() {
        let mut parser = SseParser::new();
        let events = collect_ok(parser.feed(b"data: {\"type\":\"end\"}\r\n\r\n"));
        assert_eq!(events, vec![ServerEvent::End { timestamp: None }]);
    }

    #[test]
    fn test_comment_lines_ignored() {
        let mut parser = SseParser::new();
        let events = collect_ok(parser.feed(b": keep-alive\n\ndata: {\"type\":\"end\"}\n\n"));
        assert_eq!(events, vec![ServerEvent::End { timestamp: None }]);
    }

    #[test]
    fn test_multiple_data_lines_join_with_newline() {
        // Two data lines form one payload joined by \n; here the payload is
        // a JSON document that stays valid because the newline falls between
        // tokens rather than inside a string.
        let mut parser = SseParser::new();
        let events = collect_ok(parser.feed(b"data: {\"type\":\"end\",\ndata: \"timestamp\":null}\n\n"));
        assert_eq!(events, vec![ServerEvent::End { timestamp: None }]);
    }

    #[test]
    fn test_invalid_json_reported_per_block() {
        let mut parser = SseParser::new();
        let results = parser.feed(b"data: not json\n\ndata: {\"type\":\"end\"}\n\n");
        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0],
            Err(SseParseError::InvalidJson { .. })
        ));
        assert_eq!(
            results[1],
            Ok(ServerEvent::End { timestamp: None })
        );
    }

    #[test]
    fn test_finish_flushes_unterminated_block() {
        let mut parser = SseParser::new();
        assert!(parser.feed(b"data: {\"type\":\"end\"}").is_empty());
        let result = parser.finish();
        assert_eq!(result, Some(Ok(ServerEvent::End { timestamp: None })));
    }

    #[test]
    fn test_finish_with_empty_buffer() {
        let mut parser = SseParser::new();
        assert_eq!(parser.finish(), None);
    }

    #[test]
    fn test_byte_level_chunk_invariance() {
        let stream = b"data: {\"type\":\"metadata\",\"agent\":\"civil\",\"session_id\":\"s1\"}\n\ndata: {\"type\":\"content\",\"content\":\"Hola \"}\n\ndata: {\"type\":\"content\",\"content\":\"mundo\"}\n\ndata: {\"type\":\"end\"}\n\n";

        let mut reference = SseParser::new();
        let expected = collect_ok(reference.feed(stream));
        assert_eq!(expected.len(), 4);

        for split in 1..stream.len() {
            let mut parser = SseParser::new();
            let mut events = collect_ok(parser.feed(&stream[..split]));
            events.extend(collect_ok(parser.feed(&stream[split..])));
            assert_eq!(events, expected, "split at byte {}", split);
        }
    }
}
