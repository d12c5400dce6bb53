//! End-to-end tests for the byte-stream to render-instruction pipeline.
//!
//! These drive `process_stream` with raw SSE bytes, including streams split
//! at every possible byte boundary, and assert on the exact instruction
//! sequences produced.

use std::convert::Infallible;

use bytes::Bytes;
use futures_util::stream;
use futures_util::StreamExt;

use amparo::interpreter::{process_stream, RenderInstruction};
use amparo::models::UIComponent;

/// Collect the instructions produced for a byte stream delivered in the
/// given chunks.
async fn run_chunks(chunks: Vec<Vec<u8>>) -> Vec<RenderInstruction> {
    let byte_stream = stream::iter(
        chunks
            .into_iter()
            .map(|c| Ok::<Bytes, Infallible>(Bytes::from(c))),
    );
    process_stream(byte_stream).collect().await
}

async fn run_whole(body: &str) -> Vec<RenderInstruction> {
    run_chunks(vec![body.as_bytes().to_vec()]).await
}

fn sse(events: &[&str]) -> String {
    let mut out = String::new();
    for event in events {
        out.push_str("data: ");
        out.push_str(event);
        out.push_str("\n\n");
    }
    out
}

#[tokio::test]
async fn test_plain_text_stream() {
    let body = sse(&[
        r#"{"type": "metadata", "session_id": "s-1", "agent": "civil"}"#,
        r#"{"type": "content", "content": "Hola "}"#,
        r#"{"type": "content", "content": "mundo"}"#,
        r#"{"type": "end", "timestamp": "2026-08-28T12:00:00Z"}"#,
    ]);

    let instructions = run_whole(&body).await;
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::AppendText("Hola ".to_string()),
            RenderInstruction::AppendText("Hola mundo".to_string()),
            RenderInstruction::Complete,
        ]
    );
}

#[tokio::test]
async fn test_missing_end_event_still_completes() {
    let body = sse(&[r#"{"type": "content", "content": "Hola"}"#]);
    let instructions = run_whole(&body).await;
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::AppendText("Hola".to_string()),
            RenderInstruction::Complete,
        ]
    );
}

#[tokio::test]
async fn test_structured_object_in_single_content_event() {
    let body = sse(&[
        r#"{"type": "content", "content": {"content": "Resumen", "components": [{"type": "card", "title": "Tramite", "content": "Detalle"}]}}"#,
        r#"{"type": "end", "timestamp": null}"#,
    ]);

    let instructions = run_whole(&body).await;
    assert_eq!(instructions.len(), 1);
    match &instructions[0] {
        RenderInstruction::ReplaceWithStructured { content, components } => {
            assert_eq!(content.as_deref(), Some("Resumen"));
            assert_eq!(components.len(), 1);
            assert!(matches!(components[0], UIComponent::Card { .. }));
        }
        other => panic!("expected structured replacement, got {other:?}"),
    }
}

#[tokio::test]
async fn test_structured_json_split_across_content_events() {
    // The backend may serialize one JSON object across several content
    // fragments. Until the braces balance the accumulation renders as text.
    let body = sse(&[
        r#"{"type": "content", "content": "{\"content\": \"Listo\", "}"#,
        r#"{"type": "content", "content": "\"components\": [{\"type\": \"text\", \"content\": \"Hecho\"}]}"}"#,
        r#"{"type": "end", "timestamp": null}"#,
    ]);

    let instructions = run_whole(&body).await;
    assert_eq!(instructions.len(), 2);
    assert_eq!(
        instructions[0],
        RenderInstruction::AppendText("{\"content\": \"Listo\", ".to_string())
    );
    match &instructions[1] {
        RenderInstruction::ReplaceWithStructured { content, .. } => {
            assert_eq!(content.as_deref(), Some("Listo"));
        }
        other => panic!("expected structured replacement, got {other:?}"),
    }
}

#[tokio::test]
async fn test_nothing_after_structured_replacement() {
    // Anything the backend sends after a structured replacement, including
    // the end event, must not surface.
    let body = sse(&[
        r#"{"type": "content", "content": {"components": []}}"#,
        r#"{"type": "content", "content": "extra"}"#,
        r#"{"type": "end", "timestamp": null}"#,
    ]);

    let instructions = run_whole(&body).await;
    assert_eq!(instructions.len(), 1);
    assert!(matches!(
        instructions[0],
        RenderInstruction::ReplaceWithStructured { .. }
    ));
}

#[tokio::test]
async fn test_backend_error_event() {
    let body = sse(&[
        r#"{"type": "content", "content": "Hola"}"#,
        r#"{"type": "error", "error": "upstream timeout", "message": "No pude procesar tu consulta."}"#,
    ]);

    let instructions = run_whole(&body).await;
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::AppendText("Hola".to_string()),
            RenderInstruction::Error {
                message: "No pude procesar tu consulta.".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn test_malformed_event_is_skipped() {
    let body = format!(
        "data: {{not json\n\n{}",
        sse(&[
            r#"{"type": "content", "content": "ok"}"#,
            r#"{"type": "end", "timestamp": null}"#,
        ])
    );

    let instructions = run_whole(&body).await;
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::AppendText("ok".to_string()),
            RenderInstruction::Complete,
        ]
    );
}

#[tokio::test]
async fn test_comment_lines_and_crlf_are_tolerated() {
    let body = ": keepalive\r\n\r\ndata: {\"type\": \"content\", \"content\": \"hola\"}\r\n\r\n";
    let instructions = run_whole(body).await;
    assert_eq!(
        instructions,
        vec![
            RenderInstruction::AppendText("hola".to_string()),
            RenderInstruction::Complete,
        ]
    );
}

#[tokio::test]
async fn test_transport_error_produces_terminal_error() {
    let byte_stream = stream::iter(vec![
        Ok::<Bytes, String>(Bytes::from_static(
            b"data: {\"type\": \"content\", \"content\": \"Hola\"}\n\n",
        )),
        Err("connection reset".to_string()),
    ]);

    let instructions: Vec<_> = process_stream(byte_stream).collect().await;
    assert_eq!(instructions.len(), 2);
    assert_eq!(
        instructions[0],
        RenderInstruction::AppendText("Hola".to_string())
    );
    assert!(matches!(instructions[1], RenderInstruction::Error { .. }));
}

#[tokio::test]
async fn test_instruction_sequence_invariant_under_chunking() {
    // One realistic stream with multi-byte UTF-8 and a structured payload,
    // split at every possible byte boundary into two chunks. Every split
    // must produce the same instruction sequence as the unsplit stream.
    let body = sse(&[
        r#"{"type": "metadata", "session_id": "s-9", "agent": "familia"}"#,
        r#"{"type": "content", "content": "Atención: "}"#,
        r#"{"type": "content", "content": {"content": "Información", "components": [{"type": "alert", "title": "Turnos", "content": "Lunes a viernes", "alert_level": "warning"}]}}"#,
        r#"{"type": "end", "timestamp": "2026-08-28T12:00:00Z"}"#,
    ]);
    let bytes = body.as_bytes();

    let expected = run_whole(&body).await;
    assert_eq!(expected.len(), 2);

    for split in 0..=bytes.len() {
        let chunks = vec![bytes[..split].to_vec(), bytes[split..].to_vec()];
        let instructions = run_chunks(chunks).await;
        assert_eq!(instructions, expected, "diverged at split {split}");
    }
}

#[tokio::test]
async fn test_empty_stream_completes_once() {
    let instructions = run_whole("").await;
    assert_eq!(instructions, vec![RenderInstruction::Complete]);
}
