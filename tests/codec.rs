//! Tests for the persistence codec.
mod common;
use common::*;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use cepflow::prelude::*;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

fn sample_snapshot() -> Snapshot {
    Snapshot {
        nodes: vec![
            atomic("n1", "start", Some("event.kind == 'start'")).with_position(12.5, -3.0),
            llm("n2", "inference").with_position(400.0, 80.0),
        ],
        edges: vec![compute_edge("e1", "n1", "n2")],
        viewport: Viewport {
            x: -120.0,
            y: 35.5,
            zoom: 0.75,
        },
    }
}

#[test]
fn test_snapshot_round_trip() {
    let snapshot = sample_snapshot();

    let encoded = tokio_test::block_on(compress_and_encode(&snapshot)).expect("Failed to encode");
    let decoded: Snapshot =
        tokio_test::block_on(decode_and_decompress(&encoded)).expect("Failed to decode");

    assert_eq!(decoded, snapshot);
}

#[test]
fn test_arbitrary_json_round_trip() {
    let value = serde_json::json!({
        "nodes": [{"id": "x", "weight": 1.5}],
        "edges": [],
        "viewport": {"x": 0.0, "y": 0.0, "zoom": 1.0},
        "unicode": "判断单元",
    });

    let encoded = tokio_test::block_on(compress_and_encode(&value)).expect("Failed to encode");
    let decoded: serde_json::Value =
        tokio_test::block_on(decode_and_decompress(&encoded)).expect("Failed to decode");

    assert_eq!(decoded, value);
}

#[test]
fn test_envelope_is_plain_base64() {
    let encoded =
        tokio_test::block_on(compress_and_encode(&sample_snapshot())).expect("Failed to encode");

    assert!(!encoded.is_empty());
    assert!(
        encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=')
    );
}

#[test]
fn test_corrupt_base64_is_rejected() {
    let result: std::result::Result<Snapshot, CodecError> =
        tokio_test::block_on(decode_and_decompress("not//valid==base64!!"));
    assert!(matches!(result, Err(CodecError::Decode(_))));
}

#[test]
fn test_invalid_gzip_stream_is_rejected() {
    let encoded = BASE64_STANDARD.encode(b"these bytes are not a gzip stream");
    let result: std::result::Result<Snapshot, CodecError> =
        tokio_test::block_on(decode_and_decompress(&encoded));
    assert!(matches!(result, Err(CodecError::Decompress(_))));
}

#[test]
fn test_invalid_payload_is_rejected() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(b"this is not json")
        .expect("Failed to compress");
    let compressed = encoder.finish().expect("Failed to compress");
    let encoded = BASE64_STANDARD.encode(compressed);

    let result: std::result::Result<Snapshot, CodecError> =
        tokio_test::block_on(decode_and_decompress(&encoded));
    assert!(matches!(result, Err(CodecError::Deserialize(_))));
}
