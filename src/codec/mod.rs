//! Persistence codec: serialize, gzip, base64, and the inverse.
//!
//! This is the only asynchronous corner of the crate. Compression runs on a
//! blocking worker so callers can await it from an async context; a call
//! either yields the complete result or fails as a whole. Key order of the
//! serialized JSON is not a guaranteed invariant; callers must compare
//! decoded values structurally, not as strings.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::CodecError;
use crate::flow::{FlowEdge, FlowNode};

/// The editor's viewport at save time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

/// The canonical envelope payload: everything needed to restore an editing
/// session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub viewport: Viewport,
}

/// Serializes `value` to JSON, gzips it, and encodes the result as a base64
/// string.
pub async fn compress_and_encode<T: Serialize>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_vec(value).map_err(CodecError::Serialize)?;

    tokio::task::spawn_blocking(move || {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&json).map_err(CodecError::Compress)?;
        let compressed = encoder.finish().map_err(CodecError::Compress)?;
        Ok(BASE64_STANDARD.encode(compressed))
    })
    .await
    .map_err(|e| CodecError::Task(e.to_string()))?
}

/// Decodes a base64 string produced by [`compress_and_encode`], decompresses
/// it, and parses the JSON back into `T`.
pub async fn decode_and_decompress<T: DeserializeOwned>(encoded: &str) -> Result<T, CodecError> {
    let encoded = encoded.to_owned();

    let json = tokio::task::spawn_blocking(move || {
        let compressed = BASE64_STANDARD
            .decode(encoded.as_bytes())
            .map_err(CodecError::Decode)?;
        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut json = Vec::new();
        decoder
            .read_to_end(&mut json)
            .map_err(CodecError::Decompress)?;
        Ok(json)
    })
    .await
    .map_err(|e| CodecError::Task(e.to_string()))??;

    serde_json::from_slice(&json).map_err(CodecError::Deserialize)
}
