use thiserror::Error;

/// Errors that can occur while compiling a flat flow into a pattern document.
#[derive(Error, Debug, Clone)]
pub enum CompileError {
    #[error(
        "Edge '{edge_id}' references node '{node_id}', which could not be resolved to a pattern name"
    )]
    UnresolvedEndpoint { edge_id: String, node_id: String },
}

/// Errors that can occur while encoding or decoding a persisted snapshot.
///
/// A codec call either yields the full result or fails as a whole; there is
/// no partial recovery. Retry policy belongs to the caller.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to compress snapshot: {0}")]
    Compress(std::io::Error),

    #[error("Encoded snapshot is not valid base64: {0}")]
    Decode(base64::DecodeError),

    #[error("Encoded snapshot is not a valid gzip stream: {0}")]
    Decompress(std::io::Error),

    #[error("Decompressed snapshot is not valid JSON: {0}")]
    Deserialize(serde_json::Error),

    #[error("Codec worker task failed: {0}")]
    Task(String),
}
