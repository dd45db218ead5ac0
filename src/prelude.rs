//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions from the cepflow
//! crate so callers can bring the whole surface in with one `use`.

// Compilation and partitioning
pub use crate::compiler::{Addressing, ComputeStep, WhenThenClause, compile_pattern, partition_when_then};

// Flat editor graph
pub use crate::flow::{
    Dimensions, EdgeKind, FlowEdge, FlowNode, FormatOutputData, LlmInferenceData, NodePayload,
    PatternData, Position, can_connect,
};

// Hierarchical pattern documents
pub use crate::pattern::{
    Condition, ConsumingStrategy, PatternEdge, PatternGraph, PatternKind, PatternNode, Quantifier,
    QuantifierProperty, TimeSpec, TimeUnit, Times, Window,
};

// Validation
pub use crate::validator::{Diagnostic, DiagnosticKind, ValidationReport, validate};

// Layout and parsing
pub use crate::layout::expand_group_nodes;
pub use crate::parser::{ParsedFlow, parse_pattern};

// Persistence
pub use crate::codec::{Snapshot, Viewport, compress_and_encode, decode_and_decompress};

// Error types
pub use crate::error::{CodecError, CompileError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
