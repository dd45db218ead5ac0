//! # cepflow - Pattern Flow Compilation and Validation Engine
//!
//! **cepflow** turns an editable, spatially laid out node/edge flow into the
//! hierarchical complex-event-pattern documents an external rule engine
//! consumes, and parses those documents back into editor state. The editor
//! owns rendering and interaction; this crate owns every structural
//! transformation in between.
//!
//! ## Core Workflow
//!
//! 1. **Edit**: the editor mutates a flat [`flow`] graph of ATOMIC /
//!    COMPOSITE pattern nodes and LLM-inference / format-output compute
//!    nodes, nested through `parent_id` back-references.
//! 2. **Normalize**: after each structural change,
//!    [`layout::expand_group_nodes`] re-fits every group around its
//!    children.
//! 3. **Validate**: [`validator::validate`] reports isolated nodes, missing
//!    conditions, empty groups and circular dependencies as per-node
//!    diagnostics; the caller decides what blocks publishing.
//! 4. **Publish**: [`compiler::compile_pattern`] builds the nested
//!    [`pattern`] document, and [`compiler::partition_when_then`] carves one
//!    independent when/then clause per compute node.
//! 5. **Load**: [`parser::parse_pattern`] rebuilds a flat, positioned graph
//!    from a document, minting fresh ids.
//! 6. **Persist**: [`codec`] wraps any snapshot as
//!    `base64(gzip(json(...)))` and back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cepflow::prelude::*;
//!
//! fn publish(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Result<()> {
//!     let report = validate(&nodes, &edges, false);
//!     if !report.is_clean() {
//!         for diagnostic in &report.diagnostics {
//!             eprintln!("{}: {}", diagnostic.node_name, diagnostic.message);
//!         }
//!         return Ok(());
//!     }
//!
//!     let clauses = partition_when_then(&nodes, &edges, Addressing::Name)?;
//!     for clause in &clauses {
//!         println!("{}", serde_json::to_string_pretty(clause)?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod compiler;
pub mod error;
pub mod flow;
pub mod layout;
pub mod parser;
pub mod pattern;
pub mod prelude;
pub mod validator;
