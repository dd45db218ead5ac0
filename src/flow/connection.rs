use super::{FlowEdge, FlowNode};

/// Decides whether a new edge from `source_id` to `target_id` may be added.
///
/// This is the precondition layer the compiler relies on: once a graph only
/// ever grows through connections accepted here, every pattern node has at
/// most one outgoing edge and strategy edges never cross scopes, so the
/// compiler does not re-check either invariant.
///
/// Rules:
/// - both endpoints must exist, and a node cannot connect to itself;
/// - a pattern node that already has an outgoing edge cannot gain another;
/// - a pattern node may feed a compute node's input;
/// - two pattern nodes may connect only within the same scope, and never
///   across the parent/child boundary;
/// - compute nodes are never edge sources.
pub fn can_connect(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    source_id: &str,
    target_id: &str,
) -> bool {
    let Some(source) = nodes.iter().find(|n| n.id == source_id) else {
        return false;
    };
    let Some(target) = nodes.iter().find(|n| n.id == target_id) else {
        return false;
    };

    if source.id == target.id {
        return false;
    }

    if !source.payload.is_pattern() {
        return false;
    }

    // Single-successor matching semantics: one outgoing edge per pattern node.
    if edges.iter().any(|e| e.source == source.id) {
        return false;
    }

    if target.payload.is_compute() {
        return true;
    }

    // Pattern-to-pattern: never across the parent/child boundary.
    if source.parent_id.as_deref() == Some(target.id.as_str())
        || target.parent_id.as_deref() == Some(source.id.as_str())
    {
        return false;
    }

    // Strategy edges stay within one scope.
    source.parent_id == target.parent_id
}
