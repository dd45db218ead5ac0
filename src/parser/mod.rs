//! Reverse parsing: hierarchical pattern documents back into editor state.
//!
//! Every node gets a freshly minted id; the hierarchical form addresses by
//! name and carries no ids to reuse. Positions are assigned deterministically
//! so a loaded document lays out left-to-right per scope before any manual
//! or automatic layout runs.

use ahash::AHashMap;
use uuid::Uuid;

use crate::flow::{EdgeKind, FlowEdge, FlowNode, NodePayload, PatternData, Position};
use crate::pattern::{PatternGraph, PatternKind, PatternNode};

/// Padding from a scope's origin to its first node, in editor units.
const SCOPE_PADDING: f64 = 80.0;
/// Horizontal spacing between sibling nodes within a scope.
const SIBLING_SPACING: f64 = 300.0;

/// The flat graph reconstructed from a pattern document.
///
/// Edges whose endpoint names failed to resolve are dropped and reported in
/// `warnings` rather than failing the parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedFlow {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub warnings: Vec<String>,
}

/// Rebuilds a flat, positioned editor graph from a hierarchical pattern
/// document.
pub fn parse_pattern(graph: &PatternGraph) -> ParsedFlow {
    let mut parsed = ParsedFlow::default();
    // One name-to-id map spans the whole walk; names are scope-unique, and
    // each scope's edges are translated only after its nodes are mapped.
    let mut ids_by_name: AHashMap<String, String> = AHashMap::new();

    process_scope(graph, None, &mut ids_by_name, &mut parsed);
    parsed
}

fn process_scope(
    graph: &PatternGraph,
    parent_id: Option<&str>,
    ids_by_name: &mut AHashMap<String, String>,
    parsed: &mut ParsedFlow,
) {
    let mut x = SCOPE_PADDING;

    // First pass: create this scope's nodes (descending into nested graphs)
    // so every name the scope's edges can mention is mapped.
    for node in &graph.nodes {
        let id = Uuid::new_v4().to_string();
        ids_by_name.insert(node.name.clone(), id.clone());

        let data = editor_data(node);
        let payload = match node.kind {
            PatternKind::Atomic => NodePayload::Atomic(data),
            PatternKind::Composite => NodePayload::Composite(data),
        };

        parsed.nodes.push(FlowNode {
            id: id.clone(),
            payload,
            position: Position {
                x,
                y: SCOPE_PADDING,
            },
            parent_id: parent_id.map(str::to_string),
            measured: None,
            diagnostics: Vec::new(),
        });
        x += SIBLING_SPACING;

        if node.kind == PatternKind::Composite {
            if let Some(inner) = &node.graph {
                process_scope(inner, Some(&id), ids_by_name, parsed);
            }
        }
    }

    // Second pass: translate this scope's edges through the map.
    for edge in &graph.edges {
        match (ids_by_name.get(&edge.source), ids_by_name.get(&edge.target)) {
            (Some(source), Some(target)) => {
                parsed.edges.push(FlowEdge {
                    id: format!("e-{source}-{target}"),
                    source: source.clone(),
                    target: target.clone(),
                    kind: EdgeKind::Strategy {
                        strategy: Some(edge.strategy),
                    },
                });
            }
            _ => {
                let warning = format!(
                    "Dropped edge [{} -> {}]: one or both endpoint names could not be resolved",
                    edge.source, edge.target
                );
                log::warn!("{warning}");
                parsed.warnings.push(warning);
            }
        }
    }
}

fn editor_data(node: &PatternNode) -> PatternData {
    PatternData {
        name: node.name.clone(),
        label: Some(node.name.clone()),
        quantifier: node.quantifier.clone(),
        condition: node.condition.as_ref().map(|c| c.expression.clone()),
        times: node.times.clone(),
        window: node.window,
    }
}
