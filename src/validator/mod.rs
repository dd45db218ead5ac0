//! Graph validation with per-node error attribution.
//!
//! Diagnostics are plain data, never errors: the caller decides whether they
//! block saving or publishing. Validating the same graph twice yields the
//! same diagnostics.

use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::flow::{FlowEdge, FlowNode, NodePayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    IsolatedNode,
    MissingCondition,
    EmptyGroup,
    CircularDependency,
    /// Reserved for compute-node script checks; not emitted yet.
    InvalidScript,
    /// Reserved for compute-node model checks; not emitted yet.
    MissingModel,
}

/// A single validation finding, attributed to one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub node_id: String,
    pub node_name: String,
    pub kind: DiagnosticKind,
    pub message: String,
}

/// The outcome of a validation run. `nodes` is populated only when
/// annotation was requested; each node's diagnostics list is then replaced
/// outright, empty for nodes that are now clean.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
    pub nodes: Option<Vec<FlowNode>>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Scans the flat graph for isolated nodes, missing conditions, empty groups
/// and circular dependencies.
pub fn validate(nodes: &[FlowNode], edges: &[FlowEdge], annotate: bool) -> ValidationReport {
    let mut diagnostics = Vec::new();

    let mut connected: AHashSet<&str> = AHashSet::new();
    for edge in edges {
        connected.insert(edge.source.as_str());
        connected.insert(edge.target.as_str());
    }

    for node in nodes {
        check_isolation(node, nodes, &connected, &mut diagnostics);

        if let NodePayload::Atomic(data) = &node.payload {
            if data.condition.as_deref().is_none_or(str::is_empty) {
                diagnostics.push(Diagnostic {
                    node_id: node.id.clone(),
                    node_name: node.payload.display_name().to_string(),
                    kind: DiagnosticKind::MissingCondition,
                    message: "Atomic node is missing its trigger condition".to_string(),
                });
            }
        }

        if matches!(node.payload, NodePayload::Composite(_))
            && !nodes
                .iter()
                .any(|n| n.parent_id.as_deref() == Some(node.id.as_str()))
        {
            diagnostics.push(Diagnostic {
                node_id: node.id.clone(),
                node_name: node.payload.display_name().to_string(),
                kind: DiagnosticKind::EmptyGroup,
                message: "Group node must not be empty".to_string(),
            });
        }
    }

    detect_cycles(nodes, edges, &mut diagnostics);

    let diagnostics: Vec<Diagnostic> = diagnostics
        .into_iter()
        .unique_by(|d| (d.node_id.clone(), d.kind))
        .collect();

    if !annotate {
        return ValidationReport {
            diagnostics,
            nodes: None,
        };
    }

    let mut by_node: AHashMap<String, Vec<Diagnostic>> = AHashMap::new();
    for diagnostic in &diagnostics {
        by_node
            .entry(diagnostic.node_id.clone())
            .or_default()
            .push(diagnostic.clone());
    }

    let annotated = nodes
        .iter()
        .map(|node| {
            let mut updated = node.clone();
            updated.diagnostics = by_node.remove(node.id.as_str()).unwrap_or_default();
            updated
        })
        .collect();

    ValidationReport {
        diagnostics,
        nodes: Some(annotated),
    }
}

fn check_isolation(
    node: &FlowNode,
    nodes: &[FlowNode],
    connected: &AHashSet<&str>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if connected.contains(node.id.as_str()) {
        return;
    }

    if let Some(parent_id) = node.parent_id.as_deref() {
        let sibling_count = nodes
            .iter()
            .filter(|n| n.parent_id.as_deref() == Some(parent_id))
            .count();

        // The sole child of a group needs no wiring.
        if sibling_count > 1 {
            diagnostics.push(Diagnostic {
                node_id: node.id.clone(),
                node_name: node.payload.display_name().to_string(),
                kind: DiagnosticKind::IsolatedNode,
                message: "Node is isolated within its group; connect it to a sibling".to_string(),
            });
        }
    } else {
        diagnostics.push(Diagnostic {
            node_id: node.id.clone(),
            node_name: node.payload.display_name().to_string(),
            kind: DiagnosticKind::IsolatedNode,
            message: "Node is isolated; it has no incoming or outgoing connection".to_string(),
        });
    }
}

#[derive(Clone, Copy, PartialEq)]
enum VisitState {
    Visiting,
    Visited,
}

/// Three-state DFS over the strategy-edge adjacency. When a back edge is
/// found, the path segment from the marked node to the current node is the
/// cycle; each distinct node on it gets one diagnostic.
fn detect_cycles(nodes: &[FlowNode], edges: &[FlowEdge], diagnostics: &mut Vec<Diagnostic>) {
    let mut adjacency: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in edges.iter().filter(|e| e.is_strategy()) {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let names: AHashMap<&str, &str> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.payload.name()))
        .collect();

    let mut state: AHashMap<&str, VisitState> = AHashMap::new();
    let mut reported: AHashSet<&str> = AHashSet::new();
    let mut path: Vec<&str> = Vec::new();

    for node in nodes {
        if !state.contains_key(node.id.as_str()) {
            dfs(
                node.id.as_str(),
                &adjacency,
                &names,
                &mut state,
                &mut path,
                &mut reported,
                diagnostics,
            );
        }
    }
}

fn dfs<'a>(
    node_id: &'a str,
    adjacency: &AHashMap<&'a str, Vec<&'a str>>,
    names: &AHashMap<&'a str, &'a str>,
    state: &mut AHashMap<&'a str, VisitState>,
    path: &mut Vec<&'a str>,
    reported: &mut AHashSet<&'a str>,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    state.insert(node_id, VisitState::Visiting);
    path.push(node_id);

    for &neighbor in adjacency.get(node_id).map(Vec::as_slice).unwrap_or_default() {
        match state.get(neighbor).copied() {
            Some(VisitState::Visiting) => {
                let start = path.iter().position(|&id| id == neighbor).unwrap_or(0);
                let mut cycle: Vec<&str> = path[start..].to_vec();
                cycle.push(neighbor);

                let rendered = cycle
                    .iter()
                    .map(|id| *names.get(id).unwrap_or(id))
                    .join(" -> ");

                for &id in &cycle {
                    if reported.insert(id) {
                        diagnostics.push(Diagnostic {
                            node_id: id.to_string(),
                            node_name: names.get(id).unwrap_or(&id).to_string(),
                            kind: DiagnosticKind::CircularDependency,
                            message: format!("Node is part of a circular dependency: {rendered}"),
                        });
                    }
                }
                return true;
            }
            Some(VisitState::Visited) => {}
            None => {
                if dfs(neighbor, adjacency, names, state, path, reported, diagnostics) {
                    return true;
                }
            }
        }
    }

    state.insert(node_id, VisitState::Visited);
    path.pop();
    false
}
