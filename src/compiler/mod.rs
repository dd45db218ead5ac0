//! Flat-to-hierarchical compilation.
//!
//! The compiler is a pure projection: it reads the editor's flat graph and
//! constructs a fresh [`PatternGraph`], recursing into COMPOSITE scopes.
//! Compute nodes never appear in the output; the partitioner in
//! [`partition`] carves when/then clauses around them.

use ahash::{AHashMap, AHashSet};

use crate::error::CompileError;
use crate::flow::{FlowEdge, FlowNode, PatternData};
use crate::pattern::{
    AfterMatchSkipStrategy, Condition, PatternEdge, PatternGraph, PatternKind, PatternNode,
};

pub mod partition;

pub use partition::*;

/// How compiled documents address their nodes.
///
/// `Name` uses the editor's display label (falling back to the node name) and
/// is what the execution engine consumes; `Id` keeps the flat editor ids,
/// which is useful when a caller needs to correlate compiled output back to
/// editor state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Addressing {
    #[default]
    Name,
    Id,
}

/// Scope-wide endpoint resolution table, keyed by flat node id.
struct NameTable<'a> {
    names: AHashMap<&'a str, &'a str>,
}

impl<'a> NameTable<'a> {
    fn build(nodes: &[&'a FlowNode], addressing: Addressing) -> Self {
        let names = nodes
            .iter()
            .map(|n| {
                let name = match addressing {
                    Addressing::Name => n.payload.display_name(),
                    Addressing::Id => n.id.as_str(),
                };
                (n.id.as_str(), name)
            })
            .collect();
        Self { names }
    }

    fn resolve(&self, edge: &FlowEdge, node_id: &str) -> Result<String, CompileError> {
        self.names
            .get(node_id)
            .map(|name| name.to_string())
            .ok_or_else(|| CompileError::UnresolvedEndpoint {
                edge_id: edge.id.clone(),
                node_id: node_id.to_string(),
            })
    }
}

/// Compiles the pattern-kind nodes of a flat graph into a hierarchical
/// pattern document.
///
/// Recursive over scope: direct children of the current scope become the
/// graph's nodes, edges with both endpoints in that child set become its
/// edges, and COMPOSITE children recurse into their own scope. Emission
/// follows the flat array's relative order; nothing is sorted. An edge whose
/// endpoint cannot be resolved fails the whole compilation.
pub fn compile_pattern(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    addressing: Addressing,
) -> Result<PatternGraph, CompileError> {
    let pattern_nodes: Vec<&FlowNode> = nodes.iter().filter(|n| n.payload.is_pattern()).collect();
    if pattern_nodes.is_empty() {
        return Ok(PatternGraph::default());
    }

    let pattern_ids: AHashSet<&str> = pattern_nodes.iter().map(|n| n.id.as_str()).collect();
    let strategy_edges: Vec<&FlowEdge> = edges
        .iter()
        .filter(|e| {
            e.is_strategy()
                && pattern_ids.contains(e.source.as_str())
                && pattern_ids.contains(e.target.as_str())
        })
        .collect();

    let names = NameTable::build(&pattern_nodes, addressing);

    // Scope roots: no parent, or a parent outside the compiled set. The
    // latter matters when compiling a restricted subset for a when-clause.
    let roots: Vec<&FlowNode> = pattern_nodes
        .iter()
        .filter(|n| {
            n.parent_id
                .as_deref()
                .is_none_or(|p| !pattern_ids.contains(p))
        })
        .copied()
        .collect();
    let root_ids: AHashSet<&str> = roots.iter().map(|n| n.id.as_str()).collect();

    let compiled_nodes = roots
        .iter()
        .filter_map(|n| {
            n.payload
                .as_pattern()
                .map(|(kind, data)| convert_node(n, kind, data, &pattern_nodes, &strategy_edges, &names))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let compiled_edges = strategy_edges
        .iter()
        .filter(|e| root_ids.contains(e.source.as_str()) && root_ids.contains(e.target.as_str()))
        .map(|e| convert_edge(e, &names))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PatternGraph {
        nodes: compiled_nodes,
        edges: compiled_edges,
    })
}

fn convert_node(
    node: &FlowNode,
    kind: PatternKind,
    data: &PatternData,
    pattern_nodes: &[&FlowNode],
    strategy_edges: &[&FlowEdge],
    names: &NameTable<'_>,
) -> Result<PatternNode, CompileError> {
    let graph = if kind == PatternKind::Composite {
        Some(convert_scope(node, pattern_nodes, strategy_edges, names)?)
    } else {
        None
    };

    Ok(PatternNode {
        name: lookup_name(node, names),
        kind,
        quantifier: data.quantifier.clone(),
        condition: condition_of(data),
        graph,
        times: data.times.clone(),
        window: data.window.clone(),
        until_condition: None,
        after_match_skip_strategy: AfterMatchSkipStrategy::default(),
    })
}

/// Builds the nested graph of a COMPOSITE node from its direct children and
/// the edges connecting them.
fn convert_scope(
    parent: &FlowNode,
    pattern_nodes: &[&FlowNode],
    strategy_edges: &[&FlowEdge],
    names: &NameTable<'_>,
) -> Result<PatternGraph, CompileError> {
    let children: Vec<&FlowNode> = pattern_nodes
        .iter()
        .filter(|n| n.parent_id.as_deref() == Some(parent.id.as_str()))
        .copied()
        .collect();
    let child_ids: AHashSet<&str> = children.iter().map(|n| n.id.as_str()).collect();

    let nodes = children
        .iter()
        .filter_map(|n| {
            n.payload
                .as_pattern()
                .map(|(kind, data)| convert_node(n, kind, data, pattern_nodes, strategy_edges, names))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let edges = strategy_edges
        .iter()
        .filter(|e| child_ids.contains(e.source.as_str()) && child_ids.contains(e.target.as_str()))
        .map(|e| convert_edge(e, names))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PatternGraph { nodes, edges })
}

fn convert_edge(edge: &FlowEdge, names: &NameTable<'_>) -> Result<PatternEdge, CompileError> {
    Ok(PatternEdge {
        source: names.resolve(edge, &edge.source)?,
        target: names.resolve(edge, &edge.target)?,
        strategy: edge.strategy_or_default(),
    })
}

fn lookup_name(node: &FlowNode, names: &NameTable<'_>) -> String {
    names
        .names
        .get(node.id.as_str())
        .map(|name| name.to_string())
        .unwrap_or_else(|| node.payload.display_name().to_string())
}

fn condition_of(data: &PatternData) -> Option<Condition> {
    data.condition
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(Condition::expr)
}
