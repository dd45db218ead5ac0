//! When-then partitioning around compute nodes.
//!
//! Every compute node closes over the pattern subgraph feeding it: walking
//! backward from each of its compute-edge sources along strategy edges, and
//! pulling in all descendants of any COMPOSITE encountered. Each compute
//! node yields one independent clause; upstream sets may overlap between
//! clauses and are not deduplicated.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use super::{Addressing, compile_pattern};
use crate::error::CompileError;
use crate::flow::{FlowEdge, FlowNode, NodePayload};
use crate::pattern::PatternGraph;

/// The compute step a matched pattern triggers: the flat node's payload,
/// augmented with its editor id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeStep {
    pub id: String,
    #[serde(flatten)]
    pub payload: NodePayload,
}

/// One independent rule clause: a compiled pattern subgraph and the compute
/// step it feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhenThenClause {
    pub when: PatternGraph,
    pub then: ComputeStep,
}

/// Carves the flat graph into one when-then clause per compute node.
///
/// A graph without compute nodes yields an empty list; no default clause is
/// fabricated.
pub fn partition_when_then(
    nodes: &[FlowNode],
    edges: &[FlowEdge],
    addressing: Addressing,
) -> Result<Vec<WhenThenClause>, CompileError> {
    let compute_nodes: Vec<&FlowNode> = nodes.iter().filter(|n| n.payload.is_compute()).collect();
    if compute_nodes.is_empty() {
        log::debug!("no compute nodes found; nothing to partition");
        return Ok(Vec::new());
    }

    let mut clauses = Vec::with_capacity(compute_nodes.len());
    for compute in compute_nodes {
        let upstream = collect_upstream(compute, nodes, edges);

        let subgraph: Vec<FlowNode> = nodes
            .iter()
            .filter(|n| upstream.contains(n.id.as_str()))
            .cloned()
            .collect();

        let when = compile_pattern(&subgraph, edges, addressing)?;
        clauses.push(WhenThenClause {
            when,
            then: ComputeStep {
                id: compute.id.clone(),
                payload: compute.payload.clone(),
            },
        });
    }

    Ok(clauses)
}

/// Gathers the ids of every pattern node upstream of `compute`.
///
/// Each source of a compute edge targeting the node is an exit point. From
/// there the walk follows the (single expected) incoming strategy edge
/// backward until none remains, accumulating every visited node together
/// with all descendants of visited COMPOSITE nodes.
fn collect_upstream(
    compute: &FlowNode,
    nodes: &[FlowNode],
    edges: &[FlowEdge],
) -> AHashSet<String> {
    let mut collected: AHashSet<String> = AHashSet::new();

    let exits: Vec<&str> = edges
        .iter()
        .filter(|e| e.is_compute() && e.target == compute.id)
        .map(|e| e.source.as_str())
        .collect();

    for exit in exits {
        let mut current = Some(exit);
        while let Some(id) = current {
            if collected.contains(id) {
                break;
            }
            collect_with_descendants(id, nodes, &mut collected);
            current = edges
                .iter()
                .find(|e| e.is_strategy() && e.target == id)
                .map(|e| e.source.as_str());
        }
    }

    collected
}

fn collect_with_descendants(node_id: &str, nodes: &[FlowNode], collected: &mut AHashSet<String>) {
    if !collected.insert(node_id.to_string()) {
        return;
    }
    for child in nodes
        .iter()
        .filter(|n| n.parent_id.as_deref() == Some(node_id))
    {
        collect_with_descendants(&child.id, nodes, collected);
    }
}
