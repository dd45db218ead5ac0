use serde::{Deserialize, Serialize};

use super::{AfterMatchSkipStrategy, Condition, ConsumingStrategy, Quantifier, Times, Window};

/// A hierarchical pattern document: the unit persisted to and consumed by the
/// external execution engine.
///
/// Edges address nodes by name, so names must be unique within their
/// enclosing graph. The flat editor ids do not survive compilation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternGraph {
    pub nodes: Vec<PatternNode>,
    pub edges: Vec<PatternEdge>,
}

impl PatternGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Total node count including every nested graph.
    pub fn total_nodes(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| 1 + n.graph.as_ref().map_or(0, PatternGraph::total_nodes))
            .sum()
    }

    /// Total edge count including every nested graph.
    pub fn total_edges(&self) -> usize {
        self.edges.len()
            + self
                .nodes
                .iter()
                .filter_map(|n| n.graph.as_ref())
                .map(PatternGraph::total_edges)
                .sum::<usize>()
    }

    /// Nesting depth: 1 for a flat graph, +1 per level of COMPOSITE nesting.
    pub fn depth(&self) -> usize {
        1 + self
            .nodes
            .iter()
            .filter_map(|n| n.graph.as_ref())
            .map(PatternGraph::depth)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternKind {
    Atomic,
    Composite,
}

/// A single node of the hierarchical document.
///
/// ATOMIC nodes match one event; COMPOSITE nodes carry a nested `graph` of
/// the same shape. `until_condition` is emitted as an explicit null until the
/// editor grows support for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PatternKind,
    #[serde(default)]
    pub quantifier: Quantifier,
    #[serde(default)]
    pub condition: Option<Condition>,
    #[serde(default)]
    pub graph: Option<PatternGraph>,
    #[serde(default)]
    pub times: Option<Times>,
    #[serde(default)]
    pub window: Option<Window>,
    #[serde(default)]
    pub until_condition: Option<Condition>,
    #[serde(default)]
    pub after_match_skip_strategy: AfterMatchSkipStrategy,
}

/// An edge of the hierarchical document, addressing its endpoints by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub strategy: ConsumingStrategy,
}
