use serde::{Deserialize, Serialize};

use crate::pattern::ConsumingStrategy;

/// An edge of the flat editor graph, addressing its endpoints by node id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(flatten)]
    pub kind: EdgeKind,
}

/// The two wire kinds of the editor: `strategy` edges sequence pattern nodes
/// within a scope, `compute` edges feed a pattern node (or COMPOSITE
/// boundary) into a compute node's input and carry no strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EdgeKind {
    Strategy {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        strategy: Option<ConsumingStrategy>,
    },
    Compute,
}

impl FlowEdge {
    pub fn strategy(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        strategy: Option<ConsumingStrategy>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Strategy { strategy },
        }
    }

    pub fn compute(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Compute,
        }
    }

    pub fn is_strategy(&self) -> bool {
        matches!(self.kind, EdgeKind::Strategy { .. })
    }

    pub fn is_compute(&self) -> bool {
        matches!(self.kind, EdgeKind::Compute)
    }

    /// The consuming strategy of a strategy edge, falling back to the
    /// engine default when the editor left it unset.
    pub fn strategy_or_default(&self) -> ConsumingStrategy {
        match self.kind {
            EdgeKind::Strategy { strategy } => strategy.unwrap_or_default(),
            EdgeKind::Compute => ConsumingStrategy::default(),
        }
    }

    /// Whether the edge is incident to the given node, on either end.
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}
