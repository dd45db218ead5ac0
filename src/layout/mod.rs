//! Bounding-box expansion for COMPOSITE group nodes.
//!
//! After a structural edit the editor re-invokes [`expand_group_nodes`] so
//! every group tightly encloses its direct children again. The pass is pure
//! and resolves conflicting parent and child expansions with precomputed
//! per-node offsets; cascades deeper than the parent-of-parent relationship
//! require another invocation.

use ahash::AHashMap;

use crate::flow::{Dimensions, FlowNode, Position};

/// Default padding between a group's border and its children.
pub const DEFAULT_PADDING: f64 = 25.0;
/// Default extra allowance above children for the group's header row.
pub const DEFAULT_HEADER_HEIGHT: f64 = 0.0;

struct Bounds {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

struct Expansion {
    dimension: Dimensions,
    offset: Position,
    position: Position,
    changed: bool,
}

fn resolve_expansion(parent: &FlowNode, bounds: &Bounds) -> Expansion {
    let measured = parent.measured.unwrap_or_default();

    let dimension = Dimensions {
        width: bounds.x2 - bounds.x1,
        height: bounds.y2 - bounds.y1,
    };
    let offset = Position {
        x: bounds.x1,
        y: bounds.y1,
    };
    let position = Position {
        x: parent.position.x + bounds.x1,
        y: parent.position.y + bounds.y1,
    };

    let changed = dimension.width != measured.width
        || dimension.height != measured.height
        || offset.x != 0.0
        || offset.y != 0.0;

    Expansion {
        dimension,
        offset,
        position,
        changed,
    }
}

/// Returns a new node list where every group node's size and position tightly
/// enclose its direct children plus padding and header allowance.
///
/// Children of an expanded group are shifted by the group's offset so their
/// coordinates stay correct relative to its new top-left. Groups with zero
/// children are left untouched; an empty group is a validation concern, not a
/// layout concern.
pub fn expand_group_nodes(nodes: &[FlowNode], padding: f64, header_height: f64) -> Vec<FlowNode> {
    let mut child_map: AHashMap<&str, Vec<&FlowNode>> = AHashMap::new();
    let mut parents: AHashMap<&str, &FlowNode> = AHashMap::new();

    // Reverse iteration fills the child map before the owning node is seen,
    // so a node is recognized as a parent by a single map lookup. A node can
    // be both parent and child.
    for node in nodes.iter().rev() {
        if let Some(parent_id) = &node.parent_id {
            child_map.entry(parent_id.as_str()).or_default().push(node);
        }
        if child_map.contains_key(node.id.as_str()) {
            parents.insert(node.id.as_str(), node);
        }
    }

    let mut expansions: AHashMap<&str, Expansion> = AHashMap::new();

    for (parent_id, children) in &child_map {
        let Some(parent) = parents.get(parent_id) else {
            continue;
        };

        let mut bounds = Bounds {
            x1: f64::INFINITY,
            y1: f64::INFINITY,
            x2: f64::NEG_INFINITY,
            y2: f64::NEG_INFINITY,
        };
        for child in children {
            let measured = child.measured.unwrap_or_default();
            bounds.x1 = bounds.x1.min(child.position.x - padding);
            bounds.y1 = bounds.y1.min(child.position.y - padding - header_height);
            bounds.x2 = bounds.x2.max(child.position.x + measured.width + padding);
            bounds.y2 = bounds.y2.max(child.position.y + measured.height + padding);
        }

        let expansion = resolve_expansion(parent, &bounds);
        if expansion.changed {
            expansions.insert(*parent_id, expansion);
        }
    }

    nodes
        .iter()
        .map(|node| {
            let own = expansions.get(node.id.as_str());
            let parent = node
                .parent_id
                .as_deref()
                .and_then(|p| expansions.get(p));

            let mut updated = node.clone();
            match (own, parent) {
                // Parent and child expansion at once: apply the new size and
                // re-express the position relative to the parent's shift.
                (Some(own), Some(parent)) => {
                    updated.measured = Some(own.dimension);
                    updated.position = Position {
                        x: own.position.x - parent.offset.x,
                        y: own.position.y - parent.offset.y,
                    };
                }
                (Some(own), None) => {
                    updated.measured = Some(own.dimension);
                    updated.position = own.position;
                }
                (None, Some(parent)) => {
                    updated.position = Position {
                        x: node.position.x - parent.offset.x,
                        y: node.position.y - parent.offset.y,
                    };
                }
                (None, None) => {}
            }
            updated
        })
        .collect()
}
