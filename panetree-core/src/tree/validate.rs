//! Structural invariant checks for the layout tree

use std::collections::HashSet;
use std::fmt;

use super::model::TreeModel;
use super::node::{NodeRef, RATIO_TOLERANCE};
use crate::types::{NodeId, PaneId};

/// One broken structural invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// Nodes exist but the tree has no root.
    MissingRoot,
    /// The root names a node that is not in the arena.
    DanglingRoot(NodeRef),
    /// A split references a child that is not in the arena.
    DanglingChild {
        /// Split holding the reference.
        parent: NodeId,
        /// Missing child.
        child: NodeRef,
    },
    /// A node's recorded parent does not match the split referencing it.
    ParentMismatch {
        /// Node with the wrong back-reference.
        node: NodeRef,
        /// Parent recorded on the node.
        recorded: Option<NodeId>,
        /// Parent found by walking the tree.
        actual: Option<NodeId>,
    },
    /// A pane is reachable more than once.
    DuplicatePane(PaneId),
    /// A split is reachable more than once (shared subtree or cycle).
    DuplicateSplit(NodeId),
    /// A node is stored in the arena but not reachable from the root.
    Orphan(NodeRef),
    /// A ratio lies outside (0, 1).
    RatioOutOfRange {
        /// Offending split.
        node: NodeId,
        /// Its ratios.
        ratios: [f64; 2],
    },
    /// The ratios of a split do not sum to one.
    RatioSum {
        /// Offending split.
        node: NodeId,
        /// Actual sum.
        sum: f64,
    },
    /// The focused pane is not a leaf of the tree.
    FocusNotInTree(PaneId),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "tree has nodes but no root"),
            Self::DanglingRoot(node) => write!(f, "root {node} does not exist"),
            Self::DanglingChild { parent, child } => {
                write!(f, "{parent} references missing child {child}")
            }
            Self::ParentMismatch {
                node,
                recorded,
                actual,
            } => write!(
                f,
                "{node} records parent {} but is owned by {}",
                display_parent(*recorded),
                display_parent(*actual)
            ),
            Self::DuplicatePane(id) => write!(f, "{id} appears more than once"),
            Self::DuplicateSplit(id) => write!(f, "{id} is reachable more than once"),
            Self::Orphan(node) => write!(f, "{node} is not reachable from the root"),
            Self::RatioOutOfRange { node, ratios } => {
                write!(f, "{node} has ratios {ratios:?} outside (0, 1)")
            }
            Self::RatioSum { node, sum } => write!(f, "{node} ratios sum to {sum}, not 1.0"),
            Self::FocusNotInTree(id) => write!(f, "focused {id} is not in the tree"),
        }
    }
}

fn display_parent(parent: Option<NodeId>) -> String {
    parent.map_or_else(|| "<root>".to_owned(), |id| id.to_string())
}

/// Collects every invariant violation in `tree`.
///
/// An empty result means the tree is valid.
pub(crate) fn check(tree: &TreeModel) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let Some(root) = tree.root() else {
        if tree.pane_count() > 0 || tree.split_count() > 0 {
            violations.push(InvariantViolation::MissingRoot);
        }
        if let Some(focused) = tree.focused() {
            violations.push(InvariantViolation::FocusNotInTree(focused));
        }
        return violations;
    };

    let mut seen: HashSet<NodeRef> = HashSet::new();
    let mut stack: Vec<(NodeRef, Option<NodeId>)> = vec![(root, None)];

    while let Some((node, owner)) = stack.pop() {
        if !seen.insert(node) {
            violations.push(match node {
                NodeRef::Leaf(id) => InvariantViolation::DuplicatePane(id),
                NodeRef::Split(id) => InvariantViolation::DuplicateSplit(id),
            });
            continue;
        }

        match node {
            NodeRef::Leaf(pane_id) => {
                let Some(leaf) = tree.leaf(pane_id) else {
                    violations.push(dangling(owner, node));
                    continue;
                };
                if leaf.parent != owner {
                    violations.push(InvariantViolation::ParentMismatch {
                        node,
                        recorded: leaf.parent,
                        actual: owner,
                    });
                }
            }
            NodeRef::Split(node_id) => {
                let Some(split) = tree.split_node(node_id) else {
                    violations.push(dangling(owner, node));
                    continue;
                };
                if split.parent != owner {
                    violations.push(InvariantViolation::ParentMismatch {
                        node,
                        recorded: split.parent,
                        actual: owner,
                    });
                }
                if split.ratios.iter().any(|r| !(*r > 0.0 && *r < 1.0)) {
                    violations.push(InvariantViolation::RatioOutOfRange {
                        node: node_id,
                        ratios: split.ratios,
                    });
                }
                let sum = split.ratios[0] + split.ratios[1];
                if !((sum - 1.0).abs() <= RATIO_TOLERANCE) {
                    violations.push(InvariantViolation::RatioSum { node: node_id, sum });
                }
                // Push second first so traversal stays left-to-right.
                stack.push((split.children[1], Some(node_id)));
                stack.push((split.children[0], Some(node_id)));
            }
        }
    }

    for leaf in tree.leaves() {
        let node = NodeRef::Leaf(leaf.pane_id);
        if !seen.contains(&node) {
            violations.push(InvariantViolation::Orphan(node));
        }
    }
    for split in tree.splits() {
        let node = NodeRef::Split(split.node_id);
        if !seen.contains(&node) {
            violations.push(InvariantViolation::Orphan(node));
        }
    }

    if let Some(focused) = tree.focused() {
        if !seen.contains(&NodeRef::Leaf(focused)) {
            violations.push(InvariantViolation::FocusNotInTree(focused));
        }
    }

    violations
}

fn dangling(owner: Option<NodeId>, child: NodeRef) -> InvariantViolation {
    match owner {
        Some(parent) => InvariantViolation::DanglingChild { parent, child },
        None => InvariantViolation::DanglingRoot(child),
    }
}
