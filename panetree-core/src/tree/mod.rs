//! Layout tree model
//!
//! The tree is the single source of truth for the layout structure. Panes are
//! leaves; every internal node is a two-way split along one axis.

mod model;
mod node;
mod validate;

pub use model::{ClosedPane, TreeModel, check_resize_ratio, check_split_ratio};
pub use node::{
    DEFAULT_SPLIT_RATIO, LeafMetadata, LeafNode, MAX_RESIZE_RATIO, MAX_SPLIT_RATIO,
    MIN_RESIZE_RATIO, MIN_SPLIT_RATIO, NodeRef, RATIO_TOLERANCE, SizeConstraints, SplitNode,
    normalize_ratios,
};
pub use validate::InvariantViolation;
