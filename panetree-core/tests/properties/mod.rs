//! Property-based tests for the layout engine
//!
//! Each submodule drives the engine with random operation sequences and
//! checks a structural property after every step.

mod command_tests;
mod focus_tests;
mod geometry_tests;
mod snapshot_tests;
mod tree_tests;

use panetree_core::{Side, SurfaceId, TreeModel};
use proptest::prelude::*;

/// One random mutation. Pane and node indices are taken modulo the
/// current counts, so every generated op names something that exists.
#[derive(Debug, Clone)]
pub enum Op {
    Split { pane: usize, side: Side, ratio: f64 },
    Close { pane: usize },
    Resize { node: usize, child: usize, ratio: f64 },
    Focus { pane: usize },
    Hint { pane: usize, hint: Option<i32> },
}

pub fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![
        Just(Side::Left),
        Just(Side::Right),
        Just(Side::Top),
        Just(Side::Bottom),
    ]
}

pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), side_strategy(), 0.15..0.85f64)
            .prop_map(|(pane, side, ratio)| Op::Split { pane, side, ratio }),
        2 => any::<usize>().prop_map(|pane| Op::Close { pane }),
        2 => (any::<usize>(), 0..2usize, 0.1..0.9f64)
            .prop_map(|(node, child, ratio)| Op::Resize { node, child, ratio }),
        1 => any::<usize>().prop_map(|pane| Op::Focus { pane }),
        1 => (any::<usize>(), proptest::option::of(-5..5i32))
            .prop_map(|(pane, hint)| Op::Hint { pane, hint }),
    ]
}

pub fn ops_strategy(max: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op_strategy(), 0..max)
}

/// Applies `op` directly to the tree. Returns false if the op was
/// rejected (closing the last pane).
pub fn apply(tree: &mut TreeModel, op: &Op) -> bool {
    let panes = tree.pane_ids();
    let nodes: Vec<_> = tree.splits().map(|s| s.node_id).collect();
    match *op {
        Op::Split { pane, side, ratio } => tree
            .split(panes[pane % panes.len()], side, SurfaceId::new("s"), ratio)
            .is_ok(),
        Op::Close { pane } => tree.close(panes[pane % panes.len()]).is_ok(),
        Op::Resize { node, child, ratio } => {
            !nodes.is_empty() && tree.resize(nodes[node % nodes.len()], child, ratio).is_ok()
        }
        Op::Focus { pane } => tree
            .set_focused(Some(panes[pane % panes.len()]))
            .is_ok(),
        Op::Hint { pane, hint } => tree
            .set_focus_hint(panes[pane % panes.len()], hint)
            .is_ok(),
    }
}

/// A tree built from `ops` on top of a single pane.
pub fn build(ops: &[Op]) -> TreeModel {
    let (mut tree, _) = TreeModel::with_root(SurfaceId::new("root"));
    for op in ops {
        apply(&mut tree, op);
    }
    tree
}
