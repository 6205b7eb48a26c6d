//! Property-based tests for tree structure invariants

use std::collections::BTreeSet;

use panetree_core::tree::RATIO_TOLERANCE;
use panetree_core::{NodeRef, SurfaceId, TreeModel};
use proptest::prelude::*;

use super::{Op, apply, build, ops_strategy};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every operation, accepted or rejected, leaves a valid tree.
    #[test]
    fn prop_random_ops_keep_tree_valid(ops in ops_strategy(40)) {
        let (mut tree, _) = TreeModel::with_root(SurfaceId::new("root"));
        for op in &ops {
            apply(&mut tree, op);
            let violations = tree.violations();
            prop_assert!(violations.is_empty(), "after {:?}: {:?}", op, violations);
        }
    }

    /// A binary tree with n leaves has n - 1 splits.
    #[test]
    fn prop_leaf_and_split_counts_agree(ops in ops_strategy(40)) {
        let tree = build(&ops);
        prop_assert!(tree.pane_count() >= 1);
        prop_assert_eq!(tree.split_count() + 1, tree.pane_count());
    }

    /// Ratios of every split sum to one and stay inside the resize bounds.
    #[test]
    fn prop_ratios_sum_to_one(ops in ops_strategy(40)) {
        let tree = build(&ops);
        for split in tree.splits() {
            let sum = split.ratios[0] + split.ratios[1];
            prop_assert!((sum - 1.0).abs() <= RATIO_TOLERANCE, "ratios {:?}", split.ratios);
            prop_assert!(split.ratios.iter().all(|r| *r > 0.0 && *r < 1.0));
        }
    }

    /// Pane ids are unique and each names exactly one leaf.
    #[test]
    fn prop_pane_ids_unique(ops in ops_strategy(40)) {
        let tree = build(&ops);
        let ids = tree.pane_ids();
        let unique: BTreeSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(unique.len(), ids.len());
        for id in ids {
            prop_assert!(tree.find(id).is_some());
        }
    }

    /// Closing a pane and reopening it restores the exact tree.
    #[test]
    fn prop_close_then_reopen_is_identity(ops in ops_strategy(30), pick in any::<usize>()) {
        let mut tree = build(&ops);
        prop_assume!(tree.pane_count() > 1);
        let before = tree.clone();
        let panes = tree.pane_ids();

        let closed = tree.close(panes[pick % panes.len()]).unwrap();
        prop_assert!(tree.validate().is_ok());
        let focus = closed.previous_focus;
        tree.reopen(closed).unwrap();
        tree.set_focused(focus.pane()).unwrap();

        prop_assert_eq!(tree, before);
    }

    /// Split then close of the new pane restores the tree.
    #[test]
    fn prop_split_then_close_is_identity(
        ops in ops_strategy(30),
        pick in any::<usize>(),
        side in super::side_strategy(),
        ratio in 0.15..0.85f64,
    ) {
        let mut tree = build(&ops);
        let before = tree.clone();
        let panes = tree.pane_ids();
        let target = panes[pick % panes.len()];

        let new_pane = tree.split(target, side, SurfaceId::new("new"), ratio).unwrap();
        prop_assert_eq!(tree.sibling_of(new_pane), Some(NodeRef::Leaf(target)));
        tree.close(new_pane).unwrap();
        tree.set_focused(before.focused()).unwrap();

        prop_assert_eq!(tree, before);
    }

    /// The focused pane, when set, is always a leaf of the tree.
    #[test]
    fn prop_focus_stays_inside_tree(ops in ops_strategy(40)) {
        let tree = build(&ops);
        if let Some(focused) = tree.focused() {
            prop_assert!(tree.contains(focused));
        }
    }
}

#[test]
fn closing_last_pane_is_rejected() {
    let mut tree = build(&[]);
    assert!(!apply(&mut tree, &Op::Close { pane: 0 }));
    assert_eq!(tree.pane_count(), 1);
}
