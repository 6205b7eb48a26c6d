//! Property-based tests for sequential and directional focus

use std::collections::BTreeSet;

use panetree_core::config::NavigationConfig;
use panetree_core::geometry::{self, Rect};
use panetree_core::{Direction, FocusCoordinator};
use proptest::prelude::*;

use super::{build, ops_strategy};

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// Focus order is a permutation of the panes.
    #[test]
    fn prop_focus_order_is_permutation(ops in ops_strategy(30)) {
        let tree = build(&ops);
        let order: BTreeSet<_> = FocusCoordinator::focus_order(&tree).into_iter().collect();
        let panes: BTreeSet<_> = tree.pane_ids().into_iter().collect();
        prop_assert_eq!(order, panes);
    }

    /// Stepping forward visits every pane once and wraps to the start.
    #[test]
    fn prop_focus_next_cycles(ops in ops_strategy(30), forward in any::<bool>()) {
        let mut tree = build(&ops);
        let start = tree.focused();
        let mut visited = BTreeSet::new();

        for _ in 0..tree.pane_count() {
            let next = FocusCoordinator::step(&tree, forward).unwrap();
            prop_assert!(visited.insert(next), "visited {} twice", next);
            tree.set_focused(Some(next)).unwrap();
        }
        prop_assert_eq!(visited.len(), tree.pane_count());
        prop_assert_eq!(tree.focused(), start);
    }

    /// A directional neighbour lies strictly on that side and shares an edge
    /// span with the source.
    #[test]
    fn prop_neighbor_lies_in_direction(
        ops in ops_strategy(30),
        pick in any::<usize>(),
        direction in direction_strategy(),
    ) {
        let tree = build(&ops);
        let layout = geometry::layout(&tree, Rect::new(0, 0, 2000, 1500), 0);
        let panes = tree.pane_ids();
        let from = panes[pick % panes.len()];
        let mut focus = FocusCoordinator::new(NavigationConfig::default());

        if let Some(to) = focus.neighbor(&tree, &layout, from, direction) {
            prop_assert_ne!(to, from);
            let a = layout.rect(from).unwrap();
            let b = layout.rect(to).unwrap();
            match direction {
                Direction::Left => prop_assert!(b.right() <= a.x && a.overlap_y(&b) > 0),
                Direction::Right => prop_assert!(b.x >= a.right() && a.overlap_y(&b) > 0),
                Direction::Up => prop_assert!(b.bottom() <= a.y && a.overlap_x(&b) > 0),
                Direction::Down => prop_assert!(b.y >= a.bottom() && a.overlap_x(&b) > 0),
            }
        }
        prop_assert!(focus.is_cached());
    }

    /// Rebuilding the index gives the same answer as the cached one.
    #[test]
    fn prop_neighbor_cache_is_consistent(
        ops in ops_strategy(30),
        direction in direction_strategy(),
    ) {
        let tree = build(&ops);
        let layout = geometry::layout(&tree, Rect::new(0, 0, 1600, 900), 2);
        let mut focus = FocusCoordinator::new(NavigationConfig::default());
        for from in tree.pane_ids() {
            let cached = focus.neighbor(&tree, &layout, from, direction);
            focus.invalidate();
            let fresh = focus.neighbor(&tree, &layout, from, direction);
            prop_assert_eq!(cached, fresh);
        }
    }
}
