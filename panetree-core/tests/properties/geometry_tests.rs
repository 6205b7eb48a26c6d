//! Property-based tests for geometry computation

use panetree_core::geometry::{self, Layout, Rect, partition};
use panetree_core::{NodeRef, Orientation};
use proptest::prelude::*;

use super::{build, ops_strategy};

fn viewport_strategy() -> impl Strategy<Value = Rect> {
    (-500..500i32, -500..500i32, 0..4000i32, 0..3000i32)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn node_rect(layout: &Layout, node: NodeRef) -> Option<Rect> {
    match node {
        NodeRef::Leaf(id) => layout.rect(id),
        NodeRef::Split(id) => layout.split_rects.get(&id).copied(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Without gaps the panes tile the viewport exactly: no overlap, no
    /// hole, nothing outside.
    #[test]
    fn prop_panes_tile_viewport(ops in ops_strategy(30), viewport in viewport_strategy()) {
        let tree = build(&ops);
        let layout = geometry::layout(&tree, viewport, 0);

        prop_assert_eq!(layout.panes.len(), tree.pane_count());
        let area: i64 = layout
            .panes
            .values()
            .map(|r| i64::from(r.width) * i64::from(r.height))
            .sum();
        prop_assert_eq!(area, i64::from(viewport.width) * i64::from(viewport.height));

        let rects: Vec<_> = layout.panes.values().copied().collect();
        for (i, a) in rects.iter().enumerate() {
            prop_assert!(a.width >= 0 && a.height >= 0);
            prop_assert!(a.x >= viewport.x && a.right() <= viewport.right(), "{} outside {}", a, viewport);
            prop_assert!(a.y >= viewport.y && a.bottom() <= viewport.bottom(), "{} outside {}", a, viewport);
            for b in &rects[i + 1..] {
                prop_assert!(!a.intersects(b), "{} overlaps {}", a, b);
            }
        }
    }

    /// Siblings plus the handle between them span their parent along the
    /// split axis and match it across.
    #[test]
    fn prop_siblings_and_handle_span_parent(
        ops in ops_strategy(30),
        viewport in viewport_strategy(),
        gap in 0..12i32,
    ) {
        let tree = build(&ops);
        let layout = geometry::layout(&tree, viewport, gap);

        for split in tree.splits() {
            let parent = layout.split_rects[&split.node_id];
            let first = node_rect(&layout, split.children[0]).unwrap();
            let second = node_rect(&layout, split.children[1]).unwrap();
            let handle = layout.handle_rect(split.node_id).unwrap();
            match split.orientation {
                Orientation::Horizontal => {
                    prop_assert_eq!(first.width + handle.width + second.width, parent.width);
                    prop_assert_eq!(first.x, parent.x);
                    prop_assert_eq!(handle.x, first.right());
                    prop_assert_eq!(second.x, handle.right());
                    prop_assert!(first.height == parent.height && second.height == parent.height);
                }
                Orientation::Vertical => {
                    prop_assert_eq!(first.height + handle.height + second.height, parent.height);
                    prop_assert_eq!(first.y, parent.y);
                    prop_assert_eq!(handle.y, first.bottom());
                    prop_assert_eq!(second.y, handle.bottom());
                    prop_assert!(first.width == parent.width && second.width == parent.width);
                }
            }
        }
    }

    /// Layout is a pure function of tree, viewport and gap.
    #[test]
    fn prop_layout_is_deterministic(ops in ops_strategy(30), viewport in viewport_strategy()) {
        let tree = build(&ops);
        prop_assert_eq!(
            geometry::layout(&tree, viewport, 4),
            geometry::layout(&tree.clone(), viewport, 4)
        );
    }

    /// Partition sections are contiguous modulo the gap and end at the span end.
    #[test]
    fn prop_partition_covers_span(
        origin in -1000..1000i32,
        size in 0..5000i32,
        ratio in 0.05..0.95f64,
        gap in 0..10i32,
    ) {
        let sections = partition(origin, size, &[ratio, 1.0 - ratio], gap);
        prop_assert_eq!(sections.len(), 2);
        let (first_start, first_len) = sections[0];
        let (second_start, second_len) = sections[1];
        prop_assert_eq!(first_start, origin);
        prop_assert!(first_len >= 0 && second_len >= 0);
        prop_assert!(second_start >= first_start + first_len);
        prop_assert_eq!(second_start + second_len, origin + size);
    }
}
