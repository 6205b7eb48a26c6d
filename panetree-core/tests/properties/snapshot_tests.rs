//! Property-based tests for snapshot persistence

use panetree_core::{LayoutError, WorkspaceSnapshot};
use proptest::prelude::*;
use serde_json::Value;

use super::{build, ops_strategy};

/// Rewrites a current document into the v1 shape.
fn downgrade(value: &mut Value) {
    fn node(current: &mut Value) {
        let Some(object) = current.as_object_mut() else {
            return;
        };
        if let Some(ratios) = object.remove("ratios") {
            object.insert("position".to_owned(), ratios[0].clone());
        }
        if let Some(children) = object.get_mut("children").and_then(Value::as_array_mut) {
            children.iter_mut().for_each(node);
        }
    }

    let document = value.as_object_mut().unwrap();
    let focused = document["metadata"]["focused_pane_id"].clone();
    document.remove("metadata");
    document.insert("focused".to_owned(), focused);
    document.insert("version".to_owned(), Value::from(1));
    node(document.get_mut("root").unwrap());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// Saving to JSON and loading back yields the identical tree.
    #[test]
    fn prop_json_round_trip_is_identity(ops in ops_strategy(30)) {
        let tree = build(&ops);
        let json = WorkspaceSnapshot::capture(&tree).unwrap().to_json().unwrap();
        let restored = WorkspaceSnapshot::from_json(&json).unwrap().to_tree().unwrap();
        prop_assert_eq!(restored, tree);
    }

    /// A v1 document of any tree migrates to the same structure and focus.
    #[test]
    fn prop_v1_documents_migrate(ops in ops_strategy(30)) {
        let tree = build(&ops);
        let mut value = serde_json::to_value(WorkspaceSnapshot::capture(&tree).unwrap()).unwrap();
        downgrade(&mut value);

        let snapshot = WorkspaceSnapshot::from_value(value).unwrap();
        prop_assert_eq!(snapshot.version, 2);
        let migrated = snapshot.to_tree().unwrap();

        prop_assert_eq!(migrated.pane_ids(), tree.pane_ids());
        prop_assert_eq!(migrated.focused(), tree.focused());
        prop_assert_eq!(migrated.root(), tree.root());
        for split in tree.splits() {
            let other = migrated.split_node(split.node_id).unwrap();
            prop_assert_eq!(other.orientation, split.orientation);
            prop_assert_eq!(other.children, split.children);
            prop_assert!((other.ratios[0] - split.ratios[0]).abs() < 1e-9);
            prop_assert!((other.ratios[1] - split.ratios[1]).abs() < 1e-9);
        }
    }

    /// Unknown versions are refused rather than guessed at.
    #[test]
    fn prop_unsupported_versions_rejected(ops in ops_strategy(10), version in 3..1000u32) {
        let tree = build(&ops);
        let mut value = serde_json::to_value(WorkspaceSnapshot::capture(&tree).unwrap()).unwrap();
        value["version"] = Value::from(version);
        let result = WorkspaceSnapshot::from_value(value);
        prop_assert!(
            matches!(result, Err(LayoutError::ConfigVersion { found, .. }) if found == version),
            "unexpected {:?}",
            result
        );
    }

    /// Every leaf listed by the snapshot is a pane of the tree.
    #[test]
    fn prop_snapshot_leaves_match_tree(ops in ops_strategy(30)) {
        let tree = build(&ops);
        let snapshot = WorkspaceSnapshot::capture(&tree).unwrap();
        let leaves = snapshot.leaves();
        prop_assert_eq!(leaves.len(), tree.pane_count());
        for (pane_id, surface_id) in leaves {
            prop_assert_eq!(&tree.find(pane_id).unwrap().surface_id, &surface_id);
            prop_assert!(tree.pane_ids().contains(&pane_id));
        }
    }
}
