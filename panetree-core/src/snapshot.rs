//! Versioned layout snapshots
//!
//! A [`WorkspaceSnapshot`] is an owned, serializable copy of the layout: the
//! nested tree, the focused pane and host metadata. Reading and writing
//! files is up to the host; this module only converts between the tree and
//! JSON.
//!
//! # Format history
//!
//! - **v1**: splits stored one `position` (share of the first child); the
//!   focused pane lived at the top level as `focused`.
//! - **v2**: splits store both `ratios`; focus moved into `metadata`.
//!
//! Older documents are migrated on load.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LayoutError, LayoutResult};
use crate::tree::{LeafMetadata, SizeConstraints, TreeModel};
use crate::types::{NodeId, Orientation, PaneId, SurfaceId};

/// Current snapshot format version.
pub const CURRENT_SNAPSHOT_VERSION: u32 = 2;

/// Oldest version that can still be migrated.
pub const MIN_SNAPSHOT_VERSION: u32 = 1;

/// Nested, self-contained form of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SnapshotNode {
    /// A pane.
    Leaf {
        /// Pane identifier.
        pane_id: PaneId,
        /// Content surface key.
        surface_id: SurfaceId,
        /// Minimum usable size.
        #[serde(default)]
        size_constraints: SizeConstraints,
        /// Title, focus hint and host data.
        #[serde(default)]
        metadata: LeafMetadata,
    },
    /// A two-way split.
    Split {
        /// Split identifier.
        node_id: NodeId,
        /// Axis of the division.
        orientation: Orientation,
        /// Share of each child.
        ratios: [f64; 2],
        /// First (left/top) and second (right/bottom) child.
        children: Box<[SnapshotNode; 2]>,
    },
}

impl SnapshotNode {
    /// Leaves below this node in tree order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(PaneId, SurfaceId)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<(PaneId, SurfaceId)>) {
        match self {
            Self::Leaf {
                pane_id,
                surface_id,
                ..
            } => out.push((*pane_id, surface_id.clone())),
            Self::Split { children, .. } => {
                children[0].collect_leaves(out);
                children[1].collect_leaves(out);
            }
        }
    }
}

/// Session-level metadata stored next to the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Pane that had focus when the snapshot was taken.
    #[serde(default)]
    pub focused_pane_id: Option<PaneId>,
    /// Free-form host data.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

/// Persistable copy of a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    /// Format version.
    pub version: u32,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
    /// The tree, or `None` for an empty layout.
    pub root: Option<SnapshotNode>,
    /// Focus and host metadata.
    #[serde(default)]
    pub metadata: SnapshotMetadata,
}

impl WorkspaceSnapshot {
    /// Captures the current state of a tree.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidStructure` if the tree is invalid.
    pub fn capture(tree: &TreeModel) -> LayoutResult<Self> {
        Ok(Self {
            version: CURRENT_SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            root: tree.serialize()?,
            metadata: SnapshotMetadata {
                focused_pane_id: tree.focused(),
                extra: BTreeMap::new(),
            },
        })
    }

    /// Rebuilds and validates the tree.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidStructure` if the stored tree is invalid.
    pub fn to_tree(&self) -> LayoutResult<TreeModel> {
        TreeModel::deserialize(self.root.clone(), self.metadata.focused_pane_id)
    }

    /// Every pane and its surface key, in tree order.
    #[must_use]
    pub fn leaves(&self) -> Vec<(PaneId, SurfaceId)> {
        self.root.as_ref().map(SnapshotNode::leaves).unwrap_or_default()
    }

    /// Serializes the snapshot to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> LayoutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a snapshot, migrating older versions.
    ///
    /// # Errors
    ///
    /// - `LayoutError::ConfigVersion` for a missing, zero or future version
    /// - `LayoutError::Serialization` for malformed JSON
    pub fn from_json(json: &str) -> LayoutResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Like [`from_json`](Self::from_json), for an already parsed document.
    ///
    /// # Errors
    ///
    /// As [`from_json`](Self::from_json).
    pub fn from_value(mut value: Value) -> LayoutResult<Self> {
        let version = document_version(&value);
        if !(MIN_SNAPSHOT_VERSION..=CURRENT_SNAPSHOT_VERSION).contains(&version) {
            return Err(LayoutError::ConfigVersion {
                found: version,
                supported: CURRENT_SNAPSHOT_VERSION,
            });
        }
        if version == 1 {
            tracing::info!(
                from = version,
                to = CURRENT_SNAPSHOT_VERSION,
                "Migrating layout snapshot"
            );
            migrate_v1(&mut value);
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn document_version(value: &Value) -> u32 {
    value
        .get("version")
        .and_then(Value::as_u64)
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// Rewrites a v1 document in place into the v2 shape.
fn migrate_v1(value: &mut Value) {
    let Some(document) = value.as_object_mut() else {
        return;
    };
    let focused = document.remove("focused").unwrap_or(Value::Null);
    let metadata = document
        .entry("metadata")
        .or_insert_with(|| Value::Object(serde_json::Map::new()));
    if let Some(metadata) = metadata.as_object_mut() {
        metadata.entry("focused_pane_id").or_insert(focused);
    }
    document
        .entry("saved_at")
        .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
    if let Some(root) = document.get_mut("root") {
        migrate_v1_node(root);
    }
    document.insert("version".to_owned(), Value::from(CURRENT_SNAPSHOT_VERSION));
}

fn migrate_v1_node(node: &mut Value) {
    let Some(object) = node.as_object_mut() else {
        return;
    };
    if let Some(position) = object.remove("position").and_then(|p| p.as_f64()) {
        object.insert("ratios".to_owned(), serde_json::json!([position, 1.0 - position]));
    }
    if let Some(children) = object.get_mut("children").and_then(Value::as_array_mut) {
        for child in children {
            migrate_v1_node(child);
        }
    }
}
