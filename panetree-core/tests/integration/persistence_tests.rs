//! Snapshots, migration and configuration files

use std::fs;

use panetree_core::surface::recording::RecordingProvider;
use panetree_core::{
    EngineConfig, LayoutError, LayoutSession, NodeRef, Orientation, PaneId, Rect, Side, SurfaceId,
    WorkspaceSnapshot,
};
use tempfile::TempDir;
use uuid::Uuid;

use super::{record_events, session};

const V1_DOCUMENT: &str = r#"{
    "version": 1,
    "focused": "00000000-0000-0000-0000-00000000000b",
    "root": {
        "type": "split",
        "node_id": "00000000-0000-0000-0000-000000000001",
        "orientation": "horizontal",
        "position": 0.25,
        "children": [
            {
                "type": "leaf",
                "pane_id": "00000000-0000-0000-0000-00000000000a",
                "surface_id": "editor"
            },
            {
                "type": "leaf",
                "pane_id": "00000000-0000-0000-0000-00000000000b",
                "surface_id": "terminal"
            }
        ]
    }
}"#;

fn pane(n: u128) -> PaneId {
    PaneId(Uuid::from_u128(n))
}

#[test]
fn saved_layout_loads_into_fresh_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.json");

    let mut original = session();
    let a = original.initialize("a").unwrap();
    let b = original.split(a, Side::Right, "b", 0.35).unwrap();
    original.split(b, Side::Bottom, "c", 0.6).unwrap();
    original.focus(a).unwrap();
    fs::write(&path, original.save().unwrap().to_json().unwrap()).unwrap();

    let mut restored = session();
    let snapshot = WorkspaceSnapshot::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    restored.load(&snapshot).unwrap();

    assert_eq!(restored.tree(), original.tree());
    assert_eq!(restored.layout(), original.layout());
    assert_eq!(restored.focused(), Some(a));
    assert_eq!(restored.pool().len(), 3);
    assert!(!restored.can_undo());
}

#[test]
fn v1_document_is_migrated_on_load() {
    let snapshot = WorkspaceSnapshot::from_json(V1_DOCUMENT).unwrap();
    assert_eq!(snapshot.version, 2);

    let mut session = session();
    session.load(&snapshot).unwrap();

    let (a, b) = (pane(0xa), pane(0xb));
    assert_eq!(session.focused(), Some(b));
    let Some(NodeRef::Split(node_id)) = session.tree().root() else {
        panic!("root should be a split");
    };
    let split = session.tree().split_node(node_id).unwrap();
    assert_eq!(split.orientation, Orientation::Horizontal);
    assert_eq!(split.ratios, [0.25, 0.75]);
    assert_eq!(session.layout().rect(a), Some(Rect::new(0, 0, 250, 800)));
    assert_eq!(session.pool().surface_id(b), Some(&SurfaceId::new("terminal")));
}

#[test]
fn unsupported_versions_are_refused() {
    for version in ["0", "3", "\"two\""] {
        let json = V1_DOCUMENT.replacen("\"version\": 1", &format!("\"version\": {version}"), 1);
        assert!(
            matches!(
                WorkspaceSnapshot::from_json(&json),
                Err(LayoutError::ConfigVersion { .. })
            ),
            "version {version} accepted"
        );
    }
}

#[test]
fn load_reuses_surfaces_of_known_panes() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();
    let saved = session.save().unwrap();
    let c = session.split(b, Side::Bottom, "c", 0.5).unwrap();
    let journal = session.provider().journal();

    session.load(&saved).unwrap();

    assert_eq!(session.provider().provided().len(), 3);
    assert!(session.pool().contains(a) && session.pool().contains(b));
    assert!(!session.pool().contains(c));
    assert_eq!(journal.attach_count(&SurfaceId::new("a")), 1);
    assert_eq!(journal.detach_count(&SurfaceId::new("c")), 1);
    assert!(!session.can_undo());
}

#[test]
fn load_aborts_cleanly_when_provider_fails() {
    let mut session = session();
    session.initialize("a").unwrap();
    let before = session.tree().clone();
    let seen = record_events(&mut session);
    session.provider_mut().fail_on("terminal");

    let snapshot = WorkspaceSnapshot::from_json(V1_DOCUMENT).unwrap();
    let result = session.load(&snapshot);

    assert!(matches!(result, Err(LayoutError::Provider(_))));
    assert_eq!(session.tree(), &before);
    assert_eq!(session.pool().len(), 1);
    assert!(seen.borrow().is_empty());
}

#[test]
fn load_rejects_invalid_tree() {
    let json = V1_DOCUMENT.replace(
        "00000000-0000-0000-0000-00000000000b\",\n                \"surface_id\"",
        "00000000-0000-0000-0000-00000000000a\",\n                \"surface_id\"",
    );
    let snapshot = WorkspaceSnapshot::from_json(&json).unwrap();
    assert!(matches!(
        snapshot.to_tree(),
        Err(LayoutError::InvalidStructure(_))
    ));

    let mut session = session();
    assert!(session.load(&snapshot).is_err());
    assert!(session.tree().is_empty());
}

#[test]
fn engine_config_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("layout.toml");
    fs::write(
        &path,
        "gap = 2\nmax_history = 10\n\n[navigation]\nmin_overlap = 0.2\n",
    )
    .unwrap();

    let config = EngineConfig::from_toml_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(config.gap, 2);
    assert_eq!(config.max_history, 10);
    assert_eq!(config.merge_window_ms, 500);
    assert!((config.navigation.min_overlap - 0.2).abs() < f64::EPSILON);

    let session = LayoutSession::new(RecordingProvider::new(), config).unwrap();
    assert_eq!(session.history().limits().max_history, 10);
}

#[test]
fn invalid_config_is_rejected() {
    let config = EngineConfig {
        gap: -1,
        ..EngineConfig::default()
    };
    assert!(matches!(
        LayoutSession::new(RecordingProvider::new(), config),
        Err(LayoutError::Config(_))
    ));
}
