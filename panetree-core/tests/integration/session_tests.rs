//! Structural operations, focus and surface handling through the session

use panetree_core::surface::recording::Call;
use panetree_core::{
    Direction, FocusState, LayoutError, LayoutEvent, NodeRef, Orientation, PaneId, Rect, Side,
    SurfaceId,
};

use super::{record_events, session};

// ============================================================================
// Structure
// ============================================================================

#[test]
fn split_on_empty_layout_reports_missing_pane() {
    let mut session = session();
    let result = session.split(PaneId::new(), Side::Right, "b", 0.3);
    assert!(matches!(result, Err(LayoutError::PaneNotFound(_))));
    assert!(session.tree().is_empty());
    assert!(session.pool().is_empty());
}

#[test]
fn split_right_then_close_restores_single_leaf() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.3).unwrap();

    let Some(NodeRef::Split(node_id)) = session.tree().root() else {
        panic!("root should be a split");
    };
    let split = session.tree().split_node(node_id).unwrap();
    assert_eq!(split.orientation, Orientation::Horizontal);
    assert_eq!(split.children, [NodeRef::Leaf(a), NodeRef::Leaf(b)]);
    assert_eq!(split.ratios, [0.3, 0.7]);
    assert_eq!(session.layout().rect(a), Some(Rect::new(0, 0, 300, 800)));
    assert_eq!(session.layout().rect(b), Some(Rect::new(300, 0, 700, 800)));

    session.close(b).unwrap();
    assert_eq!(session.tree().root(), Some(NodeRef::Leaf(a)));
    assert_eq!(session.layout().rect(a), Some(Rect::new(0, 0, 1000, 800)));
    assert_eq!(session.focused(), Some(a));
}

#[test]
fn split_top_puts_new_pane_first() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Top, "b", 0.75).unwrap();

    assert_eq!(session.layout().rect(b), Some(Rect::new(0, 0, 1000, 200)));
    assert_eq!(session.layout().rect(a), Some(Rect::new(0, 200, 1000, 600)));
}

#[test]
fn closing_last_pane_is_refused() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    assert!(matches!(session.close(a), Err(LayoutError::LastPane)));
    assert!(session.tree().contains(a));
}

#[test]
fn invalid_ratios_are_rejected_without_change() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let before = session.tree().clone();

    assert!(matches!(
        session.split(a, Side::Right, "b", 0.05),
        Err(LayoutError::InvalidRatio { .. })
    ));
    assert_eq!(session.tree(), &before);

    session.split(a, Side::Right, "b", 0.5).unwrap();
    let node_id = session.tree().splits().next().unwrap().node_id;
    assert!(matches!(
        session.resize(node_id, 0, 0.97),
        Err(LayoutError::InvalidRatio { .. })
    ));
    assert!(matches!(
        session.resize(node_id, 2, 0.5),
        Err(LayoutError::InvalidChildIndex(2))
    ));
}

#[test]
fn gap_leaves_a_handle_between_siblings() {
    let mut session = super::session_with(panetree_core::EngineConfig {
        gap: 6,
        strict_invariants: false,
        ..Default::default()
    });
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();
    let node_id = session.tree().splits().next().unwrap().node_id;

    assert_eq!(session.layout().rect(a), Some(Rect::new(0, 0, 494, 800)));
    assert_eq!(session.layout().rect(b), Some(Rect::new(500, 0, 500, 800)));
    assert_eq!(
        session.layout().handle_rect(node_id),
        Some(Rect::new(494, 0, 6, 800))
    );
    assert_eq!(session.layout().handle_at(497, 400), Some(node_id));
    assert_eq!(session.layout().pane_at(497, 400), None);
}

// ============================================================================
// Focus
// ============================================================================

/// A on the left; B above C on the right, C taller.
fn three_panes() -> (super::Session, PaneId, PaneId, PaneId) {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();
    let c = session.split(b, Side::Bottom, "c", 0.45).unwrap();
    (session, a, b, c)
}

#[test]
fn directional_focus_prefers_greater_overlap() {
    let (mut session, a, _, c) = three_panes();
    session.focus(a).unwrap();

    assert_eq!(session.navigate_focus(Direction::Right).unwrap(), Some(c));
    assert_eq!(session.focused(), Some(c));
    assert_eq!(session.navigate_focus(Direction::Left).unwrap(), Some(a));
}

#[test]
fn directional_focus_at_edge_keeps_focus() {
    let (mut session, a, _, _) = three_panes();
    session.focus(a).unwrap();
    assert_eq!(session.navigate_focus(Direction::Left).unwrap(), None);
    assert_eq!(session.focused(), Some(a));
}

#[test]
fn sequential_focus_wraps_and_honours_hints() {
    let (mut session, a, b, c) = three_panes();
    session.focus(a).unwrap();

    assert_eq!(session.focus_next().unwrap(), Some(b));
    assert_eq!(session.focus_next().unwrap(), Some(c));
    assert_eq!(session.focus_next().unwrap(), Some(a));
    assert_eq!(session.focus_previous().unwrap(), Some(c));

    // Explicit hints override tree position entirely.
    session.set_focus_hint(c, Some(-1)).unwrap();
    session.focus(c).unwrap();
    assert_eq!(session.focus_next().unwrap(), Some(a));
}

#[test]
fn focus_change_hands_input_to_surface() {
    let (mut session, a, _, _) = three_panes();
    session.focus(a).unwrap();

    assert_eq!(session.renderer().input_focus(), Some(a));
    assert_eq!(session.renderer().z_order().last(), Some(&a));
    assert_eq!(
        session.pool().get(a).unwrap().calls().last(),
        Some(&Call::FocusInput)
    );
}

#[test]
fn native_focus_feedback_during_render_is_ignored() {
    let (mut session, a, b, _) = three_panes();
    assert!(!session.focus_coordinator().transition_in_progress());

    assert!(session.on_native_focus(a).unwrap());
    assert_eq!(session.focused(), Some(a));
    assert!(!session.on_native_focus(a).unwrap());
    assert!(!session.on_native_focus(PaneId::new()).unwrap());

    session.focus_coordinator_mut().begin_transition();
    assert!(!session.on_native_focus(b).unwrap());
    session.focus_coordinator_mut().end_transition();
    assert_eq!(session.focused(), Some(a));
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn close_emits_removal_structure_and_focus_events() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();
    let seen = record_events(&mut session);

    session.close(b).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            LayoutEvent::PaneRemoved(b),
            LayoutEvent::StructureChanged,
            LayoutEvent::FocusChanged {
                old: FocusState::Focused(b),
                new: FocusState::Focused(a),
            },
        ]
    );
}

#[test]
fn resize_emits_structure_change_only() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    session.split(a, Side::Right, "b", 0.5).unwrap();
    let node_id = session.tree().splits().next().unwrap().node_id;
    let seen = record_events(&mut session);

    session.resize(node_id, 0, 0.6).unwrap();

    assert_eq!(*seen.borrow(), vec![LayoutEvent::StructureChanged]);
    assert_eq!(session.layout().rect(a), Some(Rect::new(0, 0, 600, 800)));
}

#[test]
fn unsubscribed_listener_hears_nothing() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let seen = std::rc::Rc::new(std::cell::RefCell::new(0));
    let sink = std::rc::Rc::clone(&seen);
    let id = session.subscribe(Box::new(move |_: &LayoutEvent| *sink.borrow_mut() += 1));

    assert!(session.unsubscribe(id));
    session.split(a, Side::Right, "b", 0.5).unwrap();
    assert_eq!(*seen.borrow(), 0);
}

// ============================================================================
// Surfaces
// ============================================================================

#[test]
fn surfaces_are_attached_once_and_never_reattached() {
    let mut session = session();
    let journal = session.provider().journal();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();
    let c = session.split(b, Side::Bottom, "c", 0.5).unwrap();

    session.close(b).unwrap();
    session.undo().unwrap();
    let node_id = session.tree().splits().next().unwrap().node_id;
    session.resize(node_id, 0, 0.3).unwrap();
    session.close(c).unwrap();
    session.undo().unwrap();

    for key in ["a", "b", "c"] {
        let id = SurfaceId::new(key);
        assert_eq!(journal.attach_count(&id), 1, "{key} attached more than once");
        assert_eq!(journal.detach_count(&id), 0, "{key} detached");
    }
    assert_eq!(session.provider().provided().len(), 3);
}

#[test]
fn closed_pane_surface_is_hidden_while_undoable() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();

    session.close(b).unwrap();
    assert!(session.pool().contains(b));
    assert_eq!(session.pool().get(b).unwrap().visible(), Some(false));

    session.undo().unwrap();
    assert_eq!(session.pool().get(b).unwrap().visible(), Some(true));
    assert_eq!(session.pool().get(b).unwrap().attach_count(), 1);
}

#[test]
fn surface_is_released_once_unreachable() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();

    session.undo().unwrap();
    // Still redoable.
    assert!(session.pool().contains(b));

    // A new command discards the redo entry that referenced `b`.
    session.split(a, Side::Bottom, "c", 0.5).unwrap();
    assert!(!session.pool().contains(b));
    assert_eq!(session.provider().closed(), &[(SurfaceId::new("b"), b)]);
    assert_eq!(session.provider().journal().detach_count(&SurfaceId::new("b")), 1);
}

#[test]
fn provider_failure_leaves_session_unchanged() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    session.provider_mut().fail_on("broken");
    let before = session.tree().clone();
    let layout_before = session.layout().clone();
    let seen = record_events(&mut session);

    let result = session.split(a, Side::Right, "broken", 0.5);

    assert!(matches!(result, Err(LayoutError::Provider(_))));
    assert_eq!(session.tree(), &before);
    assert_eq!(session.layout(), &layout_before);
    assert_eq!(session.pool().len(), 1);
    assert!(!session.can_undo());
    assert!(seen.borrow().is_empty());
}

#[test]
fn failing_close_hook_still_releases_surface() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();
    session.provider_mut().fail_closing(true);

    session.undo().unwrap();
    session.split(a, Side::Right, "c", 0.5).unwrap();

    assert!(!session.pool().contains(b));
    assert_eq!(session.pool().len(), 2);
}

#[test]
fn viewport_change_moves_surfaces_without_reattaching() {
    let mut session = session();
    let a = session.initialize("a").unwrap();
    let b = session.split(a, Side::Right, "b", 0.5).unwrap();

    let stats = session.set_viewport(Rect::new(0, 0, 400, 300));
    assert_eq!(stats.moved, 2);
    assert_eq!(
        session.pool().get(b).unwrap().geometry(),
        Some(Rect::new(200, 0, 200, 300))
    );
    assert_eq!(session.pool().get(b).unwrap().attach_count(), 1);

    let again = session.set_viewport(Rect::new(0, 0, 400, 300));
    assert!(again.is_noop());
}
