//! Property-based tests for undo/redo history

use std::time::{Duration, Instant};

use panetree_core::{
    CloseCommand, Command, CommandEngine, FocusCommand, HistoryLimits, ResizeCommand,
    SetFocusHintCommand, SplitCommand, SurfaceId, TreeModel,
};
use proptest::prelude::*;

use super::{Op, ops_strategy};

fn limits(max_history: usize) -> HistoryLimits {
    HistoryLimits {
        max_history,
        merge_window: Duration::from_millis(500),
        strict_invariants: true,
    }
}

fn command_for(tree: &TreeModel, op: &Op) -> Option<Box<dyn Command>> {
    let panes = tree.pane_ids();
    let nodes: Vec<_> = tree.splits().map(|s| s.node_id).collect();
    let pane = |i: usize| panes[i % panes.len()];
    Some(match *op {
        Op::Split { pane: i, side, ratio } => {
            Box::new(SplitCommand::new(pane(i), side, SurfaceId::new("s"), ratio))
        }
        Op::Close { pane: i } => Box::new(CloseCommand::new(pane(i))),
        Op::Resize { node, child, ratio } => {
            if nodes.is_empty() {
                return None;
            }
            Box::new(ResizeCommand::new(nodes[node % nodes.len()], child, ratio))
        }
        Op::Focus { pane: i } => Box::new(FocusCommand::new(Some(pane(i)))),
        Op::Hint { pane: i, hint } => Box::new(SetFocusHintCommand::new(pane(i), hint)),
    })
}

/// Runs `ops` through the engine, `step` apart. Rejected commands are
/// skipped.
fn run(engine: &mut CommandEngine, tree: &mut TreeModel, ops: &[Op], step: Duration) {
    let mut now = Instant::now();
    for op in ops {
        if let Some(command) = command_for(tree, op) {
            let _ = engine.execute_at(tree, command, now);
        }
        now += step;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// Undoing everything returns to the start; redoing everything returns
    /// to the end.
    #[test]
    fn prop_undo_all_then_redo_all(ops in ops_strategy(30), merge in any::<bool>()) {
        let (mut tree, _) = TreeModel::with_root(SurfaceId::new("root"));
        let initial = tree.clone();
        let mut engine = CommandEngine::new(limits(1000));
        let step = if merge { Duration::from_millis(10) } else { Duration::from_secs(1) };

        run(&mut engine, &mut tree, &ops, step);
        let last = tree.clone();

        while engine.can_undo() {
            engine.undo(&mut tree).unwrap();
            prop_assert!(tree.validate().is_ok());
        }
        prop_assert_eq!(&tree, &initial);

        while engine.can_redo() {
            engine.redo(&mut tree).unwrap();
            prop_assert!(tree.validate().is_ok());
        }
        prop_assert_eq!(&tree, &last);
    }

    /// Each undo step restores exactly the tree before that entry.
    #[test]
    fn prop_each_undo_restores_previous_state(ops in ops_strategy(25)) {
        let (mut tree, _) = TreeModel::with_root(SurfaceId::new("root"));
        let mut engine = CommandEngine::new(limits(1000));
        let mut states = vec![tree.clone()];
        let mut now = Instant::now();

        for op in &ops {
            if let Some(command) = command_for(&tree, op) {
                if engine.execute_at(&mut tree, command, now).is_ok() {
                    states.push(tree.clone());
                }
            }
            // Outside the merge window: one entry per successful command.
            now += Duration::from_secs(1);
        }
        prop_assert_eq!(engine.undo_len() + 1, states.len());

        states.pop();
        while let Some(expected) = states.pop() {
            engine.undo(&mut tree).unwrap();
            prop_assert_eq!(&tree, &expected);
        }
    }

    /// History never grows past `max_history`.
    #[test]
    fn prop_history_is_bounded(ops in ops_strategy(40), max_history in 1..8usize) {
        let (mut tree, _) = TreeModel::with_root(SurfaceId::new("root"));
        let mut engine = CommandEngine::new(limits(max_history));
        run(&mut engine, &mut tree, &ops, Duration::from_secs(1));
        prop_assert!(engine.undo_len() <= max_history);
    }

    /// A new command after an undo discards the redo stack.
    #[test]
    fn prop_new_command_clears_redo(ops in ops_strategy(20), ratio in 0.2..0.8f64) {
        let (mut tree, root) = TreeModel::with_root(SurfaceId::new("root"));
        let mut engine = CommandEngine::new(limits(1000));
        run(&mut engine, &mut tree, &ops, Duration::from_secs(1));
        prop_assume!(engine.can_undo());

        engine.undo(&mut tree).unwrap();
        prop_assert!(engine.can_redo());

        let target = tree.pane_ids().first().copied().unwrap_or(root);
        let split = SplitCommand::new(target, panetree_core::Side::Right, SurfaceId::new("x"), ratio);
        engine.execute(&mut tree, Box::new(split)).unwrap();
        prop_assert!(!engine.can_redo());
    }
}
