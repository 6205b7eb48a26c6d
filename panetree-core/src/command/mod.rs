//! Reversible layout commands
//!
//! Every change to the tree goes through a [`Command`]. A command checks
//! its preconditions, applies itself, and keeps whatever it needs to take
//! itself back: previous ratios, the removed subtree, the previous focus.
//! The [`CommandEngine`] runs commands, validates the tree after each one
//! and keeps the undo/redo history.

mod builtin;
mod engine;

use std::any::Any;
use std::fmt;

pub use builtin::{CloseCommand, FocusCommand, ResizeCommand, SetFocusHintCommand, SplitCommand};
pub use engine::{CommandEngine, HistoryLimits};

use crate::error::LayoutResult;
use crate::tree::TreeModel;
use crate::types::PaneId;

/// A reversible mutation of the tree.
///
/// Hosts may implement this for their own operations; the engine treats
/// built-in and host commands alike.
pub trait Command: fmt::Debug {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Checks preconditions without touching the tree.
    ///
    /// # Errors
    ///
    /// Returns the error the command would fail with.
    fn validate(&self, tree: &TreeModel) -> LayoutResult<()>;

    /// Applies the command. Also used for redo, so it must be repeatable
    /// after [`undo`](Self::undo).
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be applied; the engine then
    /// restores the tree.
    fn execute(&mut self, tree: &mut TreeModel) -> LayoutResult<()>;

    /// Reverses the last [`execute`](Self::execute), including focus.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree no longer matches what `execute` left.
    fn undo(&mut self, tree: &mut TreeModel) -> LayoutResult<()>;

    /// Returns true if `next`, executed right after `self`, can be folded
    /// into this command's history entry.
    fn mergeable_with(&self, _next: &dyn Command) -> bool {
        false
    }

    /// Folds `next` into `self` so that one undo reverses both.
    ///
    /// Only called when [`mergeable_with`](Self::mergeable_with) agreed.
    fn merge(&mut self, _next: &dyn Command) {}

    /// Panes whose surfaces must stay alive while this command is in the
    /// history.
    fn referenced_panes(&self) -> Vec<PaneId> {
        Vec::new()
    }

    /// Downcasting support for [`mergeable_with`](Self::mergeable_with).
    fn as_any(&self) -> &dyn Any;
}
