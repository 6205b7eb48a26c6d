//! Command execution, history and transactions

use std::collections::{BTreeSet, VecDeque};
use std::time::{Duration, Instant};

use super::Command;
use crate::config::EngineConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::tree::{InvariantViolation, TreeModel};
use crate::types::PaneId;

/// Size and merge settings of the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    /// Maximum number of undo entries.
    pub max_history: usize,
    /// Window within which mergeable commands fold into one entry.
    pub merge_window: Duration,
    /// Panic on invariant violations instead of rolling back.
    pub strict_invariants: bool,
}

impl From<&EngineConfig> for HistoryLimits {
    fn from(config: &EngineConfig) -> Self {
        Self {
            max_history: config.max_history.max(1),
            merge_window: config.merge_window(),
            strict_invariants: config.strict_invariants,
        }
    }
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self::from(&EngineConfig::default())
    }
}

/// One undo step: a single command, a merged run, or a committed
/// transaction.
#[derive(Debug)]
struct HistoryEntry {
    commands: Vec<Box<dyn Command>>,
    last_touched: Instant,
    sealed: bool,
}

impl HistoryEntry {
    fn referenced_panes(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.commands.iter().flat_map(|c| c.referenced_panes())
    }
}

#[derive(Debug)]
struct Transaction {
    snapshot: TreeModel,
    commands: Vec<Box<dyn Command>>,
    /// First error raised inside the transaction.
    failure: Option<String>,
}

/// Runs commands against a tree and keeps undo/redo history.
///
/// Every command goes through the same pipeline: validate, remember the
/// tree, execute, re-check every invariant. A command that fails or leaves
/// the tree invalid is rolled back, so callers see success or no change.
#[derive(Debug)]
pub struct CommandEngine {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    transaction: Option<Transaction>,
    limits: HistoryLimits,
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new(HistoryLimits::default())
    }
}

impl CommandEngine {
    /// Creates an engine with empty history.
    #[must_use]
    pub fn new(limits: HistoryLimits) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            transaction: None,
            limits,
        }
    }

    /// Current limits.
    #[must_use]
    pub const fn limits(&self) -> &HistoryLimits {
        &self.limits
    }

    /// Executes a command now.
    ///
    /// # Errors
    ///
    /// Returns the command's validation or execution error, or
    /// `LayoutError::InvalidStructure` if it broke an invariant (in which
    /// case the tree was restored).
    ///
    /// # Panics
    ///
    /// Panics on an invariant violation when `strict_invariants` is set.
    pub fn execute(&mut self, tree: &mut TreeModel, command: Box<dyn Command>) -> LayoutResult<()> {
        self.execute_at(tree, command, Instant::now())
    }

    /// Executes a command as if at time `now` (used for merge windows).
    ///
    /// # Errors
    ///
    /// As [`execute`](Self::execute).
    ///
    /// # Panics
    ///
    /// As [`execute`](Self::execute).
    pub fn execute_at(
        &mut self,
        tree: &mut TreeModel,
        mut command: Box<dyn Command>,
        now: Instant,
    ) -> LayoutResult<()> {
        if let Err(err) = self.apply(tree, command.as_mut()) {
            self.fail_transaction(&err);
            return Err(err);
        }
        tracing::debug!(command = command.name(), "Executed command");

        if let Some(transaction) = self.transaction.as_mut() {
            transaction.commands.push(command);
            return Ok(());
        }

        self.redo_stack.clear();
        if let Some(top) = self.undo_stack.back_mut() {
            let within_window = now.saturating_duration_since(top.last_touched)
                <= self.limits.merge_window;
            if !top.sealed && within_window && top.commands.len() == 1 {
                if let Some(previous) = top.commands.first_mut() {
                    if previous.mergeable_with(command.as_ref()) {
                        previous.merge(command.as_ref());
                        top.last_touched = now;
                        tracing::trace!(command = command.name(), "Merged into previous entry");
                        return Ok(());
                    }
                }
            }
        }
        self.push_undo(HistoryEntry {
            commands: vec![command],
            last_touched: now,
            sealed: false,
        });
        Ok(())
    }

    fn apply(&self, tree: &mut TreeModel, command: &mut dyn Command) -> LayoutResult<()> {
        command.validate(tree)?;
        let before = tree.clone();
        if let Err(err) = command.execute(tree) {
            *tree = before;
            tracing::warn!(command = command.name(), error = %err, "Command failed, rolled back");
            return Err(err);
        }
        self.check_invariants(tree, before, command.name())
    }

    /// Marks the open transaction as failed; [`commit`](Self::commit) will
    /// then discard it. Does nothing outside a transaction.
    ///
    /// Only the first failure is kept.
    pub fn fail_transaction(&mut self, err: &LayoutError) {
        if let Some(transaction) = self.transaction.as_mut() {
            if transaction.failure.is_none() {
                tracing::warn!(error = %err, "Transaction marked as failed");
                transaction.failure = Some(err.to_string());
            }
        }
    }

    /// Returns true if an open transaction has seen a failed operation.
    #[must_use]
    pub fn transaction_failed(&self) -> bool {
        self.transaction
            .as_ref()
            .is_some_and(|transaction| transaction.failure.is_some())
    }

    /// Reverses the most recent entry.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NothingToUndo` if there is no history
    /// - `LayoutError::TransactionAlreadyOpen` inside a transaction
    /// - any error from the commands' `undo`, after restoring the tree
    pub fn undo(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        if self.transaction.is_some() {
            return Err(LayoutError::TransactionAlreadyOpen);
        }
        let mut entry = self.undo_stack.pop_back().ok_or(LayoutError::NothingToUndo)?;
        let before = tree.clone();
        let result = entry
            .commands
            .iter_mut()
            .rev()
            .try_for_each(|command| command.undo(tree))
            .and_then(|()| self.check_invariants(tree, before.clone(), "undo"));
        if let Err(err) = result {
            *tree = before;
            self.undo_stack.push_back(entry);
            return Err(err);
        }
        entry.sealed = true;
        self.redo_stack.push(entry);
        tracing::debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "Undo");
        Ok(())
    }

    /// Re-applies the most recently undone entry.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NothingToRedo` if nothing was undone
    /// - `LayoutError::TransactionAlreadyOpen` inside a transaction
    /// - any error from the commands, after restoring the tree
    pub fn redo(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        if self.transaction.is_some() {
            return Err(LayoutError::TransactionAlreadyOpen);
        }
        let mut entry = self.redo_stack.pop().ok_or(LayoutError::NothingToRedo)?;
        let before = tree.clone();
        let result = entry
            .commands
            .iter_mut()
            .try_for_each(|command| {
                command.validate(tree)?;
                command.execute(tree)
            })
            .and_then(|()| self.check_invariants(tree, before.clone(), "redo"));
        if let Err(err) = result {
            *tree = before;
            self.redo_stack.push(entry);
            return Err(err);
        }
        self.push_undo(entry);
        tracing::debug!(undo = self.undo_stack.len(), redo = self.redo_stack.len(), "Redo");
        Ok(())
    }

    /// Opens a transaction. Commands executed until [`commit`](Self::commit)
    /// form one undo entry.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::TransactionAlreadyOpen` if one is open.
    pub fn begin_transaction(&mut self, tree: &TreeModel) -> LayoutResult<()> {
        if self.transaction.is_some() {
            return Err(LayoutError::TransactionAlreadyOpen);
        }
        self.transaction = Some(Transaction {
            snapshot: tree.clone(),
            commands: Vec::new(),
            failure: None,
        });
        tracing::debug!("Transaction started");
        Ok(())
    }

    /// Closes the transaction, recording its commands as one entry.
    ///
    /// A transaction in which any operation failed is not recorded: the
    /// tree is restored to where it was when the transaction began.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NoTransaction` if none is open
    /// - `LayoutError::TransactionFailed` if an operation inside it failed
    ///   (the transaction is closed and the tree restored)
    pub fn commit(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        let transaction = self.transaction.take().ok_or(LayoutError::NoTransaction)?;
        if let Some(reason) = transaction.failure {
            *tree = transaction.snapshot;
            tracing::warn!(
                commands = transaction.commands.len(),
                reason = %reason,
                "Failed transaction discarded on commit"
            );
            return Err(LayoutError::TransactionFailed(reason));
        }
        let count = transaction.commands.len();
        if count > 0 {
            self.redo_stack.clear();
            self.push_undo(HistoryEntry {
                commands: transaction.commands,
                last_touched: Instant::now(),
                sealed: true,
            });
        }
        tracing::debug!(commands = count, "Transaction committed");
        Ok(())
    }

    /// Abandons the transaction and restores the tree as it was when the
    /// transaction began.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NoTransaction` if none is open.
    pub fn rollback(&mut self, tree: &mut TreeModel) -> LayoutResult<()> {
        let transaction = self.transaction.take().ok_or(LayoutError::NoTransaction)?;
        *tree = transaction.snapshot;
        tracing::debug!(
            commands = transaction.commands.len(),
            "Transaction rolled back"
        );
        Ok(())
    }

    /// Returns true while a transaction is open.
    #[must_use]
    pub const fn in_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Returns true if there is something to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there is something to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo entries.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo entries.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Drops all history. An open transaction is kept.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    /// Stops the most recent entry from absorbing further commands.
    pub fn seal(&mut self) {
        if let Some(top) = self.undo_stack.back_mut() {
            top.sealed = true;
        }
    }

    /// Every pane referenced by the history or an open transaction.
    #[must_use]
    pub fn referenced_panes(&self) -> BTreeSet<PaneId> {
        let mut panes: BTreeSet<PaneId> = self
            .undo_stack
            .iter()
            .chain(self.redo_stack.iter())
            .flat_map(HistoryEntry::referenced_panes)
            .collect();
        if let Some(transaction) = &self.transaction {
            panes.extend(transaction.snapshot.pane_ids());
            panes.extend(
                transaction
                    .commands
                    .iter()
                    .flat_map(|c| c.referenced_panes()),
            );
        }
        panes
    }

    fn push_undo(&mut self, entry: HistoryEntry) {
        self.undo_stack.push_back(entry);
        while self.undo_stack.len() > self.limits.max_history {
            self.undo_stack.pop_front();
            tracing::trace!("Evicted oldest history entry");
        }
    }

    /// Restores `before` and reports the violations if `tree` is invalid.
    fn check_invariants(
        &self,
        tree: &mut TreeModel,
        before: TreeModel,
        operation: &str,
    ) -> LayoutResult<()> {
        let violations = tree.violations();
        if violations.is_empty() {
            return Ok(());
        }
        *tree = before;
        report_violations(operation, &violations, self.limits.strict_invariants);
        Err(LayoutError::InvalidStructure(violations))
    }
}

fn report_violations(operation: &str, violations: &[InvariantViolation], strict: bool) {
    for violation in violations {
        tracing::error!(operation, %violation, "Layout invariant violated");
    }
    assert!(
        !strict,
        "{operation} left the layout tree invalid: {violations:?}"
    );
    tracing::warn!(operation, "Rolled back invalid layout change");
}
