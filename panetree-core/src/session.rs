//! The public entry point a host drives
//!
//! [`LayoutSession`] owns the tree, the command engine, the surface pool,
//! the renderer and the focus coordinator. Every public operation follows
//! the same path: build a command, run it through the engine, then bring
//! everything derived from the tree up to date (geometry, neighbour cache,
//! surface placement) and notify subscribers.
//!
//! Operations are atomic from the host's point of view: on error nothing
//! observable has changed.

use std::collections::BTreeSet;
use std::time::Instant;

use crate::command::{
    CloseCommand, Command, CommandEngine, FocusCommand, HistoryLimits, ResizeCommand,
    SetFocusHintCommand, SplitCommand,
};
use crate::config::EngineConfig;
use crate::error::{LayoutError, LayoutResult};
use crate::events::{EventBus, LayoutEvent, Listener, SubscriptionId};
use crate::focus::FocusCoordinator;
use crate::geometry::{self, Layout, Rect};
use crate::snapshot::WorkspaceSnapshot;
use crate::surface::{RenderStats, Renderer, SurfacePool, SurfaceProvider};
use crate::tracing::span_names;
use crate::tree::{LeafNode, TreeModel};
use crate::types::{Direction, NodeId, PaneId, Side, SurfaceId};
use crate::{trace_operation, trace_operation_debug};

/// A split-pane layout bound to a host surface provider.
pub struct LayoutSession<P: SurfaceProvider> {
    tree: TreeModel,
    engine: CommandEngine,
    pool: SurfacePool<P::Surface>,
    renderer: Renderer,
    focus: FocusCoordinator,
    provider: P,
    events: EventBus,
    config: EngineConfig,
    viewport: Rect,
    layout: Layout,
}

impl<P: SurfaceProvider> std::fmt::Debug for LayoutSession<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSession")
            .field("tree", &self.tree)
            .field("engine", &self.engine)
            .field("viewport", &self.viewport)
            .field("surfaces", &self.pool.len())
            .finish_non_exhaustive()
    }
}

impl<P: SurfaceProvider> LayoutSession<P> {
    /// Creates an empty session.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::Config` if `config` does not validate.
    pub fn new(provider: P, config: EngineConfig) -> LayoutResult<Self> {
        config.validate()?;
        Ok(Self {
            tree: TreeModel::new(),
            engine: CommandEngine::new(HistoryLimits::from(&config)),
            pool: SurfacePool::new(),
            renderer: Renderer::new(),
            focus: FocusCoordinator::new(config.navigation.clone()),
            provider,
            events: EventBus::new(),
            config,
            viewport: Rect::default(),
            layout: Layout::default(),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current tree.
    #[must_use]
    pub const fn tree(&self) -> &TreeModel {
        &self.tree
    }

    /// Current geometry.
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Surfaces of realized panes.
    #[must_use]
    pub const fn pool(&self) -> &SurfacePool<P::Surface> {
        &self.pool
    }

    /// Renderer state (stacking order, input focus).
    #[must_use]
    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Undo/redo history.
    #[must_use]
    pub const fn history(&self) -> &CommandEngine {
        &self.engine
    }

    /// Focus coordinator.
    #[must_use]
    pub const fn focus_coordinator(&self) -> &FocusCoordinator {
        &self.focus
    }

    /// Mutable focus coordinator, for hosts that bracket their own focus
    /// transitions.
    pub fn focus_coordinator_mut(&mut self) -> &mut FocusCoordinator {
        &mut self.focus
    }

    /// Surface provider.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Mutable surface provider.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Focused pane, if any.
    #[must_use]
    pub const fn focused(&self) -> Option<PaneId> {
        self.tree.focused()
    }

    /// Returns true if there is something to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.engine.can_undo()
    }

    /// Returns true if there is something to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.engine.can_redo()
    }

    // ========================================================================
    // Subscriptions
    // ========================================================================

    /// Registers a change listener.
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        self.events.subscribe(listener)
    }

    /// Removes a change listener.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ========================================================================
    // Structure
    // ========================================================================

    /// Installs the first pane of an empty layout. Not undoable.
    ///
    /// # Errors
    ///
    /// - `LayoutError::AlreadyInitialized` if the layout has panes
    /// - `LayoutError::Provider` if the surface cannot be created
    pub fn initialize(&mut self, surface_id: impl Into<SurfaceId>) -> LayoutResult<PaneId> {
        let span = trace_operation!(span_names::INITIALIZE);
        let _guard = span.enter();

        if !self.tree.is_empty() {
            return Err(LayoutError::AlreadyInitialized);
        }
        let leaf = LeafNode::new(surface_id.into());
        let pane_id = leaf.pane_id;
        self.realize(pane_id, leaf.surface_id.clone())?;

        let before = self.tree.clone();
        if let Err(err) = self.tree.initialize(leaf) {
            self.pool.remove(pane_id);
            return Err(err);
        }
        self.refresh(&before);
        tracing::info!(pane_id = %pane_id, "Layout initialized");
        Ok(pane_id)
    }

    /// Splits `pane_id`, showing `surface_id` in the new pane on `side`.
    ///
    /// `ratio` is the share `pane_id` keeps. The new pane gets focus.
    ///
    /// # Errors
    ///
    /// - `LayoutError::PaneNotFound` if the pane doesn't exist
    /// - `LayoutError::InvalidRatio` if `ratio` is not in (0.1, 0.9)
    /// - `LayoutError::Provider` if the surface cannot be created
    pub fn split(
        &mut self,
        pane_id: PaneId,
        side: Side,
        surface_id: impl Into<SurfaceId>,
        ratio: f64,
    ) -> LayoutResult<PaneId> {
        let command = SplitCommand::new(pane_id, side, surface_id.into(), ratio);
        let new_pane = command.new_pane_id();
        let span = trace_operation_debug!(
            span_names::SPLIT,
            pane_id = %pane_id,
            new_pane_id = %new_pane,
            side = %side
        );
        let _guard = span.enter();

        if let Err(err) = command
            .validate(&self.tree)
            .and_then(|()| self.realize(new_pane, command.surface_id().clone()))
        {
            self.engine.fail_transaction(&err);
            return Err(err);
        }
        if let Err(err) = self.run(Box::new(command), Instant::now()) {
            self.pool.remove(new_pane);
            return Err(err);
        }
        Ok(new_pane)
    }

    /// Closes `pane_id`. Its surface stays alive (hidden) while the close
    /// can still be undone.
    ///
    /// # Errors
    ///
    /// - `LayoutError::PaneNotFound` if the pane doesn't exist
    /// - `LayoutError::LastPane` if this is the only pane
    pub fn close(&mut self, pane_id: PaneId) -> LayoutResult<()> {
        let span = trace_operation_debug!(span_names::CLOSE, pane_id = %pane_id);
        let _guard = span.enter();
        self.run(Box::new(CloseCommand::new(pane_id)), Instant::now())
    }

    /// Sets `ratios[child_index]` of a split. Consecutive resizes of the
    /// same child within the merge window undo in one step.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NodeNotFound` if the split doesn't exist
    /// - `LayoutError::InvalidChildIndex` if `child_index > 1`
    /// - `LayoutError::InvalidRatio` if `new_ratio` is not in (0.05, 0.95)
    pub fn resize(&mut self, node_id: NodeId, child_index: usize, new_ratio: f64) -> LayoutResult<()> {
        self.resize_at(node_id, child_index, new_ratio, Instant::now())
    }

    /// [`resize`](Self::resize) with an explicit timestamp, for hosts that
    /// replay input events.
    ///
    /// # Errors
    ///
    /// As [`resize`](Self::resize).
    pub fn resize_at(
        &mut self,
        node_id: NodeId,
        child_index: usize,
        new_ratio: f64,
        at: Instant,
    ) -> LayoutResult<()> {
        let span = trace_operation_debug!(
            span_names::RESIZE,
            node_id = %node_id,
            child_index,
            ratio = new_ratio
        );
        let _guard = span.enter();
        self.run(
            Box::new(ResizeCommand::new(node_id, child_index, new_ratio)),
            at,
        )
    }

    /// Runs a host-defined command through the engine.
    ///
    /// # Errors
    ///
    /// Returns the command's own error, or `LayoutError::InvalidStructure`
    /// if it left the tree invalid (the tree is then restored).
    pub fn execute(&mut self, command: Box<dyn Command>) -> LayoutResult<()> {
        self.run(command, Instant::now())
    }

    // ========================================================================
    // Focus
    // ========================================================================

    /// Focuses `pane_id`.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::PaneNotFound` if the pane doesn't exist.
    pub fn focus(&mut self, pane_id: PaneId) -> LayoutResult<()> {
        if self.tree.focused() == Some(pane_id) {
            return Ok(());
        }
        let span = trace_operation_debug!(span_names::FOCUS, pane_id = %pane_id);
        let _guard = span.enter();
        self.run(Box::new(FocusCommand::new(Some(pane_id))), Instant::now())
    }

    /// Moves focus to the next pane in focus order, wrapping around.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`focus`](Self::focus).
    pub fn focus_next(&mut self) -> LayoutResult<Option<PaneId>> {
        self.step_focus(true)
    }

    /// Moves focus to the previous pane in focus order, wrapping around.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`focus`](Self::focus).
    pub fn focus_previous(&mut self) -> LayoutResult<Option<PaneId>> {
        self.step_focus(false)
    }

    fn step_focus(&mut self, forward: bool) -> LayoutResult<Option<PaneId>> {
        let target = FocusCoordinator::step(&self.tree, forward);
        if let Some(pane_id) = target {
            self.focus(pane_id)?;
        }
        Ok(target)
    }

    /// Moves focus to the spatial neighbour in `direction`.
    ///
    /// Returns the newly focused pane, or `None` if there is no neighbour
    /// (focus is unchanged).
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NoFocusedPane` if nothing is focused.
    pub fn navigate_focus(&mut self, direction: Direction) -> LayoutResult<Option<PaneId>> {
        let from = self.tree.focused().ok_or(LayoutError::NoFocusedPane)?;
        let target = self.focus.neighbor(&self.tree, &self.layout, from, direction);
        match target {
            Some(pane_id) => {
                tracing::debug!(from = %from, to = %pane_id, %direction, "Directional focus");
                self.focus(pane_id)?;
            }
            None => tracing::trace!(from = %from, %direction, "No neighbour"),
        }
        Ok(target)
    }

    /// Sets or clears a pane's explicit focus-order hint.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::PaneNotFound` if the pane doesn't exist.
    pub fn set_focus_hint(&mut self, pane_id: PaneId, hint: Option<i32>) -> LayoutResult<()> {
        self.run(
            Box::new(SetFocusHintCommand::new(pane_id, hint)),
            Instant::now(),
        )
    }

    /// Handles a focus notification from the host toolkit.
    ///
    /// Returns true if it changed focus. Notifications that arrive during a
    /// focus transition, repeat the current focus, or name an unknown pane
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`focus`](Self::focus).
    pub fn on_native_focus(&mut self, pane_id: PaneId) -> LayoutResult<bool> {
        if !self.focus.accepts_native_focus(&self.tree, pane_id) {
            tracing::trace!(
                pane_id = %pane_id,
                in_transition = self.focus.transition_in_progress(),
                "Ignored native focus"
            );
            return Ok(false);
        }
        self.focus(pane_id)?;
        Ok(true)
    }

    // ========================================================================
    // History
    // ========================================================================

    /// Reverses the last change, restoring the previous tree and focus.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NothingToUndo` if there is no history
    /// - `LayoutError::TransactionAlreadyOpen` inside a transaction
    pub fn undo(&mut self) -> LayoutResult<()> {
        let span = trace_operation_debug!(span_names::UNDO);
        let _guard = span.enter();
        let before = self.tree.clone();
        self.engine.undo(&mut self.tree)?;
        self.refresh(&before);
        Ok(())
    }

    /// Re-applies the last undone change.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NothingToRedo` if nothing was undone
    /// - `LayoutError::TransactionAlreadyOpen` inside a transaction
    pub fn redo(&mut self) -> LayoutResult<()> {
        let span = trace_operation_debug!(span_names::REDO);
        let _guard = span.enter();
        let before = self.tree.clone();
        self.engine.redo(&mut self.tree)?;
        self.refresh(&before);
        Ok(())
    }

    /// Groups the following operations into one undo step. Notifications
    /// are held until [`commit`](Self::commit).
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::TransactionAlreadyOpen` if one is open.
    pub fn begin_transaction(&mut self) -> LayoutResult<()> {
        self.engine.begin_transaction(&self.tree)?;
        self.events.hold();
        Ok(())
    }

    /// Ends the transaction and delivers its notifications.
    ///
    /// If any operation inside the transaction failed, nothing is kept: the
    /// layout returns to where it was at
    /// [`begin_transaction`](Self::begin_transaction) and the held
    /// notifications are dropped.
    ///
    /// # Errors
    ///
    /// - `LayoutError::NoTransaction` if none is open
    /// - `LayoutError::TransactionFailed` if an operation inside it failed
    pub fn commit(&mut self) -> LayoutResult<()> {
        let before = self.tree.clone();
        match self.engine.commit(&mut self.tree) {
            Ok(()) => {
                self.events.release();
                self.reclaim_surfaces();
                Ok(())
            }
            Err(err @ LayoutError::TransactionFailed(_)) => {
                self.refresh(&before);
                self.events.discard();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Abandons the transaction: the tree returns to where it was at
    /// [`begin_transaction`](Self::begin_transaction) and no notifications
    /// are delivered.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::NoTransaction` if none is open.
    pub fn rollback(&mut self) -> LayoutResult<()> {
        let before = self.tree.clone();
        self.engine.rollback(&mut self.tree)?;
        self.refresh(&before);
        self.events.discard();
        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Captures the current layout.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidStructure` if the tree is invalid.
    pub fn save(&self) -> LayoutResult<WorkspaceSnapshot> {
        let span = trace_operation!(span_names::SAVE, panes = self.tree.pane_count());
        let _guard = span.enter();
        WorkspaceSnapshot::capture(&self.tree)
    }

    /// Replaces the layout with a snapshot. Clears undo history.
    ///
    /// Surfaces for panes the session already shows are reused; every other
    /// surface is requested first, so a provider failure leaves the session
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// - `LayoutError::TransactionAlreadyOpen` inside a transaction
    /// - `LayoutError::InvalidStructure` if the snapshot's tree is invalid
    /// - `LayoutError::Provider` if a surface cannot be created
    pub fn load(&mut self, snapshot: &WorkspaceSnapshot) -> LayoutResult<()> {
        let span = trace_operation!(span_names::LOAD, version = snapshot.version);
        let _guard = span.enter();

        if self.engine.in_transaction() {
            return Err(LayoutError::TransactionAlreadyOpen);
        }
        let tree = snapshot.to_tree()?;

        let mut fresh = Vec::new();
        let mut replaced = Vec::new();
        for (pane_id, surface_id) in snapshot.leaves() {
            match self.pool.surface_id(pane_id) {
                Some(existing) if *existing == surface_id => continue,
                Some(_) => replaced.push(pane_id),
                None => {}
            }
            let surface = self.provider.provide_surface(&surface_id, pane_id)?;
            fresh.push((pane_id, surface_id, surface));
        }

        for pane_id in replaced {
            self.destroy_surface(pane_id);
        }
        for (pane_id, surface_id, surface) in fresh {
            self.pool.add(pane_id, surface_id, surface)?;
        }

        let before = std::mem::replace(&mut self.tree, tree);
        self.engine.clear_history();
        self.refresh(&before);
        tracing::info!(panes = self.tree.pane_count(), "Layout loaded");
        Ok(())
    }

    // ========================================================================
    // Geometry
    // ========================================================================

    /// Sets the viewport and re-renders.
    pub fn set_viewport(&mut self, viewport: Rect) -> RenderStats {
        self.viewport = viewport;
        self.relayout();
        self.render()
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    fn run(&mut self, command: Box<dyn Command>, at: Instant) -> LayoutResult<()> {
        let before = self.tree.clone();
        match self.engine.execute_at(&mut self.tree, command, at) {
            Ok(()) => {
                self.refresh(&before);
                Ok(())
            }
            Err(LayoutError::InvalidStructure(violations)) => {
                self.events
                    .emit(LayoutEvent::ValidationFailed(violations.clone()));
                Err(LayoutError::InvalidStructure(violations))
            }
            Err(err) => Err(err),
        }
    }

    fn realize(&mut self, pane_id: PaneId, surface_id: SurfaceId) -> LayoutResult<()> {
        let surface = self.provider.provide_surface(&surface_id, pane_id)?;
        self.pool.add(pane_id, surface_id, surface)
    }

    /// Brings geometry, caches, surfaces and subscribers in line with a
    /// tree change from `before`.
    fn refresh(&mut self, before: &TreeModel) {
        let old: BTreeSet<PaneId> = before.pane_ids().into_iter().collect();
        let new: BTreeSet<PaneId> = self.tree.pane_ids().into_iter().collect();

        for pane_id in old.difference(&new) {
            self.events.emit(LayoutEvent::PaneRemoved(*pane_id));
        }
        for pane_id in new.difference(&old) {
            self.events.emit(LayoutEvent::PaneAdded(*pane_id));
        }
        if !before.same_shape(&self.tree) {
            self.relayout();
            self.events.emit(LayoutEvent::StructureChanged);
        }
        if before.focus() != self.tree.focus() {
            self.events.emit(LayoutEvent::FocusChanged {
                old: before.focus(),
                new: self.tree.focus(),
            });
        }

        self.reclaim_surfaces();
        self.render();
    }

    fn relayout(&mut self) {
        self.layout = geometry::layout(&self.tree, self.viewport, self.config.gap);
        self.focus.invalidate();
        if !self.layout.undersized().is_empty() {
            tracing::debug!(
                panes = self.layout.undersized().len(),
                "Panes below their minimum size"
            );
        }
    }

    fn render(&mut self) -> RenderStats {
        let span = trace_operation_debug!(span_names::RENDER);
        let _guard = span.enter();
        let started = self.focus.begin_transition();
        let stats = self
            .renderer
            .render(&mut self.pool, &self.layout.panes, self.tree.focused());
        if started {
            self.focus.end_transition();
        }
        stats
    }

    /// Removes surfaces of panes that can no longer come back.
    fn reclaim_surfaces(&mut self) {
        let referenced = self.engine.referenced_panes();
        let stale: Vec<PaneId> = self
            .pool
            .pane_ids()
            .into_iter()
            .filter(|id| !self.tree.contains(*id) && !referenced.contains(id))
            .collect();
        for pane_id in stale {
            self.destroy_surface(pane_id);
        }
    }

    fn destroy_surface(&mut self, pane_id: PaneId) {
        if let Some((surface_id, surface)) = self.pool.entry_mut(pane_id) {
            if let Err(err) = self.provider.surface_closing(surface_id, pane_id, surface) {
                tracing::warn!(pane_id = %pane_id, error = %err, "surface_closing failed");
            }
        }
        self.pool.remove(pane_id);
        self.renderer.forget(pane_id);
    }
}
