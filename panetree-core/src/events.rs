//! Change notifications
//!
//! The session owns a plain list of callbacks. Events raised while a
//! transaction is open are held back and delivered on commit.

use crate::focus::FocusState;
use crate::tree::InvariantViolation;
use crate::types::PaneId;

/// Something observable changed in the layout.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// The tree's shape or ratios changed; geometry was recomputed.
    StructureChanged,
    /// Focus moved.
    FocusChanged {
        /// Focus before the change.
        old: FocusState,
        /// Focus after the change.
        new: FocusState,
    },
    /// A pane entered the tree.
    PaneAdded(PaneId),
    /// A pane left the tree (it may come back through undo/redo).
    PaneRemoved(PaneId),
    /// A command broke a structural invariant and was rolled back.
    ValidationFailed(Vec<InvariantViolation>),
}

/// Subscriber callback.
pub type Listener = Box<dyn FnMut(&LayoutEvent)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback list with transaction buffering.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
    pending: Option<Vec<LayoutEvent>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback.
    pub fn subscribe(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Starts holding events back.
    pub fn hold(&mut self) {
        self.pending.get_or_insert_with(Vec::new);
    }

    /// Returns true while events are being held back.
    #[must_use]
    pub const fn is_holding(&self) -> bool {
        self.pending.is_some()
    }

    /// Delivers an event, or queues it while held.
    pub fn emit(&mut self, event: LayoutEvent) {
        if let Some(pending) = self.pending.as_mut() {
            pending.push(event);
            return;
        }
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }

    /// Stops holding and delivers everything queued.
    pub fn release(&mut self) {
        if let Some(pending) = self.pending.take() {
            for event in pending {
                self.emit(event);
            }
        }
    }

    /// Stops holding and drops everything queued.
    pub fn discard(&mut self) {
        self.pending = None;
    }
}
