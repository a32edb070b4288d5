//! Change notification for reconciliation sessions.
//!
//! A session owns one [`ChangeNotifier`]. Every successful mutation dispatches
//! exactly one [`ChangeEvent`] to every registered observer after the mutation
//! is applied and before the mutating call returns. Failed calls dispatch
//! nothing.

use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::{session::ReconciliationSession, traits::Observer};

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Direction of a [`ReconciliationSession::reorder`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Earlier,
    Later,
}

/// What a mutation changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    Assigned {
        source_word: String,
        target_word: String,
        /// Source word the target word was taken from, if any.
        previous_owner: Option<String>,
    },
    Unassigned {
        source_word: String,
        target_word: String,
    },
    Reordered {
        source_word: String,
        target_word: String,
        from: usize,
        to: usize,
    },
    Resynced {
        dropped: Vec<String>,
        added: Vec<String>,
    },
    Cleared,
}

impl ChangeEvent {
    /// Source words whose target lists may have changed.
    ///
    /// Empty for events that require a full refresh, see [`Self::is_full_refresh`].
    pub fn affected_source_words(&self) -> Vec<&str> {
        match self {
            ChangeEvent::Assigned {
                source_word,
                previous_owner,
                ..
            } => {
                let mut words = vec![source_word.as_str()];
                if let Some(owner) = previous_owner
                    && owner != source_word
                {
                    words.push(owner.as_str());
                }
                words
            }
            ChangeEvent::Unassigned { source_word, .. }
            | ChangeEvent::Reordered { source_word, .. } => vec![source_word.as_str()],
            ChangeEvent::Resynced { .. } | ChangeEvent::Cleared => Vec::new(),
        }
    }

    /// Whether every view of the session should be redrawn.
    pub fn is_full_refresh(&self) -> bool {
        matches!(self, ChangeEvent::Resynced { .. } | ChangeEvent::Cleared)
    }
}

/// Explicit list of observers with a single dispatch per mutation.
#[derive(Default)]
pub struct ChangeNotifier {
    next_id: u64,
    observers: Vec<Subscription>,
    /// Observers lent out by [`ChangeNotifier::detach`] for a dispatch.
    in_flight: usize,
}

pub(crate) type Subscription = (SubscriptionId, Box<dyn Observer>);

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer; it receives every event dispatched from now on.
    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    /// Number of registered observers, including those currently being
    /// notified.
    pub fn len(&self) -> usize {
        self.observers.len() + self.in_flight
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lends the observers out for a dispatch. [`ChangeNotifier::len`] keeps
    /// counting them until [`ChangeNotifier::reattach`].
    pub(crate) fn detach(&mut self) -> Vec<Subscription> {
        let observers = std::mem::take(&mut self.observers);
        self.in_flight = observers.len();
        observers
    }

    pub(crate) fn reattach(&mut self, observers: Vec<Subscription>) {
        self.in_flight = 0;
        self.observers = observers;
    }

    /// Delivers `event` to every observer in subscription order.
    pub(crate) fn dispatch(
        observers: &mut [Subscription],
        event: &ChangeEvent,
        session: &ReconciliationSession,
    ) {
        trace!(?event, observers = observers.len(), "dispatching change event");
        for (_, observer) in observers.iter_mut() {
            observer.on_change(event, session);
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("observers", &self.len())
            .finish()
    }
}
