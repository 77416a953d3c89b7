//! # Subscription registry.
//!
//! [`Subscriptions`] records every listener a component installs on *other*
//! emitters, so the whole lot can be removed at once when the component closes.
//!
//! ## Architecture
//! ```text
//! parent.subs.subscribe(&child.events, Warn, relay)
//!        │
//!        ├──► child.events.on(Warn, relay) ──► ListenerId
//!        └──► entries.push { id, Weak<child.events>, ListenerId }
//!
//! parent.close()
//!        └──► subs.unsubscribe_all() ──► child.events.off(ListenerId) for every entry
//! ```
//!
//! ## Rules
//! - Targets are held weakly: the registry never keeps an emitter alive.
//! - Unsubscribing from a dropped target is a silent no-op.
//! - `unsubscribe` of an unknown id returns `false`.

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::events::{Emitter, Event, ListenerId, Topic};

/// Handle returned by [`Subscriptions::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Entry {
    id: SubscriptionId,
    target: Weak<Emitter>,
    listener: ListenerId,
}

impl Entry {
    fn detach(self) {
        if let Some(target) = self.target.upgrade() {
            target.off(self.listener);
        }
    }
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Ledger of (target, topic, handler) registrations owned by one component.
#[derive(Default)]
pub struct Subscriptions {
    inner: Mutex<Inner>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `handler` on `target` for `topic` and records it.
    pub fn subscribe<F>(&self, target: &Arc<Emitter>, topic: Topic, handler: F) -> SubscriptionId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let listener = target.on(topic, handler);
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.entries.push(Entry {
            id,
            target: Arc::downgrade(target),
            listener,
        });
        id
    }

    /// Removes one subscription. Returns `false` if it was not recorded here.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let entry = {
            let mut inner = self.inner.lock();
            let pos = inner.entries.iter().position(|e| e.id == id);
            pos.map(|p| inner.entries.remove(p))
        };
        match entry {
            Some(e) => {
                e.detach();
                true
            }
            None => false,
        }
    }

    /// Removes several subscriptions; returns how many were found.
    pub fn unsubscribe_many(&self, ids: &[SubscriptionId]) -> usize {
        ids.iter().filter(|id| self.unsubscribe(**id)).count()
    }

    /// Removes everything; returns how many subscriptions there were.
    pub fn unsubscribe_all(&self) -> usize {
        let entries: Vec<Entry> = std::mem::take(&mut self.inner.lock().entries);
        let n = entries.len();
        for e in entries {
            e.detach();
        }
        n
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}

impl std::fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriptions")
            .field("len", &self.len())
            .finish()
    }
}
