//! # Synchronous event emitter.
//!
//! [`Emitter`] is the publish/subscribe primitive every component embeds. It is
//! the synchronous counterpart of a broadcast bus: `emit` runs every matching
//! listener to completion, in registration order, before it returns.
//!
//! ## Architecture
//! ```text
//! emit(&Event)
//!     │  (snapshot of listeners for ev.topic, lock released)
//!     ├──► listener 1 ──► panic? → tracing::error!, continue
//!     ├──► listener 2
//!     └──► listener N
//! ```
//!
//! ## Rules
//! - **In-order**: listeners run in the order they were registered.
//! - **Snapshot**: listeners added or removed during an `emit` take effect on the next one.
//! - **Isolation**: a panicking listener is caught and reported; the rest still run.
//! - **Re-entrant**: no lock is held while a listener runs, so listeners may emit,
//!   subscribe or close components freely.
//! - **Sealed**: after [`seal`](Emitter::seal), new listeners are discarded.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::Mutex;

use super::event::{Event, Topic};

/// Listener callback.
pub type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

/// Handle returned by [`Emitter::on`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Listener {
    id: ListenerId,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
struct Inner {
    next_id: u64,
    sealed: bool,
    listeners: Vec<Listener>,
}

/// Topic-keyed synchronous listener list.
#[derive(Default)]
pub struct Emitter {
    inner: Mutex<Inner>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `topic`.
    ///
    /// On a sealed emitter the handler is dropped and the returned id matches nothing.
    pub fn on<F>(&self, topic: Topic, handler: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = ListenerId(inner.next_id);
        if inner.sealed {
            tracing::debug!(%topic, "listener ignored: emitter is sealed");
            return id;
        }
        inner.listeners.push(Listener {
            id,
            topic,
            handler: Arc::new(handler),
        });
        id
    }

    /// Removes one listener. Returns `false` if it was not registered.
    pub fn off(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.lock();
        let before = inner.listeners.len();
        inner.listeners.retain(|l| l.id != id);
        inner.listeners.len() != before
    }

    /// Dispatches `event` to every listener of its topic and returns how many ran.
    ///
    /// Panics inside listeners are caught, logged, and do not count as delivered.
    pub fn emit(&self, event: &Event) -> usize {
        let handlers: Vec<Handler> = {
            let inner = self.inner.lock();
            inner
                .listeners
                .iter()
                .filter(|l| l.topic == event.topic)
                .map(|l| Arc::clone(&l.handler))
                .collect()
        };

        let mut delivered = 0;
        for handler in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(event))) {
                Ok(()) => delivered += 1,
                Err(panic_err) => {
                    let info = panic_message(panic_err.as_ref());
                    tracing::error!(
                        topic = %event.topic,
                        seq = event.seq,
                        panic = %info,
                        "event listener panicked"
                    );
                }
            }
        }
        delivered
    }

    /// Drops every listener and returns how many there were.
    pub fn remove_all_listeners(&self) -> usize {
        let mut inner = self.inner.lock();
        let n = inner.listeners.len();
        inner.listeners.clear();
        n
    }

    /// Refuses all future listeners.
    pub fn seal(&self) {
        self.inner.lock().sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.lock().sealed
    }

    /// Number of registered listeners (all topics).
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Number of listeners for one topic.
    pub fn listeners_for(&self, topic: &Topic) -> usize {
        self.inner
            .lock()
            .listeners
            .iter()
            .filter(|l| &l.topic == topic)
            .count()
    }
}

impl std::fmt::Debug for Emitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Emitter")
            .field("listeners", &inner.listeners.len())
            .field("sealed", &inner.sealed)
            .finish()
    }
}

/// Extracts a readable message from a panic payload.
pub(crate) fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
