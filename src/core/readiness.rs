//! # Single-settle readiness cell.
//!
//! Tracks one component's own `Pending → Ready | Failed` state and lets any
//! number of tasks await it.
//!
//! ## Architecture
//! ```text
//! ready() / failed(e) / teardown ──► Readiness::settle() ──► watch::Sender<ReadyState>
//!                                                                  │
//!                                         wait() ◄── watch::Receiver (one per awaiter)
//! ```
//!
//! ## Rules
//! - Settles **at most once**: the first `settle` wins, later ones return `false`
//! - `Pending` is never a settle target
//! - Awaiters registered before or after settling observe the same outcome
//! - Every settle takes a process-wide sequence number, so failures from
//!   different cells can be ordered by when they happened

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::error::ComponentError;

static SETTLE_SEQ: AtomicU64 = AtomicU64::new(0);

fn next_seq() -> u64 {
    SETTLE_SEQ.fetch_add(1, Ordering::Relaxed)
}

/// A component's own readiness.
#[derive(Debug, Clone)]
pub enum ReadyState {
    Pending,
    Ready,
    Failed(ComponentError),
}

impl ReadyState {
    #[inline]
    pub fn is_pending(&self) -> bool {
        matches!(self, ReadyState::Pending)
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self, ReadyState::Ready)
    }

    #[inline]
    pub fn is_failed(&self) -> bool {
        matches!(self, ReadyState::Failed(_))
    }
}

/// A rejected wait, stamped with the settle order of the failing cell.
#[derive(Debug, Clone)]
pub(crate) struct Failure {
    pub(crate) seq: u64,
    pub(crate) error: ComponentError,
}

#[derive(Debug, Clone)]
struct Slot {
    state: ReadyState,
    seq: u64,
}

/// Resolve-or-reject-once cell backed by a `watch` channel.
pub(crate) struct Readiness {
    tx: watch::Sender<Slot>,
}

impl Readiness {
    pub(crate) fn new(ready: bool) -> Self {
        let init = if ready {
            ReadyState::Ready
        } else {
            ReadyState::Pending
        };
        let (tx, _rx) = watch::channel(Slot {
            state: init,
            seq: next_seq(),
        });
        Self { tx }
    }

    /// Moves out of `Pending`. Returns `true` only for the call that settled it.
    pub(crate) fn settle(&self, next: ReadyState) -> bool {
        debug_assert!(!next.is_pending(), "readiness cannot settle to pending");
        if next.is_pending() {
            return false;
        }
        self.tx.send_if_modified(|cur| {
            if cur.state.is_pending() {
                *cur = Slot {
                    state: next,
                    seq: next_seq(),
                };
                true
            } else {
                false
            }
        })
    }

    pub(crate) fn state(&self) -> ReadyState {
        self.tx.borrow().state.clone()
    }

    /// Future resolving with the settled outcome.
    ///
    /// `name` is only used for the error returned if the cell is dropped first.
    pub(crate) fn wait(
        &self,
        name: Arc<str>,
    ) -> impl Future<Output = Result<(), Failure>> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            loop {
                let Slot { state, seq } = rx.borrow_and_update().clone();
                match state {
                    ReadyState::Ready => return Ok(()),
                    ReadyState::Failed(error) => return Err(Failure { seq, error }),
                    ReadyState::Pending => {}
                }
                if rx.changed().await.is_err() {
                    return Err(Failure {
                        seq: next_seq(),
                        error: ComponentError::ClosedBeforeReady { component: name },
                    });
                }
            }
        }
    }
}
