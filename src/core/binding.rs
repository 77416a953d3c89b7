//! # Binding protocol: the wiring of one parent → child edge.
//!
//! [`Binding::wire`] installs four relays between a parent `P` and a child `C`:
//!
//! ```text
//!            P.events                              C.events
//!   ┌────────────────────┐                 ┌────────────────────┐
//!   │ close ─────────────┼── (1) always ──►│ C.close()          │  owned by C.subs
//!   │                    │                 │                    │
//!   │ P.close() ◄────────┼── (2) strong ───┤ close              │  owned by P.subs
//!   │ emit(warn|info) ◄──┼── (3) always ───┤ warn | info        │  owned by P.subs
//!   │ P.warn(subcomp.) ◄─┼── (4) always ───┤ error              │  owned by P.subs
//!   └────────────────────┘                 └────────────────────┘
//! ```
//!
//! ## Rules
//! - Handlers hold **weak** references; an edge never keeps either side alive.
//! - Every relay is recorded in a [`Subscriptions`](crate::subscribers::Subscriptions)
//!   ledger, so `close()` on either side removes it.
//! - [`Binding::dispose`] removes this edge's relays only (used by `unbind`).
//! - Warn/info are re-emitted **verbatim**; an `error` is always downgraded to a
//!   `subcomponent-error` warning naming its origin.

use crate::events::{DiagnosticData, Origin, Topic};
use crate::subscribers::SubscriptionId;

use super::component::Component;

/// Strength of a parent → child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strength {
    /// Child closing also closes the parent (default).
    #[default]
    Strong,
    /// Child closing leaves the parent open.
    Weak,
}

/// Disposable handle over the relays of one edge.
pub(crate) struct Binding {
    strength: Strength,
    /// Relays on the child's emitter, recorded in the parent's ledger.
    on_child: Vec<SubscriptionId>,
    /// Downward close cascade on the parent's emitter, recorded in the child's ledger.
    on_parent: SubscriptionId,
}

impl Binding {
    /// Installs the four relays between `parent` and `child`.
    pub(crate) fn wire(parent: &Component, child: &Component, strength: Strength) -> Self {
        // (1) parent close → child close
        let weak_child = child.downgrade();
        let on_parent = child
            .inner
            .subs
            .subscribe(&parent.inner.events, Topic::Close, move |_| {
                if let Some(c) = weak_child.upgrade() {
                    c.close();
                }
            });

        let mut on_child = Vec::with_capacity(4);

        // (2) child close → parent close
        if strength == Strength::Strong {
            let weak_parent = parent.downgrade();
            on_child.push(parent.inner.subs.subscribe(
                &child.inner.events,
                Topic::Close,
                move |_| {
                    if let Some(p) = weak_parent.upgrade() {
                        p.close();
                    }
                },
            ));
        }

        // (3) warn / info pass-through
        on_child.push(relay(parent, child, Topic::Warn));
        on_child.push(relay(parent, child, Topic::Info));

        // (4) error → subcomponent-error warning
        let weak_parent = parent.downgrade();
        let weak_child = child.downgrade();
        on_child.push(parent.inner.subs.subscribe(
            &child.inner.events,
            Topic::Error,
            move |ev| {
                let Some(p) = weak_parent.upgrade() else {
                    return;
                };
                let origin = ev
                    .source
                    .clone()
                    .or_else(|| weak_child.upgrade().map(|c| c.to_ref()));
                let Some(origin) = origin else {
                    return;
                };
                p.warn(DiagnosticData::subcomponent_error(
                    Origin::Component(origin),
                    ev.error.clone(),
                ));
            },
        ));

        Self {
            strength,
            on_child,
            on_parent,
        }
    }

    /// Adds a pass-through relay for a linked custom topic.
    pub(crate) fn relay_topic(&mut self, parent: &Component, child: &Component, topic: Topic) {
        self.on_child.push(relay(parent, child, topic));
    }

    /// Removes every relay of this edge from both sides.
    pub(crate) fn dispose(self, parent: &Component, child: &Component) {
        parent.inner.subs.unsubscribe_many(&self.on_child);
        child.inner.subs.unsubscribe(self.on_parent);
    }

    /// Removes the child's side of an edge whose parent is being dropped.
    ///
    /// The parent's own relays go with its ledger.
    pub(crate) fn orphan(self, child: &Component) {
        child.inner.subs.unsubscribe(self.on_parent);
    }

    pub(crate) fn strength(&self) -> Strength {
        self.strength
    }
}

/// Re-emits `topic` from `child` on `parent`, unchanged.
fn relay(parent: &Component, child: &Component, topic: Topic) -> SubscriptionId {
    let weak_parent = parent.downgrade();
    parent
        .inner
        .subs
        .subscribe(&child.inner.events, topic, move |ev| {
            if let Some(p) = weak_parent.upgrade() {
                p.inner.events.emit(ev);
            }
        })
}
