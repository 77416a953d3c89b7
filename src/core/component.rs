//! # Component: a node of the lifecycle tree.
//!
//! A [`Component`] owns a name, its children, a readiness cell and a closed
//! flag. It embeds an [`Emitter`] for the events *it* publishes and a
//! [`Subscriptions`] ledger for the listeners it installs on *others*.
//!
//! ## State machine
//! ```text
//! readiness:  Pending ──ready()──► Ready
//!                │
//!                └──failed(e) / error(e) / close()──► Failed
//!
//! lifecycle:  Open ──close()──► Closed      (failed() always closes)
//! ```
//!
//! ## Close sequence
//! ```text
//! close()
//!   ├─► guard: closed? → return
//!   ├─► close hook (async, optional; error → self.error())
//!   └─► teardown
//!         ├─► reject readiness if still pending (ClosedBeforeReady)
//!         ├─► emit close ──► children close (always), strong parent closes
//!         ├─► detach from parent
//!         ├─► release children still attached
//!         ├─► events.remove_all_listeners() + seal
//!         ├─► subs.unsubscribe_all()
//!         └─► closed token cancelled
//! ```
//!
//! ## Rules
//! - No lock is held while events are dispatched; all cascades are re-entrant.
//! - Parents hold children strongly, children hold parents weakly.
//! - `close()` is idempotent; teardown runs exactly once.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Weak};

use futures::FutureExt;
use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::{ComponentError, ContractError};
use crate::events::{
    ComponentId, ComponentRef, Diagnostic, DiagnosticData, Emitter, Event, Level, ListenerId,
    Topic, panic_message,
};
use crate::subscribers::{Subscribe, Subscriptions};

use super::binding::{Binding, Strength};
use super::builder::ComponentBuilder;
use super::config::Config;
use super::hook::CloseHookRef;
use super::inspect::{Snapshot, Target};
use super::readiness::{Failure, ReadyState, Readiness};
use super::wrapper::Subcomponent;

/// Handle to a component. Cloning is cheap and yields the same component.
#[derive(Clone)]
pub struct Component {
    pub(crate) inner: Arc<Inner>,
}

/// Non-owning handle, used by relays and parent back-pointers.
#[derive(Clone)]
pub struct WeakComponent {
    inner: Weak<Inner>,
}

impl WeakComponent {
    pub fn upgrade(&self) -> Option<Component> {
        self.inner.upgrade().map(|inner| Component { inner })
    }
}

pub(crate) struct Inner {
    pub(crate) id: ComponentId,
    pub(crate) cfg: Config,
    pub(crate) events: Arc<Emitter>,
    pub(crate) subs: Subscriptions,
    readiness: Readiness,
    state: Mutex<State>,
    hook: Mutex<Option<CloseHookRef>>,
    closed: CancellationToken,
}

impl Drop for Inner {
    fn drop(&mut self) {
        // Relays this component left on emitters that outlive it.
        self.subs.unsubscribe_all();
        // Dropped without close(): children still record the downward relay.
        for Edge { child, binding } in self.state.get_mut().children.drain(..) {
            binding.orphan(&child);
            child.inner.state.lock().parent = None;
        }
    }
}

struct State {
    name: Arc<str>,
    parent: Option<Weak<Inner>>,
    children: Vec<Edge>,
    closed: bool,
    style: Vec<Arc<str>>,
    target: Target,
    linked: Vec<(Topic, bool)>,
}

struct Edge {
    child: Component,
    binding: Binding,
}

impl Component {
    /// Creates a pending component with the default config.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        ComponentBuilder::new(name).build()
    }

    /// Starts a [`ComponentBuilder`].
    pub fn builder(name: impl Into<Arc<str>>) -> ComponentBuilder {
        ComponentBuilder::new(name)
    }

    pub(crate) fn from_parts(
        name: Arc<str>,
        cfg: Config,
        ready: bool,
        style: Vec<Arc<str>>,
        target: Target,
        hook: Option<CloseHookRef>,
    ) -> Self {
        let inner = Inner {
            id: ComponentId::next(),
            cfg,
            events: Arc::new(Emitter::new()),
            subs: Subscriptions::new(),
            readiness: Readiness::new(ready),
            state: Mutex::new(State {
                name,
                parent: None,
                children: Vec::new(),
                closed: false,
                style,
                target,
                linked: Vec::new(),
            }),
            hook: Mutex::new(hook),
            closed: CancellationToken::new(),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    // ---------------------------
    // Identity
    // ---------------------------

    pub fn id(&self) -> ComponentId {
        self.inner.id
    }

    /// Current display name.
    pub fn name(&self) -> Arc<str> {
        self.inner.state.lock().name.clone()
    }

    /// Changes the display name. Bindings and listeners are unaffected.
    pub fn rename(&self, name: impl Into<Arc<str>>) {
        self.inner.state.lock().name = name.into();
    }

    /// Id + current name, as carried by events.
    pub fn to_ref(&self) -> ComponentRef {
        ComponentRef {
            id: self.inner.id,
            name: self.name(),
        }
    }

    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.cfg
    }

    // ---------------------------
    // Tree
    // ---------------------------

    /// Attaches `child` under `self` and wires the binding protocol.
    ///
    /// A [`Subcomponent::Raw`] child is first promoted with
    /// [`Component::wrap`]; the returned handle is the component actually bound.
    ///
    /// # Errors
    /// - [`ContractError::Closed`] if either side is closed
    /// - [`ContractError::SelfBinding`] if `child` is `self`
    /// - [`ContractError::AlreadyBound`] if `child` has a parent
    /// - [`ContractError::Cycle`] if `child` is an ancestor of `self`
    pub fn bind(
        &self,
        child: impl Into<Subcomponent>,
        strength: Strength,
    ) -> Result<Component, ContractError> {
        let child = match child.into() {
            Subcomponent::Component(c) => c,
            Subcomponent::Raw(raw) => Component::wrap(raw, self.inner.cfg.for_wrapper()),
        };

        if self.is_closed() {
            return Err(ContractError::Closed { name: self.name() });
        }
        if child.is_closed() {
            return Err(ContractError::Closed { name: child.name() });
        }
        if child.id() == self.id() {
            return Err(ContractError::SelfBinding { name: self.name() });
        }
        if let Some(parent) = child.parent() {
            return Err(ContractError::AlreadyBound {
                child: child.name(),
                parent: parent.name(),
            });
        }
        if self.has_ancestor(&child) {
            return Err(ContractError::Cycle {
                parent: self.name(),
                child: child.name(),
            });
        }

        child.inner.state.lock().parent = Some(Arc::downgrade(&self.inner));

        let mut binding = Binding::wire(self, &child, strength);
        let linked = self.inner.state.lock().linked.clone();
        for (topic, _) in &linked {
            binding.relay_topic(self, &child, topic.clone());
        }
        self.inner.state.lock().children.push(Edge {
            child: child.clone(),
            binding,
        });
        for (topic, recurse) in linked {
            if recurse {
                child.link_event(topic, true);
            }
        }

        if self.inner.cfg.debug {
            tracing::debug!(
                parent = %self.to_ref(),
                child = %child.to_ref(),
                ?strength,
                "bound"
            );
        }
        Ok(child)
    }

    /// Shorthand for `bind(child, Strength::Weak)`.
    pub fn bind_weak(&self, child: impl Into<Subcomponent>) -> Result<Component, ContractError> {
        self.bind(child, Strength::Weak)
    }

    /// Detaches a direct child and removes the relays of that edge.
    ///
    /// # Errors
    /// [`ContractError::NotAChild`] if `child` is not currently a child of `self`.
    pub fn unbind(&self, child: &Component) -> Result<(), ContractError> {
        let edge = self
            .take_edge(child.id())
            .ok_or_else(|| ContractError::NotAChild {
                parent: self.name(),
                child: child.name(),
            })?;
        self.release(edge);
        if self.inner.cfg.debug {
            tracing::debug!(parent = %self.to_ref(), child = %child.to_ref(), "unbound");
        }
        Ok(())
    }

    /// Relays `topic` fired by any direct child as the same event on `self`.
    ///
    /// Applies to current children and to children bound later. With `recurse`,
    /// every child links the topic as well, down the whole subtree.
    ///
    /// `warn` and `info` are always relayed already; `error` is never relayed
    /// raw. Linking any of them is a no-op.
    pub fn link_event(&self, topic: impl Into<Topic>, recurse: bool) {
        let topic = topic.into();
        if matches!(topic, Topic::Warn | Topic::Info | Topic::Error) {
            tracing::debug!(%topic, component = %self.to_ref(), "link_event ignored for built-in topic");
            return;
        }

        let (install, children) = {
            let mut st = self.inner.state.lock();
            let install = match st.linked.iter_mut().find(|(t, _)| *t == topic) {
                Some(entry) => {
                    entry.1 |= recurse;
                    false
                }
                None => {
                    st.linked.push((topic.clone(), recurse));
                    true
                }
            };
            let children: Vec<Component> = st.children.iter().map(|e| e.child.clone()).collect();
            (install, children)
        };

        for child in children {
            if install {
                let mut st = self.inner.state.lock();
                if let Some(edge) = st.children.iter_mut().find(|e| e.child.id() == child.id()) {
                    edge.binding.relay_topic(self, &child, topic.clone());
                }
            }
            if recurse {
                child.link_event(topic.clone(), true);
            }
        }
    }

    /// Current parent, if bound and still alive.
    pub fn parent(&self) -> Option<Component> {
        let weak = self.inner.state.lock().parent.clone()?;
        weak.upgrade().map(|inner| Component { inner })
    }

    pub fn is_bound(&self) -> bool {
        self.parent().is_some()
    }

    /// Snapshot of the direct children.
    pub fn children(&self) -> Vec<Component> {
        self.inner
            .state
            .lock()
            .children
            .iter()
            .map(|e| e.child.clone())
            .collect()
    }

    pub fn child_count(&self) -> usize {
        self.inner.state.lock().children.len()
    }

    pub fn has_child(&self, child: &Component) -> bool {
        self.inner
            .state
            .lock()
            .children
            .iter()
            .any(|e| e.child.id() == child.id())
    }

    /// Strength of the edge to a direct child.
    pub fn strength_of(&self, child: &Component) -> Option<Strength> {
        self.inner
            .state
            .lock()
            .children
            .iter()
            .find(|e| e.child.id() == child.id())
            .map(|e| e.binding.strength())
    }

    fn has_ancestor(&self, candidate: &Component) -> bool {
        let mut cur = self.parent();
        while let Some(p) = cur {
            if p.id() == candidate.id() {
                return true;
            }
            cur = p.parent();
        }
        false
    }

    fn take_edge(&self, id: ComponentId) -> Option<Edge> {
        let mut st = self.inner.state.lock();
        let pos = st.children.iter().position(|e| e.child.id() == id)?;
        Some(st.children.remove(pos))
    }

    /// Disposes an edge already removed from the child set.
    fn release(&self, edge: Edge) {
        let Edge { child, binding } = edge;
        binding.dispose(self, &child);
        let mut st = child.inner.state.lock();
        let ours = st
            .parent
            .as_ref()
            .is_some_and(|w| Weak::ptr_eq(w, &Arc::downgrade(&self.inner)));
        if ours {
            st.parent = None;
        }
    }

    // ---------------------------
    // Readiness
    // ---------------------------

    /// Marks `self` (not its descendants) ready. No-op once settled.
    pub fn ready(&self) {
        if self.inner.readiness.settle(ReadyState::Ready) && self.inner.cfg.debug {
            tracing::debug!(component = %self.to_ref(), "ready");
        }
    }

    /// Rejects readiness with `err` (if still pending) and closes `self`.
    pub fn failed(&self, err: ComponentError) {
        let settled = self.inner.readiness.settle(ReadyState::Failed(err.clone()));
        if self.inner.cfg.debug {
            tracing::debug!(
                component = %self.to_ref(),
                error = %err,
                during_init = settled,
                "failed"
            );
        }
        self.close();
    }

    /// Emits an `error` event on `self`, then calls [`failed`](Self::failed).
    ///
    /// Listeners (including the parent's reclassification relay) run before
    /// the close cascade starts.
    pub fn error(&self, err: ComponentError) {
        self.raise(err);
    }

    fn raise(&self, err: ComponentError) -> usize {
        let ev = Event::error(err.clone()).with_source(self.to_ref());
        let delivered = self.inner.events.emit(&ev);
        self.failed(err);
        delivered
    }

    /// True iff `self` alone has settled to ready.
    pub fn self_is_ready(&self) -> bool {
        self.inner.readiness.state().is_ready()
    }

    pub fn ready_state(&self) -> ReadyState {
        self.inner.readiness.state()
    }

    /// Resolves once `self` and every descendant are ready; rejects with the
    /// first failure to settle anywhere in the subtree.
    ///
    /// If the child set changes while waiting, the new set is awaited too.
    pub fn wait_for_ready(&self) -> BoxFuture<'static, Result<(), ComponentError>> {
        self.wait_subtree().map(|res| res.map_err(|f| f.error)).boxed()
    }

    fn wait_subtree(&self) -> BoxFuture<'static, Result<(), Failure>> {
        let me = self.clone();
        async move {
            loop {
                let children = me.children();
                let ids: Vec<ComponentId> = children.iter().map(Component::id).collect();

                let mut pending: FuturesUnordered<BoxFuture<'static, Result<(), Failure>>> =
                    children.iter().map(Component::wait_subtree).collect();
                pending.push(me.inner.readiness.wait(me.name()).boxed());

                while let Some(res) = pending.next().await {
                    if let Err(first) = res {
                        return Err(earliest(first, &mut pending));
                    }
                }

                let now: Vec<ComponentId> = me.children().iter().map(Component::id).collect();
                if now == ids {
                    return Ok(());
                }
            }
        }
        .boxed()
    }

    // ---------------------------
    // Events
    // ---------------------------

    /// Emits a warning: `{type: warn, source: self, ...data}`.
    pub fn warn(&self, data: impl Into<DiagnosticData>) {
        self.diagnose(Level::Warn, data.into());
    }

    /// Emits an info: `{type: info, source: self, ...data}`.
    pub fn info(&self, data: impl Into<DiagnosticData>) {
        self.diagnose(Level::Info, data.into());
    }

    fn diagnose(&self, level: Level, data: DiagnosticData) {
        let diag = Diagnostic::build(level, Some(self.to_ref()), data);
        self.inner.events.emit(&Event::diagnostic(Arc::new(diag)));
    }

    /// Emits `event` on `self` and returns how many listeners ran.
    ///
    /// `close` is routed to [`close`](Self::close) and `error` to
    /// [`error`](Self::error), so lifecycle rules hold for hand-built events.
    pub fn emit(&self, mut event: Event) -> usize {
        match event.topic {
            Topic::Close => {
                self.close();
                0
            }
            Topic::Error => {
                let err = event
                    .error
                    .take()
                    .unwrap_or_else(|| ComponentError::failed("unspecified error"));
                self.raise(err)
            }
            _ => {
                if event.source.is_none() {
                    event.source = Some(self.to_ref());
                }
                self.inner.events.emit(&event)
            }
        }
    }

    /// Registers a listener on this component's events.
    pub fn on<F>(&self, topic: impl Into<Topic>, handler: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner.events.on(topic.into(), handler)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.inner.events.off(id)
    }

    /// Attaches a [`Subscribe`] implementation to every topic it declares.
    pub fn subscribe(&self, sub: Arc<dyn Subscribe>) -> Vec<ListenerId> {
        sub.topics()
            .into_iter()
            .map(|topic| {
                let s = Arc::clone(&sub);
                self.inner.events.on(topic, move |ev| s.on_event(ev))
            })
            .collect()
    }

    /// Listeners currently registered on this component.
    pub fn listener_count(&self) -> usize {
        self.inner.events.listener_count()
    }

    /// Subscriptions this component holds on other emitters.
    pub fn subscription_count(&self) -> usize {
        self.inner.subs.len()
    }

    // ---------------------------
    // Close
    // ---------------------------

    /// Tears the component down. Idempotent.
    ///
    /// With a close hook installed, teardown runs after the hook: spawned on
    /// the current tokio runtime, or inline when there is none. Await
    /// [`closed`](Self::closed) to observe completion.
    pub fn close(&self) {
        {
            let mut st = self.inner.state.lock();
            if st.closed {
                return;
            }
            st.closed = true;
        }
        if self.inner.cfg.debug {
            tracing::debug!(component = %self.to_ref(), "closing");
        }

        let hook = self.inner.hook.lock().take();
        match hook {
            None => self.teardown(),
            Some(hook) => self.run_hook(hook),
        }
    }

    fn run_hook(&self, hook: CloseHookRef) {
        let me = self.clone();
        let fut = async move {
            let reason = match AssertUnwindSafe(hook.on_close()).catch_unwind().await {
                Ok(Ok(())) => None,
                Ok(Err(err)) => Some(err.to_string()),
                Err(panic_err) => Some(format!("panicked: {}", panic_message(panic_err.as_ref()))),
            };
            if let Some(reason) = reason {
                me.error(ComponentError::CloseHook {
                    component: me.name(),
                    reason: reason.into(),
                });
            }
            // Teardown runs whatever the hook did.
            me.teardown();
        };
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(fut);
            }
            Err(_) => futures::executor::block_on(fut),
        }
    }

    fn teardown(&self) {
        self.inner
            .readiness
            .settle(ReadyState::Failed(ComponentError::ClosedBeforeReady {
                component: self.name(),
            }));

        self.inner
            .events
            .emit(&Event::close().with_source(self.to_ref()));

        if let Some(parent) = self.parent() {
            if let Some(edge) = parent.take_edge(self.id()) {
                parent.release(edge);
            }
        }

        // Children whose own teardown is still pending (async hooks).
        let edges = std::mem::take(&mut self.inner.state.lock().children);
        for edge in edges {
            self.release(edge);
        }

        self.inner.events.remove_all_listeners();
        self.inner.events.seal();
        self.inner.subs.unsubscribe_all();
        self.inner.state.lock().parent = None;
        self.inner.closed.cancel();

        if self.inner.cfg.debug {
            tracing::debug!(component = %self.to_ref(), "closed");
        }
    }

    /// True once `close()` passed its guard.
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    /// Resolves once teardown has finished.
    pub fn closed(&self) -> impl Future<Output = ()> + Send + 'static {
        self.inner.closed.clone().cancelled_owned()
    }

    // ---------------------------
    // Presentation
    // ---------------------------

    pub fn style(&self) -> Vec<Arc<str>> {
        self.inner.state.lock().style.clone()
    }

    pub fn set_style(&self, style: Vec<Arc<str>>) {
        self.inner.state.lock().style = style;
    }

    pub fn add_style(&self, tag: impl Into<Arc<str>>) {
        self.inner.state.lock().style.push(tag.into());
    }

    pub fn target(&self) -> Target {
        self.inner.state.lock().target.clone()
    }

    /// Read-only view of the subtree rooted at `self`.
    pub fn inspect(&self) -> Snapshot {
        let (name, style, target, closed) = {
            let st = self.inner.state.lock();
            (st.name.clone(), st.style.clone(), st.target.clone(), st.closed)
        };
        Snapshot {
            id: self.id(),
            name,
            parent: self.parent().map(|p| p.to_ref()),
            target,
            style,
            ready: self.self_is_ready(),
            closed,
            children: self.children().iter().map(Component::inspect).collect(),
        }
    }
}

/// Among `first` and the waits already settled in the same wake-up, keeps the
/// failure that settled first. A cascade can settle several cells at once.
fn earliest(
    mut first: Failure,
    rest: &mut FuturesUnordered<BoxFuture<'static, Result<(), Failure>>>,
) -> Failure {
    while let Some(Some(res)) = rest.next().now_or_never() {
        if let Err(f) = res {
            if f.seq < first.seq {
                first = f;
            }
        }
    }
    first
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Component {}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.inner.id)
            .field("name", &self.name())
            .field("closed", &self.is_closed())
            .field("children", &self.child_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(c: &Component, topic: Topic) -> Arc<AtomicUsize> {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        c.on(topic, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        hits
    }

    #[test]
    fn test_bind_sets_parent_and_child() {
        let p = Component::new("p");
        let c = Component::new("c");
        let bound = p.bind(c.clone(), Strength::Strong).unwrap();
        assert_eq!(bound, c);
        assert_eq!(c.parent(), Some(p.clone()));
        assert!(c.is_bound());
        assert!(p.has_child(&c));
        assert_eq!(p.strength_of(&c), Some(Strength::Strong));
    }

    #[test]
    fn test_bind_then_unbind_restores() {
        let p = Component::new("p");
        let c = Component::new("c");
        p.bind_weak(c.clone()).unwrap();
        p.unbind(&c).unwrap();
        assert!(!c.is_bound());
        assert_eq!(p.child_count(), 0);
        assert_eq!(p.listener_count() + c.listener_count(), 0);
        assert_eq!(p.subscription_count() + c.subscription_count(), 0);
    }

    #[test]
    fn test_double_bind_fails() {
        let a = Component::new("a");
        let b = Component::new("b");
        let c = Component::new("c");
        a.bind(c.clone(), Strength::Strong).unwrap();
        let err = b.bind(c.clone(), Strength::Strong).unwrap_err();
        assert_eq!(
            err,
            ContractError::AlreadyBound {
                child: "c".into(),
                parent: "a".into()
            }
        );
        assert_eq!(b.child_count(), 0);
    }

    #[test]
    fn test_unbind_stranger_fails() {
        let p = Component::new("p");
        let c = Component::new("c");
        let err = p.unbind(&c).unwrap_err();
        assert_eq!(err.as_label(), "contract_not_a_child");
    }

    #[test]
    fn test_self_and_cycle_rejected() {
        let a = Component::new("a");
        let b = Component::new("b");
        assert_eq!(
            a.bind(a.clone(), Strength::Strong).unwrap_err().as_label(),
            "contract_self_binding"
        );
        a.bind(b.clone(), Strength::Strong).unwrap();
        assert_eq!(
            b.bind(a.clone(), Strength::Strong).unwrap_err().as_label(),
            "contract_cycle"
        );
    }

    #[test]
    fn test_bind_closed_rejected() {
        let p = Component::new("p");
        let c = Component::new("c");
        c.close();
        assert_eq!(
            p.bind(c, Strength::Weak).unwrap_err(),
            ContractError::Closed { name: "c".into() }
        );
    }

    #[test]
    fn test_close_is_idempotent() {
        let p = Component::new("p");
        let c = Component::new("c");
        p.bind_weak(c.clone()).unwrap();
        let closes = counter(&c, Topic::Close);
        c.close();
        c.close();
        c.close();
        assert_eq!(closes.load(Ordering::SeqCst), 1);
        assert!(c.is_closed());
        assert_eq!(p.child_count(), 0);
        assert!(!p.is_closed());
    }

    #[test]
    fn test_close_leaves_no_listeners() {
        let p = Component::new("p");
        let c = Component::new("c");
        p.bind(c.clone(), Strength::Strong).unwrap();
        p.on(Topic::Warn, |_| {});
        p.close();
        assert_eq!(p.listener_count(), 0);
        assert_eq!(c.listener_count(), 0);
        assert_eq!(p.subscription_count(), 0);
        assert_eq!(c.subscription_count(), 0);
        p.on(Topic::Warn, |_| {});
        assert_eq!(p.listener_count(), 0);
    }

    #[test]
    fn test_close_survives_panicking_listener() {
        let p = Component::new("p");
        let c = Component::new("c");
        p.bind_weak(c.clone()).unwrap();
        c.on(Topic::Close, |_| panic!("close listener failed"));
        c.close();
        assert_eq!(p.child_count(), 0);
        assert_eq!(c.listener_count(), 0);
    }

    #[test]
    fn test_failed_rejects_and_closes() {
        let c = Component::new("c");
        c.failed(ComponentError::failed("init"));
        assert!(c.is_closed());
        assert!(c.ready_state().is_failed());
        assert!(!c.self_is_ready());
    }

    #[test]
    fn test_failed_after_ready_keeps_ready() {
        let c = Component::new("c");
        c.ready();
        c.failed(ComponentError::failed("late"));
        assert!(c.is_closed());
        assert!(c.self_is_ready());
    }

    #[test]
    fn test_ready_after_failed_is_noop() {
        let c = Component::new("c");
        c.failed(ComponentError::failed("x"));
        c.ready();
        assert!(!c.self_is_ready());
    }

    #[test]
    fn test_close_before_ready_rejects() {
        let c = Component::new("c");
        c.close();
        match c.ready_state() {
            ReadyState::Failed(err) => assert!(err.is_closed_before_ready()),
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_warn_normalizes_string() {
        let c = Component::new("c");
        let seen = Arc::new(Mutex::new(None));
        let s = Arc::clone(&seen);
        c.on(Topic::Warn, move |ev| *s.lock() = ev.diagnostic.clone());
        c.warn("low disk");
        let diag = seen.lock().clone().unwrap();
        assert_eq!(diag.message.as_deref(), Some("low disk"));
        assert_eq!(diag.kind.as_str(), "warn");
        assert_eq!(diag.source.as_ref().map(|r| r.id), Some(c.id()));
    }

    #[test]
    fn test_rename_keeps_bindings() {
        let p = Component::new("p");
        let c = Component::new("c");
        p.bind(c.clone(), Strength::Strong).unwrap();
        c.rename("renamed");
        assert_eq!(c.name().as_ref(), "renamed");
        assert!(p.has_child(&c));
        let warns = counter(&p, Topic::Warn);
        c.warn("still relayed");
        assert_eq!(warns.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_emit_routes_error_through_failed() {
        let c = Component::new("c");
        c.emit(Event::new(Topic::Error));
        assert!(c.is_closed());
        assert!(c.ready_state().is_failed());
    }

    #[test]
    fn test_link_event_relays_from_children() {
        let p = Component::new("p");
        let a = Component::new("a");
        p.bind(a.clone(), Strength::Strong).unwrap();
        p.link_event("tick", false);
        let b = Component::new("b");
        p.bind(b.clone(), Strength::Strong).unwrap();
        let ticks = counter(&p, Topic::custom("tick"));
        a.emit(Event::new(Topic::custom("tick")));
        b.emit(Event::new(Topic::custom("tick")));
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_link_event_recurse() {
        let root = Component::new("root");
        let mid = Component::new("mid");
        let leaf = Component::new("leaf");
        root.bind(mid.clone(), Strength::Strong).unwrap();
        mid.bind(leaf.clone(), Strength::Strong).unwrap();
        root.link_event("tick", true);
        let ticks = counter(&root, Topic::custom("tick"));
        leaf.emit(Event::new(Topic::custom("tick")));
        assert_eq!(ticks.load(Ordering::SeqCst), 1);

        let late = Component::new("late");
        leaf.bind(late.clone(), Strength::Strong).unwrap();
        late.emit(Event::new(Topic::custom("tick")));
        assert_eq!(ticks.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_link_event_without_recurse_stays_shallow() {
        let root = Component::new("root");
        let mid = Component::new("mid");
        let leaf = Component::new("leaf");
        root.bind(mid.clone(), Strength::Strong).unwrap();
        mid.bind(leaf.clone(), Strength::Strong).unwrap();
        root.link_event("tick", false);
        let ticks = counter(&root, Topic::custom("tick"));
        leaf.emit(Event::new(Topic::custom("tick")));
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unbind_stops_linked_relay() {
        let p = Component::new("p");
        let c = Component::new("c");
        p.bind(c.clone(), Strength::Strong).unwrap();
        p.link_event("tick", false);
        p.unbind(&c).unwrap();
        assert_eq!(c.listener_count(), 0);
        assert_eq!(p.subscription_count(), 0);
    }

    #[test]
    fn test_inspect_reports_tree() {
        let p = Component::builder("p").ready().style(["bold"]).build();
        let c = Component::new("c");
        p.bind(c.clone(), Strength::Weak).unwrap();
        let snap = p.inspect();
        assert_eq!(snap.name.as_ref(), "p");
        assert!(snap.ready);
        assert_eq!(snap.style, vec![Arc::<str>::from("bold")]);
        assert_eq!(snap.children.len(), 1);
        assert_eq!(snap.children[0].parent.as_ref().map(|r| r.id), Some(p.id()));
        assert_eq!(snap.children[0].target, Target::Component);
    }

    #[test]
    fn test_dropped_parent_counts_as_unbound() {
        let c = Component::new("c");
        {
            let p = Component::new("p");
            p.bind(c.clone(), Strength::Strong).unwrap();
        }
        assert!(!c.is_bound());
        assert_eq!(c.listener_count(), 0);
        assert_eq!(c.subscription_count(), 0);
        let q = Component::new("q");
        assert!(q.bind(c.clone(), Strength::Strong).is_ok());
    }

    #[test]
    fn test_rebinding_after_dropped_parents_keeps_ledger_flat() {
        let c = Component::new("c");
        for _ in 0..3 {
            let p = Component::new("p");
            p.bind(c.clone(), Strength::Weak).unwrap();
            assert_eq!(c.subscription_count(), 1);
        }
        assert_eq!(c.subscription_count(), 0);
        assert!(!c.is_bound());
    }
}
