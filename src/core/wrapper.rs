//! # Wrapper adapter: raw emitters as components.
//!
//! A [`RawEmitter`] is any object that can be closed and that reports through
//! its own [`Emitter`] (`close`, `error`, optionally `warn`/`info`). It knows
//! nothing about readiness or children. [`Component::wrap`] promotes it into a
//! full [`Component`] so it can sit in the tree like anything else.
//!
//! ## Wiring
//! ```text
//!   wrapper (ready, target = Foreign(name))
//!     │  close ───────────────► raw.close()
//!     │  close() ◄──────────── raw: close
//!     │  emit(warn|info) ◄──── raw: warn | info
//!     │  warn(subcomponent-error) + close() ◄── raw: error
//! ```
//!
//! [`Component::bind`] applies the adapter to every [`Subcomponent::Raw`]
//! child; it is never a silent fallback.

use std::sync::Arc;

use crate::events::{DiagnosticData, Emitter, Origin, Topic};

use super::component::Component;
use super::config::Config;
use super::inspect::Target;

/// Object that only supports close and error emission.
pub trait RawEmitter: Send + Sync + 'static {
    /// Name used for the wrapper and as the `origin` of reclassified errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Emitter on which the object publishes `close`, `error`, `warn`, `info`.
    fn events(&self) -> Arc<Emitter>;

    /// Releases the object. Expected to emit `close` on [`events`](Self::events).
    fn close(&self);
}

/// Anything that can be bound: a component, or a raw emitter to be wrapped.
pub enum Subcomponent {
    Component(Component),
    Raw(Arc<dyn RawEmitter>),
}

impl Subcomponent {
    /// Wraps a concrete raw emitter.
    pub fn raw<R: RawEmitter>(raw: Arc<R>) -> Self {
        Subcomponent::Raw(raw)
    }
}

impl From<Component> for Subcomponent {
    fn from(c: Component) -> Self {
        Subcomponent::Component(c)
    }
}

impl From<&Component> for Subcomponent {
    fn from(c: &Component) -> Self {
        Subcomponent::Component(c.clone())
    }
}

impl From<Arc<dyn RawEmitter>> for Subcomponent {
    fn from(raw: Arc<dyn RawEmitter>) -> Self {
        Subcomponent::Raw(raw)
    }
}

impl Component {
    /// Promotes `raw` into a ready component whose target is the raw object.
    pub fn wrap(raw: Arc<dyn RawEmitter>, cfg: Config) -> Component {
        let name: Arc<str> = raw.name().into();
        let wrapper = Component::builder(name.clone())
            .config(cfg)
            .ready()
            .target(Target::Foreign(name.clone()))
            .build();
        let events = raw.events();

        // wrapper close → raw close
        let down = Arc::clone(&raw);
        wrapper.on(Topic::Close, move |_| down.close());

        // raw close → wrapper close
        let weak = wrapper.downgrade();
        wrapper.inner.subs.subscribe(&events, Topic::Close, move |_| {
            if let Some(w) = weak.upgrade() {
                w.close();
            }
        });

        // raw warn / info → wrapper, verbatim
        for topic in [Topic::Warn, Topic::Info] {
            let weak = wrapper.downgrade();
            wrapper.inner.subs.subscribe(&events, topic, move |ev| {
                if let Some(w) = weak.upgrade() {
                    w.inner.events.emit(ev);
                }
            });
        }

        // raw error → subcomponent-error on the wrapper, then close it
        let weak = wrapper.downgrade();
        wrapper.inner.subs.subscribe(&events, Topic::Error, move |ev| {
            let Some(w) = weak.upgrade() else {
                return;
            };
            w.warn(DiagnosticData::subcomponent_error(
                Origin::Foreign(name.clone()),
                ev.error.clone(),
            ));
            w.close();
        });

        if wrapper.config().debug {
            tracing::debug!(wrapper = %wrapper.to_ref(), "wrapped raw emitter");
        }
        wrapper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ComponentError;
    use crate::events::Event;
    use crate::{DiagnosticType, Strength};
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Socket {
        events: Arc<Emitter>,
        closes: AtomicUsize,
    }

    impl Socket {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                events: Arc::new(Emitter::new()),
                closes: AtomicUsize::new(0),
            })
        }
    }

    impl RawEmitter for Socket {
        fn name(&self) -> &str {
            "socket"
        }

        fn events(&self) -> Arc<Emitter> {
            Arc::clone(&self.events)
        }

        fn close(&self) {
            if self.closes.fetch_add(1, Ordering::SeqCst) == 0 {
                self.events.emit(&Event::close());
            }
        }
    }

    #[test]
    fn test_wrapper_is_ready_with_foreign_target() {
        let sock = Socket::new();
        let w = Component::wrap(sock, Config::default());
        assert!(w.self_is_ready());
        assert_eq!(w.target(), Target::Foreign("socket".into()));
        assert_eq!(w.name().as_ref(), "socket");
    }

    #[test]
    fn test_bind_raw_wraps_explicitly() {
        let p = Component::new("p");
        let sock = Socket::new();
        let w = p.bind(Subcomponent::raw(Arc::clone(&sock)), Strength::Strong).unwrap();
        assert!(p.has_child(&w));
        p.close();
        assert_eq!(sock.closes.load(Ordering::SeqCst), 1);
        assert!(w.is_closed());
        assert_eq!(sock.events.listener_count(), 0);
    }

    #[test]
    fn test_raw_close_closes_wrapper() {
        let sock = Socket::new();
        let w = Component::wrap(Arc::clone(&sock) as Arc<dyn RawEmitter>, Config::default());
        sock.close();
        assert!(w.is_closed());
        assert_eq!(sock.closes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_raw_error_becomes_warning_and_closes() {
        let p = Component::new("p");
        let sock = Socket::new();
        let w = p.bind_weak(Subcomponent::raw(Arc::clone(&sock))).unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let s = Arc::clone(&seen);
        p.on(Topic::Warn, move |ev| {
            if let Some(d) = &ev.diagnostic {
                s.lock().push(d.clone());
            }
        });
        let mut ev = Event::new(Topic::Error);
        ev.error = Some(ComponentError::failed("reset by peer"));
        sock.events.emit(&ev);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, DiagnosticType::SubcomponentError);
        assert_eq!(seen[0].origin, Some(Origin::Foreign("socket".into())));
        assert!(w.is_closed());
        assert!(!p.is_closed());
    }

    #[test]
    fn test_raw_info_relayed() {
        let sock = Socket::new();
        let w = Component::wrap(Arc::clone(&sock) as Arc<dyn RawEmitter>, Config::default());
        let hits = Arc::new(AtomicUsize::new(0));
        let h = Arc::clone(&hits);
        w.on(Topic::Info, move |_| {
            h.fetch_add(1, Ordering::SeqCst);
        });
        sock.events.emit(&Event::new(Topic::Info));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
