//! Close cascade and diagnostic relay across a whole tree.

use std::sync::Arc;

use parking_lot::Mutex;
use treevisor::{
    Component, ComponentError, Diagnostic, DiagnosticType, Event, Origin, Strength, Topic,
};

/// Records every diagnostic seen on `c`'s `topic`.
fn record(c: &Component, topic: Topic) -> Arc<Mutex<Vec<Arc<Diagnostic>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = Arc::clone(&seen);
    c.on(topic, move |ev: &Event| {
        if let Some(d) = &ev.diagnostic {
            s.lock().push(Arc::clone(d));
        }
    });
    seen
}

fn record_errors(c: &Component) -> Arc<Mutex<usize>> {
    let n = Arc::new(Mutex::new(0));
    let h = Arc::clone(&n);
    c.on(Topic::Error, move |_| *h.lock() += 1);
    n
}

#[test]
fn strong_child_closes_parent_and_siblings() {
    let p = Component::new("p");
    let s = p.bind(Component::new("s"), Strength::Strong).unwrap();
    let w = p.bind(Component::new("w"), Strength::Weak).unwrap();

    s.close();

    assert!(p.is_closed());
    assert!(w.is_closed());
    assert_eq!(p.child_count(), 0);
}

#[test]
fn weak_child_close_leaves_parent_open() {
    let p = Component::new("p");
    let s = p.bind(Component::new("s"), Strength::Strong).unwrap();
    let w = p.bind(Component::new("w"), Strength::Weak).unwrap();

    w.close();

    assert!(!p.is_closed());
    assert!(!s.is_closed());
    assert!(p.has_child(&s));
    assert!(!p.has_child(&w));
}

#[test]
fn parent_close_reaches_every_child() {
    let p = Component::new("p");
    let s = p.bind(Component::new("s"), Strength::Strong).unwrap();
    let w = p.bind(Component::new("w"), Strength::Weak).unwrap();
    let grandchild = w.bind(Component::new("g"), Strength::Weak).unwrap();

    p.close();

    assert!(s.is_closed());
    assert!(w.is_closed());
    assert!(grandchild.is_closed());
    assert!(p.children().is_empty());
}

#[test]
fn close_emits_once_and_detaches_once() {
    let p = Component::new("p");
    let c = p.bind(Component::new("c"), Strength::Weak).unwrap();
    let closes = Arc::new(Mutex::new(0));
    let h = Arc::clone(&closes);
    c.on(Topic::Close, move |_| *h.lock() += 1);

    for _ in 0..5 {
        c.close();
    }

    assert_eq!(*closes.lock(), 1);
    assert_eq!(p.child_count(), 0);
    assert!(!c.is_bound());
}

#[test]
fn leaf_error_surfaces_as_warning_at_every_ancestor() {
    let root = Component::new("root");
    let mid = root.bind(Component::new("mid"), Strength::Weak).unwrap();
    let leaf = mid.bind(Component::new("leaf"), Strength::Weak).unwrap();

    let at_mid = record(&mid, Topic::Warn);
    let at_root = record(&root, Topic::Warn);
    let raw_mid = record_errors(&mid);
    let raw_root = record_errors(&root);

    leaf.error(ComponentError::failed("disk gone"));

    for seen in [&at_mid, &at_root] {
        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].kind, DiagnosticType::SubcomponentError);
        assert_eq!(seen[0].origin.as_ref().and_then(Origin::id), Some(leaf.id()));
        assert_eq!(
            seen[0].error.as_ref().map(ToString::to_string).as_deref(),
            Some("component failed: disk gone")
        );
    }
    assert_eq!(*raw_mid.lock(), 0);
    assert_eq!(*raw_root.lock(), 0);
    assert!(leaf.is_closed());
    assert!(!mid.is_closed());
}

#[test]
fn warn_and_info_pass_through_verbatim() {
    let root = Component::new("root");
    let mid = root.bind(Component::new("mid"), Strength::Strong).unwrap();
    let leaf = mid.bind(Component::new("leaf"), Strength::Weak).unwrap();

    let warns = record(&root, Topic::Warn);
    let infos = record(&root, Topic::Info);

    leaf.warn("queue 90% full");
    leaf.info("connected");

    let warns = warns.lock();
    let infos = infos.lock();
    assert_eq!(warns.len(), 1);
    assert_eq!(infos.len(), 1);
    assert_eq!(warns[0].source.as_ref().map(|r| r.id), Some(leaf.id()));
    assert_eq!(warns[0].message.as_deref(), Some("queue 90% full"));
    assert_eq!(infos[0].kind, DiagnosticType::Info);
}

#[test]
fn diagnostics_never_flow_down_or_sideways() {
    let root = Component::new("root");
    let a = root.bind(Component::new("a"), Strength::Weak).unwrap();
    let b = root.bind(Component::new("b"), Strength::Weak).unwrap();

    let at_a = record(&a, Topic::Warn);
    let at_b = record(&b, Topic::Warn);

    root.warn("from the top");
    a.warn("from a");

    assert_eq!(at_a.lock().len(), 1);
    assert!(at_b.lock().is_empty());
}

#[test]
fn closed_tree_hears_nothing_from_former_children() {
    let root = Component::new("root");
    let a = root.bind(Component::new("a"), Strength::Weak).unwrap();
    let warns = record(&root, Topic::Warn);

    root.close();
    a.warn("too late");
    a.info("too late");

    assert!(root.children().is_empty());
    assert_eq!(a.listener_count(), 0);
    assert!(warns.lock().is_empty());
}

#[test]
fn unbound_child_no_longer_relays() {
    let root = Component::new("root");
    let b = root.bind(Component::new("b"), Strength::Weak).unwrap();
    let warns = record(&root, Topic::Warn);

    root.unbind(&b).unwrap();
    b.warn("after unbind");
    b.error(ComponentError::failed("after unbind"));

    assert!(warns.lock().is_empty());
    assert!(!root.is_closed());
}

#[test]
fn unbind_then_rebind_elsewhere() {
    let a = Component::new("a");
    let b = Component::new("b");
    let c = a.bind(Component::new("c"), Strength::Strong).unwrap();

    a.unbind(&c).unwrap();
    b.bind(c.clone(), Strength::Strong).unwrap();
    c.close();

    assert!(b.is_closed());
    assert!(!a.is_closed());
}

#[test]
fn panicking_cascade_handler_does_not_stop_teardown() {
    let p = Component::new("p");
    let a = p.bind(Component::new("a"), Strength::Weak).unwrap();
    let b = p.bind(Component::new("b"), Strength::Weak).unwrap();
    p.on(Topic::Close, |_| panic!("observer crashed"));

    p.close();

    assert!(a.is_closed());
    assert!(b.is_closed());
    assert_eq!(p.listener_count(), 0);
}
