//! Read-only view of a component tree, for renderers and debugging.
//!
//! [`Component::inspect`](crate::Component::inspect) walks the subtree once and
//! returns owned [`Snapshot`]s; nothing in here can mutate a component.

use std::sync::Arc;

use crate::events::{ComponentId, ComponentRef};

/// What a component instance represents.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Target {
    /// The component itself.
    #[default]
    Component,
    /// A raw object promoted by the wrapper adapter.
    Foreign(Arc<str>),
}

/// One node of an inspected tree.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub id: ComponentId,
    pub name: Arc<str>,
    pub parent: Option<ComponentRef>,
    pub target: Target,
    pub style: Vec<Arc<str>>,
    /// `self_is_ready()` at inspection time.
    pub ready: bool,
    pub closed: bool,
    pub children: Vec<Snapshot>,
}

impl Snapshot {
    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Snapshot::node_count).sum::<usize>()
    }

    /// Depth-first search by name.
    pub fn find(&self, name: &str) -> Option<&Snapshot> {
        if self.name.as_ref() == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Names of nodes in this subtree that are not ready yet.
    pub fn pending(&self) -> Vec<Arc<str>> {
        let mut out = Vec::new();
        self.collect_pending(&mut out);
        out
    }

    fn collect_pending(&self, out: &mut Vec<Arc<str>>) {
        if !self.ready {
            out.push(self.name.clone());
        }
        for c in &self.children {
            c.collect_pending(out);
        }
    }
}
