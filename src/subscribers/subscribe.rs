//! # Core subscriber trait
//!
//! `Subscribe` is the extension point for plugging observers into a component
//! tree. A subscriber is attached to one component (usually the root) with
//! [`Component::subscribe`](crate::Component::subscribe) and sees every event of
//! the topics it declares. Because diagnostics are relayed upward, a subscriber
//! on the root sees every warning and info of the whole tree.
//!
//! ## Contract
//! - `on_event` runs synchronously inside `emit`; keep it short.
//! - A panic inside `on_event` is caught and logged by the emitter.
//! - Listeners are dropped when the component closes.
//!
//! ## Example (skeleton)
//! ```rust
//! use treevisor::{Event, Subscribe, Topic};
//!
//! struct Audit;
//!
//! impl Subscribe for Audit {
//!     fn on_event(&self, ev: &Event) {
//!         let _ = ev; // write audit record...
//!     }
//!     fn name(&self) -> &'static str { "audit" }
//!     fn topics(&self) -> Vec<Topic> { vec![Topic::Warn] }
//! }
//! ```

use crate::events::{Event, Topic};

/// Contract for event subscribers.
pub trait Subscribe: Send + Sync + 'static {
    /// Handle a single event for this subscriber.
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Topics this subscriber listens to. Defaults to the four built-in ones.
    fn topics(&self) -> Vec<Topic> {
        vec![Topic::Close, Topic::Error, Topic::Warn, Topic::Info]
    }
}
