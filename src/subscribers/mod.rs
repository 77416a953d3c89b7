//! # Subscriptions and subscribers.
//!
//! This module provides the bookkeeping a component uses to never leak
//! handlers, and the [`Subscribe`] trait for tree-wide observers.
//!
//! ## Architecture
//! ```text
//! Component
//!   ├── events: Arc<Emitter>     listeners *on* this component (relays, user, subscribers)
//!   └── subs:   Subscriptions    listeners this component put *on others*
//!
//! close():
//!   events.remove_all_listeners() + events.seal()
//!   subs.unsubscribe_all()
//! ```
//!
//! ## Subscriber types
//! - **Passive subscribers** - observe and react to events (logging, alerts)
//! - Built-in: [`LogWriter`] writes diagnostics to `tracing`

mod log;
mod registry;
mod subscribe;

pub use log::LogWriter;
pub use registry::{SubscriptionId, Subscriptions};
pub use subscribe::Subscribe;
