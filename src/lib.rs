//! # treevisor
//!
//! **Treevisor** composes stateful objects into a parent/child tree where
//! readiness, failure, closing and diagnostics propagate by fixed rules.
//!
//! It is meant for programs that assemble many cooperating subsystems
//! (connections, workers, services) and want deterministic teardown and
//! failure containment without manual bookkeeping.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                      ┌──────────────────────────────┐
//!                      │        root: Component       │◄── LogWriter (Subscribe)
//!                      │  events: Emitter             │
//!                      │  subs:   Subscriptions       │
//!                      │  readiness, closed flag      │
//!                      └───────┬──────────────┬───────┘
//!                  strong edge │              │ weak edge
//!                      ┌───────▼──────┐ ┌─────▼────────┐
//!                      │  Component   │ │  Component   │
//!                      │   (api)      │ │  (metrics)   │
//!                      └───────┬──────┘ └──────────────┘
//!                  strong edge │
//!                      ┌───────▼──────┐
//!                      │  wrapper     │ ◄── Component::wrap(RawEmitter)
//!                      │  (socket)    │
//!                      └──────────────┘
//! ```
//!
//! ### Propagation rules
//! ```text
//! close     parent ──► child          always
//!           child  ──► parent         strong edges only
//! warn/info child  ──► parent         verbatim, both strengths
//! error     child  ──► parent.warn    { type: subcomponent-error, origin: child, error }
//! readiness root.wait_for_ready()     self + every descendant ready, first failure rejects
//! ```
//!
//! ## Features
//! | Area              | Description                                                     | Key types / traits                          |
//! |-------------------|-----------------------------------------------------------------|---------------------------------------------|
//! | **Tree**          | Bind/unbind components with strong or weak edges.               | [`Component`], [`Strength`]                 |
//! | **Readiness**     | Await a whole subtree; failures reject and close.               | [`ReadyState`], [`Component::wait_for_ready`] |
//! | **Teardown**      | Idempotent close, optional async hook, leak-free listeners.     | [`CloseHook`], [`CloseFn`]                  |
//! | **Diagnostics**   | Warn/info relayed upward; errors downgraded to warnings.        | [`Diagnostic`], [`DiagnosticData`]          |
//! | **Adapters**      | Raw close/error emitters promoted into components.              | [`RawEmitter`], [`Subcomponent`]            |
//! | **Observers**     | Tree-wide subscribers.                                          | [`Subscribe`], [`LogWriter`]                |
//! | **Errors**        | Contract violations vs runtime faults.                          | [`ContractError`], [`ComponentError`]       |
//! | **Configuration** | Per-tree settings, no global state.                             | [`Config`]                                  |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use treevisor::{Component, ComponentError, LogWriter, Strength};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let root = Component::builder("app").ready().build();
//!     root.subscribe(Arc::new(LogWriter::new()));
//!
//!     let db = root.bind(Component::new("db"), Strength::Strong)?;
//!     let cache = root.bind_weak(Component::new("cache"))?;
//!
//!     db.ready();
//!     cache.ready();
//!     root.wait_for_ready().await?;
//!
//!     // A cache fault shows up at the root as a warning; the app stays up.
//!     cache.error(ComponentError::failed("evicted"));
//!     assert!(!root.is_closed());
//!
//!     root.close();
//!     assert!(db.is_closed());
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod events;
mod subscribers;

// ---- Public re-exports ----

pub use crate::core::{
    CloseFn, CloseHook, CloseHookRef, Component, ComponentBuilder, Config, RawEmitter,
    ReadyState, Snapshot, Strength, Subcomponent, Target, WeakComponent,
};
pub use error::{ComponentError, ContractError};
pub use events::{
    ComponentId, ComponentRef, Diagnostic, DiagnosticData, DiagnosticType, Emitter, Event,
    Handler, Level, ListenerId, Origin, Topic,
};
pub use subscribers::{LogWriter, Subscribe, SubscriptionId, Subscriptions};
