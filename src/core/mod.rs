//! Tree core: components, bindings and lifecycle.
//!
//! Internal modules:
//! - [`component`]: the node type, its public contract and teardown;
//! - [`binding`]: the four relays wired for each parent → child edge;
//! - [`readiness`]: single-settle ready/failed cell;
//! - [`wrapper`]: promotes raw emitters into components;
//! - [`hook`]: asynchronous close hooks;
//! - [`builder`], [`config`]: construction;
//! - [`inspect`]: read-only snapshots for renderers.
//!
//! ## Wiring
//! ```text
//!                         ┌──────────────── root ────────────────┐
//!                         │ events ◄── LogWriter / user listeners│
//!                         └──▲──────────────┬──────────────▲─────┘
//!           warn/info/err→warn│        close │ (always)     │ close (strong only)
//!                         ┌──┴──────────────▼──────────────┴─────┐
//!                         │               child                  │
//!                         └──▲──────────────┬──────────────▲─────┘
//!                            │              ▼              │
//!                                       grandchild ...
//! ```

mod binding;
mod builder;
mod component;
mod config;
mod hook;
mod inspect;
mod readiness;
mod wrapper;

pub use binding::Strength;
pub use builder::ComponentBuilder;
pub use component::{Component, WeakComponent};
pub use config::Config;
pub use hook::{CloseFn, CloseHook, CloseHookRef};
pub use inspect::{Snapshot, Target};
pub use readiness::ReadyState;
pub use wrapper::{RawEmitter, Subcomponent};
