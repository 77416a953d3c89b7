//! Component events: types, diagnostic payloads and the synchronous emitter.
//!
//! ## Contents
//! - [`Topic`], [`Event`] event classification and metadata
//! - [`Diagnostic`], [`DiagnosticData`] payloads of `warn` / `info`
//! - [`Emitter`] in-order, panic-isolated listener list
//!
//! ## Quick reference
//! - **Publishers**: every [`Component`](crate::Component) (close, error, warn, info,
//!   custom events) and every [`RawEmitter`](crate::RawEmitter).
//! - **Consumers**: binding relays installed by the parent, user listeners,
//!   [`Subscribe`](crate::Subscribe) implementations such as `LogWriter`.
//!
//! See `core/mod.rs` for the wiring diagram.

mod diagnostic;
mod emitter;
mod event;

pub use diagnostic::{
    ComponentId, ComponentRef, Diagnostic, DiagnosticData, DiagnosticType, Level, Origin,
};
pub use emitter::{Emitter, Handler, ListenerId};
pub(crate) use emitter::panic_message;
pub use event::{Event, Topic};
