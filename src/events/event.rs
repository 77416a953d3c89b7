//! # Events emitted by components.
//!
//! The [`Topic`] enum classifies what an event is about:
//! - **Lifecycle**: `Close`
//! - **Faults**: `Error` (never crosses a component boundary as-is)
//! - **Diagnostics**: `Warn`, `Info` (relayed upward verbatim)
//! - **Custom**: any named event, relayed only when linked with
//!   [`Component::link_event`](crate::Component::link_event)
//!
//! The [`Event`] struct carries the optional metadata: originating component,
//! diagnostic payload, error, free-form data.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use treevisor::{Event, Topic};
//!
//! let ev = Event::new(Topic::custom("flushed")).with_data("42 rows");
//!
//! assert_eq!(ev.topic, Topic::custom("flushed"));
//! assert_eq!(ev.data.as_deref(), Some("42 rows"));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use super::diagnostic::{ComponentRef, Diagnostic};
use crate::error::ComponentError;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// What an event is about. Listeners register per topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The component finished (or started) closing.
    ///
    /// Sets:
    /// - `source`: the closing component (absent for raw emitters)
    Close,

    /// Runtime fault on the emitting object.
    ///
    /// Sets:
    /// - `source`: the failing component (absent for raw emitters)
    /// - `error`: the fault
    Error,

    /// Warning diagnostic.
    ///
    /// Sets:
    /// - `diagnostic`: payload, shared verbatim across relays
    Warn,

    /// Informational diagnostic.
    ///
    /// Sets:
    /// - `diagnostic`: payload, shared verbatim across relays
    Info,

    /// User-defined event name.
    Custom(Arc<str>),
}

impl Topic {
    /// Creates a custom topic. Built-in names map to their variants.
    pub fn custom(name: impl AsRef<str>) -> Self {
        Topic::from(name.as_ref())
    }

    /// Returns the event name as used in logs.
    pub fn as_str(&self) -> &str {
        match self {
            Topic::Close => "close",
            Topic::Error => "error",
            Topic::Warn => "warn",
            Topic::Info => "info",
            Topic::Custom(name) => name,
        }
    }
}

impl From<&str> for Topic {
    fn from(name: &str) -> Self {
        match name {
            "close" => Topic::Close,
            "error" => Topic::Error,
            "warn" => Topic::Warn,
            "info" => Topic::Info,
            other => Topic::Custom(other.into()),
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`Topic`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub topic: Topic,
    /// Component that emitted the event, if any.
    pub source: Option<ComponentRef>,
    /// Diagnostic payload (warn/info).
    pub diagnostic: Option<Arc<Diagnostic>>,
    /// Fault (error).
    pub error: Option<ComponentError>,
    /// Free-form data for custom events.
    pub data: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event on the given topic with current timestamp and next sequence number.
    pub fn new(topic: Topic) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            topic,
            source: None,
            diagnostic: None,
            error: None,
            data: None,
        }
    }

    /// Creates a close event.
    #[inline]
    pub fn close() -> Self {
        Event::new(Topic::Close)
    }

    /// Creates an error event carrying `err`.
    #[inline]
    pub fn error(err: ComponentError) -> Self {
        let mut ev = Event::new(Topic::Error);
        ev.error = Some(err);
        ev
    }

    /// Creates a diagnostic event; the topic follows the diagnostic's level.
    #[inline]
    pub fn diagnostic(diag: Arc<Diagnostic>) -> Self {
        let topic = if diag.is_info() {
            Topic::Info
        } else {
            Topic::Warn
        };
        let mut ev = Event::new(topic);
        ev.source = diag.source.clone();
        ev.diagnostic = Some(diag);
        ev
    }

    /// Attaches the emitting component.
    #[inline]
    pub fn with_source(mut self, source: ComponentRef) -> Self {
        self.source = Some(source);
        self
    }

    /// Attaches free-form data.
    #[inline]
    pub fn with_data(mut self, data: impl Into<Arc<str>>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[inline]
    pub fn is_close(&self) -> bool {
        matches!(self.topic, Topic::Close)
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self.topic, Topic::Error)
    }
}
