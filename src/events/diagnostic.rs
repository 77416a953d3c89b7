//! # Diagnostic payloads for `warn` / `info` events.
//!
//! A [`Diagnostic`] is what [`Component::warn`](crate::Component::warn) and
//! [`Component::info`](crate::Component::info) emit: `{type, source, ...data}`.
//! Callers describe the payload with [`DiagnosticData`]; a bare string becomes
//! `{message: data}`.
//!
//! ```text
//! leaf.error(e)
//!   └─► parent: warn { type: subcomponent-error, source: parent, origin: leaf, error: e }
//!         └─► grandparent: same Arc<Diagnostic>, relayed verbatim
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::error::ComponentError;

static COMPONENT_SEQ: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    pub(crate) fn next() -> Self {
        ComponentId(COMPONENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity plus display name of a component, captured when an event is built.
///
/// Events never hold a component alive; they carry this snapshot instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRef {
    pub id: ComponentId,
    pub name: Arc<str>,
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.id)
    }
}

/// Where a reclassified fault came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// A bound component.
    Component(ComponentRef),
    /// A raw object promoted by the wrapper adapter.
    Foreign(Arc<str>),
}

impl Origin {
    /// Id of the originating component, if it is one.
    pub fn id(&self) -> Option<ComponentId> {
        match self {
            Origin::Component(r) => Some(r.id),
            Origin::Foreign(_) => None,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Origin::Component(r) => &r.name,
            Origin::Foreign(name) => name,
        }
    }
}

/// The `type` tag of a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticType {
    Warn,
    Info,
    /// A child's `error` downgraded at its parent.
    SubcomponentError,
    Other(Arc<str>),
}

impl DiagnosticType {
    pub fn as_str(&self) -> &str {
        match self {
            DiagnosticType::Warn => "warn",
            DiagnosticType::Info => "info",
            DiagnosticType::SubcomponentError => "subcomponent-error",
            DiagnosticType::Other(s) => s,
        }
    }
}

impl fmt::Display for DiagnosticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a diagnostic travels on the `warn` or the `info` topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Info,
}

/// Payload of a `warn` / `info` event.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Topic the diagnostic was emitted on.
    pub level: Level,
    /// `type` tag; defaults to the level's name.
    pub kind: DiagnosticType,
    /// Component that emitted it (absent when a raw emitter produced it).
    pub source: Option<ComponentRef>,
    /// Human-readable message.
    pub message: Option<Arc<str>>,
    /// Origin of a reclassified fault.
    pub origin: Option<Origin>,
    /// The reclassified fault itself.
    pub error: Option<ComponentError>,
    /// Extra key/value pairs.
    pub fields: Vec<(Arc<str>, Arc<str>)>,
}

impl Diagnostic {
    /// Builds the payload for `level` from caller data.
    pub(crate) fn build(level: Level, source: Option<ComponentRef>, data: DiagnosticData) -> Self {
        let kind = data.kind.unwrap_or(match level {
            Level::Warn => DiagnosticType::Warn,
            Level::Info => DiagnosticType::Info,
        });
        Self {
            level,
            kind,
            source,
            message: data.message,
            origin: data.origin,
            error: data.error,
            fields: data.fields,
        }
    }

    #[inline]
    pub fn is_info(&self) -> bool {
        self.level == Level::Info
    }

    #[inline]
    pub fn is_subcomponent_error(&self) -> bool {
        self.kind == DiagnosticType::SubcomponentError
    }

    /// Looks up an extra field by key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

/// Caller-side description of a diagnostic.
///
/// ```rust
/// use treevisor::{DiagnosticData, DiagnosticType};
///
/// let plain: DiagnosticData = "disk almost full".into();
/// assert_eq!(plain.message.as_deref(), Some("disk almost full"));
///
/// let rich = DiagnosticData::new()
///     .with_type(DiagnosticType::Other("slow-query".into()))
///     .with_field("ms", "812");
/// assert!(rich.message.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DiagnosticData {
    pub kind: Option<DiagnosticType>,
    pub message: Option<Arc<str>>,
    pub origin: Option<Origin>,
    pub error: Option<ComponentError>,
    pub fields: Vec<(Arc<str>, Arc<str>)>,
}

impl DiagnosticData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload used by the error reclassification relay.
    pub fn subcomponent_error(origin: Origin, error: Option<ComponentError>) -> Self {
        Self {
            kind: Some(DiagnosticType::SubcomponentError),
            origin: Some(origin),
            error,
            ..Self::default()
        }
    }

    pub fn with_type(mut self, kind: DiagnosticType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_message(mut self, message: impl Into<Arc<str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<Arc<str>>, value: impl Into<Arc<str>>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    pub fn with_error(mut self, error: ComponentError) -> Self {
        self.error = Some(error);
        self
    }
}

impl From<&str> for DiagnosticData {
    fn from(message: &str) -> Self {
        DiagnosticData::new().with_message(message)
    }
}

impl From<String> for DiagnosticData {
    fn from(message: String) -> Self {
        DiagnosticData::new().with_message(message)
    }
}
