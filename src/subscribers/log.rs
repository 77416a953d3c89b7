//! # LogWriter: diagnostic logger
//!
//! A minimal subscriber that writes incoming [`Event`]s to `tracing`.
//! Attach it to the root to get one log line per fault anywhere in the tree.
//!
//! ## Example output
//! ```text
//! WARN  subcomponent-error source="api#1" origin="db#4" error="component failed: refused"
//! INFO  info source="api#1" message="listening on :8080"
//! DEBUG closed source="api#1"
//! ```

use crate::events::{Event, Topic};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Subscribe for LogWriter {
    fn on_event(&self, e: &Event) {
        let source = e.source.as_ref().map(ToString::to_string);
        match &e.topic {
            Topic::Close => {
                tracing::debug!(source = ?source, "closed");
            }
            Topic::Error => {
                tracing::error!(
                    source = ?source,
                    error = ?e.error.as_ref().map(ToString::to_string),
                    "error"
                );
            }
            Topic::Warn | Topic::Info => {
                let Some(d) = e.diagnostic.as_deref() else {
                    return;
                };
                let origin = d.origin.as_ref().map(|o| o.name().to_string());
                let error = d.error.as_ref().map(ToString::to_string);
                if d.is_info() {
                    tracing::info!(
                        source = ?source,
                        message = ?d.message.as_deref(),
                        "{}",
                        d.kind
                    );
                } else {
                    tracing::warn!(
                        source = ?source,
                        origin = ?origin,
                        error = ?error,
                        message = ?d.message.as_deref(),
                        "{}",
                        d.kind
                    );
                }
            }
            Topic::Custom(name) => {
                tracing::trace!(source = ?source, data = ?e.data.as_deref(), "{name}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
