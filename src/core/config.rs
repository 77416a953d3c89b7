//! # Component configuration.
//!
//! Provides [`Config`], the settings threaded through component construction.
//!
//! Config is used in two ways:
//! 1. **Component creation**: `Component::builder(name).config(cfg)`
//! 2. **Wrapper adapter**: raw children promoted by `bind` inherit the parent's
//!    config when [`Config::inherit_config`] is set.
//!
//! There is no global state: two trees built with different configs never
//! influence each other.

/// Per-component settings.
///
/// ## Field semantics
/// - `debug`: log lifecycle transitions (bind, unbind, ready, failed, close) at `debug` level
/// - `inherit_config`: wrappers created by `bind` copy the parent's config instead of the default
#[derive(Clone, Debug)]
pub struct Config {
    /// Emit `tracing::debug!` lines for lifecycle transitions.
    pub debug: bool,

    /// Wrappers created implicitly by [`Component::bind`](crate::Component::bind)
    /// take the parent's config.
    pub inherit_config: bool,
}

impl Config {
    /// Config with lifecycle logging on.
    #[inline]
    pub fn debug() -> Self {
        Self {
            debug: true,
            ..Self::default()
        }
    }

    /// Config a wrapper should use when created under a parent with `self`.
    #[inline]
    pub fn for_wrapper(&self) -> Self {
        if self.inherit_config {
            self.clone()
        } else {
            Self::default()
        }
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `debug = false`
    /// - `inherit_config = true`
    fn default() -> Self {
        Self {
            debug: false,
            inherit_config: true,
        }
    }
}
