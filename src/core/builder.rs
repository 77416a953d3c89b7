use std::sync::Arc;

use super::component::Component;
use super::config::Config;
use super::hook::CloseHookRef;
use super::inspect::Target;

/// Builder for constructing a [`Component`] with optional features.
pub struct ComponentBuilder {
    name: Arc<str>,
    cfg: Config,
    ready: bool,
    style: Vec<Arc<str>>,
    target: Target,
    hook: Option<CloseHookRef>,
}

impl ComponentBuilder {
    /// Creates a new builder; the component starts pending with the default config.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            cfg: Config::default(),
            ready: false,
            style: Vec::new(),
            target: Target::Component,
            hook: None,
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Builds the component already ready.
    pub fn ready(mut self) -> Self {
        self.ready = true;
        self
    }

    /// Sets presentation tags.
    pub fn style<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        self.style = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Installs an asynchronous close hook.
    ///
    /// The hook runs once, before the `close` event; see [`Component::close`].
    pub fn close_hook(mut self, hook: CloseHookRef) -> Self {
        self.hook = Some(hook);
        self
    }

    pub(crate) fn target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Builds and returns the component.
    pub fn build(self) -> Component {
        Component::from_parts(
            self.name,
            self.cfg,
            self.ready,
            self.style,
            self.target,
            self.hook,
        )
    }
}
