//! # Close hooks.
//!
//! A [`CloseHook`] runs once, at the start of a component's teardown, before the
//! `close` event is emitted. It is the place to flush buffers or drop sockets.
//! An error from the hook becomes an `error` on the component (and therefore a
//! `subcomponent-error` warning at its parent); it never reaches the caller of
//! `close()`.
//!
//! [`CloseFn`] wraps a closure returning a future, for the common case.
//!
//! ## Example
//! ```rust
//! use treevisor::{CloseFn, Component, ComponentError};
//!
//! let db = Component::builder("db")
//!     .close_hook(CloseFn::arc(|| async {
//!         // flush, disconnect ...
//!         Ok::<_, ComponentError>(())
//!     }))
//!     .build();
//! assert_eq!(db.name().as_ref(), "db");
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ComponentError;

/// Asynchronous teardown step run by [`Component::close`](crate::Component::close).
#[async_trait]
pub trait CloseHook: Send + Sync + 'static {
    /// Releases resources owned by the component.
    async fn on_close(&self) -> Result<(), ComponentError>;
}

/// Shared handle to a close hook.
pub type CloseHookRef = Arc<dyn CloseHook>;

/// Function-backed close hook.
///
/// Wraps a closure that *creates* the teardown future when the component closes.
#[derive(Debug)]
pub struct CloseFn<F> {
    f: F,
}

impl<F> CloseFn<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the hook and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> CloseHook for CloseFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ComponentError>> + Send + 'static,
{
    async fn on_close(&self) -> Result<(), ComponentError> {
        (self.f)().await
    }
}
