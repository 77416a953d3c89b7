//! Error types used by the component tree.
//!
//! This module defines two main error enums:
//!
//! - [`ContractError`]: programmer errors at the call site (double bind, unbind of a stranger, ...).
//! - [`ComponentError`]: runtime faults that fail a component and travel upward as warnings.
//!
//! Both types provide helper methods (`as_label`, `as_message`) for logging.

use std::sync::Arc;
use thiserror::Error;

/// # Contract violations.
///
/// Returned synchronously by [`Component::bind`](crate::Component::bind) and
/// [`Component::unbind`](crate::Component::unbind). They describe misuse of the
/// API, never a runtime state, and are not retried or turned into events.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The child already has a parent.
    #[error("component {child:?} is already bound to {parent:?}")]
    AlreadyBound {
        /// Name of the component being bound.
        child: Arc<str>,
        /// Name of its current parent.
        parent: Arc<str>,
    },

    /// The component is not a direct child of the caller.
    #[error("component {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Name of the would-be parent.
        parent: Arc<str>,
        /// Name of the component passed to `unbind`.
        child: Arc<str>,
    },

    /// A component was bound to itself.
    #[error("component {name:?} cannot be bound to itself")]
    SelfBinding {
        /// Name of the component.
        name: Arc<str>,
    },

    /// The child is an ancestor of the parent.
    #[error("binding {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Name of the would-be parent.
        parent: Arc<str>,
        /// Name of the ancestor passed as child.
        child: Arc<str>,
    },

    /// One side of the edge is already closed.
    #[error("component {name:?} is closed")]
    Closed {
        /// Name of the closed component.
        name: Arc<str>,
    },
}

impl ContractError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use treevisor::ContractError;
    ///
    /// let err = ContractError::SelfBinding { name: "db".into() };
    /// assert_eq!(err.as_label(), "contract_self_binding");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ContractError::AlreadyBound { .. } => "contract_already_bound",
            ContractError::NotAChild { .. } => "contract_not_a_child",
            ContractError::SelfBinding { .. } => "contract_self_binding",
            ContractError::Cycle { .. } => "contract_cycle",
            ContractError::Closed { .. } => "contract_closed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ContractError::AlreadyBound { child, parent } => {
                format!("already bound: child={child} parent={parent}")
            }
            ContractError::NotAChild { parent, child } => {
                format!("not a child: child={child} parent={parent}")
            }
            ContractError::SelfBinding { name } => format!("self binding: {name}"),
            ContractError::Cycle { parent, child } => {
                format!("cycle: child={child} is an ancestor of parent={parent}")
            }
            ContractError::Closed { name } => format!("closed: {name}"),
        }
    }
}

/// # Runtime faults of a component.
///
/// A fault rejects the component's readiness and closes it. At the parent it is
/// never re-raised; it shows up as a `subcomponent-error` warning instead.
///
/// The type is `Clone` so that a single fault can settle every pending
/// [`wait_for_ready`](crate::Component::wait_for_ready) call.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum ComponentError {
    /// Generic failure reported by the component's owner.
    #[error("component failed: {reason}")]
    Failed {
        /// The underlying error message.
        reason: Arc<str>,
    },

    /// The component closed while still pending.
    #[error("component {component:?} closed before it became ready")]
    ClosedBeforeReady {
        /// Name of the component at close time.
        component: Arc<str>,
    },

    /// The asynchronous close hook returned an error.
    #[error("close hook of {component:?} failed: {reason}")]
    CloseHook {
        /// Name of the component whose hook failed.
        component: Arc<str>,
        /// The hook's error message.
        reason: Arc<str>,
    },

    /// Foreign error carried as-is.
    #[error("{0}")]
    Source(Arc<dyn std::error::Error + Send + Sync>),
}

impl ComponentError {
    /// Builds a [`ComponentError::Failed`] from any message.
    pub fn failed(reason: impl Into<Arc<str>>) -> Self {
        ComponentError::Failed {
            reason: reason.into(),
        }
    }

    /// Wraps any foreign error.
    pub fn from_error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ComponentError::Source(Arc::new(err))
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use treevisor::ComponentError;
    ///
    /// let err = ComponentError::failed("socket reset");
    /// assert_eq!(err.as_label(), "component_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ComponentError::Failed { .. } => "component_failed",
            ComponentError::ClosedBeforeReady { .. } => "component_closed_before_ready",
            ComponentError::CloseHook { .. } => "component_close_hook",
            ComponentError::Source(_) => "component_source",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ComponentError::Failed { reason } => format!("error: {reason}"),
            ComponentError::ClosedBeforeReady { component } => {
                format!("closed before ready: {component}")
            }
            ComponentError::CloseHook { component, reason } => {
                format!("close hook: component={component} error={reason}")
            }
            ComponentError::Source(err) => format!("source: {err}"),
        }
    }

    /// True when the fault came from closing a component that never became ready.
    pub fn is_closed_before_ready(&self) -> bool {
        matches!(self, ComponentError::ClosedBeforeReady { .. })
    }
}
