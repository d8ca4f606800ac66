//! Error types for the reconciliation engine.
//!
//! Every failure aborts the current operation and propagates to the caller.
//! Nothing in the engine retries.

use thiserror::Error;

use crate::dom::ElementId;
use crate::types::RenderId;

/// Errors raised while loading peers, rendering, or processing updates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// No peer factory is registered for a component type tag.
    #[error("peer not found for component type `{component_type}`")]
    PeerNotFound {
        /// The type tag that had no factory.
        component_type: String,
    },

    /// A peer does not implement a lifecycle operation it was asked to run.
    #[error("operation `{operation}` not supported (component: {component})")]
    UnsupportedOperation {
        /// Name of the lifecycle operation.
        operation: &'static str,
        /// The component whose peer was invoked.
        component: RenderId,
    },

    /// A component is not part of a registered, peer-linked hierarchy.
    #[error("invalid hierarchy at {component}: {reason}")]
    InvalidHierarchy {
        /// The offending component.
        component: RenderId,
        /// What was expected of it.
        reason: &'static str,
    },

    /// A second peer was loaded onto a component under the `Fail` policy.
    #[error("peer already installed: {0}")]
    PeerAlreadyInstalled(RenderId),

    /// A peer was needed while one of its own operations was running.
    #[error("peer for {0} is already executing an operation")]
    PeerInUse(RenderId),

    /// A document lookup that must succeed found no element.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// An element was to be inserted beneath itself or its own descendant.
    #[error("{child} cannot be inserted beneath itself (parent: {parent})")]
    ElementCycle {
        /// The intended parent, inside `child`'s subtree.
        parent: ElementId,
        /// The element being inserted.
        child: ElementId,
    },
}

impl ReconcileError {
    /// Shorthand for the default body of an unimplemented peer operation.
    pub fn unsupported(operation: &'static str, component: RenderId) -> Self {
        Self::UnsupportedOperation {
            operation,
            component,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_identify_the_component() {
        let err = ReconcileError::unsupported("render_add", RenderId::new(7));
        assert_eq!(err.to_string(), "operation `render_add` not supported (component: c_7)");

        let err = ReconcileError::PeerNotFound {
            component_type: "Button".to_string(),
        };
        assert_eq!(err.to_string(), "peer not found for component type `Button`");
    }
}
