//! Error kinds shared across the bridge core.

use thiserror::Error;

/// Failures the creation workflow can surface.
///
/// `Remote` covers every failed external call, transport-level or a
/// non-success status; the client does not interpret status codes beyond
/// pass-through failure. `Precondition` is a programmer/UI-invariant
/// violation (an action invoked without its required prior selection) and
/// is never caught by the workflow.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// A remote call failed. `operation` names the logical API operation.
    #[error("remote call `{operation}` failed: {detail}")]
    Remote {
        operation: &'static str,
        detail: String,
    },

    /// A required prior selection was missing when an action was invoked.
    #[error("precondition violated: {0}")]
    Precondition(String),
}

impl BridgeError {
    pub fn remote(operation: &'static str, detail: impl ToString) -> Self {
        BridgeError::Remote {
            operation,
            detail: detail.to_string(),
        }
    }
}
