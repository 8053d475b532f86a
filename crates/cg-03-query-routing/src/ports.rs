//! # Driven Ports (Outbound SPI)
//!
//! The invocation interface the transport layer provides. The router never
//! sees the wire; it sees contract names and payload bytes.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from one contract invocation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The channel does not expose the named contract.
    #[error("contract {0} not found on the channel")]
    ContractNotFound(String),

    /// The invocation ran past the deadline it was given.
    #[error("invocation deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// Any other invocation failure.
    #[error("invocation failed: {0}")]
    Failed(String),
}

/// Abstract interface for issuing read-only contract evaluations.
///
/// Implementations enforce the supplied deadline themselves; the router
/// chooses which category budget applies but does not race the call.
/// Implementations must be `Send + Sync` for concurrent fan-out.
#[async_trait]
pub trait ContractInvoker: Send + Sync {
    /// Evaluate `transaction` on `contract` over `channel` and return the
    /// raw payload bytes.
    async fn evaluate(
        &self,
        channel: &str,
        contract: &str,
        transaction: &str,
        args: &[String],
        deadline: Duration,
    ) -> Result<Vec<u8>, InvokeError>;
}
