//! Gateway invoker adapter.
//!
//! Implements [`ContractInvoker`] over a session's [`GatewayClient`] and
//! translates transport-level failures into the invocation taxonomy.

use std::time::Duration;

use async_trait::async_trait;
use cg_02_gateway_session::{CallError, GatewayClient, Session};
use tonic::Code;

use crate::ports::{ContractInvoker, InvokeError};

/// A contract invoker bound to one session's channel and identity.
pub struct GatewayInvoker {
    client: GatewayClient,
}

impl GatewayInvoker {
    /// Wrap a gateway client.
    pub fn new(client: GatewayClient) -> Self {
        Self { client }
    }

    /// Convenience constructor from an open session.
    pub fn for_session(session: &Session) -> Self {
        Self::new(session.client())
    }
}

#[async_trait]
impl ContractInvoker for GatewayInvoker {
    async fn evaluate(
        &self,
        channel: &str,
        contract: &str,
        transaction: &str,
        args: &[String],
        deadline: Duration,
    ) -> Result<Vec<u8>, InvokeError> {
        match self
            .client
            .evaluate(channel, contract, transaction, args, deadline)
            .await
        {
            Ok(payload) => Ok(payload),
            Err(CallError::DeadlineExceeded(after)) => Err(InvokeError::DeadlineExceeded(after)),
            Err(CallError::Rejected(status)) => Err(map_status(contract, status)),
            Err(other) => Err(InvokeError::Failed(other.to_string())),
        }
    }
}

/// Classify a gateway status.
///
/// Peers report a missing contract either as a NOT_FOUND/UNIMPLEMENTED code
/// or as an internal error whose message names the contract; both mean the
/// channel does not expose the instance.
fn map_status(contract: &str, status: tonic::Status) -> InvokeError {
    let message = status.message().to_ascii_lowercase();
    let missing = status.code() == Code::NotFound
        || status.code() == Code::Unimplemented
        || (message.contains("chaincode") && message.contains("not found"))
        || (message.contains("contract") && message.contains("not found"));
    if missing {
        InvokeError::ContractNotFound(contract.to_string())
    } else {
        InvokeError::Failed(status.to_string())
    }
}
