//! Unary gateway client.

use std::sync::Arc;
use std::time::Duration;

use prost::Message;
use rand::RngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tracing::debug;

use crate::identity::{EcdsaSigner, SigningIdentity};
use crate::proto;

/// Errors from a single gateway call.
#[derive(Debug, Error)]
pub enum CallError {
    /// The call did not finish inside its category deadline. Retryable by
    /// the caller; never retried here.
    #[error("call deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),

    /// The gateway answered with a non-OK status.
    #[error("gateway rejected the call: {0}")]
    Rejected(tonic::Status),

    /// The transport failed before a status was produced.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The proposal could not be signed.
    #[error("signing failure: {0}")]
    Signing(String),
}

/// A signing client bound to one session's channel and identity.
///
/// Cheap to clone: the channel is a handle onto one shared connection.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    channel: Channel,
    identity: SigningIdentity,
    signer: Arc<EcdsaSigner>,
}

impl GatewayClient {
    pub(crate) fn new(channel: Channel, identity: SigningIdentity, signer: Arc<EcdsaSigner>) -> Self {
        Self {
            channel,
            identity,
            signer,
        }
    }

    /// The identity this client signs as.
    pub fn identity(&self) -> &SigningIdentity {
        &self.identity
    }

    /// Issue a read-only evaluation and return the raw payload bytes.
    ///
    /// The whole call, including connection readiness, is bounded by
    /// `deadline`; expiry maps to [`CallError::DeadlineExceeded`].
    pub async fn evaluate(
        &self,
        channel_name: &str,
        contract: &str,
        transaction: &str,
        args: &[String],
        deadline: Duration,
    ) -> Result<Vec<u8>, CallError> {
        let request = self.signed_evaluate_request(channel_name, contract, transaction, args)?;
        debug!(
            "[cg-02] evaluate {}:{}/{} txid {}",
            channel_name, contract, transaction, request.transaction_id
        );

        let call = async {
            let mut grpc = Grpc::new(self.channel.clone());
            grpc.ready()
                .await
                .map_err(|e| CallError::Transport(e.to_string()))?;
            let codec: ProstCodec<proto::EvaluateRequest, proto::EvaluateResponse> =
                ProstCodec::default();
            let path = PathAndQuery::from_static(proto::EVALUATE_PATH);
            let response = grpc
                .unary(tonic::Request::new(request), path, codec)
                .await
                .map_err(CallError::Rejected)?;
            Ok(response.into_inner().payload)
        };

        match tokio::time::timeout(deadline, call).await {
            Ok(outcome) => outcome,
            Err(_) => Err(CallError::DeadlineExceeded(deadline)),
        }
    }

    fn signed_evaluate_request(
        &self,
        channel_name: &str,
        contract: &str,
        transaction: &str,
        args: &[String],
    ) -> Result<proto::EvaluateRequest, CallError> {
        let mut nonce = vec![0u8; 24];
        rand::rngs::OsRng.fill_bytes(&mut nonce);

        let creator = self.identity.to_wire();
        let proposal = proto::Proposal {
            channel_id: channel_name.to_string(),
            contract_name: contract.to_string(),
            transaction_name: transaction.to_string(),
            args: args.to_vec(),
            creator: Some(creator.clone()),
            nonce: nonce.clone(),
        };
        let proposal_bytes = proposal.encode_to_vec();

        let digest: [u8; 32] = Sha256::digest(&proposal_bytes).into();
        let signature = self
            .signer
            .sign_digest(&digest)
            .map_err(|e| CallError::Signing(e.to_string()))?;

        Ok(proto::EvaluateRequest {
            transaction_id: transaction_id(&nonce, &creator.id_bytes),
            channel_id: channel_name.to_string(),
            proposed_transaction: Some(proto::SignedProposal {
                proposal_bytes,
                signature,
            }),
        })
    }
}

/// Transaction id: hex SHA-256 over nonce then creator bytes.
fn transaction_id(nonce: &[u8], creator: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(nonce);
    hasher.update(creator);
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
