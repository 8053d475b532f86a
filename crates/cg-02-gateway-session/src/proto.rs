//! Gateway wire messages.
//!
//! Hand-derived `prost` messages for the gateway's unary surface, invoked
//! through `tonic::client::Grpc` with static method paths. Field tags are
//! part of the wire contract and must not be renumbered.

/// Creator identity carried in every proposal.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SerializedIdentity {
    /// Membership service provider id.
    #[prost(string, tag = "1")]
    pub mspid: String,
    /// PEM certificate bytes of the bearer.
    #[prost(bytes = "vec", tag = "2")]
    pub id_bytes: Vec<u8>,
}

/// An unsigned transaction proposal.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Proposal {
    /// Channel the proposal targets.
    #[prost(string, tag = "1")]
    pub channel_id: String,
    /// Contract name on the channel.
    #[prost(string, tag = "2")]
    pub contract_name: String,
    /// Named transaction (query) to invoke.
    #[prost(string, tag = "3")]
    pub transaction_name: String,
    /// String arguments, in call order.
    #[prost(string, repeated, tag = "4")]
    pub args: Vec<String>,
    /// Who proposes.
    #[prost(message, optional, tag = "5")]
    pub creator: Option<SerializedIdentity>,
    /// Random nonce making the transaction id unique.
    #[prost(bytes = "vec", tag = "6")]
    pub nonce: Vec<u8>,
}

/// A proposal plus the creator's signature over its encoded bytes.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SignedProposal {
    /// Encoded [`Proposal`].
    #[prost(bytes = "vec", tag = "1")]
    pub proposal_bytes: Vec<u8>,
    /// DER ECDSA signature over the SHA-256 digest of `proposal_bytes`.
    #[prost(bytes = "vec", tag = "2")]
    pub signature: Vec<u8>,
}

/// Read-only evaluation request.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EvaluateRequest {
    /// Derived transaction id (hex SHA-256 of nonce plus creator).
    #[prost(string, tag = "1")]
    pub transaction_id: String,
    /// Channel the call targets, duplicated for routing.
    #[prost(string, tag = "2")]
    pub channel_id: String,
    /// The signed proposal.
    #[prost(message, optional, tag = "3")]
    pub proposed_transaction: Option<SignedProposal>,
}

/// Read-only evaluation response.
#[derive(Clone, PartialEq, prost::Message)]
pub struct EvaluateResponse {
    /// Raw contract payload; queries return UTF-8 JSON.
    #[prost(bytes = "vec", tag = "1")]
    pub payload: Vec<u8>,
}

/// Unary method path for read-only evaluation.
pub const EVALUATE_PATH: &str = "/gateway.Gateway/Evaluate";
