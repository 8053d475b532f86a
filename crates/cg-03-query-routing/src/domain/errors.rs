//! Query failure taxonomy.

use std::time::Duration;

use thiserror::Error;

/// Errors from dispatching and decoding a ledger query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The named contract is not deployed on the channel. Recoverable in
    /// the aggregation path, where retired instances are expected.
    #[error("contract {0} is not available on the channel")]
    ContractUnavailable(String),

    /// The aggregation path found zero instances that answered. Fatal for
    /// the request.
    #[error("no reachable contract instances on the channel")]
    NoReachableInstances,

    /// The payload was not the UTF-8 JSON shape the query kind requires.
    #[error("malformed ledger payload: {0}")]
    MalformedPayload(String),

    /// The payload decoded but violates a domain rule.
    #[error("invalid result: {0}")]
    DomainInvalid(String),

    /// The call ran past its category deadline. Retryable by the caller;
    /// this subsystem never retries.
    #[error("call deadline exceeded after {0:?}")]
    DeadlineExceeded(Duration),

    /// Any other gateway-side failure.
    #[error("gateway failure: {0}")]
    Gateway(String),
}
