//! Connection establishment errors.

use thiserror::Error;

/// Errors raised while opening a session.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The organization's TLS root certificate is unusable.
    #[error("organization CA root rejected: {0}")]
    CertificateAuthorityRejected(String),

    /// The endpoint could not be reached or the handshake failed.
    #[error("endpoint {endpoint} unavailable: {reason}")]
    TransportUnavailable {
        /// The `host:port` that was dialed.
        endpoint: String,
        /// Underlying transport error text.
        reason: String,
    },

    /// The profile's endpoint is not a valid URI authority.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The client's private key could not be turned into a signer.
    #[error("signing credentials rejected: {0}")]
    SignerRejected(String),
}
