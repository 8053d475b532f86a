//! Credential validation errors.

use thiserror::Error;

/// Which half of the key pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    /// The client's private key PEM.
    PrivateKey,
    /// The client's certificate PEM.
    Certificate,
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::PrivateKey => write!(f, "private key"),
            Credential::Certificate => write!(f, "certificate"),
        }
    }
}

/// Key-pair verification errors.
///
/// These are never retryable: the same inputs always fail the same way.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// An input was absent or empty.
    #[error("{0} is missing")]
    MissingCredential(Credential),

    /// An input did not parse as a key or certificate.
    #[error("{0} is malformed")]
    MalformedCredential(Credential),

    /// The certificate's public key does not belong to the private key.
    #[error("public/private key mismatch")]
    KeyMismatch,
}
