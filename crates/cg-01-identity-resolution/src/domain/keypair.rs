//! Key-pair consistency verification.
//!
//! A `KeyPair` can only be obtained through [`KeyPair::verify`], so any
//! value of the type carries the invariant that the certificate's embedded
//! public key equals the public key derivable from the private key. The
//! comparison is on canonical SPKI DER bytes, which makes it independent of
//! PEM line wrapping or armor variations.

use p256::pkcs8::{DecodePrivateKey, EncodePublicKey};
use shared_types::pem::unescape_newlines;
use x509_cert::der::{DecodePem, Encode};
use x509_cert::Certificate;

use crate::domain::errors::{AuthError, Credential};

/// A verified private-key/certificate pair.
///
/// Constructed per request from untrusted input and discarded at request
/// end; never serialized or persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key_pem: String,
    certificate_pem: String,
}

impl KeyPair {
    /// Validate a key/certificate pair.
    ///
    /// Inputs may carry literal `\n` escape sequences; they are normalized
    /// to real newlines before parsing. The private key is accepted in
    /// PKCS#8 (`BEGIN PRIVATE KEY`) or SEC1 (`BEGIN EC PRIVATE KEY`) armor,
    /// since enrollment services emit both.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingCredential`] when either input is empty.
    /// - [`AuthError::MalformedCredential`] when either input fails to parse.
    /// - [`AuthError::KeyMismatch`] when the SPKI encodings differ.
    pub fn verify(private_key_pem: &str, certificate_pem: &str) -> Result<Self, AuthError> {
        if private_key_pem.trim().is_empty() {
            return Err(AuthError::MissingCredential(Credential::PrivateKey));
        }
        if certificate_pem.trim().is_empty() {
            return Err(AuthError::MissingCredential(Credential::Certificate));
        }

        let private_key_pem = unescape_newlines(private_key_pem);
        let certificate_pem = unescape_newlines(certificate_pem);

        let secret = parse_private_key(&private_key_pem)?;
        let derived_spki = secret
            .public_key()
            .to_public_key_der()
            .map_err(|_| AuthError::MalformedCredential(Credential::PrivateKey))?;

        let certificate = Certificate::from_pem(certificate_pem.as_bytes())
            .map_err(|_| AuthError::MalformedCredential(Credential::Certificate))?;
        let certificate_spki = certificate
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|_| AuthError::MalformedCredential(Credential::Certificate))?;

        if derived_spki.as_bytes() != certificate_spki.as_slice() {
            return Err(AuthError::KeyMismatch);
        }

        Ok(Self {
            private_key_pem,
            certificate_pem,
        })
    }

    /// The normalized private key PEM.
    pub fn private_key_pem(&self) -> &str {
        &self.private_key_pem
    }

    /// The normalized certificate PEM.
    pub fn certificate_pem(&self) -> &str {
        &self.certificate_pem
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The private key must never reach logs.
        f.debug_struct("KeyPair")
            .field("private_key_pem", &"<redacted>")
            .field("certificate_pem", &self.certificate_pem)
            .finish()
    }
}

fn parse_private_key(pem: &str) -> Result<p256::SecretKey, AuthError> {
    if let Ok(key) = p256::SecretKey::from_pkcs8_pem(pem) {
        return Ok(key);
    }
    p256::SecretKey::from_sec1_pem(pem)
        .map_err(|_| AuthError::MalformedCredential(Credential::PrivateKey))
}
