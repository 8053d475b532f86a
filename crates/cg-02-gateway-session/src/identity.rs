//! Bearer identity and proposal signer.

use p256::ecdsa::signature::hazmat::PrehashSigner;
use p256::ecdsa::SigningKey;
use p256::pkcs8::DecodePrivateKey;

use crate::errors::ConnectionError;
use crate::proto;

/// The identity presented to the gateway on every call.
///
/// The membership service provider id scopes the certificate to one
/// organization; the gateway forwards both to the peers for access checks.
#[derive(Clone, Debug)]
pub struct SigningIdentity {
    msp_id: String,
    certificate_pem: String,
}

impl SigningIdentity {
    /// Build an identity from an MSP id and a certificate PEM.
    pub fn new(msp_id: impl Into<String>, certificate_pem: impl Into<String>) -> Self {
        Self {
            msp_id: msp_id.into(),
            certificate_pem: certificate_pem.into(),
        }
    }

    /// The membership service provider id.
    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    /// The bearer certificate PEM.
    pub fn certificate_pem(&self) -> &str {
        &self.certificate_pem
    }

    /// Wire form carried in every proposal's creator field.
    pub(crate) fn to_wire(&self) -> proto::SerializedIdentity {
        proto::SerializedIdentity {
            mspid: self.msp_id.clone(),
            id_bytes: self.certificate_pem.as_bytes().to_vec(),
        }
    }
}

/// ECDSA-P256 signer over SHA-256 digests.
///
/// Signatures are DER-encoded and low-S normalized; peers reject high-S
/// signatures as potentially malleable.
pub struct EcdsaSigner {
    signing_key: SigningKey,
}

impl EcdsaSigner {
    /// Build a signer from a private key PEM (PKCS#8 or SEC1 armor).
    pub fn from_pem(private_key_pem: &str) -> Result<Self, ConnectionError> {
        let secret = p256::SecretKey::from_pkcs8_pem(private_key_pem)
            .or_else(|_| p256::SecretKey::from_sec1_pem(private_key_pem))
            .map_err(|e| ConnectionError::SignerRejected(e.to_string()))?;
        Ok(Self {
            signing_key: SigningKey::from(secret),
        })
    }

    /// Sign a 32-byte digest.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<Vec<u8>, ConnectionError> {
        let signature: p256::ecdsa::Signature = self
            .signing_key
            .sign_prehash(digest)
            .map_err(|e| ConnectionError::SignerRejected(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        Ok(signature.to_der().as_bytes().to_vec())
    }
}

impl std::fmt::Debug for EcdsaSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EcdsaSigner(<private>)")
    }
}
