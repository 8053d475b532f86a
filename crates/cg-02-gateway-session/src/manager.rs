//! Session establishment.

use std::sync::Arc;
use std::time::Duration;

use shared_types::{OrgIndex, OrganizationProfile};
use tonic::transport::{Certificate, ClientTlsConfig, Endpoint};
use tracing::debug;
use x509_cert::der::DecodePem;

use cg_01_identity_resolution::KeyPair;

use crate::client::GatewayClient;
use crate::deadlines::CallDeadlines;
use crate::errors::ConnectionError;
use crate::identity::{EcdsaSigner, SigningIdentity};
use crate::session::Session;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens authenticated sessions to organization gateways.
///
/// Stateless; one manager serves all concurrent requests. Every session it
/// opens carries [`CallDeadlines::STANDARD`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ConnectionManager;

impl ConnectionManager {
    /// Create a manager.
    pub fn new() -> Self {
        Self
    }

    /// Open a TLS transport to `profile.endpoint` and attach the client's
    /// signing identity.
    ///
    /// The transport trusts `profile.tls_root_cert` as its only root and
    /// pins the TLS peer name to `profile.tls_host_override`.
    ///
    /// # Errors
    ///
    /// - [`ConnectionError::CertificateAuthorityRejected`] when the root
    ///   certificate does not parse or is rejected by the TLS stack.
    /// - [`ConnectionError::InvalidEndpoint`] when the endpoint is not a
    ///   valid authority.
    /// - [`ConnectionError::TransportUnavailable`] when dialing or the
    ///   handshake fails, including connect timeout.
    pub async fn open(
        &self,
        org: OrgIndex,
        profile: &OrganizationProfile,
        key_pair: &KeyPair,
    ) -> Result<Session, ConnectionError> {
        // Reject an unusable CA root before dialing; the TLS stack would
        // only surface it as an opaque handshake failure.
        x509_cert::Certificate::from_pem(profile.tls_root_cert.as_bytes())
            .map_err(|e| ConnectionError::CertificateAuthorityRejected(e.to_string()))?;

        let tls = ClientTlsConfig::new()
            .ca_certificate(Certificate::from_pem(&profile.tls_root_cert))
            .domain_name(&profile.tls_host_override);

        let endpoint = Endpoint::from_shared(format!("https://{}", profile.endpoint))
            .map_err(|_| ConnectionError::InvalidEndpoint(profile.endpoint.clone()))?
            .tls_config(tls)
            .map_err(|e| ConnectionError::CertificateAuthorityRejected(e.to_string()))?
            .connect_timeout(CONNECT_TIMEOUT);

        let channel = tokio::time::timeout(CONNECT_TIMEOUT, endpoint.connect())
            .await
            .map_err(|_| ConnectionError::TransportUnavailable {
                endpoint: profile.endpoint.clone(),
                reason: "connect timed out".into(),
            })?
            .map_err(|e| ConnectionError::TransportUnavailable {
                endpoint: profile.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let identity = SigningIdentity::new(&profile.msp_id, key_pair.certificate_pem());
        let signer = EcdsaSigner::from_pem(key_pair.private_key_pem())?;

        debug!(
            "[cg-02] session opened to {} at {} (peer name {})",
            org, profile.endpoint, profile.tls_host_override
        );
        Ok(Session::new(
            org,
            GatewayClient::new(channel, identity, Arc::new(signer)),
            CallDeadlines::STANDARD,
        ))
    }
}
