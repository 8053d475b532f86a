//! TOML registry configuration.
//!
//! The organization table is deployment data, not code. It is loaded once
//! at startup from a TOML document; PEM material arrives inline because the
//! surrounding deployment tooling already validates and injects it.

use serde::Deserialize;
use thiserror::Error;

use crate::organization::{OrganizationProfile, OrganizationRegistry};

/// Errors raised while building the registry from configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document failed to parse.
    #[error("invalid registry config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document parsed but described no usable organizations.
    #[error("registry config must list at least one organization with at least one contract")]
    NoOrganizations,
}

/// Top-level registry configuration document.
///
/// ```toml
/// [[organization]]
/// msp_id = "Org1MSP"
/// tls_root_cert = "-----BEGIN CERTIFICATE-----..."
/// endpoint = "localhost:7051"
/// tls_host_override = "peer0.org1.example.com"
/// channel = "settlement"
/// contracts = ["settlement_bridge"]
/// ```
#[derive(Debug, Deserialize)]
pub struct RegistryConfig {
    /// Organizations in registration order.
    #[serde(rename = "organization")]
    pub organizations: Vec<OrganizationProfile>,
}

impl RegistryConfig {
    /// Parse a TOML document into a config.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Convert into the immutable startup registry.
    pub fn into_registry(self) -> Result<OrganizationRegistry, ConfigError> {
        OrganizationRegistry::new(self.organizations).ok_or(ConfigError::NoOrganizations)
    }
}
