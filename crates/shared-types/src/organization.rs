//! Organization profiles and the startup registry.
//!
//! Each backend organization is an independent administrative domain with
//! its own trust root, endpoint, and membership store. Connection
//! parameters for all of them are loaded once at startup into an
//! [`OrganizationRegistry`] that is passed by reference everywhere an
//! organization lookup is needed.

use serde::{Deserialize, Serialize};

/// 1-based organization index, assigned in registration order.
///
/// Registration order is a tie-breaking policy, not an implementation
/// detail: when the same certificate is registered with more than one
/// organization, the lowest index wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgIndex(u8);

impl OrgIndex {
    /// Create an index. Zero is not a valid organization number.
    pub fn new(index: u8) -> Option<Self> {
        if index == 0 {
            None
        } else {
            Some(Self(index))
        }
    }

    /// The raw 1-based index.
    pub fn get(&self) -> u8 {
        self.0
    }

    /// Position of this organization in registration order (0-based).
    pub fn position(&self) -> usize {
        usize::from(self.0) - 1
    }
}

impl std::fmt::Display for OrgIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "org{}", self.0)
    }
}

/// Connection parameters for one organization.
///
/// Immutable for the process lifetime. The TLS root certificate is the
/// organization's own CA; the host override exists because deployment
/// endpoints and certificate subject names diverge in this network
/// topology, and the override pins the expected peer name while the CA
/// remains the root of trust.
#[derive(Clone, Debug, Deserialize)]
pub struct OrganizationProfile {
    /// Membership service provider id presented as the client's affiliation.
    pub msp_id: String,
    /// PEM text of the organization's TLS root certificate.
    pub tls_root_cert: String,
    /// Gateway peer endpoint, `host:port`.
    pub endpoint: String,
    /// Expected TLS peer name (differs from the endpoint host).
    pub tls_host_override: String,
    /// Ledger channel this organization answers queries on.
    pub channel: String,
    /// Contract names deployed on the channel. More than one entry means the
    /// channel hosts concurrently-deployed instances answering the same
    /// logical query, and balance queries aggregate across all of them.
    pub contracts: Vec<String>,
}

impl OrganizationProfile {
    /// The primary contract, used by every single-contract query.
    pub fn primary_contract(&self) -> &str {
        &self.contracts[0]
    }
}

/// Static table of all participating organizations, in registration order.
#[derive(Clone, Debug)]
pub struct OrganizationRegistry {
    profiles: Vec<OrganizationProfile>,
}

impl OrganizationRegistry {
    /// Build a registry from profiles in registration order.
    ///
    /// Returns `None` when the list is empty or any profile has no
    /// contracts; a registry with nothing to route to is a configuration
    /// error, caught at startup rather than per request.
    pub fn new(profiles: Vec<OrganizationProfile>) -> Option<Self> {
        if profiles.is_empty() || profiles.iter().any(|p| p.contracts.is_empty()) {
            return None;
        }
        Some(Self { profiles })
    }

    /// Number of organizations.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// A registry is never empty by construction.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Look up one organization's profile.
    pub fn profile(&self, org: OrgIndex) -> Option<&OrganizationProfile> {
        self.profiles.get(org.position())
    }

    /// Iterate `(index, profile)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (OrgIndex, &OrganizationProfile)> {
        self.profiles
            .iter()
            .enumerate()
            .map(|(i, p)| (OrgIndex(i as u8 + 1), p))
    }
}
