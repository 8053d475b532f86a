//! Identity-to-organization resolution.

use std::sync::Arc;

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use shared_types::pem::canonical_certificate;
use shared_types::OrgIndex;
use tracing::debug;

use crate::domain::Principal;
use crate::ports::{MembershipRegistry, RegistryError};

/// Cap on concurrent record fetches within one organization. Registries
/// are externally administered; an unbounded burst against a large wallet
/// directory would look like a scrape.
const MAX_CONCURRENT_FETCHES: usize = 8;

/// Resolves which organization's membership registry owns a certificate.
///
/// Holds one long-lived registry handle per organization, in registration
/// order. Each call is a fan-out search: every organization is searched
/// concurrently, then outcomes are scanned in registration order so the
/// first registered match wins. The cost is O(total registered principals)
/// per call, which is acceptable while registries stay small relative to
/// query volume; callers with large registries should cache short-term.
pub struct IdentityResolver {
    registries: Vec<Arc<dyn MembershipRegistry>>,
}

impl IdentityResolver {
    /// Build a resolver over per-organization registry handles, one per
    /// organization, in registration order.
    pub fn new(registries: Vec<Arc<dyn MembershipRegistry>>) -> Self {
        Self { registries }
    }

    /// Number of organizations this resolver searches.
    pub fn organization_count(&self) -> usize {
        self.registries.len()
    }

    /// Find the `(organization, principal)` pair owning `certificate_pem`.
    ///
    /// `Ok(None)` is the normal outcome for an unregistered certificate,
    /// not an error. Comparison is on canonical certificate text, so
    /// escaped-`\n` input matches stored real-newline records and armored
    /// input matches bare-body records.
    ///
    /// A store error in a lower-numbered organization surfaces even when a
    /// later organization matched: a match there could have been shadowed.
    pub async fn resolve(&self, certificate_pem: &str) -> Result<Option<Principal>, RegistryError> {
        let needle = canonical_certificate(certificate_pem);

        let searches = self.registries.iter().map(|registry| {
            let registry = Arc::clone(registry);
            let needle = needle.clone();
            async move { search_organization(registry.as_ref(), &needle).await }
        });
        let outcomes = join_all(searches).await;

        for (position, outcome) in outcomes.into_iter().enumerate() {
            let org = OrgIndex::new(position as u8 + 1).expect("registration positions start at 1");
            if let Some((name, certificate_pem)) = outcome? {
                debug!("[cg-01] certificate resolved to {org} principal {name}");
                return Ok(Some(Principal {
                    name,
                    org,
                    certificate_pem,
                }));
            }
        }

        debug!("[cg-01] certificate not present in any membership registry");
        Ok(None)
    }
}

/// Two-phase search of one organization's registry.
///
/// The store has no atomic list-and-fetch: the name listing must complete
/// before the per-name record fetches are issued. The fetches run as a
/// bounded, order-preserving fan-out and all settle before comparison
/// starts.
async fn search_organization(
    registry: &dyn MembershipRegistry,
    needle: &str,
) -> Result<Option<(String, String)>, RegistryError> {
    let names = registry.list().await?;

    let records: Vec<_> = stream::iter(names.iter().cloned())
        .map(|name| async move { registry.get(&name).await })
        .buffered(MAX_CONCURRENT_FETCHES)
        .collect()
        .await;

    for (name, record) in names.iter().zip(records) {
        if let Some(record) = record? {
            if canonical_certificate(&record.credentials.certificate) == needle {
                return Ok(Some((name.clone(), record.credentials.certificate)));
            }
        }
    }
    Ok(None)
}
