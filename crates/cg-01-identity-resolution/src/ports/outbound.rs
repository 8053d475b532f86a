//! # Driven Ports (Outbound SPI)
//!
//! The membership store interface each organization must provide. Stores
//! are externally owned and administered; this subsystem only reads them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::IdentityRecord;

/// Errors from membership store access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The store could not be reached or read.
    #[error("membership store unavailable: {0}")]
    Unavailable(String),

    /// A stored record exists but does not decode.
    #[error("identity record for {name} is corrupt: {reason}")]
    CorruptRecord {
        /// Principal name whose record failed to decode.
        name: String,
        /// Decoder error text.
        reason: String,
    },
}

/// Abstract interface to one organization's membership registry.
///
/// The store does not support an atomic list-and-fetch, so lookups are
/// two-phase: [`list`](MembershipRegistry::list) all principal names first,
/// then [`get`](MembershipRegistry::get) each record. Implementations must
/// be `Send + Sync`; handles are long-lived and shared read-only across
/// concurrent requests.
#[async_trait]
pub trait MembershipRegistry: Send + Sync {
    /// All registered principal names, in a stable order.
    async fn list(&self) -> Result<Vec<String>, RegistryError>;

    /// Fetch one principal's identity record.
    ///
    /// `Ok(None)` means the name is not registered; that is a normal
    /// outcome, not an error.
    async fn get(&self, name: &str) -> Result<Option<IdentityRecord>, RegistryError>;
}
