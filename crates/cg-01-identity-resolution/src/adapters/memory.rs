//! In-memory membership registry.
//!
//! Backs the identity-management deployment variant, where registration and
//! resolution run in the same process, and doubles as the registry test
//! double everywhere else.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::IdentityRecord;
use crate::ports::{MembershipRegistry, RegistryError};

/// A registry held entirely in process memory.
///
/// Records keep their insertion order, so `list` reflects registration
/// order exactly. Reads are concurrent; registration takes the write lock
/// briefly.
#[derive(Default)]
pub struct InMemoryRegistry {
    records: RwLock<Vec<(String, IdentityRecord)>>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new principal.
    ///
    /// Returns `false` without modifying the store when the name is already
    /// taken.
    pub fn register(&self, name: impl Into<String>, record: IdentityRecord) -> bool {
        let name = name.into();
        let mut records = self.records.write();
        if records.iter().any(|(existing, _)| *existing == name) {
            return false;
        }
        records.push((name, record));
        true
    }

    /// Number of registered principals.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the registry has no principals.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl MembershipRegistry for InMemoryRegistry {
    async fn list(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self
            .records
            .read()
            .iter()
            .map(|(name, _)| name.clone())
            .collect())
    }

    async fn get(&self, name: &str) -> Result<Option<IdentityRecord>, RegistryError> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, record)| record.clone()))
    }
}
