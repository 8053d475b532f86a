//! Unified orchestration errors.

use cg_01_identity_resolution::{AuthError, RegistryError};
use cg_02_gateway_session::ConnectionError;
use cg_03_query_routing::QueryError;
use shared_types::OrgIndex;
use thiserror::Error;

/// Everything that can stop a request between `Unverified` and `Queried`.
///
/// Every variant flattens into a `{ success: false, error }` response; no
/// failure escapes the orchestrator boundary uncaught.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Key-pair verification failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The certificate is not registered with any organization. A normal
    /// negative resolution outcome, surfaced as a request failure because
    /// there is nowhere to route the query.
    #[error("identity is not registered with any organization")]
    IdentityNotRegistered,

    /// A membership store could not be searched.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Resolution named an organization the startup registry does not know.
    #[error("no connection profile for {0}")]
    UnknownOrganization(OrgIndex),

    /// The session could not be opened.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The query failed after the session was connected.
    #[error(transparent)]
    Query(#[from] QueryError),
}
