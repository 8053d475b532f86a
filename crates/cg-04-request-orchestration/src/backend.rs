//! # Driven Ports (Outbound SPI)
//!
//! The ledger backend the orchestrator connects through. The production
//! implementation wraps the gateway session subsystem; tests substitute a
//! scripted backend, which is what keeps the release guarantee testable
//! without a live gateway.

use std::sync::Arc;

use async_trait::async_trait;
use cg_01_identity_resolution::KeyPair;
use cg_02_gateway_session::{CallDeadlines, ConnectionError, ConnectionManager, Session};
use cg_03_query_routing::{ContractInvoker, GatewayInvoker};
use shared_types::{OrgIndex, OrganizationProfile};

/// Abstract interface for opening authenticated backend sessions.
#[async_trait]
pub trait LedgerBackend: Send + Sync {
    /// Open a session to one organization's endpoint.
    async fn open(
        &self,
        org: OrgIndex,
        profile: &OrganizationProfile,
        key_pair: &KeyPair,
    ) -> Result<Box<dyn BackendSession>, ConnectionError>;
}

/// One open backend session.
///
/// Owns its transport; [`release`](BackendSession::release) consumes the
/// session and must be called exactly once.
pub trait BackendSession: Send + Sync {
    /// The per-call deadline budgets attached at open time.
    fn deadlines(&self) -> CallDeadlines;

    /// An invoker issuing calls over this session.
    fn invoker(&self) -> Arc<dyn ContractInvoker>;

    /// Close the session and drop the transport.
    fn release(self: Box<Self>);
}

/// The production backend: TLS gateway sessions.
#[derive(Clone, Copy, Debug, Default)]
pub struct GatewayBackend {
    manager: ConnectionManager,
}

impl GatewayBackend {
    /// Create the production backend.
    pub fn new() -> Self {
        Self {
            manager: ConnectionManager::new(),
        }
    }
}

#[async_trait]
impl LedgerBackend for GatewayBackend {
    async fn open(
        &self,
        org: OrgIndex,
        profile: &OrganizationProfile,
        key_pair: &KeyPair,
    ) -> Result<Box<dyn BackendSession>, ConnectionError> {
        let session = self.manager.open(org, profile, key_pair).await?;
        Ok(Box::new(GatewaySession { session }))
    }
}

struct GatewaySession {
    session: Session,
}

impl BackendSession for GatewaySession {
    fn deadlines(&self) -> CallDeadlines {
        self.session.deadlines()
    }

    fn invoker(&self) -> Arc<dyn ContractInvoker> {
        Arc::new(GatewayInvoker::for_session(&self.session))
    }

    fn release(self: Box<Self>) {
        self.session.release();
    }
}
