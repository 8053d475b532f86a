//! The per-request pipeline.

use std::sync::Arc;

use cg_01_identity_resolution::{IdentityResolver, KeyPair};
use cg_03_query_routing::{LedgerQueryRouter, QueryResult};
use shared_types::OrganizationRegistry;
use tracing::{debug, info};
use uuid::Uuid;

use crate::backend::{BackendSession, GatewayBackend, LedgerBackend};
use crate::errors::OrchestratorError;
use crate::request::{QueryKind, QueryRequest};
use crate::response::QueryResponse;

/// Pipeline states, in order. Failures jump straight to `Released`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RequestState {
    Unverified,
    KeyVerified,
    Resolved,
    Connected,
    Queried,
    Released,
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RequestState::Unverified => "unverified",
            RequestState::KeyVerified => "key-verified",
            RequestState::Resolved => "resolved",
            RequestState::Connected => "connected",
            RequestState::Queried => "queried",
            RequestState::Released => "released",
        };
        f.write_str(name)
    }
}

/// Runs verify -> resolve -> connect -> query -> release once per request.
///
/// Shared state is limited to the read-only startup registry and the
/// resolver's long-lived registry handles, so one orchestrator value serves
/// any number of concurrent requests.
pub struct RequestOrchestrator {
    registry: Arc<OrganizationRegistry>,
    resolver: IdentityResolver,
    backend: Arc<dyn LedgerBackend>,
}

impl RequestOrchestrator {
    /// Build an orchestrator over the production gateway backend.
    pub fn new(registry: Arc<OrganizationRegistry>, resolver: IdentityResolver) -> Self {
        Self::with_backend(registry, resolver, Arc::new(GatewayBackend::new()))
    }

    /// Build an orchestrator over an explicit backend.
    pub fn with_backend(
        registry: Arc<OrganizationRegistry>,
        resolver: IdentityResolver,
        backend: Arc<dyn LedgerBackend>,
    ) -> Self {
        Self {
            registry,
            resolver,
            backend,
        }
    }

    /// Handle one request end to end.
    ///
    /// Never panics past this boundary and never leaks a session: every
    /// outcome, success or failure, is a [`QueryResponse`].
    pub async fn handle(&self, request: QueryRequest) -> QueryResponse {
        let correlation = Uuid::new_v4();
        match self.run(&request, correlation).await {
            Ok(result) => QueryResponse::success(result),
            Err(err) => {
                info!("[cg-04] request {correlation} released with error: {err}");
                QueryResponse::failure(err.to_string())
            }
        }
    }

    async fn run(
        &self,
        request: &QueryRequest,
        correlation: Uuid,
    ) -> Result<QueryResult, OrchestratorError> {
        let mut state = RequestState::Unverified;

        let key_pair = KeyPair::verify(&request.private_key_pem, &request.certificate_pem)?;
        self.step(correlation, &mut state, RequestState::KeyVerified);

        let principal = self
            .resolver
            .resolve(key_pair.certificate_pem())
            .await?
            .ok_or(OrchestratorError::IdentityNotRegistered)?;
        self.step(correlation, &mut state, RequestState::Resolved);

        let profile = self
            .registry
            .profile(principal.org)
            .ok_or(OrchestratorError::UnknownOrganization(principal.org))?;
        let session = self.backend.open(principal.org, profile, &key_pair).await?;
        self.step(correlation, &mut state, RequestState::Connected);

        // Connected: every path below must release exactly once.
        let outcome = self
            .dispatch(session.as_ref(), profile, &key_pair, &request.query)
            .await;
        if outcome.is_ok() {
            self.step(correlation, &mut state, RequestState::Queried);
        }
        session.release();
        self.step(correlation, &mut state, RequestState::Released);

        outcome
    }

    async fn dispatch(
        &self,
        session: &dyn BackendSession,
        profile: &shared_types::OrganizationProfile,
        key_pair: &KeyPair,
        query: &QueryKind,
    ) -> Result<QueryResult, OrchestratorError> {
        let router = LedgerQueryRouter::new(session.invoker(), session.deadlines());
        let result = match query {
            QueryKind::UserBalance => QueryResult::UserBalance(
                router
                    .user_balance(profile, key_pair.certificate_pem())
                    .await?,
            ),
            QueryKind::AggregatedBalance => QueryResult::UserBalance(
                router
                    .aggregated_balance(profile, key_pair.certificate_pem())
                    .await?,
            ),
            QueryKind::RiskRange { start, end } => {
                QueryResult::RiskHistogram(router.risk_in_range(profile, start, end).await?)
            }
            QueryKind::QualityRange { start, end } => {
                QueryResult::QualityCounts(router.quality_in_range(profile, start, end).await?)
            }
        };
        Ok(result)
    }

    fn step(&self, correlation: Uuid, state: &mut RequestState, next: RequestState) {
        debug!("[cg-04] request {correlation}: {state} -> {next}");
        *state = next;
    }
}
