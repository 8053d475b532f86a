//! Query dispatch and multi-contract aggregation.

use std::sync::Arc;

use cg_02_gateway_session::CallDeadlines;
use futures::future::join_all;
use shared_types::pem::canonical_certificate;
use shared_types::OrganizationProfile;
use tracing::{debug, warn};

use crate::domain::{QualityCounts, QueryError, RiskHistogram, UserBalanceRecord};
use crate::ports::{ContractInvoker, InvokeError};

/// Named transactions exposed by the backend contracts.
const USER_BALANCE_TX: &str = "QueryUsersByPublicKey";
const RISK_RANGE_TX: &str = "GetAssetRiskInRange";
const QUALITY_RANGE_TX: &str = "GetAssetQualityByRange";

/// Routes named queries to an organization's channel and contracts.
///
/// Holds the session's deadline budgets and an invoker bound to the
/// session's transport; one router serves one request.
pub struct LedgerQueryRouter {
    invoker: Arc<dyn ContractInvoker>,
    deadlines: CallDeadlines,
}

impl LedgerQueryRouter {
    /// Build a router over an invoker and the session's deadlines.
    pub fn new(invoker: Arc<dyn ContractInvoker>, deadlines: CallDeadlines) -> Self {
        Self { invoker, deadlines }
    }

    /// Query the user record owning `certificate_pem` on the profile's
    /// primary contract.
    ///
    /// The contract keys users by the bare base64 certificate body, so the
    /// argument is the canonical single-line form.
    pub async fn user_balance(
        &self,
        profile: &OrganizationProfile,
        certificate_pem: &str,
    ) -> Result<UserBalanceRecord, QueryError> {
        let key = canonical_certificate(certificate_pem);
        let payload = self
            .evaluate(profile, profile.primary_contract(), USER_BALANCE_TX, &[key])
            .await?;
        UserBalanceRecord::decode(&payload)
    }

    /// Query hazard counts between two range keys.
    pub async fn risk_in_range(
        &self,
        profile: &OrganizationProfile,
        start: &str,
        end: &str,
    ) -> Result<RiskHistogram, QueryError> {
        let payload = self
            .evaluate(
                profile,
                profile.primary_contract(),
                RISK_RANGE_TX,
                &[start.to_string(), end.to_string()],
            )
            .await?;
        RiskHistogram::decode(&payload)
    }

    /// Query production quality counts between two range keys.
    pub async fn quality_in_range(
        &self,
        profile: &OrganizationProfile,
        start: &str,
        end: &str,
    ) -> Result<QualityCounts, QueryError> {
        let payload = self
            .evaluate(
                profile,
                profile.primary_contract(),
                QUALITY_RANGE_TX,
                &[start.to_string(), end.to_string()],
            )
            .await?;
        QualityCounts::decode_series(&payload)
    }

    /// Aggregate the balance query across every contract instance on the
    /// profile's channel.
    ///
    /// All instances are queried concurrently and all outcomes settle
    /// before reduction. Instances the channel does not expose are dropped
    /// (retired instances are normal); every other per-instance failure
    /// lands in the log, never silently. Zero successful instances is
    /// [`QueryError::NoReachableInstances`]. Successful balances are
    /// summed; identity fields come from the first successful instance in
    /// contract-name order.
    pub async fn aggregated_balance(
        &self,
        profile: &OrganizationProfile,
        certificate_pem: &str,
    ) -> Result<UserBalanceRecord, QueryError> {
        let key = canonical_certificate(certificate_pem);
        let args = [key];

        let calls = profile.contracts.iter().map(|contract| {
            let args = &args;
            async move {
                let outcome = self
                    .invoker
                    .evaluate(
                        &profile.channel,
                        contract,
                        USER_BALANCE_TX,
                        args,
                        self.deadlines.evaluate,
                    )
                    .await;
                (contract.as_str(), outcome)
            }
        });
        let outcomes = join_all(calls).await;

        let mut successes: Vec<UserBalanceRecord> = Vec::new();
        let mut failures: Vec<(String, QueryError)> = Vec::new();
        for (contract, outcome) in outcomes {
            match outcome {
                Ok(payload) => match UserBalanceRecord::decode(&payload) {
                    Ok(record) => successes.push(record),
                    Err(err) => failures.push((contract.to_string(), err)),
                },
                Err(InvokeError::ContractNotFound(_)) => {
                    debug!(
                        "[cg-03] contract {} not deployed on {}, skipping",
                        contract, profile.channel
                    );
                }
                Err(err) => failures.push((contract.to_string(), err.into())),
            }
        }

        for (contract, err) in &failures {
            warn!("[cg-03] instance {contract} failed during aggregation: {err}");
        }
        if successes.is_empty() {
            return Err(QueryError::NoReachableInstances);
        }

        let mut reduced = successes[0].clone();
        for record in &successes[1..] {
            if record.id != reduced.id || record.name != reduced.name {
                warn!(
                    "[cg-03] instances disagree on identity fields ({}/{} vs {}/{}), trusting first",
                    reduced.id, reduced.name, record.id, record.name
                );
            }
            reduced.balance += record.balance;
        }
        debug!(
            "[cg-03] aggregated balance {} across {} instance(s), {} failure(s)",
            reduced.balance,
            successes.len(),
            failures.len()
        );
        Ok(reduced)
    }

    async fn evaluate(
        &self,
        profile: &OrganizationProfile,
        contract: &str,
        transaction: &str,
        args: &[String],
    ) -> Result<Vec<u8>, QueryError> {
        self.invoker
            .evaluate(
                &profile.channel,
                contract,
                transaction,
                args,
                self.deadlines.evaluate,
            )
            .await
            .map_err(QueryError::from)
    }
}

impl From<InvokeError> for QueryError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::ContractNotFound(contract) => QueryError::ContractUnavailable(contract),
            InvokeError::DeadlineExceeded(after) => QueryError::DeadlineExceeded(after),
            InvokeError::Failed(reason) => QueryError::Gateway(reason),
        }
    }
}
