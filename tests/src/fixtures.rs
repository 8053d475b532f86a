//! Shared test fixtures: real certificate material, organization tables,
//! and scripted backends implementing the outbound ports.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use cg_01_identity_resolution::adapters::InMemoryRegistry;
use cg_01_identity_resolution::{IdentityRecord, IdentityResolver, KeyPair, MembershipRegistry};
use cg_02_gateway_session::{CallDeadlines, ConnectionError};
use cg_03_query_routing::{ContractInvoker, InvokeError};
use cg_04_request_orchestration::{BackendSession, LedgerBackend};
use shared_types::{OrgIndex, OrganizationProfile, OrganizationRegistry};

/// Install the logging subscriber once for the whole suite.
///
/// Individual tests call this so `CG_LOG_FILTER=debug cargo test` shows the
/// subsystem transitions; repeat calls are no-ops.
pub fn init_suite_logging() {
    static ONCE: std::sync::Once = std::sync::Once::new();
    ONCE.call_once(|| {
        let _ = gateway_telemetry::init_telemetry(&gateway_telemetry::TelemetryConfig::from_env());
    });
}

/// A freshly-issued client credential pair (PKCS#8 key PEM, cert PEM).
pub struct Enrolled {
    pub key_pem: String,
    pub cert_pem: String,
}

/// Issue a new ECDSA-P256 self-signed credential pair.
pub fn enroll(name: &str) -> Enrolled {
    let issued = rcgen::generate_simple_self_signed(vec![name.to_string()])
        .expect("certificate generation");
    Enrolled {
        key_pem: issued.key_pair.serialize_pem(),
        cert_pem: issued.cert.pem(),
    }
}

impl Enrolled {
    /// The verified key pair for this credential.
    pub fn key_pair(&self) -> KeyPair {
        KeyPair::verify(&self.key_pem, &self.cert_pem).expect("fixture pair verifies")
    }
}

/// An organization profile for tests; the TLS material is never dialed.
pub fn profile(msp: &str, channel: &str, contracts: &[&str]) -> OrganizationProfile {
    OrganizationProfile {
        msp_id: msp.to_string(),
        tls_root_cert: "unused in tests".to_string(),
        endpoint: "localhost:7051".to_string(),
        tls_host_override: "peer0.example.com".to_string(),
        channel: channel.to_string(),
        contracts: contracts.iter().map(|c| c.to_string()).collect(),
    }
}

/// A consortium of `n` organizations with in-memory membership registries.
pub struct Consortium {
    pub registry: Arc<OrganizationRegistry>,
    pub members: Vec<Arc<InMemoryRegistry>>,
}

impl Consortium {
    /// Build a consortium whose org `k` hosts the given contracts.
    pub fn new(contracts_per_org: &[&[&str]]) -> Self {
        let profiles = contracts_per_org
            .iter()
            .enumerate()
            .map(|(i, contracts)| {
                profile(&format!("Org{}MSP", i + 1), &format!("channel{}", i + 1), contracts)
            })
            .collect();
        let registry =
            Arc::new(OrganizationRegistry::new(profiles).expect("non-empty consortium"));
        let members = (0..contracts_per_org.len())
            .map(|_| Arc::new(InMemoryRegistry::new()))
            .collect();
        Self { registry, members }
    }

    /// Register a credential with organization `org` (1-based).
    pub fn register(&self, org: u8, name: &str, cert_pem: &str) {
        let msp = format!("Org{org}MSP");
        assert!(self.members[usize::from(org) - 1]
            .register(name, IdentityRecord::x509(cert_pem, None, msp)));
    }

    /// A resolver over this consortium's membership registries.
    pub fn resolver(&self) -> IdentityResolver {
        IdentityResolver::new(
            self.members
                .iter()
                .map(|m| Arc::clone(m) as Arc<dyn MembershipRegistry>)
                .collect(),
        )
    }
}

/// Scripted per-contract invoker outcomes.
pub type Script = HashMap<String, Result<String, InvokeError>>;

/// Build a script entry list into a [`Script`].
pub fn script(entries: &[(&str, Result<&str, InvokeError>)]) -> Script {
    entries
        .iter()
        .map(|(contract, outcome)| {
            (
                contract.to_string(),
                outcome.clone().map(|s| s.to_string()),
            )
        })
        .collect()
}

/// An invoker answering from a script, honoring the supplied deadline.
///
/// Unknown contracts answer `ContractNotFound`, matching how the gateway
/// reports instances a channel does not expose. An optional per-call delay
/// simulates slow peers; the deadline is enforced the way the production
/// adapter enforces it.
pub struct ScriptedInvoker {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedInvoker {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    /// Delay every call by `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContractInvoker for ScriptedInvoker {
    async fn evaluate(
        &self,
        _channel: &str,
        contract: &str,
        _transaction: &str,
        _args: &[String],
        deadline: Duration,
    ) -> Result<Vec<u8>, InvokeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let answer = async {
            tokio::time::sleep(self.delay).await;
            self.script
                .get(contract)
                .cloned()
                .unwrap_or_else(|| Err(InvokeError::ContractNotFound(contract.to_string())))
                .map(String::into_bytes)
        };
        match tokio::time::timeout(deadline, answer).await {
            Ok(outcome) => outcome,
            Err(_) => Err(InvokeError::DeadlineExceeded(deadline)),
        }
    }
}

/// A ledger backend serving scripted sessions and counting lifecycle events.
pub struct ScriptedBackend {
    script: Script,
    delay: Duration,
    deadlines: CallDeadlines,
    opens: AtomicUsize,
    releases: Arc<AtomicUsize>,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            delay: Duration::ZERO,
            deadlines: CallDeadlines::STANDARD,
            opens: AtomicUsize::new(0),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delay every contract call by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sessions opened so far.
    pub fn opens(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    /// Sessions released so far.
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerBackend for ScriptedBackend {
    async fn open(
        &self,
        _org: OrgIndex,
        _profile: &OrganizationProfile,
        _key_pair: &KeyPair,
    ) -> Result<Box<dyn BackendSession>, ConnectionError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            invoker: Arc::new(ScriptedInvoker::new(self.script.clone()).with_delay(self.delay)),
            deadlines: self.deadlines,
            releases: Arc::clone(&self.releases),
        }))
    }
}

struct ScriptedSession {
    invoker: Arc<ScriptedInvoker>,
    deadlines: CallDeadlines,
    releases: Arc<AtomicUsize>,
}

impl BackendSession for ScriptedSession {
    fn deadlines(&self) -> CallDeadlines {
        self.deadlines
    }

    fn invoker(&self) -> Arc<dyn ContractInvoker> {
        Arc::clone(&self.invoker) as Arc<dyn ContractInvoker>
    }

    fn release(self: Box<Self>) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}
