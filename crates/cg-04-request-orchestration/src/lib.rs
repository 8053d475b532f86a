//! # Request Orchestration Subsystem
//!
//! Composes the whole pipeline once per inbound request:
//!
//! ```text
//! Unverified -> KeyVerified -> Resolved -> Connected -> Queried -> Released
//! ```
//!
//! Transition failures short-circuit to `Released` with an error payload.
//! `Connected` always reaches `Released`, even when the query fails; the
//! session is released on every exit path, and nothing is ever thrown past
//! the orchestrator boundary. Every outcome becomes a
//! `{ success, error?, <result>? }` response value.

pub mod backend;
pub mod errors;
pub mod orchestrator;
pub mod request;
pub mod response;

pub use backend::{BackendSession, GatewayBackend, LedgerBackend};
pub use errors::OrchestratorError;
pub use orchestrator::RequestOrchestrator;
pub use request::{QueryKind, QueryRequest};
pub use response::QueryResponse;
