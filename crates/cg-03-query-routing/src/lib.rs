//! # Query Routing Subsystem
//!
//! Dispatches named read-only ledger queries over an open session and
//! normalizes the heterogeneous result shapes the backend contracts return.
//!
//! ## Architecture
//!
//! - **Domain Layer:** Closed result union with explicit decode/validate
//!   steps; unknown or malformed payloads are rejected, never passed through
//! - **Ports Layer:** The `ContractInvoker` trait the transport plugs into
//! - **Service Layer:** The router, including the multi-contract
//!   aggregation path
//! - **Adapters Layer:** The gateway-backed invoker
//!
//! ## Aggregation
//!
//! When a channel hosts several concurrently-deployed contract instances
//! answering the same logical balance query, the router queries all of them
//! concurrently, drops instances the channel no longer exposes, logs every
//! other per-instance failure, and sums the numeric balances of the
//! instances that answered.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::GatewayInvoker;
pub use domain::{QualityCounts, QueryError, QueryResult, RiskHistogram, UserBalanceRecord};
pub use ports::{ContractInvoker, InvokeError};
pub use service::LedgerQueryRouter;
