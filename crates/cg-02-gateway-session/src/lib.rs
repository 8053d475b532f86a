//! # Gateway Session Subsystem
//!
//! Opens an authenticated, TLS-secured channel to one organization's
//! gateway endpoint and owns the per-call deadline budgets for everything
//! sent over it.
//!
//! ## Trust Model
//!
//! The transport trusts exactly one root: the target organization's own CA
//! certificate. The TLS peer-name check is overridden to the profile's
//! `tls_host_override` because deployment endpoints and certificate subject
//! names diverge in this network topology; the override pins the expected
//! peer name while the organization CA remains the root of trust.
//!
//! ## Resource Discipline
//!
//! A [`Session`] exclusively owns its transport channel. It is released
//! exactly once via [`Session::release`], which consumes the value; the
//! borrow checker makes double release unrepresentable.

pub mod client;
pub mod deadlines;
pub mod errors;
pub mod identity;
pub mod manager;
pub mod proto;
pub mod session;

pub use client::{CallError, GatewayClient};
pub use deadlines::CallDeadlines;
pub use errors::ConnectionError;
pub use identity::{EcdsaSigner, SigningIdentity};
pub use manager::ConnectionManager;
pub use session::Session;
