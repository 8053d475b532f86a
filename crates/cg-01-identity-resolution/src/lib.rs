//! # Identity Resolution Subsystem
//!
//! Verifies a client-supplied key/certificate pair and determines which
//! organization's membership registry owns the certificate.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture with:
//! - **Domain Layer:** Pure credential logic (key-pair consistency, wallet
//!   record shapes, error taxonomy)
//! - **Ports Layer:** The `MembershipRegistry` trait each organization's
//!   store must implement
//! - **Service Layer:** The cross-organization resolver
//! - **Adapters Layer:** In-memory and file-system wallet stores
//!
//! ## Resolution Policy
//!
//! Organizations are searched concurrently, but outcomes are scanned in
//! registration order and the first match wins. A certificate registered
//! with two organizations therefore resolves to the lower-numbered one;
//! registry disjointness is owned by the registration service, not enforced
//! here.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{AuthError, Credential, IdentityRecord, KeyPair, Principal};
pub use ports::{MembershipRegistry, RegistryError};
pub use service::IdentityResolver;
