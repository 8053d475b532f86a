//! # Shared Types Crate
//!
//! Cross-subsystem types for the Consortium Gate workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: organization profiles and the registry are
//!   defined here and nowhere else.
//! - **Startup-Immutable**: the [`OrganizationRegistry`] is built once at
//!   process start and only ever read afterwards; no module-level mutable
//!   state is allowed anywhere in the workspace.
//! - **Registration Order Is Authoritative**: organizations are addressed by
//!   1-based [`OrgIndex`] in the order they were registered, and every
//!   cross-organization scan in the workspace walks that order.

pub mod config;
pub mod organization;
pub mod pem;

pub use config::{ConfigError, RegistryConfig};
pub use organization::{OrgIndex, OrganizationProfile, OrganizationRegistry};
pub use pem::{canonical_certificate, unescape_newlines};
