//! Ports layer: the registry interface organizations plug into.

pub mod outbound;

pub use outbound::{MembershipRegistry, RegistryError};
