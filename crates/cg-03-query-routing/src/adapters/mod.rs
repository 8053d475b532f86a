//! Adapters layer: the gateway-backed invoker.

pub mod gateway;

pub use gateway::GatewayInvoker;
