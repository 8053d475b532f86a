//! Adapters layer: concrete membership stores.

pub mod file_wallet;
pub mod memory;

pub use file_wallet::FileWallet;
pub use memory::InMemoryRegistry;
