//! Service layer: the query router.

pub mod router;

pub use router::LedgerQueryRouter;
