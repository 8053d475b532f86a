//! Domain layer: typed query results and the query error taxonomy.

pub mod errors;
pub mod results;

pub use errors::QueryError;
pub use results::{QualityCounts, QueryResult, RiskHistogram, UserBalanceRecord};
