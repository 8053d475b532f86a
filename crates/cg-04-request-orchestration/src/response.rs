//! Outbound response shape.

use cg_03_query_routing::QueryResult;
use serde::Serialize;

/// The response value emitted for every request, success or failure.
///
/// Serializes as `{ "success": true, "<query_kind>": { ... } }` on success
/// and `{ "success": false, "error": "..." }` on failure; absent fields are
/// omitted entirely.
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    /// Whether the request produced a result.
    pub success: bool,
    /// Failure description, present iff `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The typed result, present iff `success` is true. A `None` flattens
    /// to nothing, so failures carry no result key at all.
    #[serde(flatten)]
    pub result: Option<QueryResult>,
}

impl QueryResponse {
    /// A successful response carrying a typed result.
    pub fn success(result: QueryResult) -> Self {
        Self {
            success: true,
            error: None,
            result: Some(result),
        }
    }

    /// A failed response carrying an error description.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            result: None,
        }
    }
}
