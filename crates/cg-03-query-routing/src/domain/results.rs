//! Typed query results.
//!
//! Each backend contract answers in its own JSON shape. Payloads are
//! decoded into one of a closed set of result types with an explicit
//! validation step per query kind; anything that does not fit is rejected
//! as [`QueryError::MalformedPayload`] rather than passed through.

use serde::{Deserialize, Serialize};

use crate::domain::errors::QueryError;

/// The normalized result of one ledger query.
///
/// Callers must match on the variant; the payload shapes are not
/// interchangeable across query kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryResult {
    /// A user's settlement account record.
    UserBalance(UserBalanceRecord),
    /// Hazard counts bucketed by severity over a time range.
    RiskHistogram(RiskHistogram),
    /// Production quality counts over a time range.
    QualityCounts(QualityCounts),
}

/// A user's account record on the settlement channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBalanceRecord {
    /// Ledger-assigned user id.
    pub id: String,
    /// Registered display name.
    pub name: String,
    /// Token balance.
    pub balance: i64,
}

/// Balance arrives as a JSON string from older contract builds and as a
/// number from newer ones; both decode.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBalance {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
struct RawUserRecord {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    balance: Option<RawBalance>,
}

impl UserBalanceRecord {
    /// Decode and validate a balance query payload.
    ///
    /// A record whose fields are all empty strings is how the contract
    /// reports an unknown user; that surfaces as
    /// [`QueryError::DomainInvalid`], never as a zero-value success.
    pub fn decode(payload: &[u8]) -> Result<Self, QueryError> {
        let raw: RawUserRecord = decode_json(payload)?;

        let balance_text = match &raw.balance {
            None => String::new(),
            Some(RawBalance::Text(text)) => text.clone(),
            Some(RawBalance::Number(n)) => n.to_string(),
        };
        if raw.id.is_empty() && raw.name.is_empty() && balance_text.is_empty() {
            return Err(QueryError::DomainInvalid("user does not exist".into()));
        }

        let balance = balance_text
            .parse::<i64>()
            .map_err(|_| QueryError::MalformedPayload(format!("balance {balance_text:?} is not an integer")))?;

        Ok(Self {
            id: raw.id,
            name: raw.name,
            balance,
        })
    }
}

/// Hazard counts bucketed by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskHistogram {
    /// Imminent collision warnings.
    pub critical: u64,
    /// Near-range warnings.
    pub warning: u64,
    /// Elevated risk.
    #[serde(rename = "highRisk")]
    pub high_risk: u64,
    /// Low risk.
    #[serde(rename = "lowRisk")]
    pub low_risk: u64,
    /// No risk detected.
    #[serde(rename = "noRisk")]
    pub no_risk: u64,
}

impl RiskHistogram {
    /// Decode a risk range query payload.
    pub fn decode(payload: &[u8]) -> Result<Self, QueryError> {
        decode_json(payload)
    }
}

/// Production quality counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityCounts {
    /// Parts produced in the period.
    pub total: u64,
    /// Parts meeting the quality bar.
    #[serde(rename = "high_quality")]
    pub high: u64,
    /// Parts below the quality bar.
    #[serde(rename = "low_quality")]
    pub low: u64,
}

impl QualityCounts {
    /// Decode a quality range query payload.
    ///
    /// The contract answers with an array; the first element is the
    /// canonical current-period result. That is how the backend behaves,
    /// so it is preserved here rather than papered over.
    pub fn decode_series(payload: &[u8]) -> Result<Self, QueryError> {
        let series: Vec<QualityCounts> = decode_json(payload)?;
        series
            .into_iter()
            .next()
            .ok_or_else(|| QueryError::MalformedPayload("empty quality series".into()))
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(payload: &[u8]) -> Result<T, QueryError> {
    let text = std::str::from_utf8(payload)
        .map_err(|e| QueryError::MalformedPayload(format!("payload is not UTF-8: {e}")))?;
    serde_json::from_str(text).map_err(|e| QueryError::MalformedPayload(e.to_string()))
}
