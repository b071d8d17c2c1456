//! Submission snapshot handed to the order-placement collaborator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::cases::CaseDetails;
use crate::core::draft::{Impression, PatientInfo, Priority};

/// Order identifier, formatted as `ORD-<ULID>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(Ulid);

impl OrderId {
    pub const PREFIX: &'static str = "ORD";

    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", Self::PREFIX, self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid = s
            .strip_prefix("ORD-")
            .ok_or_else(|| format!("Order id must start with ORD-: {}", s))?;
        Ulid::from_string(ulid)
            .map(OrderId)
            .map_err(|e| format!("Invalid order id {}: {}", s, e))
    }
}

impl TryFrom<String> for OrderId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.to_string()
    }
}

/// Immutable, fully-validated order produced by `submit`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub id: OrderId,
    pub submitted_at: DateTime<Utc>,
    pub lab_id: String,
    pub case: CaseDetails,
    pub impression: Impression,
    pub material: String,

    /// Absent when the case needs no shade
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shade: Option<String>,

    pub patient: PatientInfo,
    pub priority: Priority,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,

    /// Review summary line at the time of submission
    pub summary: String,
}
