use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name given to holdings whose company could not be looked up.
pub const UNKNOWN_HOLDING_NAME: &str = "Unknown Holding";

// Investment record from the investments service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub date: String,
    pub investment_total: f64,
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: String,
    #[serde(default)]
    pub investment_percentage: f64,
}

impl Holding {
    pub fn new(id: impl Into<String>, investment_percentage: f64) -> Self {
        Self {
            id: id.into(),
            investment_percentage,
        }
    }
}

/// Company details as returned by the financial companies service.
///
/// Fields beyond `id` and `name` are kept verbatim in `extra` so the record
/// can be handed back out unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompanyRecord {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompanyRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Sentinel returned when a company lookup fails. Never cached.
    pub fn unknown(id: impl Into<String>) -> Self {
        Self::new(id, UNKNOWN_HOLDING_NAME)
    }
}
