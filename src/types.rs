use serde::{Deserialize, Serialize};

/// Free-form property bag attached to players, templates and tokens.
pub type Props = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Fee {
    pub fee_percentage: f64,
    pub fee_type: String,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Count {
    pub count: u64,
}

/// A quantity of one token. Amounts are decimal strings.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    pub token_id: u64,
    pub amount: String,
}

impl TokenAmount {
    pub fn new(token_id: u64, amount: impl Into<String>) -> Self {
        Self {
            token_id,
            amount: amount.into(),
        }
    }
}
