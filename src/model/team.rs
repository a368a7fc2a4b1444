use serde::{Deserialize, Serialize};

/// A named recurring draw with its usual daily slot.
///
/// `name` is the join key for results and is never trimmed or re-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    #[serde(default, alias = "time", alias = "scheduledTime")]
    pub scheduled_time: Option<String>,
}

/// Body for creating or editing a team through the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<String>,
}
