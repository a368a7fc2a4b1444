//! Display mapping for raw result fields, including the pending sentinel.

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Shown for a result that has not been drawn yet.
pub const PENDING_LABEL: &str = "Pending";
/// Shown for an absent or empty result.
pub const MISSING_LABEL: &str = "N/A";

const PENDING_SENTINEL: &str = "-1";

/// A result field after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultValue {
    #[default]
    Missing,
    Pending,
    Announced(String),
}

impl ResultValue {
    /// Classify a raw JSON field. Strings and numbers are both accepted; `0` is a real result.
    pub fn from_json(raw: Option<&Value>) -> Self {
        match raw {
            None | Some(Value::Null) => ResultValue::Missing,
            Some(Value::String(s)) => Self::from_text(s),
            Some(Value::Number(n)) => {
                if n.as_i64() == Some(-1) || n.as_f64() == Some(-1.0) {
                    ResultValue::Pending
                } else {
                    ResultValue::Announced(n.to_string())
                }
            }
            Some(Value::Bool(false)) => ResultValue::Missing,
            Some(Value::Bool(true)) => ResultValue::Announced(true.to_string()),
            Some(other) => ResultValue::Announced(other.to_string()),
        }
    }

    pub fn from_text(raw: &str) -> Self {
        if raw.is_empty() {
            ResultValue::Missing
        } else if raw == PENDING_SENTINEL {
            ResultValue::Pending
        } else {
            ResultValue::Announced(raw.to_string())
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ResultValue::Pending)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, ResultValue::Missing)
    }

    pub fn label(&self) -> &str {
        match self {
            ResultValue::Missing => MISSING_LABEL,
            ResultValue::Pending => PENDING_LABEL,
            ResultValue::Announced(v) => v,
        }
    }
}

impl std::fmt::Display for ResultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ResultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Map a raw result field straight to its display string.
pub fn format_result(raw: Option<&Value>) -> String {
    ResultValue::from_json(raw).label().to_string()
}
