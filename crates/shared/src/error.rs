use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body convention of the items service: `{"detail": ...}`.
///
/// `detail` is usually text, but request validation failures carry an array
/// of `{loc, msg, type}` objects, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    /// Flattens `detail` into display text, if there is any.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::Null => None,
            Value::String(text) => Some(text.clone()),
            Value::Array(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|entry| match entry.get("msg").and_then(Value::as_str) {
                        Some(msg) => msg.to_string(),
                        None => entry.to_string(),
                    })
                    .collect();
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.join("; "))
                }
            }
            other => Some(other.to_string()),
        }
    }
}
