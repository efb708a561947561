//! Small response envelopes that have no domain meaning.

use serde::Deserialize;
use serde_json::Value;

/// `GET /health`.
#[derive(Debug, Clone, Deserialize, serde::Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// FastAPI error body: `detail` is a string, or a list of
/// `{loc, msg, type}` entries for 422 responses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn parse(body: &str) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .detail
            .and_then(|detail| flatten_detail(&detail))
            .or(parsed.message)
            .filter(|m| !m.trim().is_empty())
    }
}

fn flatten_detail(detail: &Value) -> Option<String> {
    match detail {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let messages: Vec<String> = items.iter().filter_map(flatten_detail).collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        Value::Object(map) => map
            .get("msg")
            .or_else(|| map.get("message"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}
