use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicU64, Ordering};

// Ids stay distinct even when two calls land in the same millisecond.
static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub name: String,
    pub parameters: Map<String, Value>,
}

impl ToolCallRequest {
    pub fn new(name: &str, parameters: Map<String, Value>) -> Self {
        Self {
            kind: "toolCall".to_string(),
            id: next_request_id(),
            name: name.to_string(),
            parameters,
        }
    }

    /// Serialize to the single newline-terminated line the server reads.
    pub fn to_wire_line(&self) -> crate::error::Result<String> {
        let mut line = serde_json::to_string(self)?;
        line.push('\n');
        Ok(line)
    }
}

fn next_request_id() -> String {
    let seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("test-{}-{}", Local::now().timestamp_millis(), seq)
}

/// A response passes the soft check when its `content` field is truthy.
/// The shape of `content` is not validated: `[]` and `{}` count as OK,
/// while a missing field, `null`, `false`, `0` and `""` do not.
pub fn content_ok(response: &Value) -> bool {
    match response.get("content") {
        None => false,
        Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}
