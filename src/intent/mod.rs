//! Structured intents parsed from model output.

pub mod resolver;

use serde_json::Value;

use crate::error::{AppError, AppResult};

/// The four things a prompt can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Read,
    Update,
    Delete,
}

impl Intent {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "create" => Some(Self::Create),
            "read" => Some(Self::Read),
            "update" => Some(Self::Update),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// One request's worth of model output. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIntent {
    pub intent: Intent,
    pub task: Option<String>,
    pub new_task: Option<String>,
    pub id: Option<i64>,
    /// 1-based; zero and negatives count back from the end.
    pub position: Option<i64>,
    pub done: Option<bool>,
}

/// Strip an optional leading ```json (or bare ```) marker and an optional
/// trailing ``` marker. Either may be missing; the tag is case-insensitive.
pub fn extract_json(text: &str) -> &str {
    let mut json = text.trim();

    if let Some(after) = json.strip_prefix("```") {
        json = match after.get(..4) {
            Some(tag) if tag.eq_ignore_ascii_case("json") => &after[4..],
            _ => after,
        };
    }
    if let Some(before) = json.strip_suffix("```") {
        json = before;
    }

    json.trim()
}

/// Integers, or floats with no fractional part. Strings never count.
fn as_integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

fn non_blank(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse raw model output into a [`ParsedIntent`].
///
/// Invalid JSON (or JSON that isn't an object) is a [`AppError::Parse`];
/// a well-formed object naming no known intent is a validation error.
pub fn parse_intent(raw: &str) -> AppResult<ParsedIntent> {
    let json_str = extract_json(raw);

    let value: Value = serde_json::from_str(json_str).map_err(|e| {
        tracing::debug!(%raw, "model output is not JSON");
        AppError::Parse(e.to_string())
    })?;
    let obj = value.as_object().ok_or_else(|| {
        tracing::debug!(%raw, "model output is not a JSON object");
        AppError::Parse("expected a JSON object".to_string())
    })?;

    let intent = match obj.get("intent").and_then(Value::as_str) {
        Some(name) => Intent::from_name(name)
            .ok_or_else(|| AppError::validation(format!("unknown intent: {name}")))?,
        None => return Err(AppError::validation("model output has no intent")),
    };

    Ok(ParsedIntent {
        intent,
        task: non_blank(obj.get("task")),
        new_task: non_blank(obj.get("newTask")),
        id: obj.get("id").and_then(as_integer),
        position: obj.get("position").and_then(as_integer),
        done: obj.get("done").and_then(Value::as_bool),
    })
}
