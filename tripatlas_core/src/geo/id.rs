//! Location id handling.
//!
//! Clients may supply their own ids as JSON strings or numbers; everything
//! else gets a server-generated id. Ids are always stored in string form.

use serde_json::Value;
use uuid::Uuid;

/// Normalize a client-supplied id to its string form.
///
/// Returns `None` when the value is absent or neither a string nor a number,
/// in which case the caller assigns a generated id.
pub fn normalize_id(value: Option<&Value>) -> Option<String> {
	match value {
		Some(Value::String(text)) => Some(text.clone()),
		Some(Value::Number(number)) => Some(number.to_string()),
		_ => None,
	}
}

/// Generate a fresh location id.
pub fn generate_id() -> String {
	Uuid::new_v4().to_string()
}
