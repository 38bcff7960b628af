//! Helpers for reading the bridge's acknowledgement arrays.
//!
//! Writes come back as `[{"success": {...}}, {"error": {...}}, ...]`, one
//! entry per attribute. The client returns these untouched; these helpers
//! are for callers who want to inspect them.

use serde_json::Value;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// An `error` entry reported by the bridge
pub struct ApiError {
	#[serde(rename = "type")]
	pub kind: u16,
	#[serde(default)]
	pub address: String,
	#[serde(default)]
	pub description: String,
}

impl ApiError {
	/// Error type the bridge reports while the link button has not been pressed.
	pub const LINK_BUTTON_NOT_PRESSED: u16 = 101;
}

/// Collect every `error` entry of an acknowledgement array.
pub fn api_errors(value: &Value) -> Vec<ApiError> {
	entries(value)
		.filter_map(|entry| entry.get("error"))
		.filter_map(|error| serde_json::from_value(error.clone()).ok())
		.collect()
}

/// True when the acknowledgement is non-empty and holds only `success` entries.
pub fn is_success(value: &Value) -> bool {
	let mut entries = entries(value).peekable();
	entries.peek().is_some() && entries.all(|entry| entry.get("success").is_some())
}

fn entries(value: &Value) -> impl Iterator<Item = &Value> {
	value.as_array().into_iter().flatten()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_api_errors() {
		let ack = json!([
			{"success": {"/lights/5/state/on": true}},
			{"error": {"type": 201, "address": "/lights/5/state/bri", "description": "parameter, bri, is not modifiable. Device is set to off."}}
		]);
		let errors = api_errors(&ack);
		assert_eq!(errors.len(), 1);
		assert_eq!(errors[0].kind, 201);
		assert_eq!(errors[0].address, "/lights/5/state/bri");
		assert!(!is_success(&ack));
	}

	#[test]
	fn test_link_button() {
		let ack = json!([{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]);
		assert_eq!(api_errors(&ack)[0].kind, ApiError::LINK_BUTTON_NOT_PRESSED);
	}

	#[test]
	fn test_is_success() {
		assert!(is_success(&json!([{"success": {"/groups/1/action/on": true}}])));
		assert!(!is_success(&json!([])));
		assert!(!is_success(&json!({"1": {"name": "Hue go"}})));
	}
}
