use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::Result;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
/// Kind of group, as reported in its `type` field
pub enum GroupType {
	LightGroup,
	Room,
	Zone,
	Entertainment,
	Luminaire,
	LightSource,
	#[serde(other)]
	Other,
}

impl Default for GroupType {
	fn default() -> Self {
		GroupType::LightGroup
	}
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
/// A named set of lights
pub struct Group {
	/// Filled from the key of the `get_groups` response
	#[serde(skip)]
	pub id: String,
	pub name: String,
	pub lights: Vec<String>,
	#[serde(rename = "type")]
	pub group_type: GroupType,
	/// Last action sent to the group
	pub action: Option<Value>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Typed view of a `get_groups` response, keyed by group id.
pub fn decode_groups(value: Value) -> Result<BTreeMap<String, Group>> {
	let mut groups: BTreeMap<String, Group> = serde_json::from_value(value)?;
	for (id, group) in groups.iter_mut() {
		group.id = id.clone();
	}
	Ok(groups)
}

/// Id of a freshly created group, from the bridge's `[{"success": {"id": ...}}]`.
pub fn created_group_id(value: &Value) -> Option<&str> {
	value.get(0)?.get("success")?.get("id")?.as_str()
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_decode_groups() {
		let groups = decode_groups(json!({
			"1": {"name": "Living room", "lights": ["1", "2"], "type": "Room", "class": "Living room",
				"action": {"on": true, "bri": 254}},
			"2": {"name": "Custom", "lights": ["3"], "type": "LightGroup"},
			"3": {"name": "Future", "lights": [], "type": "SomethingNew"}
		}))
		.unwrap();
		assert_eq!(groups["1"].id, "1");
		assert_eq!(groups["1"].group_type, GroupType::Room);
		assert_eq!(groups["1"].lights, vec!["1", "2"]);
		assert_eq!(groups["1"].extra.get("class"), Some(&json!("Living room")));
		assert_eq!(groups["2"].group_type, GroupType::LightGroup);
		assert_eq!(groups["3"].group_type, GroupType::Other);
	}

	#[test]
	fn test_created_group_id() {
		assert_eq!(created_group_id(&json!([{"success": {"id": "7"}}])), Some("7"));
		assert_eq!(created_group_id(&json!([{"error": {"type": 301}}])), None);
	}
}
