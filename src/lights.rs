use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::Result;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
/// A partial set of light or group attributes to send to the bridge.
///
/// Keys are not checked here; the bridge validates them and reports
/// rejected ones in its acknowledgement.
pub struct LightAttributes(Map<String, Value>);

impl LightAttributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set an arbitrary attribute.
	pub fn set<V: Into<Value>>(mut self, name: &str, value: V) -> Self {
		self.0.insert(name.to_string(), value.into());
		self
	}

	pub fn on(self, on: bool) -> Self {
		self.set("on", on)
	}

	/// Brightness, 1 to 254
	pub fn bri(self, bri: u8) -> Self {
		self.set("bri", bri)
	}

	/// Hue, 0 to 65535
	pub fn hue(self, hue: u16) -> Self {
		self.set("hue", hue)
	}

	/// Saturation, 0 to 254
	pub fn sat(self, sat: u8) -> Self {
		self.set("sat", sat)
	}

	/// Color temperature in mired
	pub fn ct(self, ct: u16) -> Self {
		self.set("ct", ct)
	}

	/// CIE color space coordinates
	pub fn xy(self, x: f64, y: f64) -> Self {
		self.set("xy", vec![x, y])
	}

	pub fn alert(self, alert: &str) -> Self {
		self.set("alert", alert)
	}

	pub fn effect(self, effect: &str) -> Self {
		self.set("effect", effect)
	}

	/// Transition duration in multiples of 100ms
	pub fn transition_time(self, deciseconds: u16) -> Self {
		self.set("transitiontime", deciseconds)
	}

	/// Recall a scene. Only meaningful as a group action.
	pub fn scene(self, scene_id: &str) -> Self {
		self.set("scene", scene_id)
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.0.get(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn to_value(&self) -> Value {
		Value::Object(self.0.clone())
	}
}

impl From<Map<String, Value>> for LightAttributes {
	fn from(map: Map<String, Value>) -> Self {
		LightAttributes(map)
	}
}

impl<K: Into<String>> std::iter::FromIterator<(K, Value)> for LightAttributes {
	fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
		LightAttributes(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
	}
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
/// Attributes of a light
pub struct Light {
	pub uniqueid: String,
	#[serde(rename = "type")]
	pub light_type: String,
	pub name: String,
	pub modelid: String,
	pub manufacturername: String,
	pub productid: String,
	pub state: LightState,
	pub swversion: String,
	/// Fields this crate doesn't model
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
/// Current state of a light
pub struct LightState {
	pub on: bool,
	/// Brightness
	pub bri: Option<u8>,
	pub hue: Option<u16>,
	/// Saturation
	pub sat: Option<u8>,
	/// Color tone
	pub ct: Option<u16>,
	pub xy: Option<[f64; 2]>,
	/// Alert mode
	pub alert: Option<String>,
	pub effect: Option<String>,
	pub colormode: Option<String>,
	pub mode: Option<String>,
	pub reachable: bool,
	/// Vendor-defined fields
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Typed view of a `get_lights` response, keyed by light id.
pub fn decode_lights(value: Value) -> Result<BTreeMap<String, Light>> {
	Ok(serde_json::from_value(value)?)
}

/// Typed view of a `get_light` response.
pub fn decode_light(value: Value) -> Result<Light> {
	Ok(serde_json::from_value(value)?)
}
