//! The bridge client: pairing plus the lights, groups and scenes resources.

use std::fmt::Display;

use log::{debug, info};
use serde_json::{json, Value};

use crate::config::{BridgeConfig, RetryPolicy};
use crate::discovery::{self, BridgeDescription, DISCOVERY_URL};
use crate::error::{Error, Method, Result};
use crate::lights::LightAttributes;
use crate::registration::{self, Sleeper, ThreadSleeper};
use crate::transport::{Response, Transport};

const DEFAULT_APPLICATION: &str = "hue-bridge";
const DEFAULT_DEVICE: &str = "rust";

/// Client for one bridge.
///
/// Address and username are written during discovery and pairing and only
/// read afterwards. Resource calls fail with [`Error::NotAuthenticated`]
/// until a username is known.
pub struct BridgeClient<T> {
	transport: T,
	sleeper: Box<dyn Sleeper + Send + Sync>,
	retry: RetryPolicy,
	discovery_url: String,
	application: String,
	device: String,
	address: Option<String>,
	base_url: Option<String>,
	username: Option<String>,
	username_url: Option<String>,
}

impl<T: Transport> BridgeClient<T> {
	/// Client with neither address nor username. Does no I/O.
	pub fn new(transport: T) -> Self {
		BridgeClient {
			transport,
			sleeper: Box::new(ThreadSleeper),
			retry: RetryPolicy::default(),
			discovery_url: DISCOVERY_URL.to_string(),
			application: DEFAULT_APPLICATION.to_string(),
			device: DEFAULT_DEVICE.to_string(),
			address: None,
			base_url: None,
			username: None,
			username_url: None,
		}
	}

	/// Ready client for an already paired bridge. Does no I/O.
	pub fn from_config(transport: T, config: &BridgeConfig) -> Self {
		let mut client = Self::new(transport);
		client.set_address(&config.address);
		client.authenticate(&config.username);
		client
	}

	/// Build a ready client from stored credentials, or provision new ones.
	///
	/// With a non-empty address and username this is [`from_config`](Self::from_config).
	/// Otherwise the bridge is paired, and the outcome comes back as
	/// [`Error::SetupRequired`] so the caller can store it and construct again.
	///
	/// Discovery only runs when no address is given. A supplied address is
	/// trusted as is and never re-resolved, so pass `None` to look up a
	/// bridge whose address may have changed.
	pub fn connect(transport: T, address: Option<&str>, username: Option<&str>) -> Result<Self> {
		Self::new(transport).setup(address, username)
	}

	/// [`connect`](Self::connect) for a client already carrying custom settings.
	pub fn setup(mut self, address: Option<&str>, username: Option<&str>) -> Result<Self> {
		let address = address.filter(|a| !a.is_empty());
		let username = username.filter(|u| !u.is_empty());
		if let (Some(address), Some(username)) = (address, username) {
			self.set_address(address);
			self.authenticate(username);
			return Ok(self);
		}

		let address = match address {
			Some(address) => {
				self.set_address(address);
				address.to_string()
			}
			None => self.discover_bridge()?,
		};
		let username = self.register_username()?;
		Err(Error::SetupRequired { address, username })
	}

	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}

	pub fn with_sleeper<S: Sleeper + Send + Sync + 'static>(mut self, sleeper: S) -> Self {
		self.sleeper = Box::new(sleeper);
		self
	}

	pub fn with_discovery_url(mut self, url: &str) -> Self {
		self.discovery_url = url.to_string();
		self
	}

	/// Names reported to the bridge as `<application>#<device><n>` when pairing.
	pub fn with_device_name(mut self, application: &str, device: &str) -> Self {
		self.application = application.to_string();
		self.device = device.to_string();
		self
	}

	pub fn address(&self) -> Option<&str> {
		self.address.as_deref()
	}

	pub fn username(&self) -> Option<&str> {
		self.username.as_deref()
	}

	/// `http://<address>/api`
	pub fn base_url(&self) -> Option<&str> {
		self.base_url.as_deref()
	}

	/// `http://<address>/api/<username>`
	pub fn authenticated_url(&self) -> Option<&str> {
		self.username_url.as_deref()
	}

	/// Address and username, once both are known.
	pub fn config(&self) -> Option<BridgeConfig> {
		match (&self.address, &self.username) {
			(Some(address), Some(username)) => Some(BridgeConfig::new(address, username)),
			_ => None,
		}
	}

	fn set_address(&mut self, address: &str) {
		self.address = Some(address.to_string());
		self.base_url = Some(format!("http://{}/api", address));
	}

	fn authenticate(&mut self, username: &str) {
		if let Some(base_url) = &self.base_url {
			self.username_url = Some(format!("{}/{}", base_url, username));
			self.username = Some(username.to_string());
		}
	}

	/// Look the bridge up through the discovery service and remember its address.
	pub fn discover_bridge(&mut self) -> Result<String> {
		let bridge = discovery::find_bridge(&self.transport, &self.discovery_url)?;
		info!("discovered bridge at {}", bridge.internal_ip_address);
		self.set_address(&bridge.internal_ip_address);
		Ok(bridge.internal_ip_address)
	}

	/// Pair with the bridge, waiting for its link button to be pressed.
	///
	/// Blocks for up to `(max_attempts - 1) * interval`. Running out of
	/// attempts is `Ok(None)`, not an error.
	pub fn register_username(&mut self) -> Result<Option<String>> {
		let base_url = self
			.base_url
			.clone()
			.ok_or_else(|| Error::discovery("bridge address unknown; discover or supply one first", None))?;
		let device_type = registration::device_type(&self.application, &self.device, &mut rand::thread_rng());
		let username = registration::pair(&self.transport, &base_url, &device_type, self.retry, &*self.sleeper);
		if let Some(username) = &username {
			self.authenticate(username);
		}
		Ok(username)
	}

	/// UPnP description of the bridge. Needs an address but no username.
	pub fn describe(&self) -> Result<BridgeDescription> {
		let address = self
			.address
			.as_deref()
			.ok_or_else(|| Error::discovery("bridge address unknown; discover or supply one first", None))?;
		discovery::describe_bridge(&self.transport, address)
	}

	// Lights

	pub fn get_light<I: Display>(&self, light_id: I) -> Result<Value> {
		self.get(&format!("/lights/{}", light_id))
	}

	/// Same as [`get_light`](Self::get_light).
	pub fn show_light_info<I: Display>(&self, light_id: I) -> Result<Value> {
		self.get_light(light_id)
	}

	/// All lights, keyed by id.
	pub fn get_lights(&self) -> Result<Value> {
		self.get("/lights")
	}

	/// Change a light's state. Returns the bridge's per-attribute acknowledgement.
	pub fn set_light<I: Display>(&self, light_id: I, attributes: &LightAttributes) -> Result<Value> {
		self.put(&format!("/lights/{}/state", light_id), &attributes.to_value())
	}

	// Groups

	pub fn create_group<I, S>(&self, lights: I, name: &str) -> Result<Value>
	where
		I: IntoIterator<Item = S>,
		S: Display,
	{
		let lights: Vec<String> = lights.into_iter().map(|id| id.to_string()).collect();
		let body = json!({
			"lights": lights,
			"name": name,
			"type": "LightGroup",
		});
		self.post("/groups", &body)
	}

	pub fn set_group<I: Display>(&self, group_id: I, attributes: &LightAttributes) -> Result<Value> {
		self.put(&format!("/groups/{}/action", group_id), &attributes.to_value())
	}

	/// All groups, keyed by id.
	pub fn get_groups(&self) -> Result<Value> {
		self.get("/groups")
	}

	// Scenes

	/// Recall a scene on a group. Scenes are applied through the group action.
	pub fn set_scene<I: Display>(&self, group_id: I, scene_id: &str) -> Result<Value> {
		self.set_group(group_id, &LightAttributes::new().scene(scene_id))
	}

	/// All scenes, keyed by id.
	pub fn get_scenes(&self) -> Result<Value> {
		self.get("/scenes")
	}

	// Request helpers

	fn resource_url(&self, path: &str) -> Result<String> {
		let username_url = self.username_url.as_deref().ok_or(Error::NotAuthenticated)?;
		Ok(format!("{}{}", username_url, path))
	}

	fn get(&self, path: &str) -> Result<Value> {
		let url = self.resource_url(path)?;
		debug!("GET {}", path);
		into_json(Method::Get, path, self.transport.get(&url, None))
	}

	fn post(&self, path: &str, body: &Value) -> Result<Value> {
		let url = self.resource_url(path)?;
		debug!("POST {}", path);
		into_json(Method::Post, path, self.transport.post(&url, body))
	}

	fn put(&self, path: &str, body: &Value) -> Result<Value> {
		let url = self.resource_url(path)?;
		debug!("PUT {}", path);
		into_json(Method::Put, path, self.transport.put(&url, body))
	}
}

fn into_json<R: Response>(method: Method, path: &str, response: Result<R>) -> Result<Value> {
	response
		.and_then(Response::json)
		.map_err(|e| Error::api_request(method, path, e))
}
