//! Finding bridges on the local network.

use log::debug;

use crate::error::{Error, Result};
use crate::transport::{Response, Transport};

/// Hosted discovery service listing the bridges seen from the caller's network.
pub const DISCOVERY_URL: &str = "https://discovery.meethue.com";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// A bridge listed by the discovery service
pub struct DiscoveredBridge {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(rename = "internalipaddress")]
	pub internal_ip_address: String,
	#[serde(default)]
	pub port: Option<u16>,
}

/// Ask the discovery service at `url` for all known bridges.
///
/// Every failure, be it the request, the body or its shape, is reported as
/// [`Error::Discovery`] with the underlying error attached as its source.
pub fn find_bridges<T: Transport + ?Sized>(transport: &T, url: &str) -> Result<Vec<DiscoveredBridge>> {
	let body = transport
		.get(url, None)
		.and_then(Response::json)
		.map_err(|e| Error::discovery("discovery request failed", Some(e)))?;
	let bridges: Vec<DiscoveredBridge> = serde_json::from_value(body)
		.map_err(|e| Error::discovery("malformed discovery response", Some(e.into())))?;
	debug!("discovery listed {} bridge(s)", bridges.len());
	Ok(bridges)
}

/// The first bridge the discovery service lists.
pub fn find_bridge<T: Transport + ?Sized>(transport: &T, url: &str) -> Result<DiscoveredBridge> {
	find_bridges(transport, url)?
		.into_iter()
		.next()
		.ok_or_else(|| {
			Error::discovery(
				"no bridge found; make sure the bridge and this device share a network",
				None,
			)
		})
}

#[derive(Deserialize, Debug)]
struct DescriptionRoot {
	device: BridgeDescription,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// UPnP device description served by the bridge at `/description.xml`
pub struct BridgeDescription {
	#[serde(rename = "friendlyName")]
	pub friendly_name: String,
	#[serde(default)]
	pub manufacturer: String,
	#[serde(rename = "modelName", default)]
	pub model_name: String,
	#[serde(rename = "modelNumber", default)]
	pub model_number: String,
	#[serde(rename = "serialNumber", default)]
	pub serial_number: String,
	#[serde(rename = "UDN", default)]
	pub udn: String,
}

pub(crate) fn description_url(address: &str) -> String {
	format!("http://{}/description.xml", address)
}

pub(crate) fn parse_description(xml: &str) -> Result<BridgeDescription> {
	let root: DescriptionRoot = serde_xml_rs::from_str(xml)?;
	Ok(root.device)
}

/// Fetch and parse the description document of the bridge at `address`.
pub fn describe_bridge<T: Transport + ?Sized>(transport: &T, address: &str) -> Result<BridgeDescription> {
	let xml = transport.get(&description_url(address), None)?.text()?;
	parse_description(&xml)
}
