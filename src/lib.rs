//! Blocking client for the local REST API of a Hue bridge.
//!
//! A first run discovers the bridge and pairs with it; the resulting address
//! and username are handed back to the caller for safekeeping:
//!
//! ```no_run
//! use hue_bridge::{BridgeClient, Error, HttpTransport, LightAttributes};
//!
//! # fn main() -> hue_bridge::Result<()> {
//! match BridgeClient::connect(HttpTransport::new(), None, None) {
//!     Err(Error::SetupRequired { address, username }) => {
//!         println!("store address={} username={:?}", address, username);
//!     }
//!     Ok(client) => {
//!         client.set_light(1, &LightAttributes::new().on(true).bri(200))?;
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
#[macro_use]
extern crate serde_derive;
extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate serde_xml_rs;
pub mod error;
pub use error::{Error, Method, Result};
pub mod config;
pub use config::{BridgeConfig, RetryPolicy};
pub mod transport;
pub use transport::{HttpTransport, Response, Transport};
pub mod lights;
pub use lights::{Light, LightAttributes, LightState};
pub mod groups;
pub use groups::{Group, GroupType};
pub mod response;
pub use response::ApiError;
pub mod registration;
pub use registration::{Sleeper, ThreadSleeper};
pub mod bridge;
pub use bridge::BridgeClient;
mod discovery;
pub use discovery::{describe_bridge, find_bridge, find_bridges, BridgeDescription, DiscoveredBridge, DISCOVERY_URL};
#[cfg(test)]
mod testing;
