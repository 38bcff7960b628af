use std::env;
use std::time::Duration;

pub const ADDRESS_ENV: &str = "HUE_BRIDGE_ADDRESS";
pub const USERNAME_ENV: &str = "HUE_USERNAME";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Connection settings for an already paired bridge.
///
/// The crate never stores these; callers keep them wherever suits them
/// and hand them back on the next run.
pub struct BridgeConfig {
	pub address: String,
	pub username: String,
}

impl BridgeConfig {
	pub fn new(address: &str, username: &str) -> Self {
		BridgeConfig {
			address: address.to_string(),
			username: username.to_string(),
		}
	}

	/// Read `HUE_BRIDGE_ADDRESS` and `HUE_USERNAME`.
	///
	/// Returns `None` unless both are set and non-empty.
	pub fn from_env() -> Option<Self> {
		Self::from_lookup(|key| env::var(key).ok())
	}

	fn from_lookup<F>(lookup: F) -> Option<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let address = lookup(ADDRESS_ENV).filter(|v| !v.is_empty())?;
		let username = lookup(USERNAME_ENV).filter(|v| !v.is_empty())?;
		Some(BridgeConfig { address, username })
	}
}

/// How long the pairing handshake waits for the link button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	/// Total pairing requests, the first one included.
	pub max_attempts: u32,
	/// Pause before every request after the first.
	pub interval: Duration,
}

impl RetryPolicy {
	pub const DEFAULT_ATTEMPTS: u32 = 30;
	pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

	pub fn new(max_attempts: u32, interval: Duration) -> Self {
		RetryPolicy {
			max_attempts,
			interval,
		}
	}
}

impl Default for RetryPolicy {
	fn default() -> Self {
		RetryPolicy::new(Self::DEFAULT_ATTEMPTS, Self::DEFAULT_INTERVAL)
	}
}
