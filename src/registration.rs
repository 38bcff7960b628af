//! Link-button pairing.
//!
//! The bridge hands out a username only for a short while after its
//! physical link button was pressed, so pairing polls it on a fixed
//! interval until it answers with `success.username` or the attempt
//! budget runs out.

use std::thread;
use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;
use serde_json::{json, Value};

use crate::config::RetryPolicy;
use crate::error::Result;
use crate::response::api_errors;
use crate::transport::{Response, Transport};

/// Longest `devicetype` the bridge accepts.
pub const DEVICE_TYPE_MAX_LEN: usize = 40;
/// Longest application name, the part before `#`.
pub const APPLICATION_MAX_LEN: usize = 20;
/// Longest device name, the part after `#`, suffix included.
pub const DEVICE_MAX_LEN: usize = 19;

/// Blocks the calling thread between pairing attempts.
pub trait Sleeper {
	fn sleep(&self, duration: Duration);
}

/// Sleeps on the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
	fn sleep(&self, duration: Duration) {
		thread::sleep(duration);
	}
}

/// Build `<application>#<device><n>` with a random `n` in `0..=100`, so two
/// devices of the same kind pairing at once don't collide.
///
/// Long names are shortened before the suffix is appended, so the suffix
/// always survives the bridge's length limits.
pub(crate) fn device_type<R: Rng + ?Sized>(application: &str, device: &str, rng: &mut R) -> String {
	let suffix = rng.gen_range(0..=100u8).to_string();
	let application: String = application.chars().take(APPLICATION_MAX_LEN).collect();
	let device: String = device.chars().take(DEVICE_MAX_LEN - suffix.len()).collect();
	format!("{}#{}{}", application, device, suffix)
}

pub(crate) fn pairing_body(device_type: &str) -> Value {
	json!({ "devicetype": device_type })
}

/// Username from the first element of a pairing response.
pub(crate) fn extract_username(response: &Value) -> Option<String> {
	response
		.get(0)?
		.get("success")?
		.get("username")?
		.as_str()
		.filter(|username| !username.is_empty())
		.map(String::from)
}

/// Run the pairing loop against `url` (the bridge's `/api` root).
///
/// Returns `None` when the budget is spent without the button being pressed.
pub(crate) fn pair<T, S>(
	transport: &T,
	url: &str,
	device_type: &str,
	policy: RetryPolicy,
	sleeper: &S,
) -> Option<String>
where
	T: Transport + ?Sized,
	S: Sleeper + ?Sized,
{
	let body = pairing_body(device_type);
	info!(
		"pairing as {:?}: press the link button on the bridge within {:?}",
		device_type,
		policy.interval * policy.max_attempts.saturating_sub(1)
	);
	for attempt in 1..=policy.max_attempts {
		if attempt > 1 {
			sleeper.sleep(policy.interval);
		}
		match attempt_pairing(transport, url, &body) {
			Ok(Some(username)) => {
				info!("paired with bridge after {} attempt(s)", attempt);
				return Some(username);
			}
			Ok(None) => debug!("pairing attempt {}/{} refused", attempt, policy.max_attempts),
			Err(err) => debug!(
				"pairing attempt {}/{} failed: {}",
				attempt, policy.max_attempts, err
			),
		}
	}
	warn!(
		"no username granted after {} attempts; was the link button pressed?",
		policy.max_attempts
	);
	None
}

fn attempt_pairing<T: Transport + ?Sized>(transport: &T, url: &str, body: &Value) -> Result<Option<String>> {
	let response = transport.post(url, body)?.json()?;
	for error in api_errors(&response) {
		debug!("bridge says: {} (type {})", error.description, error.kind);
	}
	Ok(extract_username(&response))
}
