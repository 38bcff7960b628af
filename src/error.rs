use std::fmt;

/// HTTP method of a bridge request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
	Get,
	Put,
	Post,
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Method::Get => "GET",
			Method::Put => "PUT",
			Method::Post => "POST",
		})
	}
}

/// Everything that can go wrong while talking to a bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The discovery service could not be reached, answered with something
	/// unreadable, or listed no bridges.
	#[error("bridge discovery failed: {reason}")]
	Discovery {
		reason: String,
		#[source]
		source: Option<Box<Error>>,
	},

	/// A resource operation was attempted before a username was obtained.
	#[error("no username registered with the bridge")]
	NotAuthenticated,

	/// A resource request failed in the transport or while decoding the body.
	#[error("{method} {path} failed: {source}")]
	ApiRequest {
		method: Method,
		path: String,
		#[source]
		source: Box<Error>,
	},

	/// The client was built without credentials and ran the provisioning flow.
	/// Persist these values and pass them in on the next construction.
	#[error(
		"bridge setup required: address {address}, username {}",
		.username.as_deref().unwrap_or("<none, press the link button and retry>")
	)]
	SetupRequired {
		address: String,
		username: Option<String>,
	},

	#[error("http error: {0}")]
	Http(#[from] reqwest::Error),

	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("bridge description error: {0}")]
	Description(#[from] serde_xml_rs::Error),

	#[error("transport error: {0}")]
	Transport(String),
}

impl Error {
	pub(crate) fn discovery(reason: &str, source: Option<Error>) -> Self {
		Error::Discovery {
			reason: reason.to_string(),
			source: source.map(Box::new),
		}
	}

	pub(crate) fn api_request(method: Method, path: &str, source: Error) -> Self {
		Error::ApiRequest {
			method,
			path: path.to_string(),
			source: Box::new(source),
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
	use super::*;
	use std::error::Error as _;

	#[test]
	fn test_api_request_keeps_context() {
		let err = Error::api_request(
			Method::Put,
			"/lights/5/state",
			Error::Transport("connection reset".into()),
		);
		assert_eq!(
			err.to_string(),
			"PUT /lights/5/state failed: transport error: connection reset"
		);
		assert!(err.source().is_some());
	}

	#[test]
	fn test_discovery_keeps_cause() {
		let err = Error::discovery("request failed", Some(Error::Transport("dns".into())));
		let cause = err.source().map(|e| e.to_string());
		assert_eq!(cause.as_deref(), Some("transport error: dns"));

		let bare = Error::discovery("no bridges found", None);
		assert!(bare.source().is_none());
	}

	#[test]
	fn test_setup_required_message() {
		let err = Error::SetupRequired {
			address: "10.0.0.5".into(),
			username: None,
		};
		assert!(err.to_string().contains("10.0.0.5"));
		assert!(err.to_string().contains("press the link button"));
	}
}
