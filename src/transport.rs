//! The HTTP seam between the client and the network.

use serde_json::Value;

use crate::error::{Error, Result};

/// A bridge response. Consuming it releases the underlying connection.
pub trait Response {
	/// Decode the body as JSON. Fails on non-JSON bodies.
	fn json(self) -> Result<Value>;

	/// Read the body as text.
	fn text(self) -> Result<String>;
}

/// Anything able to issue the three request kinds the bridge API needs.
pub trait Transport {
	type Response: Response;

	fn get(&self, url: &str, body: Option<&Value>) -> Result<Self::Response>;
	fn post(&self, url: &str, body: &Value) -> Result<Self::Response>;
	fn put(&self, url: &str, body: &Value) -> Result<Self::Response>;
}

impl<'a, T: Transport + ?Sized> Transport for &'a T {
	type Response = T::Response;

	fn get(&self, url: &str, body: Option<&Value>) -> Result<Self::Response> {
		(**self).get(url, body)
	}

	fn post(&self, url: &str, body: &Value) -> Result<Self::Response> {
		(**self).post(url, body)
	}

	fn put(&self, url: &str, body: &Value) -> Result<Self::Response> {
		(**self).put(url, body)
	}
}

/// Default transport on top of a blocking reqwest client.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
	client: reqwest::blocking::Client,
}

impl HttpTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_client(client: reqwest::blocking::Client) -> Self {
		HttpTransport { client }
	}

	fn send(&self, request: reqwest::blocking::RequestBuilder) -> Result<HttpResponse> {
		let response = request.send()?.error_for_status()?;
		Ok(HttpResponse(response))
	}
}

impl Transport for HttpTransport {
	type Response = HttpResponse;

	fn get(&self, url: &str, body: Option<&Value>) -> Result<HttpResponse> {
		let mut request = self.client.get(url);
		if let Some(body) = body {
			request = request.json(body);
		}
		self.send(request)
	}

	fn post(&self, url: &str, body: &Value) -> Result<HttpResponse> {
		self.send(self.client.post(url).json(body))
	}

	fn put(&self, url: &str, body: &Value) -> Result<HttpResponse> {
		self.send(self.client.put(url).json(body))
	}
}

#[derive(Debug)]
pub struct HttpResponse(reqwest::blocking::Response);

impl Response for HttpResponse {
	fn json(self) -> Result<Value> {
		self.0.json::<Value>().map_err(Error::Http)
	}

	fn text(self) -> Result<String> {
		self.0.text().map_err(Error::Http)
	}
}
