//! In-memory transport and clock for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use crate::error::{Error, Method, Result};
use crate::registration::Sleeper;
use crate::transport::{Response, Transport};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Call {
	pub method: Method,
	pub url: String,
	pub body: Option<Value>,
}

enum Reply {
	Json(Value),
	Text(String),
	Fail(String),
}

/// Answers requests from a script, then from `fallback` once the script is empty.
#[derive(Default)]
pub(crate) struct FakeTransport {
	replies: RefCell<VecDeque<Reply>>,
	fallback: Option<Value>,
	calls: RefCell<Vec<Call>>,
}

impl FakeTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn reply(self, value: Value) -> Self {
		self.replies.borrow_mut().push_back(Reply::Json(value));
		self
	}

	pub fn reply_text(self, text: &str) -> Self {
		self.replies.borrow_mut().push_back(Reply::Text(text.to_string()));
		self
	}

	pub fn fail(self, message: &str) -> Self {
		self.replies.borrow_mut().push_back(Reply::Fail(message.to_string()));
		self
	}

	pub fn fallback(mut self, value: Value) -> Self {
		self.fallback = Some(value);
		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.calls.borrow().clone()
	}

	fn respond(&self, method: Method, url: &str, body: Option<Value>) -> Result<FakeResponse> {
		self.calls.borrow_mut().push(Call {
			method,
			url: url.to_string(),
			body,
		});
		match self.replies.borrow_mut().pop_front() {
			Some(Reply::Json(value)) => Ok(FakeResponse::Json(value)),
			Some(Reply::Text(text)) => Ok(FakeResponse::Text(text)),
			Some(Reply::Fail(message)) => Err(Error::Transport(message)),
			None => match &self.fallback {
				Some(value) => Ok(FakeResponse::Json(value.clone())),
				None => Err(Error::Transport(format!("no reply scripted for {} {}", method, url))),
			},
		}
	}
}

impl Transport for FakeTransport {
	type Response = FakeResponse;

	fn get(&self, url: &str, body: Option<&Value>) -> Result<FakeResponse> {
		self.respond(Method::Get, url, body.cloned())
	}

	fn post(&self, url: &str, body: &Value) -> Result<FakeResponse> {
		self.respond(Method::Post, url, Some(body.clone()))
	}

	fn put(&self, url: &str, body: &Value) -> Result<FakeResponse> {
		self.respond(Method::Put, url, Some(body.clone()))
	}
}

pub(crate) enum FakeResponse {
	Json(Value),
	Text(String),
}

impl Response for FakeResponse {
	fn json(self) -> Result<Value> {
		match self {
			FakeResponse::Json(value) => Ok(value),
			FakeResponse::Text(text) => Ok(serde_json::from_str(&text)?),
		}
	}

	fn text(self) -> Result<String> {
		match self {
			FakeResponse::Json(value) => Ok(value.to_string()),
			FakeResponse::Text(text) => Ok(text),
		}
	}
}

/// Records requested sleeps instead of sleeping.
#[derive(Debug, Clone, Default)]
pub(crate) struct CountingSleeper {
	slept: Arc<Mutex<Vec<Duration>>>,
}

impl CountingSleeper {
	pub fn count(&self) -> usize {
		self.slept().len()
	}

	pub fn slept(&self) -> Vec<Duration> {
		self.slept.lock().unwrap().clone()
	}
}

impl Sleeper for CountingSleeper {
	fn sleep(&self, duration: Duration) {
		self.slept.lock().unwrap().push(duration);
	}
}
