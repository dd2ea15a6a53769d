//! Shared HTTP plumbing for the API clients.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::ApiEnvironment;
use crate::error::{ApiError, Result};

/// Header carrying [`ApiEnvironment::api_key`].
pub const API_KEY_HEADER: &str = "x-api-key";

/// Configured HTTP client bound to one environment.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiContext {
	client: reqwest::Client,
	env: ApiEnvironment,
}

impl ApiContext {
	pub fn new(env: ApiEnvironment) -> Result<Self> {
		let mut headers = HeaderMap::new();
		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		if let Some(key) = &env.api_key {
			let value = HeaderValue::from_str(key).map_err(|source| ApiError::InvalidHeader {
				name: API_KEY_HEADER,
				source,
			})?;
			headers.insert(API_KEY_HEADER, value);
		}

		let client = reqwest::Client::builder()
			.timeout(env.timeout)
			.default_headers(headers)
			.build()
			.map_err(ApiError::Client)?;

		Ok(Self { client, env })
	}

	pub fn environment(&self) -> &ApiEnvironment {
		&self.env
	}

	/// Joins `path` onto the environment base URL.
	pub fn url(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.env.base_url.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}

	/// Sends one request and buffers the response body.
	///
	/// Non-2xx statuses are returned as responses, not errors; tests assert on
	/// them.
	pub async fn send<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiResponse>
	where
		B: Serialize + ?Sized,
	{
		let url = self.url(path);
		debug!(%method, %url, "sending API request");

		let mut request = self.client.request(method.clone(), &url);
		if let Some(body) = body {
			request = request.json(body);
		}

		let response = request.send().await.map_err(|source| ApiError::Http {
			url: url.clone(),
			source,
		})?;
		let status = response.status();
		let body = response
			.bytes()
			.await
			.map_err(|source| ApiError::Http {
				url: url.clone(),
				source,
			})?
			.to_vec();

		info!("{method} {url} -> {}", status.as_u16());
		Ok(ApiResponse { status, body })
	}
}

/// Buffered HTTP response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
	status: StatusCode,
	body: Vec<u8>,
}

impl ApiResponse {
	pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	/// True for any 2xx status.
	pub fn ok(&self) -> bool {
		self.status.is_success()
	}

	pub fn status(&self) -> StatusCode {
		self.status
	}

	pub fn text(&self) -> String {
		String::from_utf8_lossy(&self.body).into_owned()
	}

	/// Parses the body as JSON; an empty body (e.g. `204 No Content`) is `null`.
	pub fn json(&self) -> Result<Value> {
		if self.body.iter().all(u8::is_ascii_whitespace) {
			return Ok(Value::Null);
		}
		Ok(serde_json::from_slice(&self.body)?)
	}
}
