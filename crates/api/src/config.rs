//! Per-environment API settings.

use std::time::Duration;

use pwkit_common::EnvName;
use serde::{Deserialize, Serialize};

/// Variable overriding the configured API key.
pub const API_KEY_VAR: &str = "API_KEY";

/// Environment used when `TEST_ENV` is unset or unknown.
pub const DEFAULT_ENV: EnvName = EnvName::Dev;

/// Resolved settings for one API environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvironment {
	/// Base URL every endpoint path is appended to.
	#[serde(rename = "baseURL")]
	pub base_url: String,
	/// Sent as `x-api-key` when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub api_key: Option<String>,
	/// Per-request timeout.
	#[serde(with = "millis")]
	pub timeout: Duration,
	/// Retry budget for the test harness. Requests themselves are never retried.
	pub retries: u32,
}

impl ApiEnvironment {
	/// Built-in settings for `name`.
	pub fn for_env(name: EnvName) -> Self {
		let (base_url, timeout_ms, retries) = match name {
			EnvName::Dev => ("https://reqres.in", 30_000, 2),
			EnvName::Staging => ("https://staging.reqres.in", 45_000, 3),
			EnvName::Prod => ("https://reqres.in", 60_000, 1),
		};
		Self {
			base_url: base_url.to_string(),
			api_key: None,
			timeout: Duration::from_millis(timeout_ms),
			retries,
		}
	}

	/// Settings selected by `TEST_ENV`, with `API_KEY` applied when set.
	pub fn current() -> Self {
		let env = Self::for_env(EnvName::from_env_or(DEFAULT_ENV));
		match std::env::var(API_KEY_VAR) {
			Ok(key) if !key.trim().is_empty() => env.with_api_key(key),
			_ => env,
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
		self.api_key = Some(api_key.into());
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

impl Default for ApiEnvironment {
	fn default() -> Self {
		Self::for_env(DEFAULT_ENV)
	}
}

mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn built_in_table() {
		let dev = ApiEnvironment::for_env(EnvName::Dev);
		assert_eq!(dev.base_url, "https://reqres.in");
		assert_eq!(dev.timeout, Duration::from_secs(30));
		assert_eq!(dev.retries, 2);

		let staging = ApiEnvironment::for_env(EnvName::Staging);
		assert_eq!(staging.base_url, "https://staging.reqres.in");
		assert_eq!(staging.retries, 3);

		let prod = ApiEnvironment::for_env(EnvName::Prod);
		assert_eq!(prod.timeout, Duration::from_secs(60));
		assert_eq!(prod.retries, 1);
		assert!(prod.api_key.is_none());
	}

	#[test]
	fn default_is_dev() {
		assert_eq!(ApiEnvironment::default(), ApiEnvironment::for_env(EnvName::Dev));
	}

	#[test]
	fn serializes_with_wire_field_names() {
		let env = ApiEnvironment::for_env(EnvName::Dev).with_api_key("reqres-free-v1");
		assert_eq!(
			serde_json::to_value(&env).unwrap(),
			json!({
				"baseURL": "https://reqres.in",
				"apiKey": "reqres-free-v1",
				"timeout": 30000,
				"retries": 2
			})
		);
	}
}
