//! Per-environment UI settings.

use std::path::PathBuf;

use pwkit_common::EnvName;
use serde::{Deserialize, Serialize};

/// Environment used when `TEST_ENV` is unset or unknown.
pub const DEFAULT_ENV: EnvName = EnvName::Prod;

/// Fixture files every environment loads test data from.
pub const TEST_DATA_FILES: [&str; 2] = ["data/product.json", "data/users.json"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiEnvironment {
	pub base_url: String,
	pub username: String,
	pub password: String,
	pub test_data_files: Vec<PathBuf>,
}

impl UiEnvironment {
	/// Built-in settings for `name`. Only prod ships credentials.
	pub fn for_env(name: EnvName) -> Self {
		let (base_url, username, password) = match name {
			EnvName::Dev => ("https://dev.saucedemo.com", "", ""),
			EnvName::Staging => ("https://staging.saucedemo.com", "", ""),
			EnvName::Prod => ("https://www.saucedemo.com", "standard_user", "secret_sauce"),
		};
		Self {
			base_url: base_url.to_string(),
			username: username.to_string(),
			password: password.to_string(),
			test_data_files: TEST_DATA_FILES.iter().map(PathBuf::from).collect(),
		}
	}

	/// Settings selected by `TEST_ENV`.
	pub fn current() -> Self {
		Self::for_env(EnvName::from_env_or(DEFAULT_ENV))
	}

	pub fn has_credentials(&self) -> bool {
		!self.username.is_empty() && !self.password.is_empty()
	}
}

impl Default for UiEnvironment {
	fn default() -> Self {
		Self::for_env(DEFAULT_ENV)
	}
}
