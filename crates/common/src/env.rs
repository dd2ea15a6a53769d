//! Test environment selection.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// Variable consulted to pick the active environment.
pub const ENV_VAR: &str = "TEST_ENV";

/// Named deployment a test run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvName {
	Dev,
	Staging,
	Prod,
}

impl EnvName {
	pub const ALL: [EnvName; 3] = [EnvName::Dev, EnvName::Staging, EnvName::Prod];

	pub fn as_str(self) -> &'static str {
		match self {
			EnvName::Dev => "dev",
			EnvName::Staging => "staging",
			EnvName::Prod => "prod",
		}
	}

	/// Resolves a raw variable value, falling back to `default` when the value
	/// is missing, blank or unknown.
	pub fn resolve(raw: Option<&str>, default: EnvName) -> EnvName {
		let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
			return default;
		};
		match raw.parse() {
			Ok(name) => name,
			Err(UnknownEnv(value)) => {
				warn!("Unknown {ENV_VAR} value '{value}', falling back to '{default}'");
				default
			}
		}
	}

	/// Reads [`ENV_VAR`] from the process environment.
	pub fn from_env_or(default: EnvName) -> EnvName {
		let raw = std::env::var(ENV_VAR).ok();
		Self::resolve(raw.as_deref(), default)
	}
}

impl fmt::Display for EnvName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Rejected environment name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown environment: {0}")]
pub struct UnknownEnv(pub String);

impl FromStr for EnvName {
	type Err = UnknownEnv;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"dev" | "development" => Ok(EnvName::Dev),
			"staging" | "stage" => Ok(EnvName::Staging),
			"prod" | "production" => Ok(EnvName::Prod),
			_ => Err(UnknownEnv(s.to_string())),
		}
	}
}
