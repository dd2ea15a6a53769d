use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UiError>;

/// Failure reported by a browser driver.
#[derive(Debug, Error)]
pub enum DriverError {
	#[error("element not found: {selector}")]
	ElementNotFound { selector: String },

	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	#[error("target closed: {0}")]
	TargetClosed(String),

	#[error("browser launch failed: {0}")]
	Launch(String),

	#[error("invalid URL {url}: {reason}")]
	InvalidUrl { url: String, reason: String },

	#[error("{0}")]
	Protocol(String),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

/// Page action that can fail with a [`UiError::Action`] or [`UiError::Navigation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
	Click,
	Fill,
	Navigate,
	Wait,
	Read,
	VisibilityCheck,
}

impl ActionKind {
	/// Name used in error messages.
	pub fn as_str(self) -> &'static str {
		match self {
			ActionKind::Click => "click",
			ActionKind::Fill => "fill",
			ActionKind::Navigate => "navigate",
			ActionKind::Wait => "waitForSelector",
			ActionKind::Read => "getText",
			ActionKind::VisibilityCheck => "isVisible",
		}
	}

	/// Prefix of the failure screenshot file name.
	pub fn screenshot_tag(self) -> &'static str {
		match self {
			ActionKind::Click => "click",
			ActionKind::Fill => "fill",
			ActionKind::Navigate => "navigation",
			ActionKind::Wait => "waitforselector",
			ActionKind::Read => "gettext",
			ActionKind::VisibilityCheck => "isvisible",
		}
	}
}

impl fmt::Display for ActionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Error)]
pub enum UiError {
	#[error("Failed to {kind} on selector: {selector}. Error: {source}")]
	Action {
		kind: ActionKind,
		selector: String,
		#[source]
		source: DriverError,
	},

	#[error("Failed to navigate to URL: {url}. Error: {source}")]
	Navigation {
		url: String,
		#[source]
		source: DriverError,
	},

	#[error("screenshot failed: {}", .path.display())]
	Screenshot {
		path: PathBuf,
		#[source]
		source: DriverError,
	},

	#[error("Page \"{0}\" not found in PageFactory. Ensure the name is correct and it's added to the factory.")]
	PageNotFound(String),

	#[error("invalid base URL {url}: {source}")]
	InvalidUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error(transparent)]
	Driver(#[from] DriverError),
}

impl UiError {
	/// Action kind for action and navigation failures.
	pub fn action_kind(&self) -> Option<ActionKind> {
		match self {
			UiError::Action { kind, .. } => Some(*kind),
			UiError::Navigation { .. } => Some(ActionKind::Navigate),
			_ => None,
		}
	}

	/// Selector (or URL for navigation) the failed action targeted.
	pub fn target(&self) -> Option<&str> {
		match self {
			UiError::Action { selector, .. } => Some(selector),
			UiError::Navigation { url, .. } => Some(url),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn action_error_message() {
		let err = UiError::Action {
			kind: ActionKind::Click,
			selector: "#login-button".into(),
			source: DriverError::ElementNotFound {
				selector: "#login-button".into(),
			},
		};
		assert_eq!(
			err.to_string(),
			"Failed to click on selector: #login-button. Error: element not found: #login-button"
		);
		assert_eq!(err.action_kind(), Some(ActionKind::Click));
		assert_eq!(err.target(), Some("#login-button"));
	}

	#[test]
	fn navigation_error_message() {
		let err = UiError::Navigation {
			url: "https://www.saucedemo.com/".into(),
			source: DriverError::Timeout {
				ms: 5000,
				condition: "load".into(),
			},
		};
		assert_eq!(
			err.to_string(),
			"Failed to navigate to URL: https://www.saucedemo.com/. Error: timeout after 5000ms waiting for: load"
		);
		assert_eq!(err.action_kind(), Some(ActionKind::Navigate));
	}

	#[test]
	fn screenshot_tags_are_lowercase() {
		for kind in [
			ActionKind::Click,
			ActionKind::Fill,
			ActionKind::Navigate,
			ActionKind::Wait,
			ActionKind::Read,
			ActionKind::VisibilityCheck,
		] {
			let tag = kind.screenshot_tag();
			assert_eq!(tag, tag.to_lowercase());
		}
	}

	#[test]
	fn page_not_found_names_the_key() {
		assert!(UiError::PageNotFound("UnknownPage".into()).to_string().contains("\"UnknownPage\""));
	}
}
