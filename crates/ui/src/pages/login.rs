use tracing::{error, info};

use crate::actions::PageActions;
use crate::error::{Result, UiError};

pub const USERNAME_INPUT: &str = "#user-name";
pub const PASSWORD_INPUT: &str = "#password";
pub const LOGIN_BUTTON: &str = "#login-button";
pub const ERROR_MESSAGE: &str = ".error-message-container.error";

/// Result of [`LoginPage::login`].
///
/// A failed fill or click is reported here instead of being returned as an
/// error, so callers can assert on [`LoginOutcome::succeeded`].
#[derive(Debug)]
#[must_use]
pub enum LoginOutcome {
	/// Credentials were entered and the form submitted.
	Submitted,
	/// An action inside the login flow failed.
	Failed(UiError),
}

impl LoginOutcome {
	pub fn succeeded(&self) -> bool {
		matches!(self, LoginOutcome::Submitted)
	}

	pub fn error(&self) -> Option<&UiError> {
		match self {
			LoginOutcome::Submitted => None,
			LoginOutcome::Failed(err) => Some(err),
		}
	}

	pub fn into_result(self) -> Result<()> {
		match self {
			LoginOutcome::Submitted => Ok(()),
			LoginOutcome::Failed(err) => Err(err),
		}
	}
}

#[derive(Debug, Clone)]
pub struct LoginPage {
	actions: PageActions,
}

impl LoginPage {
	pub fn new(actions: PageActions) -> Self {
		Self { actions }
	}

	pub fn actions(&self) -> &PageActions {
		&self.actions
	}

	/// Navigates to the site root, where the login form lives.
	pub async fn open(&self) -> Result<()> {
		self.actions.navigate("/").await
	}

	/// Enters credentials and submits the form.
	pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
		match self.submit(username, password).await {
			Ok(()) => LoginOutcome::Submitted,
			Err(err) => {
				error!("Login action failed: {err}.");
				LoginOutcome::Failed(err)
			}
		}
	}

	async fn submit(&self, username: &str, password: &str) -> Result<()> {
		self.actions.fill(USERNAME_INPUT, username).await?;
		info!("Entered username: \"{username}\" on login page.");
		self.actions.fill(PASSWORD_INPUT, password).await?;
		info!("Entered password on login page (value hidden).");
		self.actions.click(LOGIN_BUTTON).await?;
		info!("Clicked login button.");
		Ok(())
	}

	pub async fn error_message(&self) -> Result<Option<String>> {
		self.actions.get_text(ERROR_MESSAGE).await
	}

	pub async fn is_error_message_visible(&self) -> Result<bool> {
		self.actions.is_visible(ERROR_MESSAGE).await
	}
}
