//! Logged, screenshot-on-failure wrappers around page primitives.
//!
//! Every action follows one contract: on success an info line is logged; on
//! failure an error line is logged, a screenshot named
//! `<action>-error-<epoch-millis>.png` is written, and a typed error carrying
//! the action and its target is returned. If the screenshot itself fails,
//! that failure is returned instead.

use std::fmt;
use std::path::{Path, PathBuf};

use pwkit_common::clock::epoch_millis;
use tracing::{error, info, warn};
use url::Url;

use crate::config::UiEnvironment;
use crate::driver::PageHandle;
use crate::error::{ActionKind, DriverError, Result, UiError};

/// Directory failure screenshots land in unless overridden.
pub const DEFAULT_SCREENSHOT_DIR: &str = "screenshots";

/// Page capability shared by all page objects.
///
/// Cloning shares the underlying page.
#[derive(Clone)]
pub struct PageActions {
	page: PageHandle,
	screenshot_dir: PathBuf,
	base_url: Option<Url>,
}

impl PageActions {
	pub fn new(page: PageHandle) -> Self {
		Self {
			page,
			screenshot_dir: PathBuf::from(DEFAULT_SCREENSHOT_DIR),
			base_url: None,
		}
	}

	/// Actions whose relative navigation resolves against `env.base_url`.
	pub fn for_environment(page: PageHandle, env: &UiEnvironment) -> Result<Self> {
		Self::new(page).with_base_url(&env.base_url)
	}

	pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.screenshot_dir = dir.into();
		self
	}

	pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
		let parsed = Url::parse(base_url).map_err(|source| UiError::InvalidUrl {
			url: base_url.to_string(),
			source,
		})?;
		self.base_url = Some(parsed);
		Ok(self)
	}

	pub fn page(&self) -> &PageHandle {
		&self.page
	}

	pub fn screenshot_dir(&self) -> &Path {
		&self.screenshot_dir
	}

	/// Navigates to `url`; relative targets such as `"/"` resolve against the
	/// base URL when one is set.
	pub async fn navigate(&self, url: &str) -> Result<()> {
		let target = match self.resolve(url) {
			Ok(target) => target,
			Err(source) => return Err(self.fail(ActionKind::Navigate, url, source).await),
		};
		match self.page.goto(&target).await {
			Ok(()) => {
				info!("Navigated to URL: {target}");
				Ok(())
			}
			Err(source) => Err(self.fail(ActionKind::Navigate, &target, source).await),
		}
	}

	pub async fn current_url(&self) -> Result<String> {
		Ok(self.page.url().await?)
	}

	pub async fn click(&self, selector: &str) -> Result<()> {
		match self.page.click(selector).await {
			Ok(()) => {
				info!("Clicked element: {selector}");
				Ok(())
			}
			Err(source) => Err(self.fail(ActionKind::Click, selector, source).await),
		}
	}

	/// Fills an input. The value is not logged.
	pub async fn fill(&self, selector: &str, text: &str) -> Result<()> {
		match self.page.fill(selector, text).await {
			Ok(()) => {
				info!("Filled element: {selector}");
				Ok(())
			}
			Err(source) => Err(self.fail(ActionKind::Fill, selector, source).await),
		}
	}

	pub async fn wait_for_selector(&self, selector: &str) -> Result<()> {
		match self.page.wait_for_selector(selector).await {
			Ok(()) => {
				info!("Waited for selector: {selector}");
				Ok(())
			}
			Err(source) => Err(self.fail(ActionKind::Wait, selector, source).await),
		}
	}

	/// Text of the first match. A missing element yields `Ok(None)` and a
	/// warning rather than an error.
	pub async fn get_text(&self, selector: &str) -> Result<Option<String>> {
		match self.page.text_content(selector).await {
			Ok(Some(text)) => {
				info!("Got text from element: {selector}");
				Ok(Some(text))
			}
			Ok(None) => {
				warn!("Element not found for getText: {selector}");
				Ok(None)
			}
			Err(source) => Err(self.fail(ActionKind::Read, selector, source).await),
		}
	}

	pub async fn is_visible(&self, selector: &str) -> Result<bool> {
		match self.page.is_visible(selector).await {
			Ok(visible) => {
				info!("Checked visibility for: {selector} - {visible}");
				Ok(visible)
			}
			Err(source) => Err(self.fail(ActionKind::VisibilityCheck, selector, source).await),
		}
	}

	/// Writes `<screenshot_dir>/<name>.png`, creating the directory if needed.
	pub async fn take_screenshot(&self, name: &str) -> Result<PathBuf> {
		let path = self.screenshot_dir.join(format!("{name}.png"));
		let failed = |source: DriverError| UiError::Screenshot {
			path: path.clone(),
			source,
		};

		let bytes = self.page.screenshot().await.map_err(failed)?;
		tokio::fs::create_dir_all(&self.screenshot_dir)
			.await
			.map_err(|e| failed(e.into()))?;
		tokio::fs::write(&path, bytes).await.map_err(|e| failed(e.into()))?;

		info!("Screenshot taken: {name}");
		Ok(path)
	}

	fn resolve(&self, url: &str) -> std::result::Result<String, DriverError> {
		match (Url::parse(url), &self.base_url) {
			(Ok(absolute), _) => Ok(absolute.into()),
			(Err(url::ParseError::RelativeUrlWithoutBase), Some(base)) => base
				.join(url)
				.map(String::from)
				.map_err(|e| DriverError::InvalidUrl {
					url: url.to_string(),
					reason: e.to_string(),
				}),
			(Err(url::ParseError::RelativeUrlWithoutBase), None) => Ok(url.to_string()),
			(Err(e), _) => Err(DriverError::InvalidUrl {
				url: url.to_string(),
				reason: e.to_string(),
			}),
		}
	}

	async fn fail(&self, kind: ActionKind, target: &str, source: DriverError) -> UiError {
		match kind {
			ActionKind::Navigate => error!("Navigation failed for URL: {target} - {source}"),
			_ => error!("{kind} failed for selector: {target} - {source}"),
		}

		let name = format!("{}-error-{}", kind.screenshot_tag(), epoch_millis());
		if let Err(capture) = self.take_screenshot(&name).await {
			return capture;
		}

		match kind {
			ActionKind::Navigate => UiError::Navigation {
				url: target.to_string(),
				source,
			},
			_ => UiError::Action {
				kind,
				selector: target.to_string(),
				source,
			},
		}
	}
}

impl fmt::Debug for PageActions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PageActions")
			.field("screenshot_dir", &self.screenshot_dir)
			.field("base_url", &self.base_url.as_ref().map(Url::as_str))
			.finish_non_exhaustive()
	}
}
