//! Shared browser/page holder.
//!
//! At most one browser and one page are alive per holder. The first
//! [`SharedBrowser::acquire`] launches them, later calls hand out the same page
//! until [`SharedBrowser::release`] closes both.

use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::driver::{BrowserHandle, BrowserLauncher, LaunchOptions, PageHandle};
use crate::error::{DriverError, Result};

/// Whether the holder currently owns live handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolderState {
	Empty,
	Acquired,
}

#[derive(Default)]
struct Slots {
	browser: Option<BrowserHandle>,
	page: Option<PageHandle>,
}

/// Owner of the one browser and page used by a test process.
///
/// Held by the test harness and passed to whoever needs the page. The lock
/// is held across launch and close, so concurrent callers never start a
/// second browser.
pub struct SharedBrowser {
	launcher: Arc<dyn BrowserLauncher>,
	options: LaunchOptions,
	slots: Mutex<Slots>,
}

impl SharedBrowser {
	pub fn new(launcher: impl BrowserLauncher + 'static) -> Self {
		Self::from_arc(Arc::new(launcher))
	}

	pub fn from_arc(launcher: Arc<dyn BrowserLauncher>) -> Self {
		Self {
			launcher,
			options: LaunchOptions::default(),
			slots: Mutex::new(Slots::default()),
		}
	}

	pub fn with_options(mut self, options: LaunchOptions) -> Self {
		self.options = options;
		self
	}

	pub fn options(&self) -> &LaunchOptions {
		&self.options
	}

	/// Returns the shared page, launching the browser and opening the page
	/// only when missing.
	///
	/// Launch and page-creation failures are returned as-is; nothing is
	/// retried. A browser that launched before page creation failed stays
	/// held and is reused by the next call.
	pub async fn acquire(&self) -> Result<PageHandle> {
		let mut slots = self.slots.lock().await;

		let browser = match &slots.browser {
			Some(browser) => Arc::clone(browser),
			None => {
				info!(headless = self.options.headless, "Launching browser");
				let browser = self.launcher.launch(&self.options).await?;
				slots.browser = Some(Arc::clone(&browser));
				browser
			}
		};

		if let Some(page) = &slots.page {
			return Ok(Arc::clone(page));
		}

		let page = browser.new_page().await?;
		slots.page = Some(Arc::clone(&page));
		debug!("Opened shared page");
		Ok(page)
	}

	/// Closes the page, then the browser. A no-op when nothing is held.
	///
	/// Both slots are cleared before closing, so a failed close is never
	/// retried. When a close fails the other is still attempted and the
	/// first error is returned.
	pub async fn release(&self) -> Result<()> {
		let mut slots = self.slots.lock().await;
		let page = slots.page.take();
		let browser = slots.browser.take();

		if page.is_none() && browser.is_none() {
			debug!("Release requested with nothing held");
			return Ok(());
		}

		let mut first_error: Option<DriverError> = None;

		if let Some(page) = page {
			if let Err(err) = page.close().await {
				warn!("Failed to close page: {err}");
				first_error.get_or_insert(err);
			}
		}

		if let Some(browser) = browser {
			if let Err(err) = browser.close().await {
				warn!("Failed to close browser: {err}");
				first_error.get_or_insert(err);
			}
		}

		info!("Browser and page closed");
		match first_error {
			Some(err) => Err(err.into()),
			None => Ok(()),
		}
	}

	pub async fn state(&self) -> HolderState {
		let slots = self.slots.lock().await;
		if slots.browser.is_some() || slots.page.is_some() {
			HolderState::Acquired
		} else {
			HolderState::Empty
		}
	}

	/// The held page, without creating one.
	pub async fn current_page(&self) -> Option<PageHandle> {
		self.slots.lock().await.page.clone()
	}
}

impl fmt::Debug for SharedBrowser {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SharedBrowser")
			.field("options", &self.options)
			.finish_non_exhaustive()
	}
}
