//! Capabilities the framework needs from a browser automation backend.
//!
//! Backends implement these traits; everything above them (the shared holder,
//! page actions, page objects) is backend-agnostic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::DriverError;

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Shared handle to an open page.
pub type PageHandle = Arc<dyn PageDriver>;

/// Shared handle to a running browser.
pub type BrowserHandle = Arc<dyn Browser>;

/// Default wait applied by backends to element lookups.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One browser tab.
#[async_trait]
pub trait PageDriver: Send + Sync {
	/// Navigates and waits for the load to settle.
	async fn goto(&self, url: &str) -> DriverResult<()>;

	async fn url(&self) -> DriverResult<String>;

	async fn click(&self, selector: &str) -> DriverResult<()>;

	/// Replaces the value of an input.
	async fn fill(&self, selector: &str, text: &str) -> DriverResult<()>;

	async fn wait_for_selector(&self, selector: &str) -> DriverResult<()>;

	/// Text of the first match, or `None` when nothing matches.
	async fn text_content(&self, selector: &str) -> DriverResult<Option<String>>;

	async fn is_visible(&self, selector: &str) -> DriverResult<bool>;

	/// PNG bytes of the current viewport.
	async fn screenshot(&self) -> DriverResult<Vec<u8>>;

	async fn close(&self) -> DriverResult<()>;
}

/// A running browser process.
#[async_trait]
pub trait Browser: Send + Sync {
	async fn new_page(&self) -> DriverResult<PageHandle>;

	async fn close(&self) -> DriverResult<()>;
}

/// Starts browsers.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
	async fn launch(&self, options: &LaunchOptions) -> DriverResult<BrowserHandle>;
}

/// Browser launch settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions {
	/// Headed by default so local runs are visible.
	pub headless: bool,
	/// Upper bound for element waits and protocol requests.
	pub timeout: Duration,
}

impl Default for LaunchOptions {
	fn default() -> Self {
		Self {
			headless: false,
			timeout: DEFAULT_TIMEOUT,
		}
	}
}

impl LaunchOptions {
	pub fn with_headless(mut self, headless: bool) -> Self {
		self.headless = headless;
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}
