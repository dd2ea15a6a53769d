//! Chromium backend over the DevTools protocol (`chromium` feature).

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::driver::{Browser, BrowserHandle, BrowserLauncher, DriverResult, LaunchOptions, PageDriver, PageHandle};
use crate::error::DriverError;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn protocol(err: CdpError) -> DriverError {
	DriverError::Protocol(err.to_string())
}

/// Launches a local Chromium/Chrome.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumLauncher;

#[async_trait]
impl BrowserLauncher for ChromiumLauncher {
	async fn launch(&self, options: &LaunchOptions) -> DriverResult<BrowserHandle> {
		let mut builder = BrowserConfig::builder().request_timeout(options.timeout);
		if !options.headless {
			builder = builder.with_head();
		}
		let config = builder.build().map_err(DriverError::Launch)?;

		let (browser, mut handler) = CdpBrowser::launch(config)
			.await
			.map_err(|e| DriverError::Launch(e.to_string()))?;

		// The handler must be polled for the connection to make progress.
		let events = tokio::spawn(async move {
			while let Some(event) = handler.next().await {
				if let Err(err) = event {
					debug!("CDP handler error: {err}");
				}
			}
		});

		Ok(Arc::new(ChromiumBrowser {
			inner: Mutex::new(browser),
			events,
			timeout: options.timeout,
		}))
	}
}

struct ChromiumBrowser {
	inner: Mutex<CdpBrowser>,
	events: JoinHandle<()>,
	timeout: Duration,
}

#[async_trait]
impl Browser for ChromiumBrowser {
	async fn new_page(&self) -> DriverResult<PageHandle> {
		let page = self.inner.lock().await.new_page("about:blank").await.map_err(protocol)?;
		Ok(Arc::new(ChromiumPage {
			page,
			timeout: self.timeout,
		}))
	}

	async fn close(&self) -> DriverResult<()> {
		let mut browser = self.inner.lock().await;
		browser.close().await.map_err(protocol)?;
		browser.wait().await?;
		self.events.abort();
		Ok(())
	}
}

struct ChromiumPage {
	page: Page,
	timeout: Duration,
}

impl ChromiumPage {
	async fn element(&self, selector: &str) -> DriverResult<Element> {
		self.wait_for_selector(selector).await?;
		self.page
			.find_element(selector)
			.await
			.map_err(|_| DriverError::ElementNotFound {
				selector: selector.to_string(),
			})
	}
}

#[async_trait]
impl PageDriver for ChromiumPage {
	async fn goto(&self, url: &str) -> DriverResult<()> {
		self.page.goto(url).await.map_err(protocol)?;
		Ok(())
	}

	async fn url(&self) -> DriverResult<String> {
		Ok(self.page.url().await.map_err(protocol)?.unwrap_or_default())
	}

	async fn click(&self, selector: &str) -> DriverResult<()> {
		self.element(selector).await?.click().await.map_err(protocol)?;
		Ok(())
	}

	async fn fill(&self, selector: &str, text: &str) -> DriverResult<()> {
		let element = self.element(selector).await?;
		element
			.call_js_fn("function() { this.value = ''; }", false)
			.await
			.map_err(protocol)?;
		element.focus().await.map_err(protocol)?;
		element.type_str(text).await.map_err(protocol)?;
		Ok(())
	}

	async fn wait_for_selector(&self, selector: &str) -> DriverResult<()> {
		let deadline = Instant::now() + self.timeout;
		loop {
			if !self.page.find_elements(selector).await.map_err(protocol)?.is_empty() {
				return Ok(());
			}
			if Instant::now() >= deadline {
				return Err(DriverError::Timeout {
					ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
					condition: format!("selector {selector}"),
				});
			}
			tokio::time::sleep(POLL_INTERVAL).await;
		}
	}

	async fn text_content(&self, selector: &str) -> DriverResult<Option<String>> {
		let elements = self.page.find_elements(selector).await.map_err(protocol)?;
		match elements.first() {
			Some(element) => element.inner_text().await.map_err(protocol),
			None => Ok(None),
		}
	}

	async fn is_visible(&self, selector: &str) -> DriverResult<bool> {
		let quoted = serde_json::to_string(selector).map_err(|e| DriverError::Protocol(e.to_string()))?;
		let script = format!(
			"(() => {{ const el = document.querySelector({quoted}); if (!el) return false; \
			 const style = window.getComputedStyle(el); const rect = el.getBoundingClientRect(); \
			 return style.visibility !== 'hidden' && style.display !== 'none' && rect.width > 0 && rect.height > 0; }})()"
		);
		self.page
			.evaluate(script.as_str())
			.await
			.map_err(protocol)?
			.into_value::<bool>()
			.map_err(|e| DriverError::Protocol(e.to_string()))
	}

	async fn screenshot(&self) -> DriverResult<Vec<u8>> {
		self.page
			.screenshot(ScreenshotParams::builder().build())
			.await
			.map_err(protocol)
	}

	async fn close(&self) -> DriverResult<()> {
		self.page.clone().close().await.map_err(protocol)
	}
}
