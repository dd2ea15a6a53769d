//! In-memory browser used by the integration tests.
//!
//! Pages behave like a tiny storefront: the login button moves to
//! `/inventory.html`, add/remove buttons change the cart badge, and any
//! selector registered with [`Script::fail`] errors.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use pwkit_ui::pages::selectors::{CART_BADGE, LOGIN_BUTTON};
use pwkit_ui::{Browser, BrowserHandle, BrowserLauncher, DriverError, DriverResult, LaunchOptions, PageDriver, PageHandle};

pub const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
	mutex.lock().unwrap_or_else(|e| e.into_inner())
}

/// Behaviour shared by every page the launcher creates.
#[derive(Default)]
pub struct Script {
	failing: Mutex<HashMap<String, String>>,
	texts: Mutex<HashMap<String, String>>,
	fail_goto: AtomicBool,
	fail_screenshot: AtomicBool,
	fail_page_close: AtomicBool,
	cart: AtomicI64,
	url: Mutex<String>,
	calls: Mutex<Vec<String>>,
}

impl Script {
	pub fn fail(&self, selector: &str, message: &str) {
		lock(&self.failing).insert(selector.to_string(), message.to_string());
	}

	pub fn set_text(&self, selector: &str, text: &str) {
		lock(&self.texts).insert(selector.to_string(), text.to_string());
	}

	pub fn fail_navigation(&self) {
		self.fail_goto.store(true, Ordering::SeqCst);
	}

	pub fn fail_screenshots(&self) {
		self.fail_screenshot.store(true, Ordering::SeqCst);
	}

	pub fn fail_page_close(&self) {
		self.fail_page_close.store(true, Ordering::SeqCst);
	}

	pub fn calls(&self) -> Vec<String> {
		lock(&self.calls).clone()
	}

	fn record(&self, call: String) {
		lock(&self.calls).push(call);
	}

	fn check(&self, selector: &str) -> DriverResult<()> {
		match lock(&self.failing).get(selector) {
			Some(message) => Err(DriverError::Protocol(message.clone())),
			None => Ok(()),
		}
	}
}

#[derive(Default)]
pub struct Counters {
	pub launches: AtomicUsize,
	pub pages_opened: AtomicUsize,
	pub pages_closed: AtomicUsize,
	pub browsers_closed: AtomicUsize,
}

impl Counters {
	pub fn get(counter: &AtomicUsize) -> usize {
		counter.load(Ordering::SeqCst)
	}
}

#[derive(Default)]
pub struct ScriptedLauncher {
	pub script: Arc<Script>,
	pub counters: Arc<Counters>,
	pub fail_launch: AtomicBool,
	pub fail_new_page: AtomicBool,
}

impl ScriptedLauncher {
	pub fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}
}

#[async_trait]
impl BrowserLauncher for ScriptedLauncher {
	async fn launch(&self, _options: &LaunchOptions) -> DriverResult<BrowserHandle> {
		if self.fail_launch.load(Ordering::SeqCst) {
			return Err(DriverError::Launch("executable not found".into()));
		}
		// Give concurrent acquirers a chance to race.
		tokio::task::yield_now().await;
		let id = self.counters.launches.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(ScriptedBrowser {
			id,
			script: Arc::clone(&self.script),
			counters: Arc::clone(&self.counters),
			fail_new_page: self.fail_new_page.load(Ordering::SeqCst),
		}))
	}
}

struct ScriptedBrowser {
	id: usize,
	script: Arc<Script>,
	counters: Arc<Counters>,
	fail_new_page: bool,
}

#[async_trait]
impl Browser for ScriptedBrowser {
	async fn new_page(&self) -> DriverResult<PageHandle> {
		if self.fail_new_page {
			return Err(DriverError::TargetClosed("browser".into()));
		}
		self.counters.pages_opened.fetch_add(1, Ordering::SeqCst);
		Ok(Arc::new(ScriptedPage {
			browser_id: self.id,
			script: Arc::clone(&self.script),
			counters: Arc::clone(&self.counters),
			closed: AtomicBool::new(false),
		}))
	}

	async fn close(&self) -> DriverResult<()> {
		self.counters.browsers_closed.fetch_add(1, Ordering::SeqCst);
		Ok(())
	}
}

pub struct ScriptedPage {
	pub browser_id: usize,
	script: Arc<Script>,
	counters: Arc<Counters>,
	closed: AtomicBool,
}

impl ScriptedPage {
	fn ensure_open(&self) -> DriverResult<()> {
		if self.closed.load(Ordering::SeqCst) {
			return Err(DriverError::TargetClosed("page".into()));
		}
		Ok(())
	}
}

#[async_trait]
impl PageDriver for ScriptedPage {
	async fn goto(&self, url: &str) -> DriverResult<()> {
		self.ensure_open()?;
		self.script.record(format!("goto {url}"));
		if self.script.fail_goto.load(Ordering::SeqCst) {
			return Err(DriverError::Timeout {
				ms: 5000,
				condition: format!("load of {url}"),
			});
		}
		*lock(&self.script.url) = url.to_string();
		Ok(())
	}

	async fn url(&self) -> DriverResult<String> {
		self.ensure_open()?;
		Ok(lock(&self.script.url).clone())
	}

	async fn click(&self, selector: &str) -> DriverResult<()> {
		self.ensure_open()?;
		self.script.record(format!("click {selector}"));
		self.script.check(selector)?;
		if selector == LOGIN_BUTTON {
			let mut url = lock(&self.script.url);
			let next = format!("{}/inventory.html", url.trim_end_matches('/'));
			*url = next;
		} else if selector.starts_with("[data-test=\"add-to-cart-") {
			self.script.cart.fetch_add(1, Ordering::SeqCst);
		} else if selector.starts_with("[data-test=\"remove-") {
			self.script.cart.fetch_sub(1, Ordering::SeqCst);
		}
		Ok(())
	}

	async fn fill(&self, selector: &str, text: &str) -> DriverResult<()> {
		self.ensure_open()?;
		self.script.record(format!("fill {selector}={text}"));
		self.script.check(selector)
	}

	async fn wait_for_selector(&self, selector: &str) -> DriverResult<()> {
		self.ensure_open()?;
		self.script.record(format!("wait {selector}"));
		self.script.check(selector).map_err(|_| DriverError::Timeout {
			ms: 30_000,
			condition: format!("selector {selector}"),
		})
	}

	async fn text_content(&self, selector: &str) -> DriverResult<Option<String>> {
		self.ensure_open()?;
		self.script.check(selector)?;
		if selector == CART_BADGE {
			let count = self.script.cart.load(Ordering::SeqCst);
			if count > 0 {
				return Ok(Some(count.to_string()));
			}
		}
		Ok(lock(&self.script.texts).get(selector).cloned())
	}

	async fn is_visible(&self, selector: &str) -> DriverResult<bool> {
		self.ensure_open()?;
		self.script.check(selector)?;
		Ok(lock(&self.script.texts).contains_key(selector))
	}

	async fn screenshot(&self) -> DriverResult<Vec<u8>> {
		self.ensure_open()?;
		if self.script.fail_screenshot.load(Ordering::SeqCst) {
			return Err(DriverError::Protocol("screenshot capture failed".into()));
		}
		Ok(PNG_MAGIC.to_vec())
	}

	async fn close(&self) -> DriverResult<()> {
		self.counters.pages_closed.fetch_add(1, Ordering::SeqCst);
		self.closed.store(true, Ordering::SeqCst);
		if self.script.fail_page_close.load(Ordering::SeqCst) {
			return Err(DriverError::Protocol("page close failed".into()));
		}
		Ok(())
	}
}

/// In-memory log sink for asserting on emitted lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
	/// Routes this thread's events into the capture until the guard drops.
	pub fn install(&self) -> tracing::subscriber::DefaultGuard {
		let subscriber = tracing_subscriber::fmt()
			.with_ansi(false)
			.with_max_level(tracing::Level::TRACE)
			.with_writer(self.clone())
			.finish();
		tracing::subscriber::set_default(subscriber)
	}

	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&lock(&self.0)).into_owned()
	}
}

impl std::io::Write for LogCapture {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		lock(&self.0).extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogCapture {
	type Writer = LogCapture;

	fn make_writer(&'a self) -> Self::Writer {
		self.clone()
	}
}

/// Screenshot file names in `dir`.
pub fn screenshots(dir: &std::path::Path) -> Vec<String> {
	let mut names: Vec<String> = std::fs::read_dir(dir)
		.map(|entries| {
			entries
				.filter_map(|entry| entry.ok())
				.map(|entry| entry.file_name().to_string_lossy().into_owned())
				.collect()
		})
		.unwrap_or_default();
	names.sort();
	names
}

/// Checks `name` is `<tag>-error-<digits>.png`.
pub fn is_failure_shot(name: &str, tag: &str) -> bool {
	name.strip_prefix(&format!("{tag}-error-"))
		.and_then(|rest| rest.strip_suffix(".png"))
		.is_some_and(|millis| !millis.is_empty() && millis.bytes().all(|b| b.is_ascii_digit()))
}
