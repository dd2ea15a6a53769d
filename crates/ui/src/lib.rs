//! UI test framework built on the Page Object pattern.
//!
//! The harness owns one [`SharedBrowser`] per test process and hands the page
//! it yields to page objects through [`PageActions`]. Page objects never own
//! the browser; tearing it down is the harness's call to
//! [`SharedBrowser::release`].
//!
//! ```rust,ignore
//! let shared = SharedBrowser::new(ChromiumLauncher);
//! let env = UiEnvironment::current();
//! let actions = PageActions::for_environment(shared.acquire().await?, &env)?;
//!
//! let login = get_page("LoginPage", actions)?.into_login().unwrap();
//! login.open().await?;
//! assert!(login.login(&env.username, &env.password).await.succeeded());
//!
//! shared.release().await?;
//! ```

pub mod actions;
#[cfg(feature = "chromium")]
pub mod chromium;
pub mod config;
pub mod driver;
pub mod error;
pub mod factory;
pub mod pages;
pub mod shared;

pub use actions::{DEFAULT_SCREENSHOT_DIR, PageActions};
#[cfg(feature = "chromium")]
pub use chromium::ChromiumLauncher;
pub use config::UiEnvironment;
pub use driver::{Browser, BrowserHandle, BrowserLauncher, DriverResult, LaunchOptions, PageDriver, PageHandle};
pub use error::{ActionKind, DriverError, Result, UiError};
pub use factory::{AppPage, PageId, get_page};
pub use pages::{InventoryPage, LoginOutcome, LoginPage};
pub use shared::{HolderState, SharedBrowser};
