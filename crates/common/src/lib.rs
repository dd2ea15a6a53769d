//! Shared plumbing for the pwkit API and UI test frameworks.
//!
//! - [`logging`]: console plus rolling `combined`/`error` log files
//! - [`env`]: `TEST_ENV` based environment selection
//! - [`factory_registry!`]: name-keyed construction tables used by the factories

pub mod clock;
pub mod env;
pub mod logging;
pub mod registry;

pub use env::{ENV_VAR, EnvName};
pub use logging::{LogConfig, LogError, LogGuards};
