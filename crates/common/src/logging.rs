//! Console and rolling-file logging.
//!
//! Every destination shares one line layout, `<timestamp> [<level>]: <message>`.
//! Besides the console, events go to a `combined` log (everything at or above
//! the configured level) and an `error` log (errors only). Both files rotate
//! daily.

use std::fmt;
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};
use colored::{ColoredString, Colorize};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::{LookupSpan, Registry};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix of the all-levels log.
pub const COMBINED_LOG: &str = "combined";
/// File name prefix of the error-only log.
pub const ERROR_LOG: &str = "error";

#[derive(Debug, thiserror::Error)]
pub enum LogError {
	#[error("failed to open log files in {}: {source}", .dir.display())]
	Appender {
		dir: PathBuf,
		#[source]
		source: InitError,
	},

	#[error("a global tracing subscriber is already installed")]
	AlreadyInitialized,
}

/// Logging destinations and verbosity.
#[derive(Debug, Clone)]
pub struct LogConfig {
	/// Minimum level for the console and the combined log.
	pub level: Level,
	/// Directory holding the rolling log files.
	pub directory: PathBuf,
	/// Rotated files kept per log before the oldest is deleted.
	pub max_files: usize,
	/// Whether events are echoed to stdout.
	pub console: bool,
}

impl Default for LogConfig {
	fn default() -> Self {
		Self {
			level: Level::INFO,
			directory: PathBuf::from("logs"),
			max_files: 7,
			console: true,
		}
	}
}

/// Keeps the background file writers alive; dropping it flushes pending lines.
#[derive(Debug)]
#[must_use = "dropping the guards stops file logging"]
pub struct LogGuards {
	_guards: Vec<WorkerGuard>,
}

/// Installs the global subscriber.
///
/// `RUST_LOG` overrides the console filter; the file logs always follow
/// `config.level`.
pub fn init(config: &LogConfig) -> Result<LogGuards, LogError> {
	let (files, guards) = file_layers::<Registry>(config)?;

	let console = config.console.then(|| {
		let filter = EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new(level_label(&config.level)));
		tracing_subscriber::fmt::layer()
			.event_format(LineFormat)
			.with_writer(std::io::stdout)
			.with_filter(filter)
	});

	tracing_subscriber::registry()
		.with(files)
		.with(console)
		.try_init()
		.map_err(|_| LogError::AlreadyInitialized)?;

	Ok(guards)
}

/// Builds the `combined` and `error` file layers without installing them.
pub fn file_layers<S>(config: &LogConfig) -> Result<(impl Layer<S> + use<S>, LogGuards), LogError>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
{
	let (combined, combined_guard) = tracing_appender::non_blocking(rolling_file(config, COMBINED_LOG)?);
	let (errors, error_guard) = tracing_appender::non_blocking(rolling_file(config, ERROR_LOG)?);

	let combined = tracing_subscriber::fmt::layer()
		.event_format(LineFormat)
		.with_ansi(false)
		.with_writer(combined)
		.with_filter(LevelFilter::from_level(config.level));
	let errors = tracing_subscriber::fmt::layer()
		.event_format(LineFormat)
		.with_ansi(false)
		.with_writer(errors)
		.with_filter(LevelFilter::ERROR);

	Ok((
		combined.and_then(errors),
		LogGuards {
			_guards: vec![combined_guard, error_guard],
		},
	))
}

fn rolling_file(config: &LogConfig, prefix: &str) -> Result<RollingFileAppender, LogError> {
	RollingFileAppender::builder()
		.rotation(Rotation::DAILY)
		.filename_prefix(prefix)
		.filename_suffix("log")
		.max_log_files(config.max_files)
		.build(&config.directory)
		.map_err(|source| LogError::Appender {
			dir: config.directory.clone(),
			source,
		})
}

/// Lowercase level name as printed between the brackets.
pub fn level_label(level: &Level) -> &'static str {
	match *level {
		Level::ERROR => "error",
		Level::WARN => "warn",
		Level::INFO => "info",
		Level::DEBUG => "debug",
		Level::TRACE => "trace",
	}
}

/// Renders one line in the shared layout.
pub fn format_line(timestamp: &str, level: &Level, message: &str) -> String {
	format!("{timestamp} [{}]: {message}", level_label(level))
}

fn colorize(level: &Level) -> ColoredString {
	let label = level_label(level);
	match *level {
		Level::ERROR => label.red(),
		Level::WARN => label.yellow(),
		Level::INFO => label.green(),
		Level::DEBUG => label.blue(),
		Level::TRACE => label.purple(),
	}
}

/// `tracing-subscriber` event formatter producing `<timestamp> [<level>]: <message>`.
///
/// The level is coloured only when the writer accepts ANSI escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
{
	fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
		let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
		let level = event.metadata().level();
		if writer.has_ansi_escapes() {
			write!(writer, "{timestamp} [{}]: ", colorize(level))?;
		} else {
			write!(writer, "{timestamp} [{}]: ", level_label(level))?;
		}
		ctx.field_format().format_fields(writer.by_ref(), event)?;
		writeln!(writer)
	}
}

#[cfg(test)]
mod tests {
	use std::io;
	use std::sync::{Arc, Mutex};

	use tracing_subscriber::fmt::MakeWriter;

	use super::*;

	#[derive(Clone, Default)]
	struct Buffer(Arc<Mutex<Vec<u8>>>);

	impl Buffer {
		fn contents(&self) -> String {
			let bytes = self.0.lock().unwrap_or_else(|e| e.into_inner());
			String::from_utf8_lossy(&bytes).into_owned()
		}
	}

	impl io::Write for Buffer {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.0.lock().unwrap_or_else(|e| e.into_inner()).extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	impl<'a> MakeWriter<'a> for Buffer {
		type Writer = Buffer;

		fn make_writer(&'a self) -> Self::Writer {
			self.clone()
		}
	}

	#[test]
	fn format_line_layout() {
		assert_eq!(
			format_line("2024-01-01T00:00:00.000Z", &Level::WARN, "careful"),
			"2024-01-01T00:00:00.000Z [warn]: careful"
		);
	}

	#[test]
	fn line_format_renders_timestamp_level_and_message() {
		let buffer = Buffer::default();
		let subscriber = tracing_subscriber::fmt()
			.with_ansi(false)
			.event_format(LineFormat)
			.with_writer(buffer.clone())
			.finish();

		tracing::subscriber::with_default(subscriber, || {
			tracing::warn!("Element not found for getText: .missing");
		});

		let output = buffer.contents();
		let line = output.lines().next().unwrap();
		let (timestamp, rest) = line.split_once(' ').unwrap();
		assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(), "bad timestamp: {timestamp}");
		assert_eq!(rest, "[warn]: Element not found for getText: .missing");
	}

	#[test]
	fn file_layers_split_combined_and_error_logs() {
		let dir = tempfile::tempdir().unwrap();
		let config = LogConfig {
			directory: dir.path().to_path_buf(),
			console: false,
			..LogConfig::default()
		};

		let (layer, guards) = file_layers::<Registry>(&config).unwrap();
		let subscriber = tracing_subscriber::registry().with(layer);
		tracing::subscriber::with_default(subscriber, || {
			tracing::info!("Navigated to URL: https://example.com");
			tracing::error!("Click failed for selector: #login");
			tracing::debug!("below threshold");
		});
		drop(guards);

		let read_log = |prefix: &str| -> String {
			std::fs::read_dir(dir.path())
				.unwrap()
				.filter_map(|entry| entry.ok())
				.filter(|entry| entry.file_name().to_string_lossy().starts_with(prefix))
				.map(|entry| std::fs::read_to_string(entry.path()).unwrap())
				.collect()
		};

		let combined = read_log(COMBINED_LOG);
		assert!(combined.contains("[info]: Navigated to URL: https://example.com"));
		assert!(combined.contains("[error]: Click failed for selector: #login"));
		assert!(!combined.contains("below threshold"));

		let errors = read_log(ERROR_LOG);
		assert!(errors.contains("[error]: Click failed for selector: #login"));
		assert!(!errors.contains("Navigated"));
	}
}
