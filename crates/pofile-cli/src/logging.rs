//! Log subscriber setup

use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count.
pub(crate) fn default_directive(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

/// Installs the global subscriber, writing to standard error.
///
/// `RUST_LOG` wins over the verbosity flag when it is set.
pub(crate) fn init(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.try_init();
}
