//! `pofile.toml` loading

use anyhow::Context as _;
use pofile_catalog::WriterOptions;
use pofile_diagnostics::ReporterOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration file looked up in the current directory.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "pofile.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
	pub reporter: ReporterOptions,
	pub writer: WriterOptions,
}

impl Settings {
	/// Loads settings from `path`, or from `pofile.toml` when no path is given.
	///
	/// An explicit path must exist. The default file is optional and its
	/// absence yields the defaults.
	pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
		let (path, required) = match path {
			Some(path) => (path, true),
			None => (Path::new(DEFAULT_CONFIG_FILE), false),
		};

		let content = match std::fs::read_to_string(path) {
			Ok(content) => content,
			Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(file = %path.display(), "no configuration file, using defaults");
				return Ok(Self::default());
			}
			Err(e) => {
				return Err(e).with_context(|| format!("Cannot read {}", path.display()));
			}
		};

		let settings = Self::parse(&content)
			.with_context(|| format!("Invalid configuration in {}", path.display()))?;
		tracing::debug!(file = %path.display(), ?settings, "configuration loaded");
		Ok(settings)
	}

	pub(crate) fn parse(content: &str) -> anyhow::Result<Self> {
		Ok(toml::from_str(content)?)
	}
}
