//! Diagnostic severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic raised while reading or writing a catalog.
///
/// Levels are ordered, so `Severity::Error > Severity::Warning` holds and
/// the most severe of several diagnostics is simply their maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
	/// Informational note. Processing continues.
	Note,
	/// Suspicious input that is still accepted.
	Warning,
	/// Invalid input. Processing continues so that further problems can be
	/// reported, but the operation as a whole fails once it completes.
	Error,
	/// Processing cannot continue.
	Fatal,
}

impl Severity {
	/// Label used as the diagnostic prefix in text output.
	pub fn label(self) -> &'static str {
		match self {
			Self::Note => "note",
			Self::Warning => "warning",
			Self::Error => "error",
			Self::Fatal => "fatal error",
		}
	}

	pub fn is_fatal(self) -> bool {
		self == Self::Fatal
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}
