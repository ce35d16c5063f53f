//! Error types for handler construction and fatal diagnostics.

use crate::diagnostic::Diagnostic;
use thiserror::Error;

/// Errors raised while assembling a handler table.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiagnosticError {
	/// One of the two callback slots was never filled.
	#[error("handler table is missing its `{slot}` callback")]
	MissingCallback {
		/// Name of the empty slot (`xerror` or `xerror2`).
		slot: &'static str,
	},
}

/// Returned by handler dispatch when a fatal diagnostic has been reported.
///
/// The diagnostic has already been delivered to the callback by the time
/// this value exists; callers only need to stop and decide how to exit.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{diagnostic}")]
pub struct FatalDiagnostic {
	pub diagnostic: Diagnostic,
}

impl FatalDiagnostic {
	pub fn new(diagnostic: Diagnostic) -> Self {
		Self { diagnostic }
	}
}

/// Result of a handler dispatch.
pub type DispatchResult = Result<(), FatalDiagnostic>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_missing_callback_display() {
		let err = DiagnosticError::MissingCallback { slot: "xerror2" };
		assert_eq!(
			err.to_string(),
			"handler table is missing its `xerror2` callback"
		);
	}

	#[rstest]
	fn test_fatal_display_includes_location() {
		let err = FatalDiagnostic::new(
			Diagnostic::fatal("found 2 fatal errors").with_filename("fr.po"),
		);
		assert_eq!(err.to_string(), "fr.po: fatal error: found 2 fatal errors");
	}
}
