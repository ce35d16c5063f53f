//! Exit status mapping

use pofile_catalog::CatalogError;
use std::process::ExitCode;
use thiserror::Error;

/// Failures reported by commands themselves rather than by the catalog layer.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
	#[error("no translation for {0}")]
	NotTranslated(String),
}

/// Exit status for a failed command.
///
/// Fatal diagnostics and missing translations give 1. Usage, I/O and
/// configuration errors give 2.
pub(crate) fn exit_status(error: &anyhow::Error) -> u8 {
	if already_reported(error) || error.downcast_ref::<CommandError>().is_some() {
		return 1;
	}
	2
}

/// Whether the reporter has already printed this failure as a diagnostic.
pub(crate) fn already_reported(error: &anyhow::Error) -> bool {
	error
		.downcast_ref::<CatalogError>()
		.is_some_and(CatalogError::is_fatal)
}

pub(crate) fn exit_code(error: &anyhow::Error) -> ExitCode {
	ExitCode::from(exit_status(error))
}
