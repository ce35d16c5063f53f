//! Catalog error types.

use crate::message::SourcePosition;
use pofile_diagnostics::{FatalDiagnostic, MessageRef};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
	/// The catalog file could not be read.
	#[error("cannot read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The catalog file could not be written.
	#[error("cannot write {}: {source}", path.display())]
	Write {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// IO error on a caller-supplied stream.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	/// A fatal diagnostic stopped the operation. It has already been
	/// delivered to the handler table.
	#[error(transparent)]
	Fatal(#[from] FatalDiagnostic),

	/// An entry with the same context and msgid is already in the list.
	#[error("duplicate message definition: {key}")]
	DuplicateMessage {
		key: MessageRef,
		/// Where the existing entry came from, when known.
		first: Option<SourcePosition>,
	},
}

impl CatalogError {
	pub fn is_fatal(&self) -> bool {
		matches!(self, Self::Fatal(_))
	}
}
