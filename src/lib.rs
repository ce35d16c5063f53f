//! # pofile
//!
//! Reading, editing and writing gettext PO catalogs, with every problem
//! found along the way delivered through a two-slot diagnostics handler
//! table.
//!
//! ## Crates
//!
//! - [`diagnostics`]: severities, [`Diagnostic`] values, the
//!   [`XerrorHandler`] table with its `xerror` and `xerror2` slots, and the
//!   text-mode reporter that fills both slots by default.
//! - [`catalog`]: the PO reader and writer, [`MessageList`] and the owned
//!   [`CatalogHandle`].
//!
//! ## Handler tables
//!
//! A handler table is built from two callbacks. `xerror` receives a single
//! diagnostic; `xerror2` receives two related diagnostics, such as a
//! duplicate definition and the location of the first one. A fatal
//! diagnostic is delivered first and then surfaces as an `Err`, so the
//! caller decides how to stop.
//!
//! ```
//! use pofile::{CatalogHandle, Diagnostic, XerrorHandler};
//! use std::sync::{Arc, Mutex};
//!
//! let seen: Arc<Mutex<Vec<String>>> = Arc::default();
//! let single = Arc::clone(&seen);
//! let paired = Arc::clone(&seen);
//! let handler = XerrorHandler::builder()
//! 	.xerror(move |d: &Diagnostic| single.lock().unwrap().push(d.to_string()))
//! 	.xerror2(move |first: &Diagnostic, second: &Diagnostic| {
//! 		let mut seen = paired.lock().unwrap();
//! 		seen.push(second.to_string());
//! 		seen.push(first.to_string());
//! 	})
//! 	.build()
//! 	.unwrap();
//!
//! let po = "msgid \"a\"\nmsgstr \"1\"\n\nmsgid \"a\"\nmsgstr \"2\"\n";
//! let err = CatalogHandle::parse("fr.po", po, &handler).unwrap_err();
//!
//! assert!(err.is_fatal());
//! let seen = seen.lock().unwrap();
//! assert_eq!(seen[0], "fr.po:4: error: duplicate message definition");
//! assert_eq!(seen[1], "fr.po:1: error: ...this is the location of the first definition");
//! assert_eq!(seen[2], "fr.po: fatal error: found 1 fatal error");
//! ```

pub use pofile_catalog as catalog;
pub use pofile_diagnostics as diagnostics;

pub use pofile_catalog::{
	CatalogError, CatalogHandle, CatalogResult, CatalogStats, Message, MessageList, PoReader,
	PoWriter, ReadSummary, SourcePosition, WriterOptions,
};
pub use pofile_diagnostics::{
	CollectingReporter, ColorChoice, Diagnostic, DiagnosticError, DispatchResult,
	FatalDiagnostic, MessageRef, Report, Reporter, ReporterOptions, Severity, TextmodeReporter,
	XerrorHandler, XerrorHandlerBuilder,
};
