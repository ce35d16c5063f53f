//! Handler tables.
//!
//! A catalog operation reports every problem it finds through an
//! [`XerrorHandler`]: a pair of callbacks, one for single diagnostics and
//! one for diagnostics that relate two locations (a duplicate definition
//! and the entry it clashes with, for example).
//!
//! Callbacks only *report*. Whether processing stops is decided by the
//! dispatch methods on the table, which return [`FatalDiagnostic`] once a
//! fatal diagnostic has been delivered. Nothing in this crate exits the
//! process.
//!
//! # Example
//!
//! ```
//! use pofile_diagnostics::{Diagnostic, XerrorHandler};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&seen);
//! let handler = XerrorHandler::builder()
//!     .xerror(move |_diag| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     })
//!     .xerror2(|_first, _second| {})
//!     .build()
//!     .unwrap();
//!
//! handler.xerror(Diagnostic::warning("suspicious")).unwrap();
//! assert!(handler.xerror(Diagnostic::fatal("broken")).is_err());
//! assert_eq!(seen.load(Ordering::SeqCst), 2);
//! ```

use crate::diagnostic::Diagnostic;
use crate::error::{DiagnosticError, DispatchResult, FatalDiagnostic};
use crate::textmode::TextmodeReporter;
use std::fmt;
use std::sync::Arc;

/// Callback for single diagnostics.
pub type XerrorFn = Arc<dyn Fn(&Diagnostic) + Send + Sync>;

/// Callback for paired diagnostics.
pub type Xerror2Fn = Arc<dyn Fn(&Diagnostic, &Diagnostic) + Send + Sync>;

/// Something that can receive both kinds of diagnostics.
///
/// Implementors can be turned into a handler table with
/// [`XerrorHandler::from_reporter`].
pub trait Reporter: Send + Sync {
	fn report(&self, diagnostic: &Diagnostic);

	/// `first` is the earlier location, `second` the one that triggered the
	/// report.
	fn report_pair(&self, first: &Diagnostic, second: &Diagnostic);
}

/// The two-slot handler table.
///
/// Both slots are always filled; the only way to obtain a table is through
/// [`XerrorHandlerBuilder::build`] (which rejects a missing slot) or the
/// constructors that fill both slots themselves. Cloning shares the
/// callbacks.
#[derive(Clone)]
pub struct XerrorHandler {
	xerror: XerrorFn,
	xerror2: Xerror2Fn,
}

impl XerrorHandler {
	pub fn builder() -> XerrorHandlerBuilder {
		XerrorHandlerBuilder::default()
	}

	/// Table whose slots both forward to `reporter`.
	pub fn from_reporter<R>(reporter: Arc<R>) -> Self
	where
		R: Reporter + 'static,
	{
		let single = Arc::clone(&reporter);
		Self {
			xerror: Arc::new(move |diag: &Diagnostic| single.report(diag)),
			xerror2: Arc::new(move |first: &Diagnostic, second: &Diagnostic| {
				reporter.report_pair(first, second)
			}),
		}
	}

	/// Default table: text diagnostics on standard error.
	pub fn textmode() -> Self {
		Self::from_reporter(Arc::new(TextmodeReporter::stderr()))
	}

	/// Delivers a single diagnostic.
	///
	/// Returns `Err` after delivery when the diagnostic is fatal.
	pub fn xerror(&self, diagnostic: Diagnostic) -> DispatchResult {
		(self.xerror)(&diagnostic);
		if diagnostic.severity.is_fatal() {
			tracing::debug!(text = %diagnostic.text, "fatal diagnostic reported");
			return Err(FatalDiagnostic::new(diagnostic));
		}
		Ok(())
	}

	/// Delivers a pair of related diagnostics as one report.
	///
	/// Returns `Err` after delivery when either diagnostic is fatal. The
	/// error carries the fatal one, preferring `second`.
	pub fn xerror2(&self, first: Diagnostic, second: Diagnostic) -> DispatchResult {
		(self.xerror2)(&first, &second);
		if second.severity.is_fatal() {
			tracing::debug!(text = %second.text, "fatal paired diagnostic reported");
			return Err(FatalDiagnostic::new(second));
		}
		if first.severity.is_fatal() {
			tracing::debug!(text = %first.text, "fatal paired diagnostic reported");
			return Err(FatalDiagnostic::new(first));
		}
		Ok(())
	}
}

impl Default for XerrorHandler {
	fn default() -> Self {
		Self::textmode()
	}
}

impl fmt::Debug for XerrorHandler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("XerrorHandler").finish_non_exhaustive()
	}
}

/// Builder for [`XerrorHandler`].
#[derive(Default)]
pub struct XerrorHandlerBuilder {
	xerror: Option<XerrorFn>,
	xerror2: Option<Xerror2Fn>,
}

impl XerrorHandlerBuilder {
	pub fn xerror<F>(mut self, callback: F) -> Self
	where
		F: Fn(&Diagnostic) + Send + Sync + 'static,
	{
		self.xerror = Some(Arc::new(callback));
		self
	}

	pub fn xerror2<F>(mut self, callback: F) -> Self
	where
		F: Fn(&Diagnostic, &Diagnostic) + Send + Sync + 'static,
	{
		self.xerror2 = Some(Arc::new(callback));
		self
	}

	/// Finishes the table.
	///
	/// # Errors
	///
	/// [`DiagnosticError::MissingCallback`] when either slot is empty.
	pub fn build(self) -> Result<XerrorHandler, DiagnosticError> {
		let xerror = self
			.xerror
			.ok_or(DiagnosticError::MissingCallback { slot: "xerror" })?;
		let xerror2 = self
			.xerror2
			.ok_or(DiagnosticError::MissingCallback { slot: "xerror2" })?;
		Ok(XerrorHandler { xerror, xerror2 })
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::collect::CollectingReporter;
	use crate::severity::Severity;
	use rstest::rstest;

	#[rstest]
	fn test_build_requires_both_slots() {
		let missing_second = XerrorHandler::builder().xerror(|_| {}).build();
		assert_eq!(
			missing_second.unwrap_err(),
			DiagnosticError::MissingCallback { slot: "xerror2" }
		);

		let missing_first = XerrorHandler::builder().xerror2(|_, _| {}).build();
		assert_eq!(
			missing_first.unwrap_err(),
			DiagnosticError::MissingCallback { slot: "xerror" }
		);

		assert!(
			XerrorHandler::builder()
				.xerror(|_| {})
				.xerror2(|_, _| {})
				.build()
				.is_ok()
		);
	}

	#[rstest]
	#[case(Severity::Note)]
	#[case(Severity::Warning)]
	#[case(Severity::Error)]
	fn test_non_fatal_returns_control(#[case] severity: Severity) {
		let collector = Arc::new(CollectingReporter::new());
		let handler = XerrorHandler::from_reporter(Arc::clone(&collector));

		let result = handler.xerror(Diagnostic::new(severity, "something").with_filename("a.po"));

		assert!(result.is_ok());
		assert_eq!(collector.len(), 1);
	}

	#[rstest]
	fn test_fatal_is_delivered_before_error() {
		let collector = Arc::new(CollectingReporter::new());
		let handler = XerrorHandler::from_reporter(Arc::clone(&collector));

		let err = handler
			.xerror(Diagnostic::fatal("cannot continue"))
			.unwrap_err();

		assert_eq!(err.diagnostic.text, "cannot continue");
		assert_eq!(collector.diagnostics()[0].severity, Severity::Fatal);
	}

	#[rstest]
	#[case(Severity::Fatal, Severity::Error, true)]
	#[case(Severity::Error, Severity::Fatal, true)]
	#[case(Severity::Error, Severity::Error, false)]
	#[case(Severity::Warning, Severity::Note, false)]
	fn test_pair_is_fatal_when_either_is(
		#[case] first: Severity,
		#[case] second: Severity,
		#[case] fatal: bool,
	) {
		let collector = Arc::new(CollectingReporter::new());
		let handler = XerrorHandler::from_reporter(Arc::clone(&collector));

		let result = handler.xerror2(
			Diagnostic::new(first, "earlier").with_filename("a.po").with_line(10),
			Diagnostic::new(second, "later").with_filename("b.po").with_line(25),
		);

		assert_eq!(result.is_err(), fatal);
		assert_eq!(collector.pairs().len(), 1);
	}

	#[rstest]
	fn test_clone_shares_callbacks() {
		let collector = Arc::new(CollectingReporter::new());
		let handler = XerrorHandler::from_reporter(Arc::clone(&collector));
		let copy = handler.clone();

		handler.xerror(Diagnostic::note("one")).unwrap();
		copy.xerror(Diagnostic::note("two")).unwrap();

		assert_eq!(collector.len(), 2);
	}
}
