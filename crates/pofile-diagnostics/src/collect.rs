//! In-memory reporter.

use crate::diagnostic::Diagnostic;
use crate::handler::Reporter;
use crate::severity::Severity;
use parking_lot::Mutex;

/// One delivery received by a [`CollectingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
	Single(Diagnostic),
	Pair(Diagnostic, Diagnostic),
}

impl Report {
	/// Highest severity carried by this report.
	pub fn severity(&self) -> Severity {
		match self {
			Self::Single(diag) => diag.severity,
			Self::Pair(first, second) => first.severity.max(second.severity),
		}
	}
}

/// Reporter that keeps every delivery instead of printing it.
///
/// Useful for callers that want to present diagnostics themselves, and
/// for tests.
#[derive(Debug, Default)]
pub struct CollectingReporter {
	reports: Mutex<Vec<Report>>,
}

impl CollectingReporter {
	pub fn new() -> Self {
		Self::default()
	}

	/// All deliveries in arrival order.
	pub fn reports(&self) -> Vec<Report> {
		self.reports.lock().clone()
	}

	/// Single diagnostics only.
	pub fn diagnostics(&self) -> Vec<Diagnostic> {
		self.reports
			.lock()
			.iter()
			.filter_map(|report| match report {
				Report::Single(diag) => Some(diag.clone()),
				Report::Pair(..) => None,
			})
			.collect()
	}

	/// Paired diagnostics only.
	pub fn pairs(&self) -> Vec<(Diagnostic, Diagnostic)> {
		self.reports
			.lock()
			.iter()
			.filter_map(|report| match report {
				Report::Pair(first, second) => Some((first.clone(), second.clone())),
				Report::Single(_) => None,
			})
			.collect()
	}

	/// Number of deliveries whose highest severity is `severity`.
	pub fn count(&self, severity: Severity) -> usize {
		self.reports
			.lock()
			.iter()
			.filter(|report| report.severity() == severity)
			.count()
	}

	pub fn len(&self) -> usize {
		self.reports.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.reports.lock().is_empty()
	}

	pub fn clear(&self) {
		self.reports.lock().clear();
	}
}

impl Reporter for CollectingReporter {
	fn report(&self, diagnostic: &Diagnostic) {
		self.reports.lock().push(Report::Single(diagnostic.clone()));
	}

	fn report_pair(&self, first: &Diagnostic, second: &Diagnostic) {
		self.reports
			.lock()
			.push(Report::Pair(first.clone(), second.clone()));
	}
}
