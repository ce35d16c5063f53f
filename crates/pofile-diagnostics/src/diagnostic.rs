//! Diagnostic records passed to handler tables.

use crate::severity::Severity;
use std::fmt;

/// Identifies the catalog entry a diagnostic is about.
///
/// Only the key of the entry is carried, never the entry itself, so a
/// diagnostic stays valid after the message list it came from is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageRef {
	pub msgctxt: Option<String>,
	pub msgid: String,
}

impl MessageRef {
	pub fn new(msgctxt: Option<String>, msgid: impl Into<String>) -> Self {
		Self {
			msgctxt,
			msgid: msgid.into(),
		}
	}
}

impl fmt::Display for MessageRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.msgctxt {
			Some(ctxt) => write!(f, "{:?} (context {:?})", self.msgid, ctxt),
			None => write!(f, "{:?}", self.msgid),
		}
	}
}

/// A single diagnostic event.
///
/// Location fields are optional. A line or column of zero is treated as
/// unknown and stored as `None`, so formatters never print placeholder
/// positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	pub severity: Severity,
	pub message: Option<MessageRef>,
	pub filename: Option<String>,
	pub line: Option<usize>,
	pub column: Option<usize>,
	/// Whether `text` spans several lines and should be laid out with a
	/// hanging indent.
	pub multiline: bool,
	pub text: String,
}

impl Diagnostic {
	pub fn new(severity: Severity, text: impl Into<String>) -> Self {
		Self {
			severity,
			message: None,
			filename: None,
			line: None,
			column: None,
			multiline: false,
			text: text.into(),
		}
	}

	pub fn note(text: impl Into<String>) -> Self {
		Self::new(Severity::Note, text)
	}

	pub fn warning(text: impl Into<String>) -> Self {
		Self::new(Severity::Warning, text)
	}

	pub fn error(text: impl Into<String>) -> Self {
		Self::new(Severity::Error, text)
	}

	pub fn fatal(text: impl Into<String>) -> Self {
		Self::new(Severity::Fatal, text)
	}

	/// Sets the file name. An empty name is treated as absent.
	pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
		let filename = filename.into();
		self.filename = (!filename.is_empty()).then_some(filename);
		self
	}

	/// Sets the 1-based line number. Zero means unknown.
	pub fn with_line(mut self, line: usize) -> Self {
		self.line = (line != 0).then_some(line);
		self
	}

	/// Sets the 1-based column number. Zero means unknown.
	pub fn with_column(mut self, column: usize) -> Self {
		self.column = (column != 0).then_some(column);
		self
	}

	/// Shorthand for [`with_line`](Self::with_line) plus
	/// [`with_column`](Self::with_column).
	pub fn at(self, line: usize, column: usize) -> Self {
		self.with_line(line).with_column(column)
	}

	pub fn with_message(mut self, message: MessageRef) -> Self {
		self.message = Some(message);
		self
	}

	pub fn with_message_opt(mut self, message: Option<MessageRef>) -> Self {
		self.message = message;
		self
	}

	pub fn multiline(mut self, multiline: bool) -> Self {
		self.multiline = multiline;
		self
	}

	/// Whether the diagnostic carries any location context at all.
	pub fn has_location(&self) -> bool {
		self.filename.is_some() || self.line.is_some()
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(filename) = &self.filename {
			write!(f, "{}:", filename)?;
		}
		if let Some(line) = self.line {
			write!(f, "{}:", line)?;
			if let Some(column) = self.column {
				write!(f, "{}:", column)?;
			}
		}
		if self.has_location() {
			f.write_str(" ")?;
		}
		write!(f, "{}: {}", self.severity, self.text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_zero_position_is_unknown() {
		let diag = Diagnostic::warning("odd").with_filename("a.po").at(0, 0);
		assert_eq!(diag.line, None);
		assert_eq!(diag.column, None);
		assert_eq!(diag.filename.as_deref(), Some("a.po"));
	}

	#[rstest]
	fn test_empty_filename_is_absent() {
		let diag = Diagnostic::note("hi").with_filename("");
		assert!(diag.filename.is_none());
		assert!(!diag.has_location());
	}

	#[rstest]
	#[case(Diagnostic::error("bad").with_filename("a.po").at(3, 7), "a.po:3:7: error: bad")]
	#[case(Diagnostic::error("bad").with_filename("a.po").with_line(3), "a.po:3: error: bad")]
	#[case(Diagnostic::error("bad").with_filename("a.po"), "a.po: error: bad")]
	#[case(Diagnostic::error("bad").with_column(9), "error: bad")]
	#[case(Diagnostic::note("fyi"), "note: fyi")]
	fn test_display_omits_missing_context(#[case] diag: Diagnostic, #[case] expected: &str) {
		assert_eq!(diag.to_string(), expected);
	}

	#[rstest]
	fn test_message_ref_display() {
		let plain = MessageRef::new(None, "Hello");
		assert_eq!(plain.to_string(), "\"Hello\"");
		let ctx = MessageRef::new(Some("menu".to_string()), "File");
		assert_eq!(ctx.to_string(), "\"File\" (context \"menu\")");
	}
}
