//! Text-mode reporter: the default implementation of both handler slots.
//!
//! Output follows the usual compiler layout:
//!
//! ```text
//! fr.po:12:1: warning: unknown escape sequence `\q`
//! fr.po:25:1: error: duplicate message definition
//! fr.po:10:1: error: ...this is the location of the first definition
//! ```
//!
//! Location components that are unknown are left out entirely.

use crate::diagnostic::Diagnostic;
use crate::handler::Reporter;
use crate::severity::Severity;
use colored::{Color, Colorize};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io::{IsTerminal, Write};

/// When to colorize severity labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
	/// Colorize when writing to a terminal.
	#[default]
	Auto,
	Always,
	Never,
}

/// Presentation options for [`TextmodeReporter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReporterOptions {
	pub color: ColorChoice,
	pub show_column: bool,
}

impl Default for ReporterOptions {
	fn default() -> Self {
		Self {
			color: ColorChoice::Auto,
			show_column: true,
		}
	}
}

/// Writes diagnostics as text to a sink, standard error by default.
///
/// The sink is locked for the whole of a report, so the two lines of a
/// paired report are never interleaved with output from another thread.
pub struct TextmodeReporter {
	sink: Mutex<Box<dyn Write + Send>>,
	options: ReporterOptions,
	colorize: bool,
}

impl TextmodeReporter {
	pub fn stderr() -> Self {
		Self::stderr_with(ReporterOptions::default())
	}

	pub fn stderr_with(options: ReporterOptions) -> Self {
		let colorize = match options.color {
			ColorChoice::Auto => std::io::stderr().is_terminal(),
			ColorChoice::Always => true,
			ColorChoice::Never => false,
		};
		Self {
			sink: Mutex::new(Box::new(std::io::stderr())),
			options,
			colorize,
		}
	}

	/// Reporter writing to an arbitrary sink.
	///
	/// `ColorChoice::Auto` never colorizes here since the sink is not known
	/// to be a terminal.
	pub fn with_writer<W>(writer: W, options: ReporterOptions) -> Self
	where
		W: Write + Send + 'static,
	{
		let colorize = options.color == ColorChoice::Always;
		Self {
			sink: Mutex::new(Box::new(writer)),
			options,
			colorize,
		}
	}

	pub fn options(&self) -> &ReporterOptions {
		&self.options
	}

	/// Renders one diagnostic, including the trailing newline.
	pub fn render(&self, diagnostic: &Diagnostic) -> String {
		let location = self.location_prefix(diagnostic);
		let label = format!("{}: ", diagnostic.severity.label());
		let indent = location.chars().count() + label.chars().count();
		let label = if self.colorize {
			label.color(severity_color(diagnostic.severity)).bold().to_string()
		} else {
			label
		};

		let mut out = String::with_capacity(indent + diagnostic.text.len() + 1);
		out.push_str(&location);
		out.push_str(&label);
		if diagnostic.multiline {
			let padding = " ".repeat(indent);
			for (i, line) in diagnostic.text.lines().enumerate() {
				if i > 0 {
					out.push('\n');
					out.push_str(&padding);
				}
				out.push_str(line);
			}
		} else {
			out.push_str(&diagnostic.text);
		}
		out.push('\n');
		out
	}

	fn location_prefix(&self, diagnostic: &Diagnostic) -> String {
		let mut prefix = String::new();
		if let Some(filename) = &diagnostic.filename {
			prefix.push_str(&escape_control_chars(filename));
			prefix.push(':');
		}
		if let Some(line) = diagnostic.line {
			prefix.push_str(&line.to_string());
			prefix.push(':');
			if self.options.show_column
				&& let Some(column) = diagnostic.column
			{
				prefix.push_str(&column.to_string());
				prefix.push(':');
			}
		}
		if !prefix.is_empty() {
			prefix.push(' ');
		}
		prefix
	}

	fn emit(&self, text: &str) {
		let mut sink = self.sink.lock();
		// A reporter has nowhere to report its own failures.
		let _ = sink.write_all(text.as_bytes());
		let _ = sink.flush();
	}
}

impl Reporter for TextmodeReporter {
	fn report(&self, diagnostic: &Diagnostic) {
		self.emit(&self.render(diagnostic));
	}

	fn report_pair(&self, first: &Diagnostic, second: &Diagnostic) {
		let mut block = self.render(second);
		block.push_str(&self.render(first));
		self.emit(&block);
	}
}

fn severity_color(severity: Severity) -> Color {
	match severity {
		Severity::Note => Color::Cyan,
		Severity::Warning => Color::Yellow,
		Severity::Error | Severity::Fatal => Color::Red,
	}
}

/// Escapes control characters as `\xNN` so that file names cannot smuggle
/// terminal sequences into diagnostic output.
pub fn escape_control_chars(s: &str) -> String {
	let mut result = String::with_capacity(s.len());
	for ch in s.chars() {
		if ch.is_control() {
			let mut buf = [0u8; 4];
			for byte in ch.encode_utf8(&mut buf).as_bytes() {
				result.push_str(&format!("\\x{:02x}", byte));
			}
		} else {
			result.push(ch);
		}
	}
	result
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn plain() -> TextmodeReporter {
		TextmodeReporter::with_writer(std::io::sink(), ReporterOptions::default())
	}

	#[rstest]
	fn test_render_full_location() {
		let diag = Diagnostic::warning("unknown escape sequence")
			.with_filename("fr.po")
			.at(12, 5);
		assert_eq!(
			plain().render(&diag),
			"fr.po:12:5: warning: unknown escape sequence\n"
		);
	}

	#[rstest]
	fn test_render_hides_column_when_disabled() {
		let reporter = TextmodeReporter::with_writer(
			std::io::sink(),
			ReporterOptions {
				show_column: false,
				..ReporterOptions::default()
			},
		);
		let diag = Diagnostic::error("bad").with_filename("fr.po").at(3, 9);
		assert_eq!(reporter.render(&diag), "fr.po:3: error: bad\n");
	}

	#[rstest]
	fn test_render_multiline_hanging_indent() {
		let diag = Diagnostic::error("first line\nsecond line")
			.with_filename("a.po")
			.with_line(4)
			.multiline(true);
		assert_eq!(
			plain().render(&diag),
			"a.po:4: error: first line\n               second line\n"
		);
	}

	#[rstest]
	fn test_render_single_line_keeps_text() {
		let diag = Diagnostic::note("a\nb");
		assert_eq!(plain().render(&diag), "note: a\nb\n");
	}

	#[rstest]
	fn test_escape_control_chars() {
		assert_eq!(escape_control_chars("a\u{1b}[31m.po"), "a\\x1b[31m.po");
		assert_eq!(escape_control_chars("fr_ç.po"), "fr_ç.po");
	}

	#[rstest]
	fn test_always_colorizes_label() {
		colored::control::set_override(true);
		let reporter = TextmodeReporter::with_writer(
			std::io::sink(),
			ReporterOptions {
				color: ColorChoice::Always,
				..ReporterOptions::default()
			},
		);
		let rendered = reporter.render(&Diagnostic::error("bad"));
		assert!(rendered.contains("\u{1b}["));
		assert!(rendered.ends_with("bad\n"));
	}
}
