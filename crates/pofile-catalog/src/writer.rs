//! PO serialization.

use crate::error::CatalogResult;
use crate::escape::escape;
use crate::list::MessageList;
use crate::message::Message;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Output options for [`PoWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WriterOptions {
	/// Maximum line width for string literals. `0` disables wrapping.
	pub wrap_width: usize,
	/// Leave the header entry out of the output.
	pub omit_header: bool,
}

impl Default for WriterOptions {
	fn default() -> Self {
		Self {
			wrap_width: 79,
			omit_header: false,
		}
	}
}

/// Writes a [`MessageList`] as PO text.
///
/// # Example
///
/// ```
/// use pofile_catalog::{Message, MessageList, PoWriter, WriterOptions};
///
/// let mut list = MessageList::new();
/// list.push(Message::new("Hello", "Bonjour")).unwrap();
///
/// let text = PoWriter::new(WriterOptions::default()).to_string(&list);
/// assert_eq!(text, "msgid \"Hello\"\nmsgstr \"Bonjour\"\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PoWriter {
	options: WriterOptions,
}

impl PoWriter {
	pub fn new(options: WriterOptions) -> Self {
		Self { options }
	}

	pub fn to_string(&self, list: &MessageList) -> String {
		let mut out = String::new();
		let mut first = true;
		for message in list.iter() {
			if self.options.omit_header && message.is_header() {
				continue;
			}
			if !first {
				out.push('\n');
			}
			first = false;
			self.write_message(&mut out, message);
		}
		out
	}

	pub fn write_to<W: Write>(&self, list: &MessageList, mut writer: W) -> CatalogResult<()> {
		writer.write_all(self.to_string(list).as_bytes())?;
		writer.flush()?;
		Ok(())
	}

	fn write_message(&self, out: &mut String, message: &Message) {
		for comment in &message.comments {
			if comment.is_empty() {
				out.push_str("#\n");
			} else {
				out.push_str("# ");
				out.push_str(comment);
				out.push('\n');
			}
		}
		for comment in &message.extracted_comments {
			out.push_str("#. ");
			out.push_str(comment);
			out.push('\n');
		}
		self.write_references(out, &message.references);
		if !message.flags.is_empty() {
			out.push_str("#, ");
			out.push_str(&message.flags.join(", "));
			out.push('\n');
		}
		let previous_prefix = if message.obsolete { "#~| " } else { "#| " };
		if let Some(previous) = &message.previous_msgctxt {
			self.write_string(out, previous_prefix, "msgctxt", previous);
		}
		if let Some(previous) = &message.previous_msgid {
			self.write_string(out, previous_prefix, "msgid", previous);
		}

		let prefix = if message.obsolete { "#~ " } else { "" };
		if let Some(msgctxt) = &message.msgctxt {
			self.write_string(out, prefix, "msgctxt", msgctxt);
		}
		self.write_string(out, prefix, "msgid", &message.msgid);
		match &message.msgid_plural {
			Some(plural) => {
				self.write_string(out, prefix, "msgid_plural", plural);
				for (index, form) in message.msgstr.iter().enumerate() {
					self.write_string(out, prefix, &format!("msgstr[{}]", index), form);
				}
			}
			None => {
				let msgstr = message.msgstr_first().unwrap_or("");
				self.write_string(out, prefix, "msgstr", msgstr);
			}
		}
	}

	fn write_references(&self, out: &mut String, references: &[String]) {
		if references.is_empty() {
			return;
		}
		let width = self.options.wrap_width;
		let mut line = String::from("#:");
		for reference in references {
			if width > 0 && line.len() > 2 && line.len() + 1 + reference.len() > width {
				out.push_str(&line);
				out.push('\n');
				line = String::from("#:");
			}
			line.push(' ');
			line.push_str(reference);
		}
		out.push_str(&line);
		out.push('\n');
	}

	/// Writes `keyword "value"`, switching to the multi-line form when the
	/// value has inner newlines or does not fit the wrap width.
	fn write_string(&self, out: &mut String, prefix: &str, keyword: &str, value: &str) {
		let escaped = escape(value);
		let single_len = prefix.chars().count() + keyword.len() + 3 + escaped.chars().count();
		let width = self.options.wrap_width;
		let inner_newline = value.find('\n').is_some_and(|i| i + 1 < value.len());

		if !inner_newline && (width == 0 || single_len <= width) {
			out.push_str(&format!("{}{} \"{}\"\n", prefix, keyword, escaped));
			return;
		}

		out.push_str(&format!("{}{} \"\"\n", prefix, keyword));
		let available = width.saturating_sub(prefix.chars().count() + 2);
		for segment in split_after_newlines(&escaped) {
			for chunk in wrap(segment, if width == 0 { 0 } else { available }) {
				out.push_str(&format!("{}\"{}\"\n", prefix, chunk));
			}
		}
	}
}

/// Splits escaped text after each `\n` escape, keeping the escape with the
/// segment it ends.
fn split_after_newlines(escaped: &str) -> Vec<&str> {
	let mut segments = Vec::new();
	let mut start = 0;
	let bytes = escaped.as_bytes();
	let mut i = 0;
	while i < bytes.len() {
		if bytes[i] == b'\\' && i + 1 < bytes.len() {
			if bytes[i + 1] == b'n' {
				segments.push(&escaped[start..i + 2]);
				start = i + 2;
			}
			i += 2;
		} else {
			i += 1;
		}
	}
	if start < escaped.len() {
		segments.push(&escaped[start..]);
	}
	segments
}

/// Breaks `segment` after spaces so that each piece is at most `max`
/// characters where possible. A piece without any space is never broken.
fn wrap(segment: &str, max: usize) -> Vec<&str> {
	if max == 0 || segment.chars().count() <= max {
		return vec![segment];
	}

	let mut pieces = Vec::new();
	let mut rest = segment;
	while rest.chars().count() > max {
		let limit = rest
			.char_indices()
			.nth(max)
			.map_or(rest.len(), |(i, _)| i);
		let cut = rest[..limit]
			.rfind(' ')
			.or_else(|| rest[limit..].find(' ').map(|i| i + limit))
			.map(|i| i + 1);
		match cut {
			Some(cut) if cut < rest.len() => {
				pieces.push(&rest[..cut]);
				rest = &rest[cut..];
			}
			_ => break,
		}
	}
	pieces.push(rest);
	pieces
}
