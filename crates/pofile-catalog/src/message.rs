//! Catalog entries.

use pofile_diagnostics::MessageRef;
use std::fmt;

/// Where an entry was read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePosition {
	pub filename: Option<String>,
	/// 1-based line of the entry's first keyword.
	pub line: usize,
}

impl SourcePosition {
	pub fn new(filename: Option<String>, line: usize) -> Self {
		Self { filename, line }
	}
}

impl fmt::Display for SourcePosition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.filename {
			Some(filename) => write!(f, "{}:{}", filename, self.line),
			None => write!(f, "line {}", self.line),
		}
	}
}

/// A single PO entry.
///
/// # Example
///
/// ```
/// use pofile_catalog::Message;
///
/// let mut msg = Message::new("Hello", "Bonjour");
/// assert!(msg.is_translated());
///
/// msg.add_flag("fuzzy");
/// assert!(msg.is_fuzzy());
/// assert!(!msg.is_translated());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message {
	pub msgctxt: Option<String>,
	pub msgid: String,
	pub msgid_plural: Option<String>,
	/// Translations. Exactly one element for a non-plural entry, one per
	/// plural form otherwise.
	pub msgstr: Vec<String>,
	/// Translator comments (`# `).
	pub comments: Vec<String>,
	/// Comments extracted from source code (`#.`).
	pub extracted_comments: Vec<String>,
	/// Source references (`#:`).
	pub references: Vec<String>,
	/// Flags (`#,`), such as `fuzzy` or `c-format`.
	pub flags: Vec<String>,
	/// Previous context (`#| msgctxt`).
	pub previous_msgctxt: Option<String>,
	/// Previous untranslated string (`#| msgid`).
	pub previous_msgid: Option<String>,
	/// Entry was commented out with `#~`.
	pub obsolete: bool,
	pub position: Option<SourcePosition>,
}

impl Message {
	pub fn new(msgid: impl Into<String>, msgstr: impl Into<String>) -> Self {
		Self {
			msgid: msgid.into(),
			msgstr: vec![msgstr.into()],
			..Self::default()
		}
	}

	pub fn plural(
		msgid: impl Into<String>,
		msgid_plural: impl Into<String>,
		forms: Vec<String>,
	) -> Self {
		Self {
			msgid: msgid.into(),
			msgid_plural: Some(msgid_plural.into()),
			msgstr: forms,
			..Self::default()
		}
	}

	pub fn with_context(mut self, msgctxt: impl Into<String>) -> Self {
		self.msgctxt = Some(msgctxt.into());
		self
	}

	/// The header is the entry with an empty msgid and no context.
	pub fn is_header(&self) -> bool {
		self.msgid.is_empty() && self.msgctxt.is_none()
	}

	pub fn is_plural(&self) -> bool {
		self.msgid_plural.is_some()
	}

	pub fn is_fuzzy(&self) -> bool {
		self.has_flag("fuzzy")
	}

	/// Translated means: not fuzzy, and every translation form non-empty.
	pub fn is_translated(&self) -> bool {
		!self.is_fuzzy() && !self.msgstr.is_empty() && self.msgstr.iter().all(|s| !s.is_empty())
	}

	pub fn has_flag(&self, flag: &str) -> bool {
		self.flags.iter().any(|f| f == flag)
	}

	/// Adds `flag` unless it is already set.
	pub fn add_flag(&mut self, flag: impl Into<String>) {
		let flag = flag.into();
		if !self.has_flag(&flag) {
			self.flags.push(flag);
		}
	}

	/// Removes `flag`, returning whether it was set.
	pub fn remove_flag(&mut self, flag: &str) -> bool {
		let before = self.flags.len();
		self.flags.retain(|f| f != flag);
		self.flags.len() != before
	}

	/// First translation form, if any.
	pub fn msgstr_first(&self) -> Option<&str> {
		self.msgstr.first().map(String::as_str)
	}

	/// Value of a field in a header entry's translation, matched
	/// case-insensitively. Meaningful on the header entry only.
	pub fn header_field(&self, name: &str) -> Option<&str> {
		self.msgstr_first()?.lines().find_map(|line| {
			let (field, value) = line.split_once(':')?;
			field
				.trim()
				.eq_ignore_ascii_case(name)
				.then(|| value.trim())
		})
	}

	/// Charset from the `Content-Type` header field.
	pub fn charset(&self) -> Option<&str> {
		self.header_field("Content-Type")?
			.split(';')
			.find_map(|part| {
				let (key, value) = part.split_once('=')?;
				key.trim()
					.eq_ignore_ascii_case("charset")
					.then(|| value.trim())
			})
	}

	/// Key-only reference for use in diagnostics.
	pub fn message_ref(&self) -> MessageRef {
		MessageRef::new(self.msgctxt.clone(), self.msgid.clone())
	}
}
