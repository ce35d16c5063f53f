//! Gettext .po file reader
//!
//! Reads PO and POT text into a [`MessageList`]. Every problem found along
//! the way is reported through the caller's [`XerrorHandler`]: recoverable
//! problems are counted and reading continues so that one pass reports as
//! much as possible. If any error was reported, a final fatal diagnostic
//! (`found N fatal errors`) ends the read and the caller gets
//! [`CatalogError::Fatal`] instead of a half-valid list.

use crate::error::{CatalogError, CatalogResult};
use crate::escape::unescape;
use crate::list::MessageList;
use crate::message::{Message, SourcePosition};
use pofile_diagnostics::{Diagnostic, MessageRef, Severity, XerrorHandler};
use std::io::Read;
use std::path::Path;

/// Counts of what a successful read produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadSummary {
	/// Entries added to the list, header included.
	pub entries: usize,
	pub notes: usize,
	pub warnings: usize,
}

/// PO reader bound to a handler table.
///
/// # Example
///
/// ```
/// use pofile_catalog::PoReader;
/// use pofile_diagnostics::{CollectingReporter, XerrorHandler};
/// use std::sync::Arc;
///
/// let collector = Arc::new(CollectingReporter::new());
/// let handler = XerrorHandler::from_reporter(Arc::clone(&collector));
///
/// let po = "msgid \"Hello\"\nmsgstr \"Bonjour\"\n";
/// let list = PoReader::new(&handler).read_str("fr.po", po).unwrap();
/// assert_eq!(list.gettext(None, "Hello"), Some("Bonjour"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PoReader<'h> {
	handler: &'h XerrorHandler,
}

impl<'h> PoReader<'h> {
	pub fn new(handler: &'h XerrorHandler) -> Self {
		Self { handler }
	}

	/// Reads `text` into a new list. `filename` is only used in diagnostics
	/// and entry positions; pass `""` when there is none.
	pub fn read_str(&self, filename: &str, text: &str) -> CatalogResult<MessageList> {
		let mut list = MessageList::new();
		self.read_str_into(&mut list, filename, text)?;
		Ok(list)
	}

	/// Reads `text` into an existing list. Entries clashing with entries
	/// already in `list` are reported as duplicates.
	pub fn read_str_into(
		&self,
		list: &mut MessageList,
		filename: &str,
		text: &str,
	) -> CatalogResult<ReadSummary> {
		Parser::new(self.handler, list, filename).read(text, None)
	}

	/// Reads a whole stream. Invalid UTF-8 is reported as an error and
	/// decoded lossily so that the rest of the input is still checked.
	pub fn read_from<R: Read>(
		&self,
		list: &mut MessageList,
		filename: &str,
		mut reader: R,
	) -> CatalogResult<ReadSummary> {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes)?;
		self.read_bytes_into(list, filename, &bytes)
	}

	pub fn read_path(&self, path: impl AsRef<Path>) -> CatalogResult<MessageList> {
		let mut list = MessageList::new();
		self.read_path_into(&mut list, path)?;
		Ok(list)
	}

	pub fn read_path_into(
		&self,
		list: &mut MessageList,
		path: impl AsRef<Path>,
	) -> CatalogResult<ReadSummary> {
		let path = path.as_ref();
		let bytes = std::fs::read(path).map_err(|source| CatalogError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		let filename = path.display().to_string();
		tracing::debug!(file = %filename, bytes = bytes.len(), "reading catalog");
		self.read_bytes_into(list, &filename, &bytes)
	}

	fn read_bytes_into(
		&self,
		list: &mut MessageList,
		filename: &str,
		bytes: &[u8],
	) -> CatalogResult<ReadSummary> {
		match std::str::from_utf8(bytes) {
			Ok(text) => self.read_str_into(list, filename, text),
			Err(err) => {
				let valid = &bytes[..err.valid_up_to()];
				let line = valid.iter().filter(|&&b| b == b'\n').count() + 1;
				let column = valid
					.rsplit(|&b| b == b'\n')
					.next()
					.map_or(0, |tail| String::from_utf8_lossy(tail).chars().count())
					+ 1;
				let text = String::from_utf8_lossy(bytes);
				let invalid = Diagnostic::error("invalid UTF-8 byte sequence").at(line, column);
				Parser::new(self.handler, list, filename).read(&text, Some(invalid))
			}
		}
	}
}

/// Which string the next continuation line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
	Msgctxt,
	Msgid,
	MsgidPlural,
	Msgstr(usize),
	PreviousMsgctxt,
	PreviousMsgid,
	/// `#| msgid_plural` is accepted but not kept.
	PreviousIgnored,
}

#[derive(Debug, Default)]
struct Pending {
	message: Message,
	has_msgid: bool,
	has_msgstr: bool,
	/// Set once any line of the entry, comments included, has been read.
	started: bool,
	/// Line of the entry's first `msgctxt` or `msgid` keyword.
	keyword_line: usize,
}

impl Pending {
	fn message_ref(&self) -> Option<MessageRef> {
		self.has_msgid.then(|| self.message.message_ref())
	}
}

struct Parser<'a> {
	handler: &'a XerrorHandler,
	list: &'a mut MessageList,
	filename: &'a str,
	pending: Pending,
	field: Option<Field>,
	summary: ReadSummary,
	errors: usize,
	/// Header entry read by this parse, even when an earlier file's header
	/// was kept instead.
	header: Option<HeaderEntry>,
	/// Changes made to `list`, undone when the read fails.
	undo: Vec<Undo>,
}

#[derive(Debug)]
struct HeaderEntry {
	position: SourcePosition,
	charset: Option<String>,
}

#[derive(Debug)]
enum Undo {
	Inserted {
		msgctxt: Option<String>,
		msgid: String,
	},
	Replaced(Message),
}

impl<'a> Parser<'a> {
	fn new(handler: &'a XerrorHandler, list: &'a mut MessageList, filename: &'a str) -> Self {
		Self {
			handler,
			list,
			filename,
			pending: Pending::default(),
			field: None,
			summary: ReadSummary::default(),
			errors: 0,
			header: None,
			undo: Vec::new(),
		}
	}

	/// Parses `text`, leaving `list` as it was when the read fails.
	///
	/// `leading` is reported before the first line.
	fn read(mut self, text: &str, leading: Option<Diagnostic>) -> CatalogResult<ReadSummary> {
		let result = self.parse(text, leading);
		if result.is_err() {
			self.rollback();
		}
		result
	}

	fn parse(&mut self, text: &str, leading: Option<Diagnostic>) -> CatalogResult<ReadSummary> {
		if let Some(diagnostic) = leading {
			self.report(diagnostic)?;
		}
		for (index, line) in text.lines().enumerate() {
			self.line(index + 1, line)?;
		}
		self.finish()
	}

	fn rollback(&mut self) {
		if self.undo.is_empty() {
			return;
		}
		tracing::debug!(file = self.filename, changes = self.undo.len(), "rolling back failed read");
		while let Some(change) = self.undo.pop() {
			match change {
				Undo::Inserted { msgctxt, msgid } => {
					self.list.remove(msgctxt.as_deref(), &msgid);
				}
				Undo::Replaced(previous) => {
					self.list.replace(previous);
				}
			}
		}
	}

	fn report(&mut self, diagnostic: Diagnostic) -> CatalogResult<()> {
		let diagnostic = diagnostic.with_filename(self.filename);
		match diagnostic.severity {
			Severity::Note => self.summary.notes += 1,
			Severity::Warning => self.summary.warnings += 1,
			Severity::Error => self.errors += 1,
			Severity::Fatal => {}
		}
		self.handler.xerror(diagnostic)?;
		Ok(())
	}

	/// Error about the entry being parsed.
	fn entry_error(&mut self, line: usize, column: usize, text: &str) -> CatalogResult<()> {
		let diagnostic = Diagnostic::error(text)
			.at(line, column)
			.with_message_opt(self.pending.message_ref());
		self.report(diagnostic)
	}

	fn line(&mut self, line_no: usize, raw: &str) -> CatalogResult<()> {
		let indent = raw.len() - raw.trim_start().len();
		let mut column = raw[..indent].chars().count() + 1;
		let mut line = raw.trim();
		if line.is_empty() {
			return Ok(());
		}

		let mut obsolete = false;
		if let Some(rest) = line.strip_prefix("#~") {
			obsolete = true;
			let trimmed = rest.trim_start();
			column += line.chars().count() - trimmed.chars().count();
			line = trimmed;
			if line.is_empty() {
				return Ok(());
			}
			if let Some(previous) = line.strip_prefix('|') {
				self.start_comment()?;
				return self.previous(line_no, column + 1, previous.trim());
			}
		}

		if !obsolete && let Some(rest) = line.strip_prefix('#') {
			return self.comment(line_no, column, rest);
		}

		if line.starts_with('"') {
			return self.continuation(line_no, column, line);
		}

		let keyword_len = line
			.find(|c: char| c.is_whitespace() || c == '"')
			.unwrap_or(line.len());
		let (keyword, rest) = line.split_at(keyword_len);
		let value_column = column + keyword.chars().count() + (rest.len() - rest.trim_start().len());
		let rest = rest.trim_start();

		match keyword {
			"msgctxt" => self.msgctxt(line_no, column, value_column, rest, obsolete),
			"msgid" => self.msgid(line_no, column, value_column, rest, obsolete),
			"msgid_plural" => self.msgid_plural(line_no, column, value_column, rest),
			"msgstr" => self.msgstr(line_no, column, value_column, rest, None),
			_ if keyword.starts_with("msgstr[") => {
				match keyword
					.strip_prefix("msgstr[")
					.and_then(|s| s.strip_suffix(']'))
					.and_then(|s| s.parse::<usize>().ok())
				{
					Some(index) => self.msgstr(line_no, column, value_column, rest, Some(index)),
					None => self.entry_error(line_no, column, "invalid plural form index"),
				}
			}
			_ => {
				let text = format!("keyword \"{}\" unknown", keyword);
				self.entry_error(line_no, column, &text)
			}
		}
	}

	/// A comment line ends a complete entry and starts the next one.
	fn start_comment(&mut self) -> CatalogResult<()> {
		if self.pending.has_msgstr {
			self.flush()?;
		}
		self.pending.started = true;
		Ok(())
	}

	fn comment(&mut self, line_no: usize, column: usize, rest: &str) -> CatalogResult<()> {
		self.start_comment()?;
		if let Some(previous) = rest.strip_prefix('|') {
			return self.previous(line_no, column + 2, previous.trim());
		}
		self.field = None;

		let message = &mut self.pending.message;
		match rest.chars().next() {
			Some(',') => {
				for flag in rest[1..].split(',').map(str::trim).filter(|f| !f.is_empty()) {
					message.add_flag(flag);
				}
			}
			Some(':') => {
				message
					.references
					.extend(rest[1..].split_whitespace().map(str::to_string));
			}
			Some('.') => message.extracted_comments.push(rest[1..].trim().to_string()),
			Some(' ') | None => message.comments.push(rest.strip_prefix(' ').unwrap_or(rest).to_string()),
			Some(_) => message.comments.push(rest.to_string()),
		}
		Ok(())
	}

	/// `#| msgctxt`, `#| msgid`, `#| msgid_plural` and their continuations.
	fn previous(&mut self, line_no: usize, column: usize, rest: &str) -> CatalogResult<()> {
		let (field, literal) = if let Some(value) = rest.strip_prefix("msgctxt") {
			(Field::PreviousMsgctxt, value)
		} else if let Some(value) = rest.strip_prefix("msgid_plural") {
			(Field::PreviousIgnored, value)
		} else if let Some(value) = rest.strip_prefix("msgid") {
			(Field::PreviousMsgid, value)
		} else if rest.starts_with('"') {
			return match self.field {
				Some(field @ (Field::PreviousMsgctxt | Field::PreviousMsgid | Field::PreviousIgnored)) => {
					let Some(value) = self.string(line_no, column, rest)? else {
						return Ok(());
					};
					self.append(field, &value);
					Ok(())
				}
				_ => self.entry_error(line_no, column, "string continuation without keyword"),
			};
		} else {
			return self.entry_error(line_no, column, "invalid previous-message comment");
		};

		let Some(value) = self.string(line_no, column, literal.trim_start())? else {
			return Ok(());
		};
		match field {
			Field::PreviousMsgctxt => self.pending.message.previous_msgctxt = Some(value),
			Field::PreviousMsgid => self.pending.message.previous_msgid = Some(value),
			_ => {}
		}
		self.field = Some(field);
		Ok(())
	}

	fn msgctxt(
		&mut self,
		line_no: usize,
		column: usize,
		value_column: usize,
		rest: &str,
		obsolete: bool,
	) -> CatalogResult<()> {
		if self.pending.has_msgstr {
			self.flush()?;
		} else if self.pending.has_msgid {
			self.entry_error(line_no, column, "missing \"msgstr\" section")?;
			self.discard();
		}
		let Some(value) = self.string(line_no, value_column, rest)? else {
			return Ok(());
		};
		self.start(line_no, obsolete);
		self.pending.message.msgctxt = Some(value);
		self.field = Some(Field::Msgctxt);
		Ok(())
	}

	fn msgid(
		&mut self,
		line_no: usize,
		column: usize,
		value_column: usize,
		rest: &str,
		obsolete: bool,
	) -> CatalogResult<()> {
		if self.pending.has_msgstr {
			self.flush()?;
		} else if self.pending.has_msgid {
			self.entry_error(line_no, column, "missing \"msgstr\" section")?;
			self.discard();
		}
		let Some(value) = self.string(line_no, value_column, rest)? else {
			return Ok(());
		};
		self.start(line_no, obsolete);
		self.pending.message.msgid = value;
		self.pending.has_msgid = true;
		self.field = Some(Field::Msgid);
		Ok(())
	}

	fn msgid_plural(
		&mut self,
		line_no: usize,
		column: usize,
		value_column: usize,
		rest: &str,
	) -> CatalogResult<()> {
		if !self.pending.has_msgid || self.pending.has_msgstr {
			return self.entry_error(line_no, column, "\"msgid_plural\" without preceding \"msgid\"");
		}
		let Some(value) = self.string(line_no, value_column, rest)? else {
			return Ok(());
		};
		self.pending.message.msgid_plural = Some(value);
		self.field = Some(Field::MsgidPlural);
		Ok(())
	}

	fn msgstr(
		&mut self,
		line_no: usize,
		column: usize,
		value_column: usize,
		rest: &str,
		index: Option<usize>,
	) -> CatalogResult<()> {
		if !self.pending.has_msgid {
			return self.entry_error(line_no, column, "\"msgstr\" without preceding \"msgid\"");
		}
		let plural = self.pending.message.is_plural();
		let index = match index {
			None if plural => {
				return self.entry_error(
					line_no,
					column,
					"plural message requires \"msgstr[0]\" instead of \"msgstr\"",
				);
			}
			None if self.pending.has_msgstr => {
				return self.entry_error(line_no, column, "duplicate \"msgstr\" section");
			}
			None => 0,
			Some(_) if !plural => {
				return self.entry_error(
					line_no,
					column,
					"\"msgstr[]\" used for a message without \"msgid_plural\"",
				);
			}
			Some(index) if index != self.pending.message.msgstr.len() => {
				return self.entry_error(line_no, column, "plural form index out of sequence");
			}
			Some(index) => index,
		};

		let Some(value) = self.string(line_no, value_column, rest)? else {
			return Ok(());
		};
		self.pending.message.msgstr.push(value);
		self.pending.has_msgstr = true;
		self.field = Some(Field::Msgstr(index));
		Ok(())
	}

	fn continuation(&mut self, line_no: usize, column: usize, line: &str) -> CatalogResult<()> {
		let Some(field) = self.field else {
			return self.entry_error(line_no, column, "string continuation without keyword");
		};
		let Some(value) = self.string(line_no, column, line)? else {
			return Ok(());
		};
		self.append(field, &value);
		Ok(())
	}

	fn append(&mut self, field: Field, value: &str) {
		let message = &mut self.pending.message;
		let target = match field {
			Field::Msgctxt => message.msgctxt.as_mut(),
			Field::Msgid => Some(&mut message.msgid),
			Field::MsgidPlural => message.msgid_plural.as_mut(),
			Field::Msgstr(index) => message.msgstr.get_mut(index),
			Field::PreviousMsgctxt => message.previous_msgctxt.as_mut(),
			Field::PreviousMsgid => message.previous_msgid.as_mut(),
			Field::PreviousIgnored => None,
		};
		if let Some(target) = target {
			target.push_str(value);
		}
	}

	/// Parses one string literal starting at `literal` (which begins at
	/// `column`). Reports and returns `None` when it is malformed.
	fn string(&mut self, line_no: usize, column: usize, literal: &str) -> CatalogResult<Option<String>> {
		let literal = literal.trim_end();
		let Some(body) = literal.strip_prefix('"') else {
			self.entry_error(line_no, column, "expected a string in double quotes")?;
			return Ok(None);
		};

		let mut escaped = false;
		let mut end = None;
		for (i, ch) in body.char_indices() {
			match ch {
				_ if escaped => escaped = false,
				'\\' => escaped = true,
				'"' => {
					end = Some(i);
					break;
				}
				_ => {}
			}
		}
		let Some(end) = end else {
			self.entry_error(line_no, column, "end-of-line within string")?;
			return Ok(None);
		};

		let trailing = body[end + 1..].trim();
		if !trailing.is_empty() {
			let at = column + 1 + body[..=end].chars().count();
			self.entry_error(line_no, at, "invalid characters after string")?;
			return Ok(None);
		}

		let (value, unknown) = unescape(&body[..end]);
		for bad in unknown {
			let text = match bad.ch {
				Some(ch) => format!("invalid control sequence \"\\{}\"", ch),
				None => "invalid control sequence \"\\\"".to_string(),
			};
			let diagnostic = Diagnostic::warning(text)
				.at(line_no, column + 1 + bad.offset)
				.with_message_opt(self.pending.message_ref());
			self.report(diagnostic)?;
		}
		Ok(Some(value))
	}

	fn start(&mut self, line_no: usize, obsolete: bool) {
		self.pending.started = true;
		if self.pending.keyword_line == 0 {
			self.pending.keyword_line = line_no;
		}
		if obsolete {
			self.pending.message.obsolete = true;
		}
	}

	fn discard(&mut self) {
		self.pending = Pending::default();
		self.field = None;
	}

	/// Moves the pending entry into the list.
	fn flush(&mut self) -> CatalogResult<()> {
		let pending = std::mem::take(&mut self.pending);
		self.field = None;
		if !pending.has_msgid {
			return Ok(());
		}
		if !pending.has_msgstr {
			let diagnostic = Diagnostic::error("missing \"msgstr\" section")
				.with_line(pending.keyword_line)
				.with_message_opt(pending.message_ref());
			return self.report(diagnostic);
		}

		let mut message = pending.message;
		let filename = (!self.filename.is_empty()).then(|| self.filename.to_string());
		let position = SourcePosition::new(filename, pending.keyword_line);
		message.position = Some(position.clone());

		if message.is_header() && !message.obsolete {
			if let Some(own) = &self.header {
				let first = Some(own.position.clone());
				return self.duplicate(&message, first);
			}
			self.header = Some(HeaderEntry {
				position,
				charset: message.charset().map(str::to_string),
			});
			if self.list.header().is_some_and(|h| !h.obsolete) {
				tracing::debug!(file = self.filename, "keeping header of an earlier catalog");
				return Ok(());
			}
		}

		let existing = self
			.list
			.find(message.msgctxt.as_deref(), &message.msgid)
			.map(|m| (m.obsolete, m.position.clone()));
		match existing {
			None => {
				tracing::trace!(msgid = %message.msgid, line = pending.keyword_line, "entry read");
				self.undo.push(Undo::Inserted {
					msgctxt: message.msgctxt.clone(),
					msgid: message.msgid.clone(),
				});
				self.list.replace(message);
				self.summary.entries += 1;
			}
			Some((true, _)) if !message.obsolete => {
				if let Some(previous) = self.list.replace(message) {
					self.undo.push(Undo::Replaced(previous));
				}
			}
			Some((_, _)) if message.obsolete => {
				tracing::trace!(msgid = %message.msgid, "obsolete duplicate dropped");
			}
			Some((_, first)) => self.duplicate(&message, first)?,
		}
		Ok(())
	}

	fn duplicate(&mut self, message: &Message, first: Option<SourcePosition>) -> CatalogResult<()> {
		let key = message.message_ref();
		let mut earlier = Diagnostic::error("...this is the location of the first definition")
			.with_message(key.clone());
		if let Some(first) = first {
			if let Some(filename) = first.filename {
				earlier = earlier.with_filename(filename);
			}
			earlier = earlier.with_line(first.line);
		}
		let line = message.position.as_ref().map_or(0, |p| p.line);
		let later = Diagnostic::error("duplicate message definition")
			.with_filename(self.filename)
			.with_line(line)
			.with_message(key);

		self.errors += 1;
		self.handler.xerror2(earlier, later)?;
		Ok(())
	}

	/// Checks the charset of the header entry this parse read.
	fn check_header(&mut self) -> CatalogResult<()> {
		let Some(header) = self.header.take() else {
			return Ok(());
		};
		let line = header.position.line;
		match header.charset {
			None => self.report(Diagnostic::note("charset missing in header").with_line(line)),
			Some(charset) if is_supported_charset(&charset) => Ok(()),
			Some(charset) => {
				let text = format!(
					"charset \"{}\" is not supported\nthe catalog is read as UTF-8",
					charset
				);
				self.report(Diagnostic::warning(text).with_line(line).multiline(true))
			}
		}
	}

	fn finish(&mut self) -> CatalogResult<ReadSummary> {
		if self.pending.started {
			self.flush()?;
		}
		self.check_header()?;

		if self.errors > 0 {
			let text = if self.errors == 1 {
				"found 1 fatal error".to_string()
			} else {
				format!("found {} fatal errors", self.errors)
			};
			self.report(Diagnostic::fatal(text))?;
		}

		tracing::debug!(
			file = self.filename,
			entries = self.summary.entries,
			warnings = self.summary.warnings,
			"catalog read"
		);
		Ok(self.summary)
	}
}

/// Charsets that are read without conversion. `CHARSET` is the
/// placeholder left in freshly extracted templates.
fn is_supported_charset(charset: &str) -> bool {
	["UTF-8", "UTF8", "US-ASCII", "ASCII", "CHARSET"]
		.iter()
		.any(|known| charset.eq_ignore_ascii_case(known))
}
