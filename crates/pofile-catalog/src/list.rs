//! Ordered message list.

use crate::error::{CatalogError, CatalogResult};
use crate::message::Message;
use indexmap::{Equivalent, IndexMap};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MessageKey {
	msgctxt: Option<String>,
	msgid: String,
}

impl MessageKey {
	fn of(message: &Message) -> Self {
		Self {
			msgctxt: message.msgctxt.clone(),
			msgid: message.msgid.clone(),
		}
	}
}

/// Borrowed form of [`MessageKey`]; hashes identically.
#[derive(Hash)]
struct KeyRef<'a> {
	msgctxt: Option<&'a str>,
	msgid: &'a str,
}

impl Equivalent<MessageKey> for KeyRef<'_> {
	fn equivalent(&self, key: &MessageKey) -> bool {
		self.msgctxt == key.msgctxt.as_deref() && self.msgid == key.msgid
	}
}

/// Translation progress of a list. The header and obsolete entries are not
/// counted in `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
	pub total: usize,
	pub translated: usize,
	pub fuzzy: usize,
	pub untranslated: usize,
	pub obsolete: usize,
}

impl CatalogStats {
	/// Share of translated entries, 0 to 100. An empty list is 100%.
	pub fn percent_translated(&self) -> f64 {
		if self.total == 0 {
			return 100.0;
		}
		self.translated as f64 * 100.0 / self.total as f64
	}
}

/// Messages in file order, unique by `(msgctxt, msgid)`.
///
/// # Example
///
/// ```
/// use pofile_catalog::{Message, MessageList};
///
/// let mut list = MessageList::new();
/// list.push(Message::new("Hello", "Bonjour")).unwrap();
/// list.push(Message::new("File", "Fichier").with_context("menu")).unwrap();
///
/// assert_eq!(list.gettext(None, "Hello"), Some("Bonjour"));
/// assert_eq!(list.gettext(Some("menu"), "File"), Some("Fichier"));
/// assert!(list.push(Message::new("Hello", "Salut")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageList {
	messages: IndexMap<MessageKey, Message>,
}

impl MessageList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.messages.len()
	}

	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Message> {
		self.messages.values()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Message> {
		self.messages.values_mut()
	}

	/// Appends `message`.
	///
	/// # Errors
	///
	/// [`CatalogError::DuplicateMessage`] when an entry with the same key
	/// is already present; the list is left unchanged.
	pub fn push(&mut self, message: Message) -> CatalogResult<()> {
		if let Some(existing) = self.find(message.msgctxt.as_deref(), &message.msgid) {
			return Err(CatalogError::DuplicateMessage {
				key: message.message_ref(),
				first: existing.position.clone(),
			});
		}
		self.messages.insert(MessageKey::of(&message), message);
		Ok(())
	}

	/// Inserts `message`, replacing an entry with the same key in place.
	/// Returns the replaced entry.
	pub fn replace(&mut self, message: Message) -> Option<Message> {
		self.messages.insert(MessageKey::of(&message), message)
	}

	pub fn find(&self, msgctxt: Option<&str>, msgid: &str) -> Option<&Message> {
		self.messages.get(&KeyRef { msgctxt, msgid })
	}

	pub fn find_mut(&mut self, msgctxt: Option<&str>, msgid: &str) -> Option<&mut Message> {
		self.messages.get_mut(&KeyRef { msgctxt, msgid })
	}

	/// Removes an entry, keeping the order of the others.
	pub fn remove(&mut self, msgctxt: Option<&str>, msgid: &str) -> Option<Message> {
		self.messages.shift_remove(&KeyRef { msgctxt, msgid })
	}

	/// Entry at `index` in file order.
	pub fn get(&self, index: usize) -> Option<&Message> {
		self.messages.get_index(index).map(|(_, message)| message)
	}

	/// msgid of the entry at `index`.
	pub fn msgid(&self, index: usize) -> Option<&str> {
		self.get(index).map(|message| message.msgid.as_str())
	}

	/// Translation of a non-fuzzy, non-obsolete entry.
	///
	/// Returns `None` when the entry is missing, fuzzy, obsolete or has an
	/// empty first form. Plural selection is not performed; the first form
	/// is returned.
	pub fn gettext(&self, msgctxt: Option<&str>, msgid: &str) -> Option<&str> {
		let message = self.find(msgctxt, msgid)?;
		if message.obsolete || message.is_fuzzy() {
			return None;
		}
		message.msgstr_first().filter(|s| !s.is_empty())
	}

	pub fn header(&self) -> Option<&Message> {
		self.find(None, "")
	}

	/// Value of a header field such as `Content-Type`. Field names are
	/// matched case-insensitively.
	pub fn header_field(&self, name: &str) -> Option<&str> {
		self.header()?.header_field(name)
	}

	/// Sets a header field, adding a header entry at the front of the list
	/// when there is none yet. An existing field keeps its position.
	pub fn set_header_field(&mut self, name: &str, value: &str) {
		if self.header().is_none() {
			self.messages
				.shift_insert(0, MessageKey::of(&Message::new("", "")), Message::new("", ""));
		}
		let Some(header) = self.find_mut(None, "") else {
			return;
		};
		if header.msgstr.is_empty() {
			header.msgstr.push(String::new());
		}

		let mut replaced = false;
		let mut text = String::new();
		for line in header.msgstr[0].lines() {
			let is_field = line
				.split_once(':')
				.is_some_and(|(field, _)| field.trim().eq_ignore_ascii_case(name));
			if is_field {
				if !replaced {
					text.push_str(&format!("{}: {}\n", name, value));
					replaced = true;
				}
			} else {
				text.push_str(line);
				text.push('\n');
			}
		}
		if !replaced {
			text.push_str(&format!("{}: {}\n", name, value));
		}
		header.msgstr[0] = text;
	}

	/// Charset declared in the header's `Content-Type` field.
	pub fn charset(&self) -> Option<&str> {
		self.header()?.charset()
	}

	pub fn stats(&self) -> CatalogStats {
		let mut stats = CatalogStats::default();
		for message in self.iter().filter(|m| !m.is_header()) {
			if message.obsolete {
				stats.obsolete += 1;
				continue;
			}
			stats.total += 1;
			if message.is_translated() {
				stats.translated += 1;
			} else if message.is_fuzzy() {
				stats.fuzzy += 1;
			} else {
				stats.untranslated += 1;
			}
		}
		stats
	}
}
