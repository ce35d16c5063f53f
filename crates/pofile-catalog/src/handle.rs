//! Owned catalog handle.

use crate::error::{CatalogError, CatalogResult};
use crate::fs::atomic_write;
use crate::list::MessageList;
use crate::message::Message;
use crate::reader::PoReader;
use crate::writer::{PoWriter, WriterOptions};
use pofile_diagnostics::XerrorHandler;
use std::path::{Path, PathBuf};

const DEFAULT_HEADER: &str = "Project-Id-Version: PACKAGE VERSION\n\
	PO-Revision-Date: YEAR-MO-DA HO:MI+ZONE\n\
	Language: \n\
	MIME-Version: 1.0\n\
	Content-Type: text/plain; charset=UTF-8\n\
	Content-Transfer-Encoding: 8bit\n";

/// Exclusive owner of one [`MessageList`].
///
/// A handle is the unit callers pass around between catalog operations.
/// It is deliberately not `Clone`: the list it holds is released exactly
/// once, either when the handle is dropped or through
/// [`into_list`](Self::into_list).
///
/// # Example
///
/// ```
/// use pofile_catalog::{CatalogHandle, WriterOptions};
/// use pofile_diagnostics::XerrorHandler;
///
/// let handler = XerrorHandler::textmode();
/// let po = "msgid \"\"\nmsgstr \"Content-Type: text/plain; charset=UTF-8\\n\"\n\n\
///           msgid \"Hello\"\nmsgstr \"Hallo\"\n";
/// let mut catalog = CatalogHandle::parse("de.po", po, &handler).unwrap();
///
/// catalog.list_mut().set_header_field("Language", "de");
/// assert_eq!(catalog.list().header_field("Language"), Some("de"));
/// assert_eq!(catalog.list().gettext(None, "Hello"), Some("Hallo"));
/// ```
#[derive(Debug)]
pub struct CatalogHandle {
	list: MessageList,
	sources: Vec<PathBuf>,
}

impl CatalogHandle {
	/// Empty catalog with a default header.
	pub fn new() -> Self {
		let mut list = MessageList::new();
		list.replace(Message::new("", DEFAULT_HEADER));
		Self {
			list,
			sources: Vec::new(),
		}
	}

	/// Reads one catalog file.
	pub fn open(path: impl AsRef<Path>, handler: &XerrorHandler) -> CatalogResult<Self> {
		Self::open_many([path], handler)
	}

	/// Reads several catalog files into a single list.
	///
	/// Reading stops at the first file that fails; a duplicate entry across
	/// files is reported with both locations.
	pub fn open_many<I, P>(paths: I, handler: &XerrorHandler) -> CatalogResult<Self>
	where
		I: IntoIterator<Item = P>,
		P: AsRef<Path>,
	{
		let reader = PoReader::new(handler);
		let mut list = MessageList::new();
		let mut sources = Vec::new();
		for path in paths {
			let path = path.as_ref();
			reader.read_path_into(&mut list, path)?;
			sources.push(path.to_path_buf());
		}
		Ok(Self { list, sources })
	}

	/// Reads catalog text. `name` is used in diagnostics only.
	pub fn parse(name: &str, text: &str, handler: &XerrorHandler) -> CatalogResult<Self> {
		let list = PoReader::new(handler).read_str(name, text)?;
		Ok(Self {
			list,
			sources: Vec::new(),
		})
	}

	pub fn list(&self) -> &MessageList {
		&self.list
	}

	pub fn list_mut(&mut self) -> &mut MessageList {
		&mut self.list
	}

	/// Files the list was read from, in reading order.
	pub fn sources(&self) -> &[PathBuf] {
		&self.sources
	}

	pub fn to_po_string(&self, options: &WriterOptions) -> String {
		PoWriter::new(options.clone()).to_string(&self.list)
	}

	/// Writes the catalog to `path`, replacing it atomically.
	pub fn write(&self, path: impl AsRef<Path>, options: &WriterOptions) -> CatalogResult<()> {
		let path = path.as_ref();
		let text = self.to_po_string(options);
		atomic_write(path, text.as_bytes()).map_err(|source| CatalogError::Write {
			path: path.to_path_buf(),
			source,
		})?;
		tracing::debug!(file = %path.display(), entries = self.list.len(), "catalog written");
		Ok(())
	}

	pub fn into_list(self) -> MessageList {
		self.list
	}
}

impl Default for CatalogHandle {
	fn default() -> Self {
		Self::new()
	}
}

impl From<MessageList> for CatalogHandle {
	fn from(list: MessageList) -> Self {
		Self {
			list,
			sources: Vec::new(),
		}
	}
}
