//! Gettext PO catalogs.
//!
//! - [`PoReader`] reads PO/POT text into a [`MessageList`], reporting
//!   problems through a [`pofile_diagnostics::XerrorHandler`].
//! - [`MessageList`] holds entries in file order, keyed by context and
//!   msgid, with header access, lookup and statistics.
//! - [`PoWriter`] serializes a list back to PO text.
//! - [`CatalogHandle`] owns one list together with where it came from and
//!   writes it back atomically.
//!
//! ```no_run
//! use pofile_catalog::{CatalogHandle, WriterOptions};
//! use pofile_diagnostics::XerrorHandler;
//!
//! let handler = XerrorHandler::textmode();
//! let catalog = CatalogHandle::open("locale/fr.po", &handler)?;
//! println!("{:.1}% translated", catalog.list().stats().percent_translated());
//! catalog.write("locale/fr.po", &WriterOptions::default())?;
//! # Ok::<(), pofile_catalog::CatalogError>(())
//! ```

mod escape;
mod fs;

pub mod error;
pub mod handle;
pub mod list;
pub mod message;
pub mod reader;
pub mod writer;

pub use error::{CatalogError, CatalogResult};
pub use handle::CatalogHandle;
pub use list::{CatalogStats, MessageList};
pub use message::{Message, SourcePosition};
pub use reader::{PoReader, ReadSummary};
pub use writer::{PoWriter, WriterOptions};
