//! Catalog handle tests against real files

use pofile_catalog::{CatalogError, CatalogHandle, Message, WriterOptions};
use pofile_diagnostics::{
	CollectingReporter, ColorChoice, ReporterOptions, Severity, TextmodeReporter, XerrorHandler,
};
use rstest::{fixture, rstest};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Catalog text whose `msgid "Hello"` keyword sits on `line`
fn catalog_with_hello_at(line: usize, translation: &str) -> String {
	let mut text = "# filler\n".repeat(line - 1);
	text.push_str(&format!("msgid \"Hello\"\nmsgstr \"{}\"\n", translation));
	text
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, content).unwrap();
	path
}

#[fixture]
fn dir() -> TempDir {
	tempfile::tempdir().unwrap()
}

#[fixture]
fn collector() -> Arc<CollectingReporter> {
	Arc::new(CollectingReporter::new())
}

#[rstest]
fn test_duplicate_across_files_reports_one_pair(dir: TempDir, collector: Arc<CollectingReporter>) {
	let a = write_file(dir.path(), "a.po", &catalog_with_hello_at(10, "Bonjour"));
	let b = write_file(dir.path(), "b.po", &catalog_with_hello_at(25, "Salut"));
	let handler = XerrorHandler::from_reporter(Arc::clone(&collector));

	let err = CatalogHandle::open_many([&a, &b], &handler).unwrap_err();

	assert!(err.is_fatal());
	let pairs = collector.pairs();
	assert_eq!(pairs.len(), 1);
	let (first, second) = &pairs[0];
	assert_eq!(first.filename.as_deref(), Some(a.display().to_string().as_str()));
	assert_eq!(first.line, Some(10));
	assert_eq!(second.filename.as_deref(), Some(b.display().to_string().as_str()));
	assert_eq!(second.line, Some(25));
	assert!(first.severity >= Severity::Error);
	assert!(second.severity >= Severity::Error);
}

#[rstest]
fn test_duplicate_text_output_correlates_locations(dir: TempDir) {
	#[derive(Clone, Default)]
	struct Buffer(Arc<Mutex<Vec<u8>>>);
	impl Write for Buffer {
		fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
			self.0.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}
		fn flush(&mut self) -> std::io::Result<()> {
			Ok(())
		}
	}

	let a = write_file(dir.path(), "a.po", &catalog_with_hello_at(10, "Bonjour"));
	let b = write_file(dir.path(), "b.po", &catalog_with_hello_at(25, "Salut"));
	let buffer = Buffer::default();
	let reporter = TextmodeReporter::with_writer(
		buffer.clone(),
		ReporterOptions {
			color: ColorChoice::Never,
			show_column: true,
		},
	);
	let handler = XerrorHandler::from_reporter(Arc::new(reporter));

	assert!(CatalogHandle::open_many([&a, &b], &handler).is_err());

	let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
	let lines: Vec<&str> = output.lines().collect();
	assert_eq!(
		lines[0],
		format!("{}:25: error: duplicate message definition", b.display())
	);
	assert_eq!(
		lines[1],
		format!(
			"{}:10: error: ...this is the location of the first definition",
			a.display()
		)
	);
	assert_eq!(
		lines[2],
		format!("{}: fatal error: found 1 fatal error", b.display())
	);
}

#[rstest]
fn test_open_many_merges_distinct_entries(dir: TempDir, collector: Arc<CollectingReporter>) {
	let header = "msgid \"\"\nmsgstr \"Content-Type: text/plain; charset=UTF-8\\n\"\n\n";
	let a = write_file(
		dir.path(),
		"a.po",
		&format!("{}msgid \"One\"\nmsgstr \"Un\"\n", header),
	);
	let b = write_file(
		dir.path(),
		"b.po",
		&format!("{}msgid \"Two\"\nmsgstr \"Deux\"\n", header),
	);
	let handler = XerrorHandler::from_reporter(Arc::clone(&collector));

	let catalog = CatalogHandle::open_many([&a, &b], &handler).unwrap();

	assert!(collector.is_empty());
	assert_eq!(catalog.sources(), &[a, b]);
	assert_eq!(catalog.list().len(), 3);
	assert_eq!(catalog.list().gettext(None, "Two"), Some("Deux"));
}

#[rstest]
fn test_header_check_follows_each_file(dir: TempDir, collector: Arc<CollectingReporter>) {
	let a = write_file(
		dir.path(),
		"a.po",
		"msgid \"\"\nmsgstr \"Language: fr\\n\"\n\nmsgid \"One\"\nmsgstr \"Un\"\n",
	);
	let b = write_file(
		dir.path(),
		"b.po",
		&format!(
			"{}msgid \"\"\nmsgstr \"Content-Type: text/plain; charset=UTF-8\\n\"\n\n\
			 msgid \"Two\"\nmsgstr \"Deux\"\n",
			"# filler\n".repeat(4)
		),
	);
	let handler = XerrorHandler::from_reporter(Arc::clone(&collector));

	let catalog = CatalogHandle::open_many([&a, &b], &handler).unwrap();

	let diagnostics = collector.diagnostics();
	assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
	assert_eq!(diagnostics[0].text, "charset missing in header");
	assert_eq!(
		diagnostics[0].filename.as_deref(),
		Some(a.display().to_string().as_str())
	);
	assert_eq!(diagnostics[0].line, Some(1));
	assert_eq!(catalog.list().header_field("Language"), Some("fr"));
	assert_eq!(catalog.list().gettext(None, "Two"), Some("Deux"));
}

#[rstest]
fn test_missing_file_is_read_error(dir: TempDir) {
	let handler = XerrorHandler::from_reporter(Arc::new(CollectingReporter::new()));

	let err = CatalogHandle::open(dir.path().join("absent.po"), &handler).unwrap_err();

	assert!(matches!(err, CatalogError::Read { .. }));
}

#[rstest]
fn test_write_then_reopen(dir: TempDir, collector: Arc<CollectingReporter>) {
	let handler = XerrorHandler::from_reporter(Arc::clone(&collector));
	let mut catalog = CatalogHandle::new();
	catalog.list_mut().set_header_field("Language", "fr");
	let mut message = Message::new("Long line with several words", "Ligne longue\navec retour");
	message.references.push("src/app.rs:42".into());
	message.add_flag("c-format");
	catalog.list_mut().push(message.clone()).unwrap();
	catalog
		.list_mut()
		.push(Message::plural("file", "files", vec!["fichier".into(), "fichiers".into()]))
		.unwrap();

	let path = dir.path().join("fr.po");
	catalog
		.write(
			&path,
			&WriterOptions {
				wrap_width: 20,
				omit_header: false,
			},
		)
		.unwrap();
	let reopened = CatalogHandle::open(&path, &handler).unwrap();

	assert!(collector.is_empty());
	assert_eq!(reopened.list().header_field("Language"), Some("fr"));
	let read_back = reopened
		.list()
		.find(None, "Long line with several words")
		.unwrap();
	assert_eq!(read_back.msgstr, message.msgstr);
	assert_eq!(read_back.references, message.references);
	assert_eq!(read_back.flags, message.flags);
	assert_eq!(
		reopened.list().find(None, "file").unwrap().msgstr.len(),
		2
	);
}

#[rstest]
fn test_failed_open_leaves_output_untouched(dir: TempDir) {
	let input = write_file(
		dir.path(),
		"in.po",
		"msgid \"a\"\nmsgstr \"b\"\n\nmsgid \"a\"\nmsgstr \"c\"\n",
	);
	let output = write_file(dir.path(), "out.po", "original\n");
	let handler = XerrorHandler::from_reporter(Arc::new(CollectingReporter::new()));

	let result = CatalogHandle::open(&input, &handler)
		.and_then(|catalog| catalog.write(&output, &WriterOptions::default()));

	assert!(result.unwrap_err().is_fatal());
	assert_eq!(std::fs::read_to_string(&output).unwrap(), "original\n");
}
