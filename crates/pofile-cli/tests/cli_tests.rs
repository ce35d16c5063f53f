//! End-to-end tests driving the `pofile` binary

use rstest::{fixture, rstest};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const HEADER: &str = "msgid \"\"\nmsgstr \"Content-Type: text/plain; charset=UTF-8\\n\"\n\n";

#[fixture]
fn dir() -> TempDir {
	tempfile::tempdir().unwrap()
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, content).unwrap();
	path
}

/// Runs the binary inside `dir` so that no stray `pofile.toml` is picked up.
fn pofile(dir: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_pofile"))
		.current_dir(dir)
		.env_remove("RUST_LOG")
		.arg("--color")
		.arg("never")
		.args(args)
		.output()
		.unwrap()
}

fn stderr(output: &Output) -> String {
	String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
	String::from_utf8_lossy(&output.stdout).into_owned()
}

#[rstest]
fn test_check_clean_catalog_succeeds(dir: TempDir) {
	write_file(
		dir.path(),
		"fr.po",
		&format!("{}msgid \"Hello\"\nmsgstr \"Bonjour\"\n", HEADER),
	);

	let output = pofile(dir.path(), &["check", "fr.po"]);

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert!(stderr(&output).is_empty());
}

#[rstest]
fn test_check_duplicate_across_files_reports_both_locations(dir: TempDir) {
	let mut a = "# filler\n".repeat(9);
	a.push_str("msgid \"Hello\"\nmsgstr \"Bonjour\"\n");
	let mut b = "# filler\n".repeat(24);
	b.push_str("msgid \"Hello\"\nmsgstr \"Salut\"\n");
	write_file(dir.path(), "a.po", &a);
	write_file(dir.path(), "b.po", &b);

	let output = pofile(dir.path(), &["check", "a.po", "b.po"]);

	assert_eq!(output.status.code(), Some(1));
	let err = stderr(&output);
	assert!(err.contains("b.po:25: error: duplicate message definition"), "{}", err);
	assert!(
		err.contains("a.po:10: error: ...this is the location of the first definition"),
		"{}",
		err
	);
	assert!(err.contains("b.po: fatal error: found 1 fatal error"), "{}", err);
}

#[rstest]
fn test_check_reports_warning_without_failing(dir: TempDir) {
	write_file(
		dir.path(),
		"fr.po",
		&format!("{}msgid \"Tab\\q\"\nmsgstr \"\"\n", HEADER),
	);

	let output = pofile(dir.path(), &["check", "fr.po"]);

	assert!(output.status.success());
	assert!(stderr(&output).contains("fr.po:4:"));
	assert!(stderr(&output).contains("warning: "));
}

#[rstest]
fn test_check_missing_file_exits_two(dir: TempDir) {
	let output = pofile(dir.path(), &["check", "absent.po"]);
	assert_eq!(output.status.code(), Some(2));
}

#[rstest]
fn test_usage_error_exits_two(dir: TempDir) {
	let output = pofile(dir.path(), &["check"]);
	assert_eq!(output.status.code(), Some(2));
}

#[rstest]
fn test_normalize_failure_leaves_no_output(dir: TempDir) {
	write_file(
		dir.path(),
		"in.po",
		"msgid \"a\"\nmsgstr \"b\"\n\nmsgid \"a\"\nmsgstr \"c\"\n",
	);

	let output = pofile(dir.path(), &["normalize", "in.po", "-o", "out.po"]);

	assert_eq!(output.status.code(), Some(1));
	assert!(stderr(&output).contains("in.po:4: error: duplicate message definition"));
	assert!(!dir.path().join("out.po").exists());
}

#[rstest]
fn test_normalize_rewrites_catalog(dir: TempDir) {
	write_file(
		dir.path(),
		"in.po",
		"msgid \"\"\nmsgstr \"\"\n\"Content-Type: text/plain; charset=UTF-8\\n\"\n\n\
		 #, fuzzy\nmsgid   \"Hello\"\nmsgstr \"Bon\"\n\"jour\"\n",
	);

	let output = pofile(
		dir.path(),
		&["normalize", "in.po", "-o", "out.po", "--omit-header"],
	);

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert_eq!(
		std::fs::read_to_string(dir.path().join("out.po")).unwrap(),
		"#, fuzzy\nmsgid \"Hello\"\nmsgstr \"Bonjour\"\n"
	);
}

#[rstest]
fn test_normalize_uses_configured_width(dir: TempDir) {
	write_file(
		dir.path(),
		"in.po",
		"msgid \"aaaa bbbb cccc dddd\"\nmsgstr \"\"\n",
	);
	write_file(dir.path(), "pofile.toml", "[writer]\nwrap_width = 16\n");

	let output = pofile(dir.path(), &["normalize", "in.po", "-o", "out.po"]);

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	assert_eq!(
		std::fs::read_to_string(dir.path().join("out.po")).unwrap(),
		"msgid \"\"\n\"aaaa bbbb \"\n\"cccc dddd\"\nmsgstr \"\"\n"
	);
}

#[rstest]
fn test_invalid_config_exits_two(dir: TempDir) {
	write_file(dir.path(), "pofile.toml", "[writer]\nwidth = 3\n");
	write_file(dir.path(), "fr.po", HEADER);

	let output = pofile(dir.path(), &["check", "fr.po"]);

	assert_eq!(output.status.code(), Some(2));
	assert!(stderr(&output).contains("pofile.toml"));
}

#[rstest]
#[case(&["get", "fr.po", "Hello"], Some("Bonjour"))]
#[case(&["get", "fr.po", "Open", "--context", "menu"], Some("Ouvrir"))]
#[case(&["get", "fr.po", "Open"], None)]
#[case(&["get", "fr.po", "Draft"], None)]
fn test_get(dir: TempDir, #[case] args: &[&str], #[case] expected: Option<&str>) {
	write_file(
		dir.path(),
		"fr.po",
		&format!(
			"{}msgid \"Hello\"\nmsgstr \"Bonjour\"\n\n\
			 msgctxt \"menu\"\nmsgid \"Open\"\nmsgstr \"Ouvrir\"\n\n\
			 #, fuzzy\nmsgid \"Draft\"\nmsgstr \"Brouillon\"\n",
			HEADER
		),
	);

	let output = pofile(dir.path(), args);

	match expected {
		Some(translation) => {
			assert!(output.status.success(), "stderr: {}", stderr(&output));
			assert_eq!(stdout(&output), format!("{}\n", translation));
		}
		None => {
			assert_eq!(output.status.code(), Some(1));
			assert!(stderr(&output).contains("no translation for"));
		}
	}
}

#[rstest]
fn test_stats_json(dir: TempDir) {
	write_file(
		dir.path(),
		"fr.po",
		&format!(
			"{}msgid \"a\"\nmsgstr \"A\"\n\nmsgid \"b\"\nmsgstr \"\"\n\n\
			 #, fuzzy\nmsgid \"c\"\nmsgstr \"C\"\n\n#~ msgid \"d\"\n#~ msgstr \"D\"\n",
			HEADER
		),
	);

	let output = pofile(dir.path(), &["stats", "fr.po", "--json"]);

	assert!(output.status.success(), "stderr: {}", stderr(&output));
	let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
	assert_eq!(stats["total"], 3);
	assert_eq!(stats["translated"], 1);
	assert_eq!(stats["fuzzy"], 1);
	assert_eq!(stats["untranslated"], 1);
	assert_eq!(stats["obsolete"], 1);
}
