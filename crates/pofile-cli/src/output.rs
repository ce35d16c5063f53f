//! Output formatting utilities

use colored::{ColoredString, Colorize};
use pofile_catalog::CatalogStats;
use pofile_diagnostics::ColorChoice;
use serde::Serialize;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};

static STDOUT_COLOR: AtomicBool = AtomicBool::new(false);
static STDERR_COLOR: AtomicBool = AtomicBool::new(false);

/// Whether each stream gets colored output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColorPlan {
	pub stdout: bool,
	pub stderr: bool,
}

impl ColorPlan {
	pub(crate) fn new(choice: ColorChoice, stdout_tty: bool, stderr_tty: bool) -> Self {
		let decide = |tty: bool| match choice {
			ColorChoice::Auto => tty,
			ColorChoice::Always => true,
			ColorChoice::Never => false,
		};
		Self {
			stdout: decide(stdout_tty),
			stderr: decide(stderr_tty),
		}
	}

	/// `colored` has a single process-wide switch. It is turned on when
	/// either stream wants color, and each writer gates its own styling.
	pub(crate) fn global_override(&self) -> bool {
		self.stdout || self.stderr
	}
}

/// Applies the color choice to both output streams.
pub(crate) fn set_color(choice: ColorChoice) {
	let plan = ColorPlan::new(
		choice,
		std::io::stdout().is_terminal(),
		std::io::stderr().is_terminal(),
	);
	STDOUT_COLOR.store(plan.stdout, Ordering::Relaxed);
	STDERR_COLOR.store(plan.stderr, Ordering::Relaxed);
	colored::control::set_override(plan.global_override());
}

pub(crate) fn stdout_color() -> bool {
	STDOUT_COLOR.load(Ordering::Relaxed)
}

fn styled(text: &str, enabled: bool, style: impl FnOnce(&str) -> ColoredString) -> String {
	if enabled {
		style(text).to_string()
	} else {
		text.to_string()
	}
}

pub(crate) fn success(msg: &str) {
	println!("{} {}", styled("✓", stdout_color(), |s| s.green().bold()), msg);
}

/// Printed on standard error.
pub(crate) fn error(msg: &str) {
	let enabled = STDERR_COLOR.load(Ordering::Relaxed);
	eprintln!("{} {}", styled("✗", enabled, |s| s.red().bold()), msg);
}

pub(crate) fn info(msg: &str) {
	println!("{} {}", styled("ℹ", stdout_color(), |s| s.blue().bold()), msg);
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// Translation statistics as aligned `label: value` lines.
pub(crate) fn format_stats(stats: &CatalogStats, color: bool) -> String {
	let rows: [(&str, String, fn(&str) -> ColoredString); 5] = [
		("translated", stats.translated.to_string(), |s| s.green()),
		("fuzzy", stats.fuzzy.to_string(), |s| s.yellow()),
		("untranslated", stats.untranslated.to_string(), |s| s.red()),
		("obsolete", stats.obsolete.to_string(), |s| s.dimmed()),
		("total", stats.total.to_string(), |s| s.normal()),
	];

	let mut out = String::new();
	for (label, value, style) in rows {
		let label = format!("{:<13}", format!("{}:", label));
		out.push_str(&format!(
			"{} {}\n",
			styled(&label, color, |s| s.cyan()),
			styled(&value, color, style)
		));
	}
	let label = format!("{:<13}", "progress:");
	out.push_str(&format!(
		"{} {:.1}%\n",
		styled(&label, color, |s| s.cyan()),
		stats.percent_translated()
	));
	out
}
