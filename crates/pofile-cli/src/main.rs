//! pofile
//!
//! Checks, inspects and normalizes gettext PO catalogs.
//!
//! ## Usage
//!
//! ```bash
//! pofile check locale/fr.po locale/fr-extra.po
//! pofile stats locale/fr.po --json
//! pofile get locale/fr.po "Hello" --context greeting
//! pofile normalize locale/fr.po -o locale/fr.po --width 0
//! ```
//!
//! Diagnostics go to standard error. The exit status is 1 when a catalog
//! has fatal errors or a lookup finds nothing, and 2 for usage, I/O and
//! configuration errors.

mod commands;
mod error;
mod logging;
mod output;
mod settings;

use clap::{Parser, Subcommand, ValueEnum};
use commands::Context;
use commands::check::CheckArgs;
use commands::get::GetArgs;
use commands::normalize::NormalizeArgs;
use commands::stats::StatsArgs;
use pofile_diagnostics::{ColorChoice, TextmodeReporter, XerrorHandler};
use settings::Settings;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pofile")]
#[command(about = "Gettext PO catalog utility", long_about = None)]
#[command(version)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbosity: u8,

	/// Configuration file (defaults to ./pofile.toml when present)
	#[arg(long, value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// When to use colored output (overrides pofile.toml)
	#[arg(long, value_name = "WHEN", value_enum, global = true)]
	color: Option<ColorArg>,
}

#[derive(Subcommand)]
enum Commands {
	/// Read catalogs and report every problem found
	Check(CheckArgs),
	/// Show translation progress of a catalog
	Stats(StatsArgs),
	/// Print the translation of one message
	Get(GetArgs),
	/// Rewrite a catalog in canonical layout
	Normalize(NormalizeArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorArg {
	Auto,
	Always,
	Never,
}

impl From<ColorArg> for ColorChoice {
	fn from(arg: ColorArg) -> Self {
		match arg {
			ColorArg::Auto => ColorChoice::Auto,
			ColorArg::Always => ColorChoice::Always,
			ColorArg::Never => ColorChoice::Never,
		}
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	logging::init(cli.verbosity);

	let mut settings = match Settings::load(cli.config.as_deref()) {
		Ok(settings) => settings,
		Err(e) => {
			output::error(&format!("{:#}", e));
			return ExitCode::from(2);
		}
	};
	if let Some(color) = cli.color {
		settings.reporter.color = color.into();
	}
	output::set_color(settings.reporter.color);

	let reporter = TextmodeReporter::stderr_with(settings.reporter.clone());
	let ctx = Context {
		handler: XerrorHandler::from_reporter(Arc::new(reporter)),
		settings,
	};

	let result = match cli.command {
		Commands::Check(args) => commands::check::execute(args, &ctx),
		Commands::Stats(args) => commands::stats::execute(args, &ctx),
		Commands::Get(args) => commands::get::execute(args, &ctx),
		Commands::Normalize(args) => commands::normalize::execute(args, &ctx),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			if !error::already_reported(&e) {
				output::error(&format!("{:#}", e));
			}
			tracing::debug!(error = ?e, "command failed");
			error::exit_code(&e)
		}
	}
}
