//! Stats command

use super::Context;
use crate::output;
use clap::Args;
use pofile_catalog::CatalogHandle;
use std::path::PathBuf;

#[derive(Args)]
pub(crate) struct StatsArgs {
	/// Catalog file to summarize
	#[arg(value_name = "FILE")]
	pub file: PathBuf,

	/// Print the statistics as JSON
	#[arg(long)]
	pub json: bool,
}

/// Print translation progress of a catalog
pub(crate) fn execute(args: StatsArgs, ctx: &Context) -> anyhow::Result<()> {
	let catalog = CatalogHandle::open(&args.file, &ctx.handler)?;
	let stats = catalog.list().stats();

	if args.json {
		output::print_json(&stats)?;
	} else {
		print!("{}", output::format_stats(&stats, output::stdout_color()));
	}
	Ok(())
}
