//! Normalize command

use super::Context;
use crate::output;
use anyhow::Context as _;
use clap::Args;
use pofile_catalog::CatalogHandle;
use std::path::PathBuf;

#[derive(Args)]
pub(crate) struct NormalizeArgs {
	/// Catalog file to read
	#[arg(value_name = "INPUT")]
	pub input: PathBuf,

	/// Where to write the rewritten catalog
	#[arg(short, long, value_name = "OUTPUT")]
	pub output: PathBuf,

	/// Line width for string literals, 0 disables wrapping (overrides pofile.toml)
	#[arg(short, long, value_name = "N")]
	pub width: Option<usize>,

	/// Leave the header entry out of the output (overrides pofile.toml)
	#[arg(long)]
	pub omit_header: bool,
}

/// Read a catalog and write it back in canonical layout
///
/// Nothing is written unless the whole input was read without a fatal
/// diagnostic.
pub(crate) fn execute(args: NormalizeArgs, ctx: &Context) -> anyhow::Result<()> {
	let catalog = CatalogHandle::open(&args.input, &ctx.handler)?;

	let mut options = ctx.settings.writer.clone();
	if let Some(width) = args.width {
		options.wrap_width = width;
	}
	if args.omit_header {
		options.omit_header = true;
	}

	catalog
		.write(&args.output, &options)
		.with_context(|| format!("Cannot write {}", args.output.display()))?;

	output::info(&format!(
		"{} -> {} ({} message(s))",
		args.input.display(),
		args.output.display(),
		catalog.list().len()
	));
	Ok(())
}
