//! Check command

use super::Context;
use crate::output;
use clap::Args;
use pofile_catalog::CatalogHandle;
use std::path::PathBuf;

#[derive(Args)]
pub(crate) struct CheckArgs {
	/// Catalog files to read into a single list
	#[arg(value_name = "FILE", required = true)]
	pub files: Vec<PathBuf>,
}

/// Read every file, reporting diagnostics, and fail on the first fatal one
pub(crate) fn execute(args: CheckArgs, ctx: &Context) -> anyhow::Result<()> {
	let catalog = CatalogHandle::open_many(&args.files, &ctx.handler)?;

	output::success(&format!(
		"{} file(s) checked, {} message(s)",
		catalog.sources().len(),
		catalog.list().len()
	));
	Ok(())
}
