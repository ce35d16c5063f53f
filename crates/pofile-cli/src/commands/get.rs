//! Get command

use super::Context;
use crate::error::CommandError;
use clap::Args;
use pofile_catalog::CatalogHandle;
use pofile_diagnostics::MessageRef;
use std::path::PathBuf;

#[derive(Args)]
pub(crate) struct GetArgs {
	/// Catalog file to look in
	#[arg(value_name = "FILE")]
	pub file: PathBuf,

	/// Untranslated message
	#[arg(value_name = "MSGID")]
	pub msgid: String,

	/// Message context
	#[arg(short, long, value_name = "CTX")]
	pub context: Option<String>,
}

/// Print the translation of one message
pub(crate) fn execute(args: GetArgs, ctx: &Context) -> anyhow::Result<()> {
	let catalog = CatalogHandle::open(&args.file, &ctx.handler)?;

	match catalog.list().gettext(args.context.as_deref(), &args.msgid) {
		Some(translation) => {
			println!("{}", translation);
			Ok(())
		}
		None => {
			let key = MessageRef {
				msgctxt: args.context,
				msgid: args.msgid,
			};
			Err(CommandError::NotTranslated(key.to_string()).into())
		}
	}
}
