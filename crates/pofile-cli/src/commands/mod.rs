//! Subcommands

pub(crate) mod check;
pub(crate) mod get;
pub(crate) mod normalize;
pub(crate) mod stats;

use crate::settings::Settings;
use pofile_diagnostics::XerrorHandler;

/// State shared by every command.
pub(crate) struct Context {
	pub settings: Settings,
	pub handler: XerrorHandler,
}
