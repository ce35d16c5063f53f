//! Filesystem helpers.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Write content to a file atomically by writing to a temporary file first, then renaming.
///
/// The temporary file lives next to the target so the rename stays on one
/// filesystem. Original file permissions are preserved after the write.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
	let original_perms = std::fs::metadata(path).ok().map(|m| m.permissions());

	let tmp_path = temporary_path(path);
	std::fs::write(&tmp_path, content)?;

	if let Err(e) = std::fs::rename(&tmp_path, path) {
		let _ = std::fs::remove_file(&tmp_path);
		return Err(e);
	}

	if let Some(perms) = original_perms {
		std::fs::set_permissions(path, perms)?;
	}

	Ok(())
}

/// `dir/name.po` becomes `dir/.name.po.tmp`.
fn temporary_path(path: &Path) -> PathBuf {
	let mut name = OsString::from(".");
	name.push(path.file_name().unwrap_or_else(|| "catalog".as_ref()));
	name.push(".tmp");
	path.with_file_name(name)
}
