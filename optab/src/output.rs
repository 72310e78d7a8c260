//! Publishing generated files.

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Write `contents` to `path` so that readers see either the previous file
/// or the complete new one.
///
/// The data goes to a temporary file in the same directory, which is then
/// renamed over `path`. On failure the temporary file is removed and `path`
/// is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| Error::Io(format!("create {}: {e}", parent.display())))?;
    }

    let tmp = temp_path(path);
    let published = fs::write(&tmp, contents)
        .map_err(|e| Error::Io(format!("write {}: {e}", tmp.display())))
        .and_then(|()| {
            fs::rename(&tmp, path).map_err(|e| {
                Error::Io(format!("rename {} to {}: {e}", tmp.display(), path.display()))
            })
        });
    if published.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    published?;

    log::info!("Wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

/// Compare the file at `path` with freshly rendered `expected` text.
///
/// Line terminators are normalized first, so a checkout with `\r\n` endings
/// still counts as up to date. A missing file is out of date; any other
/// read failure is an I/O error.
pub fn check_up_to_date(path: &Path, expected: &str) -> Result<()> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::debug!("{} does not exist", path.display());
            return Err(Error::OutOfDate(path.to_path_buf()));
        }
        Err(e) => return Err(Error::Io(format!("read {}: {e}", path.display()))),
    };
    if normalize_newlines(&existing) != normalize_newlines(expected) {
        return Err(Error::OutOfDate(path.to_path_buf()));
    }
    log::info!("{} is up to date", path.display());
    Ok(())
}

fn normalize_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(path.as_os_str()));
    name.push(format!(".tmp-{}", std::process::id()));
    path.with_file_name(name)
}
