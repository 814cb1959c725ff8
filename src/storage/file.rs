//! Helpers shared by the file-backed stores.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::InputError;

/// Reads the whole file, or `None` if it does not exist yet.
pub fn read_if_exists(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replaces `path` with `contents` using atomic write (write to .tmp then rename).
/// Readers only ever see the old file or the new one.
pub fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = tmp_path_for(path);
    fs::write(&tmp_path, contents)?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

pub(crate) fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Fields are stored unescaped, so the record delimiter and line breaks are refused.
pub fn check_field(field: &'static str, value: &str, delimiter: char) -> Result<(), InputError> {
    match value
        .chars()
        .find(|&c| c == delimiter || c == '\n' || c == '\r')
    {
        Some(found) => Err(InputError::ForbiddenCharacter { field, found }),
        None => Ok(()),
    }
}
