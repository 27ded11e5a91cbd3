use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{GuextError, Result};

/// Reads every line of `path`, stripping `\n` / `\r\n` terminators.
pub(crate) fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|err| GuextError::io("open", path, err))?;
    BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|err| GuextError::io("read", path, err))
}

pub(crate) fn ends_with_newline(path: &Path) -> Result<bool> {
    let bytes = fs::read(path).map_err(|err| GuextError::io("read", path, err))?;
    Ok(bytes.is_empty() || bytes.ends_with(b"\n"))
}

/// Replaces `path` with `lines`, one per line.
///
/// Content goes to a hidden sibling first and is renamed over the target, so an
/// interrupted write leaves either the old file or the new one.
pub(crate) fn write_lines_atomic<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<()> {
    let tmp = staging_path(path)?;
    let permissions = fs::metadata(path).ok().map(|meta| meta.permissions());

    let result = write_and_sync(&tmp, lines).and_then(|()| {
        if let Some(permissions) = permissions {
            fs::set_permissions(&tmp, permissions)
                .map_err(|err| GuextError::io("set permissions on", &tmp, err))?;
        }
        fs::rename(&tmp, path).map_err(|err| GuextError::io("replace", path, err))
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn write_and_sync<S: AsRef<str>>(tmp: &Path, lines: &[S]) -> Result<()> {
    let file = File::create(tmp).map_err(|err| GuextError::io("create", tmp, err))?;
    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line.as_ref()).map_err(|err| GuextError::io("write", tmp, err))?;
    }
    let file = writer
        .into_inner()
        .map_err(|err| GuextError::io("flush", tmp, err.into_error()))?;
    file.sync_all()
        .map_err(|err| GuextError::io("sync", tmp, err))
}

fn staging_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| GuextError::InvalidPath(format!("{} has no file name", path.display())))?;
    let mut tmp_name = std::ffi::OsString::from(".");
    tmp_name.push(name);
    tmp_name.push(".guext.tmp");
    Ok(path.with_file_name(tmp_name))
}
