//! Atomic write primitive
//!
//! Readers never observe a half-written data file: content goes to a
//! uniquely named temp file in the same directory which is then renamed
//! over the target. Other files in the directory are never touched.

use crate::errors::{io_error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically replace (or create) `target_path` with `content`
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = match target_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).map_err(|e| io_error("create_data_dir", parent, e))?;
            parent
        }
        None => Path::new("."),
    };

    // Dropped (and removed) on any early return
    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| io_error("create_data_temp", parent, e))?;
    temp.write_all(content)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| io_error("write_data_temp", temp.path(), e))?;

    temp.persist(target_path)
        .map_err(|e| io_error("rename_data_temp", target_path, e.error))?;

    Ok(())
}
