//! Atomic file writes.
//!
//! All atomic writes follow this pattern:
//! 1. Write content to a temporary file in the same directory
//! 2. Sync the file to disk (fsync)
//! 3. Rename it over the target
//!
//! `rename` replaces the destination in one step on both POSIX and Windows
//! provided source and destination share a filesystem, which holds because
//! the temporary file lives next to the target. The temporary name carries
//! the process id (`.{filename}.{pid}.tmp`), so concurrent generator
//! processes never write through the same temporary file. If the process is
//! killed between steps 1 and 3 a temporary file may remain; the target is
//! never partially written.

use crate::error::{FactoryError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file.
///
/// Missing parent directories are created first.
///
/// # Returns
///
/// * `Ok(())` - On successful atomic write
/// * `Err(FactoryError::Io)` - On directory creation, write, sync or rename failure
///
/// # Example
///
/// ```no_run
/// use factory::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("out.go"), b"package main\n")?;
/// # Ok::<(), factory::error::FactoryError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| FactoryError::io("create output directory", parent, e))?;
    }

    let temp_path = generate_temp_path(path)?;

    write_and_sync(&temp_path, content)?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        FactoryError::io("replace output", path, e)
    })?;

    // Persist the directory entry as well.
    #[cfg(unix)]
    if let Some(parent) = path.parent()
        && let Ok(dir) = File::open(if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        })
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

/// Atomically write a string to a file.
///
/// Convenience wrapper around `atomic_write` for string content.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let filename = target.file_name().ok_or_else(|| {
        FactoryError::Usage(format!(
            "output path '{}' does not name a file",
            target.display()
        ))
    })?;

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(filename);
    temp_name.push(format!(".{}.tmp", std::process::id()));

    Ok(target.with_file_name(temp_name))
}

/// Write content to a file and sync to disk, removing it on failure.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file =
        File::create(path).map_err(|e| FactoryError::io("create temporary file", path, e))?;

    let result = file
        .write_all(content)
        .map_err(|e| FactoryError::io("write temporary file", path, e))
        .and_then(|()| {
            file.sync_all()
                .map_err(|e| FactoryError::io("sync temporary file", path, e))
        });

    if result.is_err() {
        let _ = fs::remove_file(path);
    }
    result
}
