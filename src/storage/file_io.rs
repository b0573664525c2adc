//! JSON document reads and crash-safe writes
//!
//! A data file is replaced only by renaming a fully synced sibling file over
//! it, so a crash mid-save leaves either the old or the new document.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FintrackError;

/// Load a JSON document
///
/// A missing or blank file yields `T::default()`, which covers a fresh data
/// directory and a save that was interrupted before its first write.
/// Malformed JSON is a [`FintrackError::Json`] naming the file.
pub fn read_json<T, P>(path: P) -> Result<T, FintrackError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(FintrackError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        tracing::debug!(path = %path.display(), "blank data file, using defaults");
        return Ok(T::default());
    }

    serde_json::from_slice(&bytes)
        .map_err(|e| FintrackError::Json(format!("{}: {}", path.display(), e)))
}

/// Replace `path` with the pretty-printed JSON form of `data`
///
/// Serialization happens before anything touches the disk, so a value that
/// cannot be encoded never disturbs the existing file.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FintrackError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut encoded = serde_json::to_vec_pretty(data)?;
    encoded.push(b'\n');

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            FintrackError::Storage(format!("Failed to create {}: {}", dir.display(), e))
        })?;
    }

    let staging = staging_path(path);
    let replaced = write_synced(&staging, &encoded).and_then(|()| fs::rename(&staging, path));

    if let Err(e) = replaced {
        let _ = fs::remove_file(&staging);
        return Err(FintrackError::Storage(format!(
            "Failed to save {}: {}",
            path.display(),
            e
        )));
    }

    tracing::debug!(path = %path.display(), bytes = encoded.len(), "saved data file");
    Ok(())
}

/// Hidden sibling of `path`; the rename is only atomic within one directory
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
