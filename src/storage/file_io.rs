//! File I/O utilities with atomic writes
//!
//! A table file is either completely written or left untouched.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

use crate::error::{ExpenseError, ExpenseResult};

/// Read JSON from a file, returning a default value if the file doesn't exist
pub fn read_json<T, P>(path: P) -> ExpenseResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ExpenseError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to a uniquely named temp file, fsync, then rename)
///
/// Concurrent writers never share a temp file; the last rename wins.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> ExpenseResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    // Same directory as the target so the rename stays on one filesystem
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        ExpenseError::Storage(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| ExpenseError::Storage(format!("Failed to create temp file: {}", e)))?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| ExpenseError::Storage(format!("Failed to serialize data: {}", e)))?;

        writer
            .flush()
            .map_err(|e| ExpenseError::Storage(format!("Failed to flush data: {}", e)))?;
    }

    temp.as_file()
        .sync_all()
        .map_err(|e| ExpenseError::Storage(format!("Failed to sync data: {}", e)))?;

    // A failed persist drops the temp file, which removes it
    temp.persist(path)
        .map_err(|e| ExpenseError::Storage(format!("Failed to rename temp file: {}", e.error)))?;

    Ok(())
}
