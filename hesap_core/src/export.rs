//! # Export
//!
//! Writes serialized documents to disk. Writes are atomic: bytes go to a
//! `.tmp` sibling first, are synced, then renamed over the final name, so a
//! crash never leaves a truncated PDF behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{CalcError, CalcResult};
use crate::render::Document;

/// Serialize `document` and write it to `dir` under its suggested filename.
///
/// Returns the path written.
pub fn export_pdf(document: &Document, dir: &Path) -> CalcResult<PathBuf> {
    let bytes = document.serialize()?;
    let path = dir.join(document.suggested_filename());
    write_atomic(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "document exported");
    Ok(path)
}

/// Async variant of [`export_pdf`]; serialization runs on the blocking pool.
pub async fn export_pdf_async(document: Document, dir: PathBuf) -> CalcResult<PathBuf> {
    let path = dir.join(document.suggested_filename());
    let bytes = document.serialize_async().await?;
    write_atomic(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "document exported");
    Ok(path)
}

/// Write `bytes` to `path` through a temp file and rename.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| CalcError::file_error("create directory", parent.display().to_string(), e.to_string()))?;
    }

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(bytes)
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
