// src/file.rs

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::options::{ExportFormat, ExportOptions},
    csv::rows_to_string,
    filter::{View, EXPORT_HEADERS},
};

/// Serialize a view with headers in the given format (Copy/Export share this).
pub fn to_export_string(view: &View, format: ExportFormat) -> String {
    let headers: Vec<String> = EXPORT_HEADERS.iter().map(|h| s!(*h)).collect();
    rows_to_string(Some(&headers), &view.to_export_rows(), format.delim())
}

/// Write a view to `export.out_path()`. Returns the final path written to.
pub fn write_export(
    export: &ExportOptions,
    view: &View,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    fs::write(&path, to_export_string(view, export.format))?;
    logf!("Export: wrote {} rows → {}", view.len(), path.display());
    Ok(path)
}

pub fn ensure_directory(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if dir.exists() && !dir.is_dir() {
        return Err(format!("Path exists but is not a directory: {}", dir.display()).into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
