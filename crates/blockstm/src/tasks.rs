//! Task directory merging.
//!
//! A task root holds one subdirectory per task, each expected to contain exactly one `.json`
//! document. The documents are merged into a single object keyed by subdirectory name.

use blockstm_core::{Error, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Reads every task document under `root` into one JSON object.
///
/// Subdirectories are visited in lexicographic order and keys keep that order. A subdirectory
/// with zero or several `.json` files is skipped with a warning. Any I/O or parse failure aborts
/// the whole merge.
pub fn merge_task_documents(root: &Path) -> Result<Value> {
    let mut merged = Map::new();
    for task_dir in list_task_dirs(root)? {
        let task_name = task_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let documents = list_json_files(&task_dir)?;
        let [document] = documents.as_slice() else {
            tracing::warn!(
                task = %task_name,
                count = documents.len(),
                "expected exactly one JSON file in task directory; skipping"
            );
            continue;
        };

        merged.insert(task_name, read_json(document)?);
    }
    Ok(Value::Object(merged))
}

fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Immediate subdirectories of `root`, sorted by name.
pub fn list_task_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root).map_err(|e| io_error(root, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_error(root, e))?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}

fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        let is_json = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(".json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_json(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    serde_json::from_str(&text).map_err(|source| Error::JsonFile {
        path: path.to_path_buf(),
        source,
    })
}
