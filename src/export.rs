// JSON export files

use crate::todo::Todo;
use chrono::{DateTime, Local};
use eyre::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name created under the user's home for exports
pub const EXPORT_DIR_NAME: &str = "todo-exports";

/// `<home>/todo-exports`, or `./todo-exports` when there is no home directory
pub fn default_export_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| {
        warn!("Could not determine home directory, exporting under current directory");
        PathBuf::from(".")
    });
    home.join(EXPORT_DIR_NAME)
}

/// File name for an export taken at `now`
pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("todos-{}.json", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Write todos as an indented JSON array into `dir`
///
/// If `dir` cannot be created the file goes to the current directory instead,
/// i.e. the working directory of the process, and the returned path is
/// relative to it (`./todos-...json`).
pub fn write_export(dir: &Path, todos: &[Todo], now: DateTime<Local>) -> Result<PathBuf> {
    let dir = match fs::create_dir_all(dir) {
        Ok(()) => dir.to_path_buf(),
        Err(e) => {
            warn!(dir = ?dir, error = ?e, "Failed to create export directory, using current directory");
            PathBuf::from(".")
        }
    };

    let json = serde_json::to_string_pretty(todos).context("Failed to serialize todos")?;

    let path = dir.join(export_file_name(now));
    fs::write(&path, json).with_context(|| format!("Failed to write export file {}", path.display()))?;

    info!(path = ?path, count = todos.len(), "Exported todos");
    Ok(path)
}

/// Read an export file back into todos
pub fn read_export(path: &Path) -> Result<Vec<Todo>> {
    let content = fs::read_to_string(path).context("Failed to open export file")?;
    let todos = serde_json::from_str(&content).context("Failed to parse export file")?;
    Ok(todos)
}
