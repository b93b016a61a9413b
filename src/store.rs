// Todo store backed by a single SQLite table

use crate::export;
use crate::filter::Stats;
use crate::todo::{Todo, created_at_stamp, normalize_priority};
use chrono::Local;
use eyre::{Context, Result, eyre};
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// File name of the database inside the data directory
pub const DB_FILE_NAME: &str = "todos.db";

const SELECT_TODOS: &str = "SELECT id, text, done, created_at, priority FROM todos ORDER BY id DESC";

/// Persistent todo list
///
/// Every operation holds the connection lock for its whole duration, except
/// [`Store::export`], which releases it once the snapshot is read.
pub struct Store {
    data_dir: Option<PathBuf>,
    /// Override for the export directory; the per-user default is used when unset
    export_dir: Option<PathBuf>,
    db: Mutex<Connection>,
}

impl Store {
    /// Open or create a store in the given data directory
    ///
    /// The directory is created if needed and holds `todos.db`.
    pub fn open<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        let db_path = data_dir.join(DB_FILE_NAME);
        let db = Connection::open(&db_path).context("Failed to open SQLite database")?;
        Self::create_schema(&db)?;

        info!(path = ?db_path, "Opened todo store");

        Ok(Self {
            data_dir: Some(data_dir),
            export_dir: None,
            db: Mutex::new(db),
        })
    }

    /// Open a store that lives only in memory
    pub fn open_in_memory() -> Result<Self> {
        let db = Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        Self::create_schema(&db)?;

        Ok(Self {
            data_dir: None,
            export_dir: None,
            db: Mutex::new(db),
        })
    }

    /// Write exports into `dir` instead of the per-user default
    pub fn with_export_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.export_dir = Some(dir.into());
        self
    }

    /// Data directory, `None` for in-memory stores
    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Directory exports are written to
    pub fn export_dir(&self) -> PathBuf {
        match &self.export_dir {
            Some(dir) => dir.clone(),
            None => export::default_export_dir(),
        }
    }

    fn create_schema(db: &Connection) -> Result<()> {
        debug!("Creating todos schema");

        db.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text TEXT NOT NULL,
                done BOOLEAN DEFAULT 0,
                created_at TEXT NOT NULL,
                priority TEXT DEFAULT 'medium'
            );
            "#,
        )
        .context("Failed to create todos schema")?;

        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| eyre!("Todo store lock poisoned"))
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// All todos, newest first
    pub fn list(&self) -> Result<Vec<Todo>> {
        let db = self.lock()?;
        Self::list_locked(&db)
    }

    /// Get a todo by id
    pub fn get(&self, id: i64) -> Result<Option<Todo>> {
        let db = self.lock()?;

        let todo = db
            .query_row(
                "SELECT id, text, done, created_at, priority FROM todos WHERE id = ?1",
                [id],
                Self::todo_from_row,
            )
            .optional()
            .context("Failed to query todo")?;

        Ok(todo)
    }

    /// Add a todo and return it with its assigned id
    ///
    /// A missing or empty priority is stored as `"medium"`.
    pub fn add(&self, text: &str, priority: Option<&str>) -> Result<Todo> {
        let db = self.lock()?;

        let priority = normalize_priority(priority);
        let created_at = created_at_stamp(Local::now());

        db.execute(
            "INSERT INTO todos (text, done, created_at, priority) VALUES (?1, ?2, ?3, ?4)",
            params![text, false, &created_at, &priority],
        )
        .context("Failed to insert todo")?;

        let id = db.last_insert_rowid();
        debug!(id, priority = %priority, "Added todo");

        Ok(Todo {
            id,
            text: text.to_string(),
            done: false,
            created_at,
            priority,
        })
    }

    /// Flip `done` for a todo and return the updated list
    ///
    /// Returns `None` without touching the table when the id does not exist.
    pub fn toggle(&self, id: i64) -> Result<Option<Vec<Todo>>> {
        let db = self.lock()?;

        let current: Option<bool> = db
            .query_row("SELECT done FROM todos WHERE id = ?1", [id], |row| row.get(0))
            .optional()
            .context("Failed to read todo state")?;

        let Some(done) = current else {
            debug!(id, "toggle: no such todo");
            return Ok(None);
        };

        db.execute("UPDATE todos SET done = ?1 WHERE id = ?2", params![!done, id])
            .context("Failed to update todo")?;
        debug!(id, done = !done, "Toggled todo");

        Ok(Some(Self::list_locked(&db)?))
    }

    /// Delete a todo (no-op if absent) and return the remaining list
    pub fn delete(&self, id: i64) -> Result<Vec<Todo>> {
        let db = self.lock()?;

        let removed = db
            .execute("DELETE FROM todos WHERE id = ?1", [id])
            .context("Failed to delete todo")?;
        debug!(id, removed, "Deleted todo");

        Self::list_locked(&db)
    }

    /// Delete every completed todo and return the remaining list
    pub fn clear_completed(&self) -> Result<Vec<Todo>> {
        let db = self.lock()?;

        let removed = db
            .execute("DELETE FROM todos WHERE done = 1", [])
            .context("Failed to clear completed todos")?;
        info!(removed, "Cleared completed todos");

        Self::list_locked(&db)
    }

    /// Total, active and done counts
    pub fn stats(&self) -> Result<Stats> {
        Ok(Stats::from_todos(&self.list()?))
    }

    /// Export the current list to a timestamped JSON file
    ///
    /// The list is read under the lock; the file is written after releasing
    /// it, so it reflects the moment of the call. Returns `None` and writes
    /// nothing when there are no todos.
    pub fn export(&self) -> Result<Option<PathBuf>> {
        let snapshot = {
            let db = self.lock()?;
            Self::list_locked(&db)?
        };

        if snapshot.is_empty() {
            info!("No todos to export");
            return Ok(None);
        }

        let path = export::write_export(&self.export_dir(), &snapshot, Local::now())?;
        Ok(Some(path))
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Read the full list with the lock already held
    ///
    /// Rows that fail to decode are logged and skipped; the rest are returned.
    fn list_locked(db: &Connection) -> Result<Vec<Todo>> {
        let mut stmt = db.prepare(SELECT_TODOS).context("Failed to prepare todo query")?;
        let rows = stmt.query_map([], Self::todo_from_row).context("Failed to query todos")?;

        let mut todos = Vec::new();
        for row_result in rows {
            match row_result {
                Ok(todo) => todos.push(todo),
                Err(e) => {
                    warn!(error = ?e, "Skipping todo row that failed to decode");
                }
            }
        }

        Ok(todos)
    }

    fn todo_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
        Ok(Todo {
            id: row.get(0)?,
            text: row.get(1)?,
            done: row.get(2)?,
            created_at: row.get(3)?,
            priority: row.get(4)?,
        })
    }
}
