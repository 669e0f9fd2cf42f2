use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use rusqlite::{Connection, Row, params};
use std::sync::{Mutex, MutexGuard};

use super::Store;
use crate::todo::{Todo, TodoPatch};

/// SQLite-backed todo table. Used when no hosted store is configured.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    path: String,
}

impl SqliteStore {
    /// Open or create the todos table at `path`. Use `":memory:"` for tests.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open todo database at {path}"))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS todos (
                id   INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL,
                done INTEGER NOT NULL DEFAULT 0
            )",
        )
        .context("failed to create todos table")?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: path.to_string(),
        })
    }

    pub fn in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("todo database lock poisoned"))
    }
}

fn row_to_todo(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        task: row.get(1)?,
        done: row.get(2)?,
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn insert(&self, task: &str) -> Result<Todo> {
        let conn = self.conn()?;
        let todo = conn
            .query_row(
                "INSERT INTO todos (task) VALUES (?1) RETURNING id, task, done",
                [task],
                row_to_todo,
            )
            .context("failed to insert todo")?;
        Ok(todo)
    }

    async fn list(&self) -> Result<Vec<Todo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT id, task, done FROM todos ORDER BY id ASC")?;
        let todos = stmt
            .query_map([], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()
            .context("failed to list todos")?;
        Ok(todos)
    }

    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Vec<Todo>> {
        // COALESCE keeps untouched columns, so an empty patch is a no-op update.
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "UPDATE todos
             SET task = COALESCE(?1, task), done = COALESCE(?2, done)
             WHERE id = ?3
             RETURNING id, task, done",
        )?;
        let todos = stmt
            .query_map(params![patch.task, patch.done, id], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to update todo {id}"))?;
        Ok(todos)
    }

    async fn delete(&self, id: i64) -> Result<Vec<Todo>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("DELETE FROM todos WHERE id = ?1 RETURNING id, task, done")?;
        let todos = stmt
            .query_map([id], row_to_todo)?
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to delete todo {id}"))?;
        Ok(todos)
    }

    fn describe(&self) -> String {
        if self.path == ":memory:" {
            "sqlite (ephemeral)".to_string()
        } else {
            format!("sqlite ({})", self.path)
        }
    }
}
