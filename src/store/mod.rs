pub mod rest;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

use crate::todo::{Todo, TodoPatch};

/// Where todos live. Could be a hosted REST table, SQLite, etc.
///
/// `update` and `delete` return the affected rows: an unknown id yields an
/// empty vec, never an error.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert(&self, task: &str) -> Result<Todo>;
    async fn list(&self) -> Result<Vec<Todo>>;
    async fn update(&self, id: i64, patch: &TodoPatch) -> Result<Vec<Todo>>;
    async fn delete(&self, id: i64) -> Result<Vec<Todo>>;

    /// Short label for logs and the startup banner.
    fn describe(&self) -> String;
}
