//! CRUD handlers over a [`Store`]. Both the REST routes and the intent
//! resolver go through here, so model-derived requests get the same
//! validation as direct API calls.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::store::Store;
use crate::todo::{Todo, TodoPatch};

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn Store>,
}

impl TodoService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn describe(&self) -> String {
        self.store.describe()
    }

    pub async fn create(&self, task: &str) -> AppResult<Todo> {
        let task = task.trim();
        if task.is_empty() {
            return Err(AppError::validation("task is required"));
        }
        let todo = self.store.insert(task).await.map_err(AppError::Store)?;
        tracing::info!(id = todo.id, "created todo");
        Ok(todo)
    }

    pub async fn list(&self) -> AppResult<Vec<Todo>> {
        self.store.list().await.map_err(AppError::Store)
    }

    /// Apply `patch` to the todo with `id`. An unknown id yields an empty vec.
    pub async fn update(&self, id: i64, patch: TodoPatch) -> AppResult<Vec<Todo>> {
        let patch = TodoPatch {
            task: match patch.task {
                Some(task) if task.trim().is_empty() => {
                    return Err(AppError::validation("task must not be empty"));
                }
                Some(task) => Some(task.trim().to_string()),
                None => None,
            },
            done: patch.done,
        };
        let updated = self
            .store
            .update(id, &patch)
            .await
            .map_err(AppError::Store)?;
        tracing::info!(id, rows = updated.len(), "updated todo");
        Ok(updated)
    }

    /// Delete the todo with `id`. Deleting a missing id is a no-op.
    pub async fn delete(&self, id: i64) -> AppResult<Vec<Todo>> {
        let deleted = self.store.delete(id).await.map_err(AppError::Store)?;
        tracing::info!(id, rows = deleted.len(), "deleted todo");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sqlite::SqliteStore;

    fn service() -> TodoService {
        TodoService::new(Arc::new(SqliteStore::in_memory().unwrap()))
    }

    #[tokio::test]
    async fn create_rejects_empty_task() {
        let svc = service();
        for task in ["", "   ", "\n\t"] {
            let err = svc.create(task).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_trims_and_defaults_done() {
        let svc = service();
        let todo = svc.create("  Buy milk ").await.unwrap();
        assert_eq!(todo.task, "Buy milk");
        assert!(!todo.done);
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let svc = service();
        let created = svc.create("Read book").await.unwrap();
        let all = svc.list().await.unwrap();
        assert_eq!(all, vec![created]);
    }

    #[tokio::test]
    async fn update_rejects_blank_task() {
        let svc = service();
        let todo = svc.create("Buy milk").await.unwrap();
        let err = svc
            .update(
                todo.id,
                TodoPatch {
                    task: Some(" ".to_string()),
                    done: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_missing_id_is_empty() {
        let svc = service();
        let rows = svc
            .update(
                99,
                TodoPatch {
                    task: None,
                    done: Some(true),
                },
            )
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn delete_missing_id_is_noop() {
        let svc = service();
        svc.create("keep me").await.unwrap();
        assert!(svc.delete(42).await.unwrap().is_empty());
        assert_eq!(svc.list().await.unwrap().len(), 1);
    }
}
