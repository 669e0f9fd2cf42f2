use todo_ai::store::Store;
use todo_ai::store::sqlite::SqliteStore;
use todo_ai::todo::TodoPatch;

#[tokio::test]
async fn insert_assigns_ids_and_defaults_done() {
    let store = SqliteStore::in_memory().unwrap();

    let first = store.insert("Buy milk").await.unwrap();
    let second = store.insert("Read book").await.unwrap();

    assert!(second.id > first.id);
    assert!(!first.done);
    assert_eq!(second.task, "Read book");
}

#[tokio::test]
async fn list_preserves_insert_order() {
    let store = SqliteStore::in_memory().unwrap();
    store.insert("first").await.unwrap();
    store.insert("second").await.unwrap();

    let todos = store.list().await.unwrap();
    let tasks: Vec<_> = todos.iter().map(|t| t.task.as_str()).collect();
    assert_eq!(tasks, ["first", "second"]);
}

#[tokio::test]
async fn update_done_only_touches_done() {
    let store = SqliteStore::in_memory().unwrap();
    let todo = store.insert("Buy milk").await.unwrap();

    let rows = store
        .update(
            todo.id,
            &TodoPatch {
                task: None,
                done: Some(true),
            },
        )
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].done);
    assert_eq!(rows[0].task, "Buy milk");
}

#[tokio::test]
async fn update_task_and_done_together() {
    let store = SqliteStore::in_memory().unwrap();
    let todo = store.insert("Buy milk").await.unwrap();

    let rows = store
        .update(
            todo.id,
            &TodoPatch {
                task: Some("Buy oat milk".to_string()),
                done: Some(true),
            },
        )
        .await
        .unwrap();

    assert_eq!(rows[0].task, "Buy oat milk");
    assert!(rows[0].done);
}

#[tokio::test]
async fn empty_patch_returns_row_unchanged() {
    let store = SqliteStore::in_memory().unwrap();
    let todo = store.insert("Buy milk").await.unwrap();

    let rows = store.update(todo.id, &TodoPatch::default()).await.unwrap();
    assert_eq!(rows, vec![todo]);
}

#[tokio::test]
async fn update_unknown_id_returns_nothing() {
    let store = SqliteStore::in_memory().unwrap();
    let rows = store
        .update(
            404,
            &TodoPatch {
                task: None,
                done: Some(true),
            },
        )
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn delete_returns_removed_row() {
    let store = SqliteStore::in_memory().unwrap();
    let keep = store.insert("keep").await.unwrap();
    let gone = store.insert("gone").await.unwrap();

    let rows = store.delete(gone.id).await.unwrap();
    assert_eq!(rows, vec![gone]);
    assert_eq!(store.list().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn delete_unknown_id_is_noop() {
    let store = SqliteStore::in_memory().unwrap();
    store.insert("keep").await.unwrap();

    assert!(store.delete(404).await.unwrap().is_empty());
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn persists_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todos-test.db");
    let path_str = path.to_str().unwrap();

    {
        let store = SqliteStore::open(path_str).unwrap();
        store.insert("persisted").await.unwrap();
    }

    {
        let store = SqliteStore::open(path_str).unwrap();
        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].task, "persisted");
    }
}

#[test]
fn schema_has_only_model_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schema.db");
    let path_str = path.to_str().unwrap();
    SqliteStore::open(path_str).unwrap();

    let conn = rusqlite::Connection::open(path_str).unwrap();
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('todos')").unwrap();
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(columns, ["id", "task", "done"]);
}

#[test]
fn describe_labels_ephemeral_db() {
    let store = SqliteStore::in_memory().unwrap();
    assert_eq!(store.describe(), "sqlite (ephemeral)");
}
