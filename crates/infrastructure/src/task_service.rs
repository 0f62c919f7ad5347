use chrono::Utc;
use domain::{validate_content, Todo, TodoId};
use tracing::info;

use crate::errors::ServiceError;
use crate::repositories::TodoRepository;
use crate::sqlite::SqliteStore;

const ENTITY: &str = "todo";

/// Todo の作成・一覧・更新・削除
#[derive(Clone)]
pub struct TaskService {
    store: SqliteStore,
}

impl TaskService {
    pub fn new(store: SqliteStore) -> Self {
        Self { store }
    }

    pub fn create(&self, content: &str) -> Result<Todo, ServiceError> {
        let content = validate_content(content)?;
        let conn = self.store.connection()?;
        let todo = TodoRepository::insert(&conn, &content, Utc::now())?;
        info!(todo_id = todo.id, "todo created");
        Ok(todo)
    }

    /// 作成日時の昇順
    pub fn list(&self) -> Result<Vec<Todo>, ServiceError> {
        let conn = self.store.connection()?;
        Ok(TodoRepository::list(&conn)?)
    }

    pub fn get(&self, id: TodoId) -> Result<Todo, ServiceError> {
        let conn = self.store.connection()?;
        TodoRepository::get(&conn, id)?.ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    /// 本文のみを更新します。
    /// 存在しない ID は入力に関係なく `NotFound` を返します。
    pub fn update(&self, id: TodoId, content: &str) -> Result<Todo, ServiceError> {
        let mut conn = self.store.connection()?;
        let tx = conn.transaction()?;
        let mut todo =
            TodoRepository::get(&tx, id)?.ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
        let content = validate_content(content)?;
        let _ = TodoRepository::update_content(&tx, id, &content)?;
        tx.commit()?;
        todo.content = content;
        info!(todo_id = id, "todo updated");
        Ok(todo)
    }

    /// 存在しない ID は `NotFound` を返します。
    pub fn delete(&self, id: TodoId) -> Result<(), ServiceError> {
        let conn = self.store.connection()?;
        if TodoRepository::delete(&conn, id)? == 0 {
            return Err(ServiceError::not_found(ENTITY, id));
        }
        info!(todo_id = id, "todo deleted");
        Ok(())
    }
}
