use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::db::TaskRepository;
use crate::error::AppError;
use crate::models::{NewTaskRequest, Task, TaskFilter};

/// Map-backed repository for tests and local experiments.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i64,
    rows: BTreeMap<i64, Task>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, req: NewTaskRequest) -> Result<Task, AppError> {
        let title = req.validated_title()?.to_string();
        let now = Utc::now();

        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let task = Task {
            id: inner.last_id,
            title,
            description: req.description,
            priority: req.priority,
            due_date: req.due_date,
            tags: req.tags,
            is_completed: req.is_completed,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(task.id, task.clone());
        Ok(task)
    }

    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let mut inner = self.inner.write().await;
        let stored = inner.rows.get_mut(&task.id).ok_or(AppError::NotFound)?;

        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.priority = task.priority.clone();
        stored.due_date = task.due_date;
        stored.tags = task.tags.clone();
        stored.is_completed = task.is_completed;
        stored.updated_at = Utc::now();

        Ok(stored.clone())
    }

    async fn delete(&self, task: &Task) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .rows
            .remove(&task.id)
            .map(|_| ())
            .ok_or(AppError::NotFound)
    }

    async fn find_where(&self, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        Ok(self
            .inner
            .read()
            .await
            .rows
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
