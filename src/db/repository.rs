use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::{NewTaskRequest, Task, TaskFilter};

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, req: NewTaskRequest) -> Result<Task, AppError>;
    async fn find_all(&self) -> Result<Vec<Task>, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError>;
    /// Persists every mutable field of `task` and refreshes `updated_at`.
    async fn update(&self, task: &Task) -> Result<Task, AppError>;
    async fn delete(&self, task: &Task) -> Result<(), AppError>;
    async fn find_where(&self, filter: &TaskFilter) -> Result<Vec<Task>, AppError>;
    async fn health_check(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct SqliteTaskRepository {
    db: SqlitePool,
}

impl SqliteTaskRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, req: NewTaskRequest) -> Result<Task, AppError> {
        let title = req.validated_title()?.to_string();
        let now = Utc::now();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks
                (title, description, priority, due_date, tags,
                is_completed, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            RETURNING id, title, description, priority, due_date, tags,
                is_completed, created_at, updated_at
            "#,
        )
        .bind(title)
        .bind(&req.description)
        .bind(&req.priority)
        .bind(req.due_date)
        .bind(&req.tags)
        .bind(req.is_completed)
        .bind(now)
        .fetch_one(&self.db)
        .await?;

        Ok(task)
    }

    async fn find_all(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, priority, due_date, tags, is_completed, created_at, updated_at FROM tasks ORDER BY id"
        )
        .fetch_all(&self.db)
        .await?;
        Ok(tasks)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, priority, due_date, tags, is_completed, created_at, updated_at FROM tasks WHERE id = ?"
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(task)
    }

    async fn update(&self, task: &Task) -> Result<Task, AppError> {
        let now = Utc::now();

        sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = ?1,
                description = ?2,
                priority = ?3,
                due_date = ?4,
                tags = ?5,
                is_completed = ?6,
                updated_at = ?7
            WHERE id = ?8
            RETURNING id, title, description, priority, due_date, tags,
                is_completed, created_at, updated_at
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(&task.priority)
        .bind(task.due_date)
        .bind(&task.tags)
        .bind(task.is_completed)
        .bind(now)
        .bind(task.id)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn delete(&self, task: &Task) -> Result<(), AppError> {
        let affected = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(task.id)
            .execute(&self.db)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn find_where(&self, filter: &TaskFilter) -> Result<Vec<Task>, AppError> {
        let query = match filter {
            TaskFilter::Priority(priority) => sqlx::query_as::<_, Task>(
                "SELECT id, title, description, priority, due_date, tags, is_completed, created_at, updated_at FROM tasks WHERE priority = ? ORDER BY id"
            )
            .bind(priority.clone()),
            TaskFilter::Completed(done) => sqlx::query_as::<_, Task>(
                "SELECT id, title, description, priority, due_date, tags, is_completed, created_at, updated_at FROM tasks WHERE is_completed = ? ORDER BY id"
            )
            .bind(*done),
        };

        Ok(query.fetch_all(&self.db).await?)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("select 1").execute(&self.db).await?;
        Ok(())
    }
}
