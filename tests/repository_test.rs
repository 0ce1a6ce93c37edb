mod common;

use chrono::{TimeZone, Utc};
use task_api::db::{SqliteTaskRepository, TaskRepository};
use task_api::error::AppError;
use task_api::models::{NewTaskRequest, TaskFilter};

async fn repo() -> SqliteTaskRepository {
    SqliteTaskRepository::new(common::memory_pool().await)
}

#[tokio::test]
async fn test_create_assigns_id_and_timestamps() {
    let repo = repo().await;

    let first = repo.create(NewTaskRequest::titled("Buy milk")).await.unwrap();
    let second = repo.create(NewTaskRequest::titled("Walk dog")).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(!first.is_completed);
    assert_eq!(first.created_at, first.updated_at);
    assert!(first.created_at <= Utc::now());
}

#[tokio::test]
async fn test_create_then_find_round_trips() {
    let repo = repo().await;

    let mut req = NewTaskRequest::titled("Quarterly report");
    req.description = "numbers for Q3".to_string();
    req.priority = "high".to_string();
    req.due_date = Some(Utc.with_ymd_and_hms(2026, 11, 1, 9, 30, 0).unwrap());
    req.tags = "work, finance".to_string();

    let created = repo.create(req).await.unwrap();
    let fetched = repo.find_by_id(created.id).await.unwrap().expect("task should exist");

    assert_eq!(fetched, created);
    assert_eq!(fetched.tags, "work, finance");
}

#[tokio::test]
async fn test_create_without_title_persists_nothing() {
    let repo = repo().await;
    let mut req = NewTaskRequest::titled("   ");

    assert!(matches!(repo.create(req.clone()).await, Err(AppError::BadRequest(_))));

    req.title = None;
    assert!(matches!(repo.create(req).await, Err(AppError::BadRequest(_))));

    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_persists_all_fields() {
    let repo = repo().await;
    let created = repo.create(NewTaskRequest::titled("Draft")).await.unwrap();

    let mut changed = created.clone();
    changed.title = "Final".to_string();
    changed.is_completed = true;
    changed.due_date = Some(Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());

    let updated = repo.update(&changed).await.unwrap();
    let fetched = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(fetched, updated);
    assert_eq!(fetched.title, "Final");
    assert!(fetched.is_completed);
    assert_eq!(fetched.created_at, created.created_at);
    assert!(fetched.updated_at >= created.updated_at);
}

#[tokio::test]
async fn test_update_missing_row_is_not_found() {
    let repo = repo().await;
    let created = repo.create(NewTaskRequest::titled("Gone soon")).await.unwrap();
    repo.delete(&created).await.unwrap();

    assert!(matches!(repo.update(&created).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_delete_removes_row() {
    let repo = repo().await;
    let keep = repo.create(NewTaskRequest::titled("Keep")).await.unwrap();
    let drop = repo.create(NewTaskRequest::titled("Drop")).await.unwrap();

    repo.delete(&drop).await.unwrap();

    assert!(repo.find_by_id(drop.id).await.unwrap().is_none());
    assert_eq!(repo.find_all().await.unwrap(), vec![keep]);
    assert!(matches!(repo.delete(&drop).await, Err(AppError::NotFound)));
}

#[tokio::test]
async fn test_find_where_filters_on_one_column() {
    let repo = repo().await;

    let mut urgent = NewTaskRequest::titled("Urgent");
    urgent.priority = "high".to_string();
    let urgent = repo.create(urgent).await.unwrap();

    let mut done = NewTaskRequest::titled("Done");
    done.is_completed = true;
    let done = repo.create(done).await.unwrap();

    let open = repo.create(NewTaskRequest::titled("Open")).await.unwrap();

    let high = repo.find_where(&TaskFilter::Priority("high".to_string())).await.unwrap();
    assert_eq!(high, vec![urgent.clone()]);

    let completed = repo.find_where(&TaskFilter::Completed(true)).await.unwrap();
    assert_eq!(completed, vec![done]);

    let incomplete = repo.find_where(&TaskFilter::Completed(false)).await.unwrap();
    assert_eq!(incomplete, vec![urgent, open]);
}

#[tokio::test]
async fn test_health_check() {
    assert!(repo().await.health_check().await.is_ok());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = common::memory_pool().await;
    task_api::db::run_migrations(&pool).await.unwrap();
}
