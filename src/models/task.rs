use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::error::AppError;

pub const HIGH_PRIORITY: &str = "high";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Overlays the fields present in `req`; omitted fields keep their stored value.
    pub fn apply(&mut self, req: UpdateTaskRequest) -> Result<(), AppError> {
        if let Some(title) = req.title {
            validate_title(&title)?;
            self.title = title;
        }
        if let Some(description) = req.description {
            self.description = description;
        }
        if let Some(priority) = req.priority {
            self.priority = priority;
        }
        if let Some(due_date) = req.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = req.tags {
            self.tags = tags;
        }
        if let Some(is_completed) = req.is_completed {
            self.is_completed = is_completed;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_completed: bool,
}

impl NewTaskRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: String::new(),
            priority: String::new(),
            due_date: None,
            tags: String::new(),
            is_completed: false,
        }
    }

    /// Returns the title once it is known to be present and non-blank.
    pub fn validated_title(&self) -> Result<&str, AppError> {
        let title = self
            .title
            .as_deref()
            .ok_or_else(|| AppError::BadRequest("title is required".to_string()))?;
        validate_title(title)?;
        Ok(title)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    // absent keeps the stored date, explicit null clears it
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub tags: Option<String>,
    pub is_completed: Option<bool>,
}

/// Single-column equality predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskFilter {
    Priority(String),
    #[serde(rename = "isCompleted")]
    Completed(bool),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::Priority(priority) => &task.priority == priority,
            TaskFilter::Completed(done) => task.is_completed == *done,
        }
    }
}

fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::BadRequest("title must not be empty".to_string()));
    }
    Ok(())
}

// explicit null in a create body means "use the zero value"
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
