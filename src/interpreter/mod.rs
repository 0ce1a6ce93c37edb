pub mod dto;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{HIGH_PRIORITY, TaskFilter};

pub use http::HttpInterpreter;

/// Turns a free-text query into an optional task filter.
///
/// `Ok(None)` means the query was understood as "no specific filter" and
/// the caller falls back to the full task set.
#[async_trait]
pub trait QueryInterpreter: Send + Sync {
    async fn interpret(&self, query: &str) -> Result<Option<TaskFilter>, AppError>;
}

/// Exact-match stub over a fixed phrase table.
pub struct KeywordInterpreter;

impl KeywordInterpreter {
    pub const SHOW_URGENT: &'static str = "show urgent";
    pub const SHOW_COMPLETED: &'static str = "show completed";
    pub const SHOW_INCOMPLETE: &'static str = "show incomplete";

    pub fn match_phrase(query: &str) -> Option<TaskFilter> {
        match query {
            Self::SHOW_URGENT => Some(TaskFilter::Priority(HIGH_PRIORITY.to_string())),
            Self::SHOW_COMPLETED => Some(TaskFilter::Completed(true)),
            Self::SHOW_INCOMPLETE => Some(TaskFilter::Completed(false)),
            _ => None,
        }
    }
}

#[async_trait]
impl QueryInterpreter for KeywordInterpreter {
    async fn interpret(&self, query: &str) -> Result<Option<TaskFilter>, AppError> {
        Ok(Self::match_phrase(query))
    }
}

/// Picks the remote interpreter when an endpoint is configured, the keyword stub otherwise.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn QueryInterpreter>, AppError> {
    match &config.interpreter_url {
        Some(url) => {
            info!("using remote query interpreter at {}", url);
            let interpreter: Arc<dyn QueryInterpreter> =
                Arc::new(HttpInterpreter::new(url.clone())?);
            Ok(interpreter)
        }
        None => {
            info!("using keyword query interpreter");
            let interpreter: Arc<dyn QueryInterpreter> = Arc::new(KeywordInterpreter);
            Ok(interpreter)
        }
    }
}
