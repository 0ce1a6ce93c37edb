use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::db::TaskRepository;
use crate::error::AppError;
use crate::interpreter::QueryInterpreter;
use crate::models::Task;

pub const PLACEHOLDER_NOTE: &str =
    "AI logic is currently a placeholder. Implement LLM API calls and robust filtering here.";

pub struct TaskQueryService {
    tasks: Arc<dyn TaskRepository>,
    interpreter: Arc<dyn QueryInterpreter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOutcome {
    pub message: String,
    pub filtered_tasks: Vec<Task>,
    pub note: String,
}

impl TaskQueryService {
    pub fn new(tasks: Arc<dyn TaskRepository>, interpreter: Arc<dyn QueryInterpreter>) -> Self {
        Self { tasks, interpreter }
    }

    pub async fn run(&self, query: &str) -> Result<QueryOutcome, AppError> {
        info!("received AI query: {:?}", query);

        let filtered_tasks = match self.interpreter.interpret(query).await? {
            Some(filter) => {
                info!("query resolved to filter {:?}", filter);
                self.tasks.find_where(&filter).await?
            }
            None => {
                info!("no specific filter recognized, returning all tasks");
                self.tasks.find_all().await?
            }
        };

        Ok(QueryOutcome {
            message: format!("Processing AI query: '{}'", query),
            filtered_tasks,
            note: PLACEHOLDER_NOTE.to_string(),
        })
    }
}
