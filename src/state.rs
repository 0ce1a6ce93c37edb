use std::sync::Arc;

use crate::db::TaskRepository;
use crate::interpreter::QueryInterpreter;
use crate::services::TaskQueryService;

#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn TaskRepository>,
    pub interpreter: Arc<dyn QueryInterpreter>,
}

impl AppState {
    pub fn new(tasks: Arc<dyn TaskRepository>, interpreter: Arc<dyn QueryInterpreter>) -> Self {
        Self { tasks, interpreter }
    }

    pub fn query_service(&self) -> TaskQueryService {
        TaskQueryService::new(self.tasks.clone(), self.interpreter.clone())
    }
}
