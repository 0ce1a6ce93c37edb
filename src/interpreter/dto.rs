use serde::{Deserialize, Serialize};

use crate::models::TaskFilter;

#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InterpretResponse {
    #[serde(default)]
    pub filter: Option<TaskFilter>,
}
