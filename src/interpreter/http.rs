use async_trait::async_trait;
use reqwest::Client;

use crate::error::AppError;
use crate::interpreter::QueryInterpreter;
use crate::interpreter::dto;
use crate::models::TaskFilter;

/// Delegates interpretation to an external service.
///
/// The service receives `{"query": "..."}` and answers with
/// `{"filter": null}`, `{"filter": {"priority": "high"}}` or
/// `{"filter": {"isCompleted": true}}`.
pub struct HttpInterpreter {
    client: Client,
    endpoint: String,
}

impl HttpInterpreter {
    pub fn new(endpoint: String) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Upstream(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl QueryInterpreter for HttpInterpreter {
    async fn interpret(&self, query: &str) -> Result<Option<TaskFilter>, AppError> {
        let request_body = dto::InterpretRequest {
            query: query.to_string(),
        };

        let response = self.client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Interpreter request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("Interpreter error {}: {}", status, body)));
        }

        let parsed: dto::InterpretResponse = response
            .json()
            .await
            .map_err(|e| {
                AppError::Upstream(format!("Failed to parse interpreter response: {}", e))
            })?;

        Ok(parsed.filter)
    }
}
