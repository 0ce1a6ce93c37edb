pub mod query_service;

pub use query_service::{QueryOutcome, TaskQueryService};
