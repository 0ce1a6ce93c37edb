pub mod task;

pub use task::{HIGH_PRIORITY, NewTaskRequest, Task, TaskFilter, UpdateTaskRequest};
