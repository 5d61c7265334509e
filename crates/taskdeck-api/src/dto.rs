// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_model::Task;

/// Wire representation of a task. Keys are camelCase; timestamps are
/// RFC 3339 strings; `description` serializes as an explicit `null`
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct TaskDto {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.get(),
            title: task.title.as_str().to_string(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        Self::from(&task)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskListDto {
    pub tasks: Vec<TaskDto>,
    pub count: usize,
}

impl TaskListDto {
    #[must_use]
    pub fn new(tasks: Vec<TaskDto>) -> Self {
        let count = tasks.len();
        Self { tasks, count }
    }
}
