// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

use async_trait::async_trait;
use std::fmt::{Display, Formatter};
use taskdeck_model::{CreateTask, Task, TaskId, UpdateTask};

pub const CRATE_NAME: &str = "taskdeck-store";

mod sqlite;

pub use sqlite::SqliteTaskStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorCode {
    Constraint,
    Unavailable,
    Internal,
}

impl StoreErrorCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constraint => "constraint_violation",
            Self::Unavailable => "storage_unavailable",
            Self::Internal => "internal_error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreError {
    pub code: StoreErrorCode,
    pub message: String,
}

impl StoreError {
    #[must_use]
    pub fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for StoreError {}

/// The only component permitted to read or write the task table.
/// Absence is a first-class result (`None` / `false`), never an error;
/// `StoreError` is reserved for constraint and infrastructure failures.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Full set of tasks in insertion (id) order.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    async fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    /// Stores a new task; `created_at == updated_at` on the returned row.
    async fn insert(&self, command: CreateTask) -> Result<Task, StoreError>;

    /// Applies only the supplied fields and refreshes `updated_at`.
    /// `id` and `created_at` are preserved. `Ok(None)` when the id does
    /// not exist, including when a concurrent delete wins the race
    /// between the existence check and the write.
    async fn update(&self, id: TaskId, command: UpdateTask) -> Result<Option<Task>, StoreError>;

    /// True iff a row was removed.
    async fn remove(&self, id: TaskId) -> Result<bool, StoreError>;
}
