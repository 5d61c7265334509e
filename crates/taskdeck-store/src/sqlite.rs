// SPDX-License-Identifier: Apache-2.0

use crate::{StoreError, StoreErrorCode, TaskRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;
use taskdeck_model::{CreateTask, Task, TaskId, Title, UpdateTask};
use tokio::sync::Mutex;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    description TEXT,
    completed   INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);";

const TASK_COLUMNS: &str = "id, title, description, completed, created_at, updated_at";

/// SQLite-backed repository. The connection is injected at construction
/// and guarded by a single async mutex; every operation runs its
/// statements under one lock acquisition.
pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
}

impl SqliteTaskStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(store_error)?;
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(store_error)?;
        Self::with_connection(conn)
    }

    pub fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA).map_err(store_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

fn store_error(err: rusqlite::Error) -> StoreError {
    let code = match &err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.code {
            ErrorCode::ConstraintViolation => StoreErrorCode::Constraint,
            ErrorCode::CannotOpen | ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => {
                StoreErrorCode::Unavailable
            }
            _ => StoreErrorCode::Internal,
        },
        _ => StoreErrorCode::Internal,
    };
    StoreError::new(code, err.to_string())
}

fn row_to_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    let id: i64 = row.get(0)?;
    let title: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    let completed: bool = row.get(3)?;
    let created_at: DateTime<Utc> = row.get(4)?;
    let updated_at: DateTime<Utc> = row.get(5)?;
    let id = TaskId::new(id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Integer, Box::new(e))
    })?;
    let title = Title::parse(&title).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Task {
        id,
        title,
        description,
        completed,
        created_at,
        updated_at,
    })
}

fn fetch_task(conn: &Connection, id: TaskId) -> Result<Option<Task>, StoreError> {
    conn.query_row(
        &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
        params![id.get()],
        row_to_task,
    )
    .optional()
    .map_err(store_error)
}

#[async_trait]
impl TaskRepository for SqliteTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id"))
            .map_err(store_error)?;
        let rows = stmt.query_map([], row_to_task).map_err(store_error)?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(store_error)
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        let conn = self.conn.lock().await;
        fetch_task(&conn, id)
    }

    async fn insert(&self, command: CreateTask) -> Result<Task, StoreError> {
        let conn = self.conn.lock().await;
        let now = Utc::now();
        conn.execute(
            "INSERT INTO tasks (title, description, completed, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                command.title.as_str(),
                command.description,
                command.completed,
                now,
                now
            ],
        )
        .map_err(store_error)?;
        let id = TaskId::new(conn.last_insert_rowid())
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        Ok(Task {
            id,
            title: command.title,
            description: command.description,
            completed: command.completed,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(&self, id: TaskId, command: UpdateTask) -> Result<Option<Task>, StoreError> {
        let conn = self.conn.lock().await;
        // Check-then-act pair; not wrapped in a transaction. A delete
        // racing this sequence on the same id resolves to `Ok(None)`.
        let Some(current) = fetch_task(&conn, id)? else {
            return Ok(None);
        };
        let title = command.title.unwrap_or(current.title);
        let description = match command.description {
            Some(supplied) => supplied,
            None => current.description,
        };
        let completed = command.completed.unwrap_or(current.completed);
        // Every successful update refreshes updated_at, effective change
        // or not; id and created_at stay untouched.
        let now = Utc::now();
        conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, completed = ?3, updated_at = ?4
             WHERE id = ?5",
            params![title.as_str(), description, completed, now, id.get()],
        )
        .map_err(store_error)?;
        Ok(Some(Task {
            id,
            title,
            description,
            completed,
            created_at: current.created_at,
            updated_at: now,
        }))
    }

    async fn remove(&self, id: TaskId) -> Result<bool, StoreError> {
        let conn = self.conn.lock().await;
        let affected = conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id.get()])
            .map_err(store_error)?;
        Ok(affected > 0)
    }
}
