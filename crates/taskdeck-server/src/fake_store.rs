use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use taskdeck_model::{CreateTask, Task, TaskId, UpdateTask};
use taskdeck_store::{StoreError, StoreErrorCode, TaskRepository};
use tokio::sync::Mutex;

/// In-memory repository double for handler and router tests. Ids are
/// assigned from a monotonic counter; `set_fail_storage` makes every
/// operation surface an unavailable-storage error.
#[derive(Default)]
pub struct FakeTaskStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
    fail_storage: AtomicBool,
}

impl FakeTaskStore {
    pub fn set_fail_storage(&self, fail: bool) {
        self.fail_storage.store(fail, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.fail_storage.load(Ordering::Relaxed) {
            return Err(StoreError::new(
                StoreErrorCode::Unavailable,
                "fake storage connection lost",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for FakeTaskStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.check_available()?;
        Ok(self.tasks.lock().await.clone())
    }

    async fn get(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        self.check_available()?;
        Ok(self.tasks.lock().await.iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, command: CreateTask) -> Result<Task, StoreError> {
        self.check_available()?;
        let id = TaskId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
            .map_err(|e| StoreError::new(StoreErrorCode::Internal, e.to_string()))?;
        let now = Utc::now();
        let task = Task {
            id,
            title: command.title,
            description: command.description,
            completed: command.completed,
            created_at: now,
            updated_at: now,
        };
        self.tasks.lock().await.push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: TaskId, command: UpdateTask) -> Result<Option<Task>, StoreError> {
        self.check_available()?;
        let mut tasks = self.tasks.lock().await;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(title) = command.title {
            task.title = title;
        }
        if let Some(description) = command.description {
            task.description = description;
        }
        if let Some(completed) = command.completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now();
        Ok(Some(task.clone()))
    }

    async fn remove(&self, id: TaskId) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tasks = self.tasks.lock().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        Ok(tasks.len() < before)
    }
}
