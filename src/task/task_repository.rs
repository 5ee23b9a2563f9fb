use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::store::{DocumentClient, StoreError, StoreResult};

use super::task_dto::TaskPatch;
use super::task_models::{Task, TaskId, TaskRecord};

const COLLECTION: &str = "tasks";

/// Remote collection of task records keyed by task id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn read_all(&self) -> StoreResult<Vec<Task>>;

    /// Fails with [`StoreError::NotFound`] when no record exists.
    async fn read_one(&self, id: &TaskId) -> StoreResult<Task>;

    async fn create_one(&self, task: &TaskRecord) -> StoreResult<TaskId>;

    /// Writes only the fields set in `fields`.
    async fn update_fields(&self, id: &TaskId, fields: &TaskPatch) -> StoreResult<()>;

    async fn replace_one(&self, task: &Task) -> StoreResult<()>;

    async fn delete_one(&self, id: &TaskId) -> StoreResult<()>;
}

fn record_path(id: &TaskId) -> String {
    format!("{}/{}", COLLECTION, id)
}

#[derive(Clone)]
pub struct RemoteTaskStore {
    client: DocumentClient,
}

impl RemoteTaskStore {
    pub fn new(client: DocumentClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TaskStore for RemoteTaskStore {
    async fn read_all(&self) -> StoreResult<Vec<Task>> {
        // Keys are push ids, so BTreeMap order is creation order.
        let records: BTreeMap<String, TaskRecord> =
            self.client.get(COLLECTION).await?.unwrap_or_default();

        Ok(records
            .into_iter()
            .map(|(id, record)| Task::from_record(TaskId::new(id), record))
            .collect())
    }

    async fn read_one(&self, id: &TaskId) -> StoreResult<Task> {
        let path = record_path(id);
        let record: TaskRecord = self
            .client
            .get(&path)
            .await?
            .ok_or(StoreError::NotFound(path))?;
        Ok(Task::from_record(id.clone(), record))
    }

    async fn create_one(&self, task: &TaskRecord) -> StoreResult<TaskId> {
        let key = self.client.post(COLLECTION, task).await?;
        Ok(TaskId::new(key))
    }

    async fn update_fields(&self, id: &TaskId, fields: &TaskPatch) -> StoreResult<()> {
        self.client.patch(&record_path(id), fields).await
    }

    async fn replace_one(&self, task: &Task) -> StoreResult<()> {
        self.client.put(&record_path(&task.id), &task.to_record()).await
    }

    async fn delete_one(&self, id: &TaskId) -> StoreResult<()> {
        self.client.delete(&record_path(id)).await
    }
}

/// Process-local task store, used when no remote store is configured.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Arc<RwLock<HashMap<TaskId, TaskRecord>>>,
    next_key: Arc<RwLock<u64>>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        let store = Self::new();
        if let Ok(mut map) = store.tasks.write() {
            for task in tasks {
                map.insert(task.id.clone(), task.to_record());
            }
        }
        store
    }

    fn poisoned(path: &str) -> StoreError {
        StoreError::Unavailable(format!("in-memory lock poisoned while accessing {}", path))
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn read_all(&self) -> StoreResult<Vec<Task>> {
        let map = self.tasks.read().map_err(|_| Self::poisoned(COLLECTION))?;
        let mut tasks: Vec<Task> = map
            .iter()
            .map(|(id, record)| Task::from_record(id.clone(), record.clone()))
            .collect();
        tasks.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(tasks)
    }

    async fn read_one(&self, id: &TaskId) -> StoreResult<Task> {
        let path = record_path(id);
        let map = self.tasks.read().map_err(|_| Self::poisoned(&path))?;
        map.get(id)
            .map(|record| Task::from_record(id.clone(), record.clone()))
            .ok_or(StoreError::NotFound(path))
    }

    async fn create_one(&self, task: &TaskRecord) -> StoreResult<TaskId> {
        let id = {
            let mut next = self.next_key.write().map_err(|_| Self::poisoned(COLLECTION))?;
            *next += 1;
            TaskId::new(format!("task-{:06}", *next))
        };
        let mut map = self.tasks.write().map_err(|_| Self::poisoned(COLLECTION))?;
        map.insert(id.clone(), task.clone());
        Ok(id)
    }

    async fn update_fields(&self, id: &TaskId, fields: &TaskPatch) -> StoreResult<()> {
        let path = record_path(id);
        let mut map = self.tasks.write().map_err(|_| Self::poisoned(&path))?;
        let record = map.get_mut(id).ok_or(StoreError::NotFound(path))?;

        let mut task = Task::from_record(id.clone(), record.clone());
        fields.apply_to(&mut task);
        *record = task.to_record();
        Ok(())
    }

    async fn replace_one(&self, task: &Task) -> StoreResult<()> {
        let path = record_path(&task.id);
        let mut map = self.tasks.write().map_err(|_| Self::poisoned(&path))?;
        map.insert(task.id.clone(), task.to_record());
        Ok(())
    }

    async fn delete_one(&self, id: &TaskId) -> StoreResult<()> {
        let path = record_path(id);
        let mut map = self.tasks.write().map_err(|_| Self::poisoned(&path))?;
        map.remove(id);
        Ok(())
    }
}
