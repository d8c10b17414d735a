//! In-memory task store — the ordered sequence of task records and the four
//! operations every handler goes through.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

/// A single task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub done: bool,
}

/// The plain ordered sequence plus its mutation rules. Not thread-safe on its
/// own; `TaskStore` wraps it in a lock.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// The two records every fresh process starts with.
    pub fn seeded() -> Self {
        Self {
            tasks: vec![
                Task {
                    id: 1,
                    title: "Complete DevOps Assignment".to_string(),
                    done: false,
                },
                Task {
                    id: 2,
                    title: "Push code to Azure Repos".to_string(),
                    done: true,
                },
            ],
        }
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// First task with a matching id, if any.
    pub fn find(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Append a new record. The id is derived from the current tail's id
    /// (or 1 on an empty list) — NOT from a counter or a max scan. After a
    /// tail deletion the next create reuses the freed id; that is the
    /// documented legacy behavior and callers depend on it staying put.
    pub fn create(&mut self, title: String) -> Task {
        let id = self.tasks.last().map_or(1, |t| t.id + 1);
        let task = Task {
            id,
            title,
            done: false,
        };
        self.tasks.push(task.clone());
        task
    }

    /// Overwrite only the supplied fields. Returns the updated record, or
    /// `None` if no task has that id.
    pub fn update(&mut self, id: u64, title: Option<String>, done: Option<bool>) -> Option<Task> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(done) = done {
            task.done = done;
        }
        Some(task.clone())
    }

    /// Rebuild the sequence without the target. Returns false (sequence
    /// untouched) if no task has that id.
    pub fn remove(&mut self, id: u64) -> bool {
        let kept: Vec<Task> = self.tasks.iter().filter(|t| t.id != id).cloned().collect();
        if kept.len() == self.tasks.len() {
            return false;
        }
        self.tasks = kept;
        true
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Thread-safe owner of the task sequence, shared by every handler.
///
/// A single `RwLock` is the only concurrency guard in the system: each
/// handler's read-modify-write completes under one acquisition, so two
/// concurrent creates cannot both read the same tail id.
pub struct TaskStore {
    inner: RwLock<TaskList>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TaskList::new()),
        }
    }

    /// Store pre-populated with the startup seed records.
    pub fn seeded() -> Self {
        Self {
            inner: RwLock::new(TaskList::seeded()),
        }
    }

    /// Cloned snapshot of the full ordered sequence.
    pub async fn list(&self) -> Vec<Task> {
        self.inner.read().await.all().to_vec()
    }

    pub async fn find(&self, id: u64) -> Result<Task, StoreError> {
        self.inner
            .read()
            .await
            .find(id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Append a new record and return it. The write lock spans the
    /// read-tail-then-append sequence.
    pub async fn create(&self, title: String) -> Task {
        self.inner.write().await.create(title)
    }

    pub async fn update(
        &self,
        id: u64,
        title: Option<String>,
        done: Option<bool>,
    ) -> Result<Task, StoreError> {
        self.inner
            .write()
            .await
            .update(id, title, done)
            .ok_or(StoreError::NotFound(id))
    }

    pub async fn remove(&self, id: u64) -> Result<(), StoreError> {
        if self.inner.write().await.remove(id) {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors returned by the store.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("task not found: {0}")]
    NotFound(u64),
}

/// Thread-safe shared store.
pub type SharedTaskStore = Arc<TaskStore>;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn seed_matches_startup_state() {
        let list = TaskList::seeded();
        assert_eq!(list.len(), 2);
        assert_eq!(list.all()[0].id, 1);
        assert_eq!(list.all()[0].title, "Complete DevOps Assignment");
        assert!(!list.all()[0].done);
        assert_eq!(list.all()[1].id, 2);
        assert!(list.all()[1].done);
    }

    #[test]
    fn create_chains_ids_from_tail() {
        let mut list = TaskList::new();
        assert_eq!(list.create("first".into()).id, 1);
        assert_eq!(list.create("second".into()).id, 2);
        assert_eq!(list.create("third".into()).id, 3);
        let ids: Vec<u64> = list.all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn new_tasks_start_not_done() {
        let mut list = TaskList::seeded();
        let task = list.create("Write tests".into());
        assert_eq!(task.id, 3);
        assert!(!task.done);
    }

    #[test]
    fn tail_delete_frees_its_id_for_reuse() {
        // Legacy id assignment: the next id comes from the current tail,
        // so deleting the tail lets the next create take the same id.
        let mut list = TaskList::seeded();
        assert!(list.remove(2));
        let task = list.create("replacement".into());
        assert_eq!(task.id, 2);
    }

    #[test]
    fn update_title_only_keeps_done() {
        let mut list = TaskList::seeded();
        let task = list.update(2, Some("renamed".into()), None).unwrap();
        assert_eq!(task.title, "renamed");
        assert!(task.done);
    }

    #[test]
    fn update_done_only_keeps_title() {
        let mut list = TaskList::seeded();
        let task = list.update(1, None, Some(true)).unwrap();
        assert_eq!(task.title, "Complete DevOps Assignment");
        assert!(task.done);
    }

    #[test]
    fn update_missing_id_is_none() {
        let mut list = TaskList::seeded();
        assert!(list.update(99, Some("nope".into()), None).is_none());
    }

    #[test]
    fn remove_missing_id_leaves_sequence_unchanged() {
        let mut list = TaskList::seeded();
        let before: Vec<Task> = list.all().to_vec();
        assert!(!list.remove(99));
        assert_eq!(list.all(), &before[..]);
    }

    #[test]
    fn remove_preserves_order_of_survivors() {
        let mut list = TaskList::seeded();
        list.create("third".into());
        assert!(list.remove(2));
        let ids: Vec<u64> = list.all().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn store_not_found_errors() {
        let store = TaskStore::seeded();
        assert_eq!(store.find(42).await, Err(StoreError::NotFound(42)));
        assert_eq!(
            store.update(42, None, Some(true)).await,
            Err(StoreError::NotFound(42))
        );
        assert_eq!(store.remove(42).await, Err(StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn store_round_trip() {
        let store = TaskStore::seeded();
        let created = store.create("Write tests".into()).await;
        let fetched = store.find(created.id).await.unwrap();
        assert_eq!(created, fetched);
        store.remove(created.id).await.unwrap();
        assert_eq!(store.count().await, 2);
    }

    proptest! {
        /// Every create takes the current tail id + 1 (1 on empty),
        /// regardless of how the list got into its starting shape.
        #[test]
        fn create_id_is_always_tail_plus_one(titles in proptest::collection::vec(".{1,20}", 0..20)) {
            let mut list = TaskList::new();
            for title in titles {
                let expected = list.all().last().map_or(1, |t| t.id + 1);
                let task = list.create(title);
                prop_assert_eq!(task.id, expected);
            }
        }
    }
}
