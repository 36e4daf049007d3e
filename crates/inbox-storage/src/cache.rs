use crate::{LocalStore, StorageError};
use inbox_core::Task;

pub const CACHED_TASKS_KEY: &str = "cached_tasks";

/// Last successfully fetched task list, served while offline.
#[derive(Debug, Clone)]
pub struct TaskCache {
    store: LocalStore,
}

impl TaskCache {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// `Ok(None)` means nothing was ever cached, which is not the same as a
    /// cached empty list.
    pub fn read(&self) -> Result<Option<Vec<Task>>, StorageError> {
        self.store.get(CACHED_TASKS_KEY)
    }

    pub fn write(&self, tasks: &[Task]) -> Result<(), StorageError> {
        self.store.set(CACHED_TASKS_KEY, tasks)?;
        tracing::debug!(count = tasks.len(), "task cache updated");
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CACHED_TASKS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::TaskCache;
    use crate::LocalStore;
    use inbox_core::{Task, TaskStatus};

    fn task(id: &str) -> Task {
        Task {
            id: id.to_string(),
            user_id: "default".to_string(),
            sender: Some("greg@example.com".to_string()),
            subject: Some("Lunch".to_string()),
            summary: None,
            context: None,
            actions: vec!["Reply".to_string()],
            status: TaskStatus::Pending,
            action_taken: None,
            email: None,
        }
    }

    fn cache() -> (tempfile::TempDir, TaskCache) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = LocalStore::open(dir.path()).expect("store opened");
        (dir, TaskCache::new(store))
    }

    #[test]
    fn absent_is_distinct_from_empty() {
        let (_dir, cache) = cache();
        assert!(cache.read().expect("read ok").is_none());

        cache.write(&[]).expect("empty list cached");
        assert_eq!(cache.read().expect("read ok"), Some(Vec::new()));
    }

    #[test]
    fn overwrites_previous_snapshot() {
        let (_dir, cache) = cache();
        cache.write(&[task("t1"), task("t2")]).expect("cached");
        cache.write(&[task("t3")]).expect("cached again");

        let cached = cache.read().expect("read ok").expect("present");
        assert_eq!(cached, vec![task("t3")]);

        cache.clear().expect("cleared");
        assert!(cache.read().expect("read ok").is_none());
    }
}
