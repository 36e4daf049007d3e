use crate::{RawEmail, RawTask, TaskApi, TaskError, TaskQuery};
use chrono::Utc;
use inbox_core::{EmailMessage, Task, TaskStatus, UserId};
use inbox_storage::TaskCache;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct TaskFetcher {
    api: Arc<dyn TaskApi>,
    cache: TaskCache,
}

impl TaskFetcher {
    pub fn new(api: Arc<dyn TaskApi>, cache: TaskCache) -> Self {
        Self { api, cache }
    }

    /// Lists tasks for `user` and refreshes the offline cache with the
    /// normalized result. The cache is left alone when the request fails.
    pub async fn fetch_tasks(
        &self,
        user: &UserId,
        query: &TaskQuery,
    ) -> Result<Vec<Task>, TaskError> {
        let raw = self.api.list_tasks(user, query).await?;

        let mut seen = HashSet::with_capacity(raw.len());
        let mut tasks = Vec::with_capacity(raw.len());
        for record in raw {
            let task = normalize_task(record, user);
            if !seen.insert(task.id.clone()) {
                tracing::warn!(task_id = %task.id, "dropping duplicate task in listing");
                continue;
            }
            tasks.push(task);
        }

        if let Err(err) = self.cache.write(&tasks) {
            tracing::warn!("task cache write failed: {err}");
        }

        tracing::debug!(count = tasks.len(), status = %query.status, "fetched tasks");
        Ok(tasks)
    }
}

/// Turns a backend record into the canonical [`Task`].
pub fn normalize_task(raw: RawTask, user: &UserId) -> Task {
    let id = pick_id(raw.id, raw.mongo_id).unwrap_or_else(|| {
        let generated = placeholder_id();
        tracing::warn!(task_id = %generated, "task record carried no identifier");
        generated
    });
    let email = raw.email.map(|email| normalize_email(email, &id));

    Task {
        user_id: raw
            .user_id
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| user.to_string()),
        sender: raw.sender,
        subject: raw.subject,
        summary: raw.summary,
        context: raw.context,
        actions: raw.actions.unwrap_or_default(),
        status: raw.status.map(TaskStatus::from).unwrap_or_default(),
        action_taken: raw.action_taken,
        email,
        id,
    }
}

fn normalize_email(raw: RawEmail, task_id: &str) -> EmailMessage {
    EmailMessage {
        id: pick_id(raw.id, raw.mongo_id).unwrap_or_else(|| format!("email-{task_id}")),
        subject: raw.subject,
        sender: raw.sender,
        body: raw.body,
        recipient: raw.recipient,
        context: raw.context,
        message_id: raw.message_id,
        signature: raw.signature,
        user_id: raw.user_id,
        is_spam: raw.is_spam,
    }
}

fn pick_id(id: Option<String>, mongo_id: Option<String>) -> Option<String> {
    id.filter(|value| !value.trim().is_empty())
        .or_else(|| mongo_id.filter(|value| !value.trim().is_empty()))
}

fn placeholder_id() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("generated-{}-{}", Utc::now().timestamp_millis(), &suffix[..5])
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use inbox_storage::LocalStore;
    use std::sync::Mutex;

    struct ScriptedApi {
        response: Mutex<Option<Result<Vec<RawTask>, u16>>>,
    }

    #[async_trait]
    impl TaskApi for ScriptedApi {
        async fn list_tasks(
            &self,
            _user: &UserId,
            _query: &TaskQuery,
        ) -> Result<Vec<RawTask>, TaskError> {
            let next = self
                .response
                .lock()
                .expect("lock")
                .take()
                .expect("one response scripted");
            next.map_err(|status| TaskError::Fetch { status })
        }

        async fn update_task(
            &self,
            _user: &UserId,
            _task_id: &str,
            _update: &crate::TaskUpdate,
        ) -> Result<(), TaskError> {
            Ok(())
        }
    }

    fn fetcher(response: Result<Vec<RawTask>, u16>) -> (tempfile::TempDir, TaskCache, TaskFetcher) {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = TaskCache::new(LocalStore::open(dir.path()).expect("store opened"));
        let api = Arc::new(ScriptedApi {
            response: Mutex::new(Some(response)),
        });
        let fetcher = TaskFetcher::new(api, cache.clone());
        (dir, cache, fetcher)
    }

    #[test]
    fn mongo_id_is_used_and_email_id_synthesized() {
        let raw = RawTask {
            mongo_id: Some("t1".to_string()),
            email: Some(RawEmail {
                subject: Some("Hi".to_string()),
                ..RawEmail::default()
            }),
            actions: Some(vec!["Reply".to_string(), "Archive".to_string()]),
            ..RawTask::default()
        };

        let task = normalize_task(raw, &UserId::new("demo1"));
        assert_eq!(task.id, "t1");
        assert_eq!(task.user_id, "demo1");
        assert_eq!(task.status, TaskStatus::Pending);
        let email = task.email.expect("email kept");
        assert_eq!(email.id, "email-t1");
        assert_eq!(email.subject.as_deref(), Some("Hi"));
    }

    #[test]
    fn explicit_id_wins_over_mongo_id() {
        let raw = RawTask {
            id: Some("canonical".to_string()),
            mongo_id: Some("legacy".to_string()),
            email: Some(RawEmail {
                mongo_id: Some("e9".to_string()),
                ..RawEmail::default()
            }),
            ..RawTask::default()
        };

        let task = normalize_task(raw, &UserId::default());
        assert_eq!(task.id, "canonical");
        assert_eq!(task.email.expect("email kept").id, "e9");
    }

    #[test]
    fn missing_identifiers_get_a_placeholder() {
        let task = normalize_task(
            RawTask {
                id: Some("  ".to_string()),
                ..RawTask::default()
            },
            &UserId::default(),
        );
        assert!(task.id.starts_with("generated-"));
        let suffix = task.id.rsplit('-').next().expect("suffix");
        assert_eq!(suffix.len(), 5);
    }

    #[test]
    fn unknown_status_is_kept_opaque() {
        let task = normalize_task(
            RawTask {
                id: Some("t1".to_string()),
                status: Some("snoozed".to_string()),
                ..RawTask::default()
            },
            &UserId::default(),
        );
        assert_eq!(task.status, TaskStatus::Other("snoozed".to_string()));
    }

    #[tokio::test]
    async fn successful_fetch_populates_cache() {
        let (_dir, cache, fetcher) = fetcher(Ok(vec![
            RawTask {
                mongo_id: Some("t1".to_string()),
                ..RawTask::default()
            },
            RawTask {
                id: Some("t1".to_string()),
                ..RawTask::default()
            },
        ]));

        let tasks = fetcher
            .fetch_tasks(&UserId::default(), &TaskQuery::default())
            .await
            .expect("fetched");
        assert_eq!(tasks.len(), 1);
        assert_eq!(cache.read().expect("read ok"), Some(tasks));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_cache_untouched() {
        let (_dir, cache, fetcher) = fetcher(Err(503));

        let err = fetcher
            .fetch_tasks(&UserId::default(), &TaskQuery::default())
            .await
            .expect_err("fetch fails");
        assert!(matches!(err, TaskError::Fetch { status: 503 }));
        assert_eq!(err.to_string(), "Failed to fetch tasks (503)");
        assert!(cache.read().expect("read ok").is_none());
    }
}
