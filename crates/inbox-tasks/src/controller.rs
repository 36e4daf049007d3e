use crate::{
    plan_optimistic, restore, PendingChange, TaskApi, TaskError, TaskFetcher, TaskQuery,
    TaskUpdate, TerminalRule,
};
use inbox_core::{Task, TaskStatus, UserId};
use inbox_storage::TaskCache;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Ready,
    Error(String),
}

/// Transient message for the user about the last thing that happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Offline,
    NoCachedData,
    FetchFailed(String),
    ActionSucceeded { task_id: String, action: String },
    ActionFailed { task_id: String, action: String, message: String },
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Self::Offline => "You are offline. Showing cached tasks in read-only mode.".to_string(),
            Self::NoCachedData => {
                "You are offline and no cached tasks are available.".to_string()
            }
            Self::FetchFailed(message) => message.clone(),
            Self::ActionSucceeded { action, .. } => {
                format!("Task {} successfully", action.to_lowercase())
            }
            Self::ActionFailed { message, .. } => message.clone(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed(_) | Self::ActionFailed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskListSnapshot {
    pub phase: ListPhase,
    pub tasks: Vec<Task>,
    pub read_only: bool,
    pub notice: Option<Notice>,
    pub processing: BTreeSet<String>,
}

impl TaskListSnapshot {
    pub fn is_processing(&self, task_id: &str) -> bool {
        self.processing.contains(task_id)
    }

    /// Whether the card for `task_id` should offer enabled action controls.
    pub fn can_act(&self, task_id: &str) -> bool {
        self.phase == ListPhase::Ready && !self.read_only && !self.is_processing(task_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub resolved_status: TaskStatus,
    pub removed: bool,
    pub refetched: bool,
}

#[derive(Debug)]
struct ListState {
    phase: ListPhase,
    tasks: Vec<Task>,
    read_only: bool,
    notice: Option<Notice>,
    processing: BTreeSet<String>,
    in_flight: HashMap<String, PendingChange>,
}

impl ListState {
    fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            tasks: Vec::new(),
            read_only: false,
            notice: None,
            processing: BTreeSet::new(),
            in_flight: HashMap::new(),
        }
    }
}

/// Owns the visible task list for one user.
///
/// State is only locked for synchronous updates; network calls happen with
/// the lock released so actions on different tasks can overlap.
pub struct TaskListController {
    api: Arc<dyn TaskApi>,
    fetcher: TaskFetcher,
    cache: TaskCache,
    user: UserId,
    query: TaskQuery,
    rule: TerminalRule,
    state: RwLock<ListState>,
}

impl TaskListController {
    pub fn new(
        api: Arc<dyn TaskApi>,
        cache: TaskCache,
        user: UserId,
        query: TaskQuery,
        rule: TerminalRule,
    ) -> Self {
        Self {
            fetcher: TaskFetcher::new(api.clone(), cache.clone()),
            api,
            cache,
            user,
            query,
            rule,
            state: RwLock::new(ListState::new()),
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn rule(&self) -> TerminalRule {
        self.rule
    }

    pub async fn snapshot(&self) -> TaskListSnapshot {
        let state = self.state.read().await;
        TaskListSnapshot {
            phase: state.phase.clone(),
            tasks: state.tasks.clone(),
            read_only: state.read_only,
            notice: state.notice.clone(),
            processing: state.processing.clone(),
        }
    }

    /// Fetches the list and replaces the visible state with it. While offline
    /// the cache is served instead.
    pub async fn load(&self) -> Result<(), TaskError> {
        {
            let mut state = self.state.write().await;
            if state.read_only {
                self.serve_cache(&mut state);
                return Ok(());
            }
            state.phase = ListPhase::Loading;
        }

        let result = self.fetcher.fetch_tasks(&self.user, &self.query).await;

        let mut state = self.state.write().await;
        if state.read_only {
            // Connectivity dropped mid-fetch; the cached view stays until reconnect.
            tracing::info!(user = %self.user, "discarding task fetch that finished offline");
            return result.map(|_| ());
        }
        match result {
            Ok(tasks) => {
                tracing::info!(user = %self.user, count = tasks.len(), "task list loaded");
                state.tasks = tasks;
                state.phase = ListPhase::Ready;
                state.read_only = false;
                state.notice = None;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(user = %self.user, "task list load failed: {err}");
                let message = err.to_string();
                state.tasks.clear();
                state.phase = ListPhase::Error(message.clone());
                state.notice = Some(Notice::FetchFailed(message));
                Err(err)
            }
        }
    }

    pub async fn retry(&self) -> Result<(), TaskError> {
        self.load().await
    }

    /// Switches to read-only mode backed by the last cached listing.
    pub async fn connectivity_lost(&self) {
        let mut state = self.state.write().await;
        state.read_only = true;
        self.serve_cache(&mut state);
    }

    pub async fn connectivity_restored(&self) -> Result<(), TaskError> {
        {
            let mut state = self.state.write().await;
            state.read_only = false;
        }
        tracing::info!("connectivity restored, reloading tasks");
        self.load().await
    }

    /// Runs `action` on `task_id`: the provisional list is visible before the
    /// backend is called, and a rejected update restores the task exactly as
    /// it was.
    pub async fn perform_action(
        &self,
        task_id: &str,
        action: &str,
    ) -> Result<ActionOutcome, TaskError> {
        let change = {
            let mut state = self.state.write().await;
            if state.read_only {
                return Err(TaskError::ReadOnly);
            }
            if state.phase != ListPhase::Ready {
                return Err(TaskError::NotReady);
            }
            if state.processing.contains(task_id) {
                return Err(TaskError::AlreadyProcessing(task_id.to_string()));
            }

            let update = plan_optimistic(&state.tasks, task_id, action, self.rule);
            let change = update
                .pending
                .ok_or_else(|| TaskError::UnknownTask(task_id.to_string()))?;

            state.tasks = update.tasks;
            state.processing.insert(task_id.to_string());
            state.in_flight.insert(task_id.to_string(), change.clone());
            change
        };

        let update = TaskUpdate {
            status: change.resolved_status.clone(),
            action_taken: action.to_string(),
        };
        let result = self.api.update_task(&self.user, task_id, &update).await;

        let mut state = self.state.write().await;
        state.processing.remove(task_id);
        let change = state.in_flight.remove(task_id).unwrap_or(change);

        if let Err(err) = result {
            tracing::warn!(task_id, action, "task update failed: {err}");
            state.tasks = restore(&state.tasks, &change);
            state.notice = Some(Notice::ActionFailed {
                task_id: task_id.to_string(),
                action: action.to_string(),
                message: err.to_string(),
            });
            return Err(err);
        }

        tracing::info!(task_id, action, status = %change.resolved_status, "task updated");
        let succeeded = Notice::ActionSucceeded {
            task_id: task_id.to_string(),
            action: action.to_string(),
        };
        let mut outcome = ActionOutcome {
            resolved_status: change.resolved_status.clone(),
            removed: change.removed,
            refetched: false,
        };

        if change.removed {
            state.notice = Some(succeeded);
            return Ok(outcome);
        }

        drop(state);
        let reloaded = self.load().await.is_ok();
        let mut state = self.state.write().await;
        if reloaded && !state.read_only {
            outcome.refetched = true;
            state.notice = Some(succeeded);
        }
        Ok(outcome)
    }

    fn serve_cache(&self, state: &mut ListState) {
        let cached = match self.cache.read() {
            Ok(cached) => cached,
            Err(err) => {
                tracing::warn!("task cache unreadable, treating as empty: {err}");
                None
            }
        };

        state.phase = ListPhase::Ready;
        match cached {
            Some(tasks) => {
                tracing::info!(count = tasks.len(), "serving cached tasks while offline");
                state.tasks = tasks;
                state.notice = Some(Notice::Offline);
            }
            None => {
                tracing::info!("offline with no cached tasks");
                state.tasks.clear();
                state.notice = Some(Notice::NoCachedData);
            }
        }
    }
}
