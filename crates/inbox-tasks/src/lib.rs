mod action;
mod backend;
mod controller;
mod error;
mod fetcher;
mod optimistic;

pub use action::{classify, TerminalRule};
pub use backend::{HttpTaskApi, RawEmail, RawTask, TaskApi, TaskQuery, TaskUpdate};
pub use controller::{ActionOutcome, ListPhase, Notice, TaskListController, TaskListSnapshot};
pub use error::TaskError;
pub use fetcher::{normalize_task, TaskFetcher};
pub use optimistic::{
    apply_optimistic, plan_optimistic, restore, revert, OptimisticUpdate, PendingChange,
};
