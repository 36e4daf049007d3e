use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Failed to fetch tasks ({status})")]
    Fetch { status: u16 },
    #[error("Failed to update task ({status})")]
    Update { status: u16 },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Malformed(String),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("storage error: {0}")]
    Storage(#[from] inbox_storage::StorageError),
    #[error("task list is read-only while offline")]
    ReadOnly,
    #[error("task list is not ready")]
    NotReady,
    #[error("task {0} already has an action in flight")]
    AlreadyProcessing(String),
    #[error("unknown task: {0}")]
    UnknownTask(String),
}

impl TaskError {
    /// True when the request never reached the backend.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Http(err) => err.is_connect() || err.is_timeout(),
            _ => false,
        }
    }
}
