use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{operation} failed ({status})")]
    Status { operation: &'static str, status: u16 },
    /// Update refused by the backend; carries its `detail` when it sent one.
    #[error("{0}")]
    Rejected(String),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}
