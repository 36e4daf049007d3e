use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("{operation} failed ({status})")]
    Status { operation: &'static str, status: u16 },
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}
