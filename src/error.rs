#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("You must be logged in")]
    MissingCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Request { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ClientResult<T> = Result<T, ClientError>;
