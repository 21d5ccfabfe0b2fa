use reqwest::StatusCode;

/// An [`HttpApi`](crate::HttpApi) error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend refused the request because nobody is logged in.
    #[error("not authenticated")]
    Unauthorized,

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// The response parsed but lacked a field the caller needs.
    #[error("response is missing `{0}`")]
    Missing(&'static str),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
