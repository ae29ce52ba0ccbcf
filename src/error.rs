use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {status}: {url}")]
    Status { status: u16, url: String },

    #[error("failed to decode catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("malformed catalog response: {0}")]
    MalformedResponse(String),

    #[error("no usable paintings in Category:{category}")]
    NoCandidates { category: String },

    #[error("gave up after {attempts} attempts (last error: {last})")]
    Exhausted { attempts: u32, last: String },

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// Whether the fetch loop should try again with a fresh source.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, FetchError::Exhausted { .. } | FetchError::Io(_))
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
