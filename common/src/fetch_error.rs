use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request was superseded or its owner went away. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,

    #[error("network error: {0}")]
    Transport(String),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },
}

impl FetchError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }

    pub fn is_retryable(&self) -> bool {
        !self.is_cancelled()
    }

    /// Short text for the inline error line next to the result count.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Cancelled => String::new(),
            FetchError::Transport(_) => "We couldn't reach the server. Check your connection and try again.".to_string(),
            FetchError::Server { status, .. } if *status >= 500 => {
                "Something went wrong loading results. Please try again.".to_string()
            }
            FetchError::Server { status, .. } => format!("Results could not be loaded (error {status})."),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Server { status: status.as_u16(), message: err.to_string() },
            None => FetchError::Transport(err.to_string()),
        }
    }
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
