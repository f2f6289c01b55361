use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parse { message: String },

    #[error("Notifier error: {channel}: {message}")]
    Notify { channel: String, message: String },
}

impl AppError {
    pub fn notify(channel: &str, message: impl Into<String>) -> Self {
        AppError::Notify {
            channel: channel.to_string(),
            message: message.into(),
        }
    }

    /// Process exit code for a run that ended in this error. Every error that
    /// reaches the top level prevented classification.
    pub fn exit_code(&self) -> u8 {
        2
    }
}

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
