use thiserror::Error;

#[derive(Error, Debug)]
pub enum MushError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Numerical instability at iteration {iteration}: {message}")]
    Instability { iteration: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MushError {
    /// Build an instability fault before the loop has attributed an iteration.
    pub fn instability(message: impl Into<String>) -> Self {
        MushError::Instability {
            iteration: 0,
            message: message.into(),
        }
    }

    /// Re-attribute an instability fault to the iteration it surfaced in.
    pub fn at_iteration(self, iteration: usize) -> Self {
        match self {
            MushError::Instability { message, .. } => MushError::Instability { iteration, message },
            other => other,
        }
    }
}

pub type MushResult<T> = Result<T, MushError>;
