use thiserror::Error;

/// Failures of the remote account service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountServiceError {
    /// The email is already registered.
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// The backend rejected the input (bad payload, wrong or expired code).
    #[error("rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl AccountServiceError {
    /// Server-provided message, if the backend sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            AccountServiceError::Conflict { message }
            | AccountServiceError::Rejected { message, .. }
            | AccountServiceError::Unauthorized { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AccountServiceError::Timeout | AccountServiceError::Network(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("token store corrupt: {0}")]
    Corrupt(String),
}
