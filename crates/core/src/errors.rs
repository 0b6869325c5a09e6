use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Notification error: {0}")]
    Notification(#[source] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ScheduleError {
    /// Message meant for the client, without the variant prefix.
    ///
    /// Infrastructure failures are reduced to a generic sentence; their
    /// detail belongs in the logs, not in a response body.
    pub fn public_message(&self) -> String {
        match self {
            ScheduleError::NotFound(msg)
            | ScheduleError::Validation(msg)
            | ScheduleError::Conflict(msg)
            | ScheduleError::RateLimited(msg)
            | ScheduleError::Authentication(msg) => msg.clone(),
            ScheduleError::Database(_)
            | ScheduleError::Notification(_)
            | ScheduleError::Internal(_) => {
                "An error occurred while processing your request. Please try again.".to_string()
            }
        }
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
