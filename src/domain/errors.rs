use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    #[error("You must be logged in to place an order")]
    AuthRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("This email is already registered")]
    EmailTaken,

    #[error("Not found")]
    NotFound,

    #[error("Order could not be submitted: {0}")]
    SinkWrite(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}
