use models::errors::ModelError;
use thiserror::Error;

/// Failures of the register/login workflows.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    Conflict,
    /// Unknown email and wrong password look the same to the caller.
    #[error("invalid email or password")]
    Unauthorized,
    #[error("password hashing failed: {0}")]
    HashError(String),
    #[error("session token error: {0}")]
    TokenError(String),
    #[error("user store error: {0}")]
    Repository(String),
}

impl AuthError {
    /// True when the caller can fix the request.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AuthError::Validation(_) | AuthError::Conflict | AuthError::Unauthorized | AuthError::TokenError(_))
    }
}

impl From<ModelError> for AuthError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => AuthError::Validation(msg),
            ModelError::Db(msg) => AuthError::Repository(msg),
        }
    }
}
