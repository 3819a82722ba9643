use async_graphql::ErrorExtensions;
use std::fmt;

/// Failures while establishing who the caller is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    MissingOrMalformedHeader,
    InvalidSignature,
    Expired,
    Malformed,
    UnknownEmail(String),
    IncorrectPassword,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingOrMalformedHeader => {
                write!(f, "Invalid token, please provide a Bearer token")
            }
            AuthError::InvalidSignature => write!(f, "Invalid token signature"),
            AuthError::Expired => write!(f, "Token is expired"),
            AuthError::Malformed => write!(f, "Invalid token"),
            AuthError::UnknownEmail(email) => write!(f, "Email {} doesn't exist", email),
            AuthError::IncorrectPassword => write!(f, "Incorrect password"),
        }
    }
}

impl std::error::Error for AuthError {}

#[derive(Debug)]
pub enum AppError {
    Authentication(AuthError),
    Authorization(String),
    NotFound(String),
    Validation(String),
    Database(String),
    Internal(String),
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Machine-readable code placed in the GraphQL error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Authentication(_) => "UNAUTHENTICATED",
            AppError::Authorization(_) => "FORBIDDEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Validation(_) => "BAD_USER_INPUT",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) | AppError::Config(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Authentication(e) => write!(f, "{}", e),
            AppError::Authorization(msg) => write!(f, "Access denied: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Validation(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Database(msg) => write!(f, "Database error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Authentication(e)
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(e: mongodb::error::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(e: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("Password hashing failed: {}", e))
    }
}

impl ErrorExtensions for AppError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}
