use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Failures surfaced by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// A uniqueness or foreign-key constraint rejected the write.
    #[error("integrity error: {constraint}")]
    Integrity { constraint: String },
    #[error("record not found")]
    NotFound,
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl RepoError {
    pub fn integrity(constraint: impl Into<String>) -> Self {
        Self::Integrity {
            constraint: constraint.into(),
        }
    }

    /// Name of the violated constraint, if this is an integrity failure.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Integrity { constraint } => Some(constraint),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => Self::NotFound,
            sqlx::Error::Database(ref db)
                if db.is_unique_violation() || db.is_foreign_key_violation() =>
            {
                Self::integrity(db.constraint().unwrap_or("unknown"))
            }
            other => Self::Database(other),
        }
    }
}

/// Handler-level error rendered as `(status, message)`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Integrity { constraint } => {
                Self::Conflict(format!("Constraint violated: {constraint}"))
            }
            RepoError::NotFound => Self::NotFound("Not found".into()),
            RepoError::Database(e) => Self::Internal(anyhow::Error::new(e)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            error!(error = %e, "internal error");
            return (status, "Internal server error".to_string()).into_response();
        }
        (status, self.to_string()).into_response()
    }
}
