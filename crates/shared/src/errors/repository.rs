use mongodb::error::{Error as MongoError, ErrorKind as MongoErrorKind};
use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(SqlxError),

    #[error("Document store error: {0}")]
    Mongo(MongoError),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Custom: {0}")]
    Custom(String),
}

impl From<SqlxError> for RepositoryError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::PoolTimedOut
            | SqlxError::PoolClosed
            | SqlxError::Io(_)
            | SqlxError::Tls(_) => RepositoryError::Unavailable(err.to_string()),
            other => RepositoryError::Sqlx(other),
        }
    }
}

impl From<MongoError> for RepositoryError {
    fn from(err: MongoError) -> Self {
        match err.kind.as_ref() {
            MongoErrorKind::ServerSelection { .. }
            | MongoErrorKind::Io(_)
            | MongoErrorKind::ConnectionPoolCleared { .. } => {
                RepositoryError::Unavailable(err.to_string())
            }
            _ => RepositoryError::Mongo(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_exhaustion_is_reported_as_unavailable() {
        let err = RepositoryError::from(SqlxError::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Unavailable(_)));
    }

    #[test]
    fn row_errors_stay_database_errors() {
        let err = RepositoryError::from(SqlxError::RowNotFound);
        assert!(matches!(err, RepositoryError::Sqlx(SqlxError::RowNotFound)));
    }
}
