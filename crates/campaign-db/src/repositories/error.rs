//! Error handling utilities for repositories

use campaign_core::error::DomainError;
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    match e {
        SqlxError::PoolTimedOut => DomainError::BackendError("connection pool timed out".to_string()),
        SqlxError::Io(io) => DomainError::BackendError(io.to_string()),
        other => DomainError::DatabaseError(other.to_string()),
    }
}

/// Map every row, failing on the first one that does not convert
pub fn map_rows<M, E>(rows: Vec<M>) -> Result<Vec<E>, DomainError>
where
    E: TryFrom<M, Error = DomainError>,
{
    rows.into_iter().map(E::try_from).collect()
}
