use duties_core::error::CoreError;

/// Any failure raised by the database driver.
///
/// The driver error is kept as the source so it can be logged; it is
/// collapsed into [`CoreError::Internal`] before reaching clients.
#[derive(Debug, thiserror::Error)]
#[error("Database error: {0}")]
pub struct DbError(#[from] pub sqlx::Error);

pub type DbResult<T> = Result<T, DbError>;

impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        CoreError::Internal(err.to_string())
    }
}
