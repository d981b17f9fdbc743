use crate::common::error::AppError;

/// Converts a unique-constraint violation into a domain error, leaving every
/// other database failure as `AppError::DatabaseError`.
///
/// `on_conflict` receives the violated constraint name ("" when Postgres did
/// not report one).
pub(crate) fn map_unique_violation<F>(e: sqlx::Error, on_conflict: F) -> AppError
where
    F: FnOnce(&str) -> AppError,
{
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return on_conflict(db_err.constraint().unwrap_or_default());
        }
    }
    e.into()
}

/// Maps a zero-row write into the tenant-opaque NotFound.
pub(crate) fn expect_affected(rows: u64, what: &'static str) -> Result<(), AppError> {
    if rows == 0 {
        return Err(AppError::NotFound(what));
    }
    Ok(())
}
