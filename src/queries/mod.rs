pub mod appointments;
pub mod catalog;
pub mod professionals;
pub mod users;

use crate::error::Error;

/// Maps a unique-constraint violation to [`Error::Conflict`]; any other
/// error stays a database error.
pub(crate) fn conflict_on_unique(e: sqlx::Error, message: impl FnOnce() -> String) -> Error {
    let is_unique = e
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());

    if is_unique {
        Error::Conflict(message())
    } else {
        Error::Sqlx(e)
    }
}
