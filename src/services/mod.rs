pub mod appointments;
pub mod catalog;
pub mod professionals;
pub mod users;

use crate::error::{Error, Result};
use sqlx::{Postgres, Transaction};

pub(crate) async fn commit(tx: Transaction<'_, Postgres>) -> Result<()> {
    tx.commit()
        .await
        .map_err(|e| Error::Internal(format!("Failed to commit transaction: {}", e)))
}

pub(crate) fn begin_failed(e: sqlx::Error) -> Error {
    Error::Internal(format!("Failed to begin transaction: {}", e))
}
