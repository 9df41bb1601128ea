//! Sequential document id allocation

use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use shared::sequence::{format_document_id, DocumentKind};

/// Allocate the next document id for a kind, e.g. `BL-004` or `PO-017`.
///
/// Each kind has a dedicated counter row that is only ever incremented, so
/// deleting documents can never make an identifier come around again. The
/// `UPDATE ... RETURNING` takes the row lock, which serializes concurrent
/// creators; two callers always observe distinct values.
///
/// Allocation runs in its own statement, outside the document transaction.
/// A creation that subsequently fails leaves a gap in the sequence rather
/// than handing the number to the next caller.
pub async fn next_document_id(db: &PgPool, kind: DocumentKind) -> AppResult<String> {
    let value = sqlx::query_scalar::<_, i64>(
        "UPDATE document_sequences SET last_value = last_value + 1 WHERE kind = $1 RETURNING last_value",
    )
    .bind(kind.as_str())
    .fetch_optional(db)
    .await?
    .ok_or_else(|| AppError::Internal(format!("No sequence row for document kind {}", kind.as_str())))?;

    Ok(format_document_id(kind, value))
}
