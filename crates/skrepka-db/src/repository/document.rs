//! # Document Repository
//!
//! CRUD operations for generated documents. The payload column stores
//! the full document payload as JSON; rows that fail to decode surface
//! as [`DbError::CorruptPayload`] instead of panicking.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};
use skrepka_core::types::{DocumentStatus, DocumentType, GeneratedDocument};

/// Raw database row before the payload JSON is decoded.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: String,
    doc_type: DocumentType,
    number: String,
    status: DocumentStatus,
    currency: String,
    total_cents: i64,
    payload: String,
    artifact_key: String,
    company_id: String,
    created_by: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<DocumentRow> for GeneratedDocument {
    type Error = DbError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        let payload =
            serde_json::from_str(&row.payload).map_err(|e| DbError::CorruptPayload {
                id: row.id.clone(),
                message: e.to_string(),
            })?;

        Ok(GeneratedDocument {
            id: row.id,
            doc_type: row.doc_type,
            number: row.number,
            status: row.status,
            currency: row.currency,
            total_cents: row.total_cents,
            payload,
            artifact_key: row.artifact_key,
            company_id: row.company_id,
            created_by: row.created_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, doc_type, number, status, currency, total_cents,
           payload, artifact_key, company_id, created_by,
           created_at, updated_at
    FROM documents
"#;

/// Repository for document persistence operations.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: SqlitePool,
}

impl DocumentRepository {
    /// Creates a new DocumentRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DocumentRepository { pool }
    }

    /// Inserts a freshly generated document.
    ///
    /// Runs on the generation transaction so the row commits together
    /// with the sequence number that produced it.
    pub async fn insert(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        doc: &GeneratedDocument,
    ) -> DbResult<()> {
        let payload = serde_json::to_string(&doc.payload)
            .map_err(|e| DbError::Internal(format!("failed to encode payload: {e}")))?;

        sqlx::query(
            r#"
            INSERT INTO documents (
                id, doc_type, number, status, currency, total_cents,
                payload, artifact_key, company_id, created_by,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&doc.id)
        .bind(doc.doc_type)
        .bind(&doc.number)
        .bind(doc.status)
        .bind(&doc.currency)
        .bind(doc.total_cents)
        .bind(payload)
        .bind(&doc.artifact_key)
        .bind(&doc.company_id)
        .bind(&doc.created_by)
        .bind(doc.created_at)
        .bind(doc.updated_at)
        .execute(&mut **tx)
        .await?;

        debug!(id = %doc.id, number = %doc.number, "Inserted document");
        Ok(())
    }

    /// Fetches a document by id.
    pub async fn get(&self, id: &str) -> DbResult<Option<GeneratedDocument>> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(GeneratedDocument::try_from).transpose()
    }

    /// Lists a company's documents, newest first, with the total count.
    ///
    /// `doc_type` narrows the listing to one document type when set.
    pub async fn list_by_company(
        &self,
        company_id: &str,
        doc_type: Option<DocumentType>,
        limit: i64,
        offset: i64,
    ) -> DbResult<(Vec<GeneratedDocument>, i64)> {
        let (rows, total) = match doc_type {
            Some(doc_type) => {
                let rows = sqlx::query_as::<_, DocumentRow>(&format!(
                    "{SELECT_COLUMNS} WHERE company_id = ?1 AND doc_type = ?2 \
                     ORDER BY created_at DESC, id DESC LIMIT ?3 OFFSET ?4"
                ))
                .bind(company_id)
                .bind(doc_type)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                let total: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM documents WHERE company_id = ?1 AND doc_type = ?2",
                )
                .bind(company_id)
                .bind(doc_type)
                .fetch_one(&self.pool)
                .await?;

                (rows, total)
            }
            None => {
                let rows = sqlx::query_as::<_, DocumentRow>(&format!(
                    "{SELECT_COLUMNS} WHERE company_id = ?1 \
                     ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3"
                ))
                .bind(company_id)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE company_id = ?1")
                        .bind(company_id)
                        .fetch_one(&self.pool)
                        .await?;

                (rows, total)
            }
        };

        let docs = rows
            .into_iter()
            .map(GeneratedDocument::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        Ok((docs, total))
    }

    /// Lists documents created by one user, newest first, with the total count.
    pub async fn list_by_creator(
        &self,
        created_by: &str,
        limit: i64,
        offset: i64,
    ) -> DbResult<(Vec<GeneratedDocument>, i64)> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "{SELECT_COLUMNS} WHERE created_by = ?1 \
             ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3"
        ))
        .bind(created_by)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE created_by = ?1")
                .bind(created_by)
                .fetch_one(&self.pool)
                .await?;

        let docs = rows
            .into_iter()
            .map(GeneratedDocument::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        Ok((docs, total))
    }

    /// Moves a document from one status to another.
    ///
    /// Compare-and-set on the current status: returns false when the id
    /// does not exist or the row is no longer in `from`, so a concurrent
    /// transition cannot be silently overwritten. Legality of the
    /// transition is checked by the caller.
    pub async fn update_status(
        &self,
        id: &str,
        from: DocumentStatus,
        to: DocumentStatus,
        updated_at: DateTime<Utc>,
    ) -> DbResult<bool> {
        let result = sqlx::query(
            "UPDATE documents SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4",
        )
        .bind(to)
        .bind(updated_at)
        .bind(id)
        .bind(from)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a document row. Returns false when the id does not exist.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
