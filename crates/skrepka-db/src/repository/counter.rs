//! # Counter Repository
//!
//! Gap-free document numbering: one counter row per
//! (doc_type, company_id, period) partition.
//!
//! ## Why an Upsert
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              next_seq() inside the generation transaction               │
//! │                                                                         │
//! │  INSERT .. VALUES (type, company, period, 1)                           │
//! │     ON CONFLICT (type, company, period)                                │
//! │     DO UPDATE SET last_seq = last_seq + 1                              │
//! │     RETURNING last_seq                                                 │
//! │                                                                         │
//! │  • first document of a period creates the row at 1                     │
//! │  • every later one bumps it atomically                                 │
//! │  • read-then-write race is impossible: one statement does both         │
//! │  • a rolled back generation rolls the increment back too,              │
//! │    so the sequence never skips                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::error::DbResult;
use skrepka_core::number::Period;
use skrepka_core::types::DocumentType;

/// Repository for numbering counter operations.
#[derive(Debug, Clone)]
pub struct CounterRepository {
    pool: SqlitePool,
}

impl CounterRepository {
    /// Creates a new CounterRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CounterRepository { pool }
    }

    /// Claims the next sequence number for a partition.
    ///
    /// Must run inside the same transaction that inserts the document
    /// row: the claimed number is only burned when that transaction
    /// commits.
    pub async fn next_seq(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        doc_type: DocumentType,
        company_id: &str,
        period: Period,
    ) -> DbResult<i64> {
        let seq: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO document_counters (doc_type, company_id, period, last_seq)
            VALUES (?1, ?2, ?3, 1)
            ON CONFLICT (doc_type, company_id, period)
            DO UPDATE SET last_seq = last_seq + 1
            RETURNING last_seq
            "#,
        )
        .bind(doc_type)
        .bind(company_id)
        .bind(period.to_string())
        .fetch_one(&mut **tx)
        .await?;

        debug!(%doc_type, company_id, %period, seq, "Claimed sequence number");
        Ok(seq)
    }

    /// Reads the last issued sequence for a partition, if any.
    ///
    /// Diagnostic read; generation never calls this (it would race).
    pub async fn current(
        &self,
        doc_type: DocumentType,
        company_id: &str,
        period: Period,
    ) -> DbResult<Option<i64>> {
        let seq: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT last_seq FROM document_counters
            WHERE doc_type = ?1 AND company_id = ?2 AND period = ?3
            "#,
        )
        .bind(doc_type)
        .bind(company_id)
        .bind(period.to_string())
        .fetch_optional(&self.pool)
        .await?;

        Ok(seq)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn period() -> Period {
        Period::from_date(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
    }

    #[tokio::test]
    async fn test_sequences_start_at_one_and_increment() {
        let db = test_db().await;
        let counters = db.counters();

        for expected in 1..=3 {
            let mut tx = db.pool().begin().await.unwrap();
            let seq = counters
                .next_seq(&mut tx, DocumentType::Invoice, "company-1", period())
                .await
                .unwrap();
            tx.commit().await.unwrap();
            assert_eq!(seq, expected);
        }

        let current = counters
            .current(DocumentType::Invoice, "company-1", period())
            .await
            .unwrap();
        assert_eq!(current, Some(3));
    }

    #[tokio::test]
    async fn test_rollback_does_not_burn_a_number() {
        let db = test_db().await;
        let counters = db.counters();

        let mut tx = db.pool().begin().await.unwrap();
        let seq = counters
            .next_seq(&mut tx, DocumentType::Invoice, "company-1", period())
            .await
            .unwrap();
        assert_eq!(seq, 1);
        tx.rollback().await.unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        let seq = counters
            .next_seq(&mut tx, DocumentType::Invoice, "company-1", period())
            .await
            .unwrap();
        tx.commit().await.unwrap();
        assert_eq!(seq, 1, "rolled back claim must be reissued");
    }

    #[tokio::test]
    async fn test_partitions_are_independent() {
        let db = test_db().await;
        let counters = db.counters();
        let january = period();
        let february = Period::from_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());

        let mut tx = db.pool().begin().await.unwrap();
        assert_eq!(
            counters
                .next_seq(&mut tx, DocumentType::Invoice, "company-1", january)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            counters
                .next_seq(&mut tx, DocumentType::Waybill, "company-1", january)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            counters
                .next_seq(&mut tx, DocumentType::Invoice, "company-2", january)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            counters
                .next_seq(&mut tx, DocumentType::Invoice, "company-1", february)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            counters
                .next_seq(&mut tx, DocumentType::Invoice, "company-1", january)
                .await
                .unwrap(),
            2
        );
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_claims_are_distinct_and_gap_free() {
        let db = test_db().await;

        let mut handles = Vec::new();
        for _ in 0..16 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                let counters = db.counters();
                let mut tx = db.pool().begin().await.unwrap();
                let seq = counters
                    .next_seq(&mut tx, DocumentType::Invoice, "company-1", period())
                    .await
                    .unwrap();
                tx.commit().await.unwrap();
                seq
            }));
        }

        let mut seqs = Vec::new();
        for handle in handles {
            seqs.push(handle.await.unwrap());
        }
        seqs.sort_unstable();
        assert_eq!(seqs, (1..=16).collect::<Vec<i64>>());
    }
}
