//! # Document Service
//!
//! Main orchestrator for document generation and lifecycle management.
//!
//! ## Generation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   generate(payload, company, user)                      │
//! │                                                                         │
//! │  validate payload ──▶ calculate lines ──▶ spell total                   │
//! │   (pure, no state)     (pure)              (pure)                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌─ BEGIN TRANSACTION ───────────────────────────────────────────────┐ │
//! │  │  claim sequence number   (counter upsert, rolls back on failure)  │ │
//! │  │  format business number  (INV-202501-0042)                        │ │
//! │  │  render PDF              (pure, deterministic)                    │ │
//! │  │  write artifact file     (compensated on later failure)           │ │
//! │  │  insert document row                                              │ │
//! │  └─ COMMIT ──────────────────────────────────────────────────────────┘ │
//! │                                                                         │
//! │  A failed insert or commit deletes the artifact file again, so no      │
//! │  PDF survives a rolled back generation and no committed row ever       │
//! │  points at a file that was never written.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use skrepka_core::items::calculate_items;
use skrepka_core::lifecycle::transition;
use skrepka_core::number::{format_number, sanitize_for_key, Period};
use skrepka_core::render::render_document;
use skrepka_core::speller::speller_for_currency;
use skrepka_core::types::{
    DocumentPayload, DocumentStatus, DocumentType, GeneratedDocument, GenerationResult,
};
use skrepka_core::validation::validate_payload;
use skrepka_core::{LifecycleError, DEFAULT_CURRENCY};
use skrepka_db::{Database, DbError};

use crate::artifacts::ArtifactStore;
use crate::error::{ServiceError, ServiceResult};
use crate::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

// =============================================================================
// Result Envelopes
// =============================================================================

/// One page of a document listing.
#[derive(Debug, Clone)]
pub struct DocumentPage {
    /// Documents on this page, newest first.
    pub documents: Vec<GeneratedDocument>,

    /// 1-based page number that was actually served.
    pub page: u32,

    /// Page size that was actually applied after clamping.
    pub limit: u32,

    /// Total matching documents across all pages.
    pub total: i64,

    /// Total page count at this limit (0 when nothing matches).
    pub total_pages: u32,
}

/// Outcome of deleting a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Row and artifact file both removed.
    Deleted,

    /// Row removed; the artifact file was already gone.
    ArtifactAlreadyMissing,
}

/// A fetched artifact ready to hand to a caller.
#[derive(Debug, Clone)]
pub struct ArtifactDownload {
    /// Raw PDF bytes.
    pub bytes: Vec<u8>,

    /// Suggested download filename, e.g. `invoice_INV-202501-0001.pdf`.
    pub filename: String,
}

// =============================================================================
// Document Service
// =============================================================================

/// Orchestrates validation, numbering, rendering, and persistence.
///
/// Cheap to clone; each clone shares the same pool and artifact root.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Database handle (documents + numbering counters).
    db: Database,

    /// Filesystem store for rendered PDFs.
    store: ArtifactStore,

    /// Currency every generated document is denominated in.
    currency: String,
}

impl DocumentService {
    /// Creates a service generating documents in the default currency.
    pub fn new(db: Database, store: ArtifactStore) -> Self {
        DocumentService {
            db,
            store,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Overrides the document currency.
    ///
    /// Generation fails with [`ServiceError::UnsupportedCurrency`] unless
    /// an amount speller is registered for the code.
    pub fn with_currency(mut self, code: impl Into<String>) -> Self {
        self.currency = code.into();
        self
    }

    // =========================================================================
    // Generation
    // =========================================================================

    /// Generates a document: validates, numbers, renders, and persists it.
    ///
    /// The new document starts in [`DocumentStatus::Draft`]. Numbering is
    /// gap-free per (type, company, month of the document date): a failed
    /// generation rolls the claimed number back.
    pub async fn generate(
        &self,
        payload: DocumentPayload,
        company_id: &str,
        user_id: &str,
    ) -> ServiceResult<GenerationResult> {
        validate_payload(&payload)?;
        let lines = calculate_items(payload.items())?;

        let speller = speller_for_currency(&self.currency).ok_or_else(|| {
            ServiceError::UnsupportedCurrency {
                code: self.currency.clone(),
            }
        })?;
        let amount_in_words = speller.spell(lines.totals.total);

        let doc_type = payload.doc_type();
        let period = Period::from_date(payload.document_date());

        let mut tx = self.db.begin().await?;
        let seq = self
            .db
            .counters()
            .next_seq(&mut tx, doc_type, company_id, period)
            .await
            .map_err(ServiceError::Allocation)?;
        let number = format_number(doc_type, period, seq);

        // A render failure on validated input is a bug, not bad input;
        // log everything needed to reproduce it.
        let pdf = match render_document(&payload, &lines, &number, &amount_in_words) {
            Ok(pdf) => pdf,
            Err(e) => {
                error!(
                    doc_type = %doc_type,
                    company_id,
                    items = lines.items.len(),
                    payload = %serde_json::to_string(&payload)
                        .unwrap_or_else(|_| "<unserializable>".to_string()),
                    error = %e,
                    "Failed to render document"
                );
                return Err(e.into());
            }
        };

        let id = Uuid::new_v4().to_string();
        let artifact_key = ArtifactStore::key_for(doc_type, &number, &id);
        self.store.write(&artifact_key, &pdf).await?;

        let now = Utc::now();
        let document = GeneratedDocument {
            id: id.clone(),
            doc_type,
            number: number.clone(),
            status: DocumentStatus::Draft,
            currency: self.currency.clone(),
            total_cents: lines.totals.total.kopecks(),
            payload,
            artifact_key: artifact_key.clone(),
            company_id: company_id.to_string(),
            created_by: user_id.to_string(),
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = self.db.documents().insert(&mut tx, &document).await {
            self.compensate_artifact(&artifact_key).await;
            return Err(e.into());
        }
        if let Err(e) = tx.commit().await {
            self.compensate_artifact(&artifact_key).await;
            return Err(DbError::TransactionFailed(e.to_string()).into());
        }

        info!(
            document_id = %document.id,
            %number,
            doc_type = %doc_type,
            company_id,
            total_cents = document.total_cents,
            pdf_bytes = pdf.len(),
            "Generated document"
        );

        Ok(GenerationResult {
            document_id: document.id,
            doc_type,
            number,
            artifact_key,
            total_cents: document.total_cents,
            currency: document.currency,
        })
    }

    /// Removes an artifact written by a generation whose transaction did
    /// not commit. Failure here leaves only an unreachable file.
    async fn compensate_artifact(&self, key: &str) {
        warn!(key, "Generation rolled back after artifact write, removing orphan");
        match self.store.remove(key).await {
            Ok(_) => {}
            Err(e) => {
                error!(key, error = %e, "Failed to remove artifact after rollback")
            }
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Fetches one document by id.
    pub async fn get_document(&self, id: &str) -> ServiceResult<GeneratedDocument> {
        self.db
            .documents()
            .get(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound { id: id.to_string() })
    }

    /// Lists a company's documents, newest first.
    pub async fn list_documents(
        &self,
        company_id: &str,
        type_filter: Option<DocumentType>,
        page: u32,
        limit: u32,
    ) -> ServiceResult<DocumentPage> {
        let (page, limit, offset) = clamp_page(page, limit);
        let (documents, total) = self
            .db
            .documents()
            .list_by_company(company_id, type_filter, limit as i64, offset)
            .await?;

        Ok(page_envelope(documents, page, limit, total))
    }

    /// Lists documents created by one user, newest first, across companies.
    pub async fn list_by_creator(
        &self,
        user_id: &str,
        page: u32,
        limit: u32,
    ) -> ServiceResult<DocumentPage> {
        let (page, limit, offset) = clamp_page(page, limit);
        let (documents, total) = self
            .db
            .documents()
            .list_by_creator(user_id, limit as i64, offset)
            .await?;

        Ok(page_envelope(documents, page, limit, total))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Moves a document to a new lifecycle status.
    ///
    /// The transition is validated against the currently stored status;
    /// the write is a compare-and-set, so a concurrent transition loses
    /// cleanly instead of being overwritten.
    pub async fn set_status(
        &self,
        id: &str,
        next: DocumentStatus,
    ) -> ServiceResult<GeneratedDocument> {
        let mut document = self.get_document(id).await?;
        let applied = transition(document.status, next)?;

        let now = Utc::now();
        let updated = self
            .db
            .documents()
            .update_status(id, document.status, applied, now)
            .await?;

        if !updated {
            // Lost a race: the row moved (or vanished) after the read.
            return match self.db.documents().get(id).await? {
                Some(current) => Err(LifecycleError::IllegalTransition {
                    from: current.status,
                    to: next,
                }
                .into()),
                None => Err(ServiceError::NotFound { id: id.to_string() }),
            };
        }

        info!(document_id = %id, from = %document.status, to = %applied, "Status changed");

        document.status = applied;
        document.updated_at = now;
        Ok(document)
    }

    // =========================================================================
    // Deletion & Artifact Access
    // =========================================================================

    /// Deletes a document row and its artifact file.
    ///
    /// The row goes first: if the file removal then fails or the file is
    /// already gone, the orphan is harmless, whereas a row without a file
    /// would break [`DocumentService::fetch_artifact`].
    pub async fn delete(&self, id: &str) -> ServiceResult<DeleteOutcome> {
        let document = self.get_document(id).await?;

        let row_deleted = self.db.documents().delete(id).await?;
        if !row_deleted {
            return Err(ServiceError::NotFound { id: id.to_string() });
        }

        let file_removed = self.store.remove(&document.artifact_key).await?;
        info!(document_id = %id, number = %document.number, file_removed, "Deleted document");

        if file_removed {
            Ok(DeleteOutcome::Deleted)
        } else {
            warn!(
                document_id = %id,
                key = %document.artifact_key,
                "Artifact file was already missing at delete"
            );
            Ok(DeleteOutcome::ArtifactAlreadyMissing)
        }
    }

    /// Fetches the rendered PDF for a document.
    pub async fn fetch_artifact(&self, id: &str) -> ServiceResult<ArtifactDownload> {
        let document = self.get_document(id).await?;

        let bytes = self.store.read(&document.artifact_key).await?.ok_or_else(|| {
            ServiceError::ArtifactMissing {
                document_id: document.id.clone(),
                key: document.artifact_key.clone(),
            }
        })?;

        Ok(ArtifactDownload {
            bytes,
            filename: format!(
                "{}_{}.pdf",
                document.doc_type.as_str(),
                sanitize_for_key(&document.number)
            ),
        })
    }
}

// =============================================================================
// Pagination Helpers
// =============================================================================

/// Normalizes raw paging input: page is 1-based, limit is clamped to
/// 1..=MAX_PAGE_LIMIT with 0 meaning "default".
fn clamp_page(page: u32, limit: u32) -> (u32, u32, i64) {
    let page = page.max(1);
    let limit = match limit {
        0 => DEFAULT_PAGE_LIMIT,
        l => l.min(MAX_PAGE_LIMIT),
    };
    let offset = (page as i64 - 1) * limit as i64;
    (page, limit, offset)
}

fn page_envelope(
    documents: Vec<GeneratedDocument>,
    page: u32,
    limit: u32,
    total: i64,
) -> DocumentPage {
    let total_pages = ((total + limit as i64 - 1) / limit as i64).max(0) as u32;
    DocumentPage {
        documents,
        page,
        limit,
        total,
        total_pages,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_defaults_and_bounds() {
        assert_eq!(clamp_page(0, 0), (1, DEFAULT_PAGE_LIMIT, 0));
        assert_eq!(clamp_page(1, 0), (1, DEFAULT_PAGE_LIMIT, 0));
        assert_eq!(clamp_page(3, 10), (3, 10, 20));
        assert_eq!(clamp_page(1, 500), (1, MAX_PAGE_LIMIT, 0));
    }

    #[test]
    fn test_page_envelope_counts() {
        let envelope = page_envelope(Vec::new(), 1, 20, 0);
        assert_eq!(envelope.total_pages, 0);

        let envelope = page_envelope(Vec::new(), 1, 20, 41);
        assert_eq!(envelope.total_pages, 3);

        let envelope = page_envelope(Vec::new(), 2, 20, 40);
        assert_eq!(envelope.total_pages, 2);
    }
}
