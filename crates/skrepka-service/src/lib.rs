//! # skrepka-service: Document Generation Service for Skrepka
//!
//! This crate ties the pure domain logic of `skrepka-core` to the SQLite
//! persistence of `skrepka-db` and a filesystem artifact store, exposing
//! the operations a transport layer (HTTP handler, bot command, CLI)
//! calls directly.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     DocumentService Architecture                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                       DocumentService                            │  │
//! │  │                                                                  │  │
//! │  │  generate()        validate → number → render → persist          │  │
//! │  │  get_document()    single row by id                              │  │
//! │  │  list_documents()  per-company pages, newest first               │  │
//! │  │  list_by_creator() per-user pages across companies               │  │
//! │  │  set_status()      lifecycle transition with compare-and-set     │  │
//! │  │  delete()          row first, then artifact file                 │  │
//! │  │  fetch_artifact()  PDF bytes + suggested filename                │  │
//! │  └───────────┬───────────────────────────────┬──────────────────────┘  │
//! │              │                               │                          │
//! │              ▼                               ▼                          │
//! │  ┌────────────────────────┐      ┌────────────────────────┐            │
//! │  │      skrepka-db        │      │     ArtifactStore      │            │
//! │  │                        │      │                        │            │
//! │  │ documents table        │      │ <root>/<type>/         │            │
//! │  │ numbering counters     │      │   <number>_<id>.pdf    │            │
//! │  └────────────────────────┘      └────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`service`] - `DocumentService` orchestrator and result envelopes
//! - [`artifacts`] - Filesystem PDF store
//! - [`error`] - Service error types with retryability classification
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skrepka_db::{Database, DbConfig};
//! use skrepka_service::{ArtifactStore, DocumentService};
//!
//! let db = Database::new(DbConfig::new("skrepka.db")).await?;
//! let store = ArtifactStore::new("artifacts");
//! let service = DocumentService::new(db, store);
//!
//! let result = service.generate(payload, "company-1", "user-1").await?;
//! println!("{} -> {}", result.number, result.artifact_key);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod artifacts;
pub mod error;
pub mod service;

// =============================================================================
// Re-exports
// =============================================================================

pub use artifacts::ArtifactStore;
pub use error::{ServiceError, ServiceResult};
pub use service::{ArtifactDownload, DeleteOutcome, DocumentPage, DocumentService};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size applied when a listing request passes limit 0.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest page size a listing request can ask for.
pub const MAX_PAGE_LIMIT: u32 = 100;
