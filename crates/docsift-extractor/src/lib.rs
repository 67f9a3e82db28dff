//! docsift Extractor
//!
//! Infers entity kinds from raw documents and projects them into typed entities.
//!
//! # Overview
//!
//! The store never says what a record is. The extractor decides structurally:
//! a record is a memory when its JSON object carries `importance`,
//! `description` and `playerId`, a message when it carries `text`, `author`
//! and `conversationId`, and so on.
//!
//! # Architecture
//!
//! ```text
//! DocumentSource (pre-filter) → classifier (confirm) → mapping (project) → Vec<Entity>
//! ```
//!
//! - **Pre-filter**: the source returns rows whose raw payload contains each
//!   quoted signature key. Cheap and approximate.
//! - **Confirmation**: the payload is parsed and must be an object holding
//!   every signature key. Malformed JSON is logged and skipped.
//! - **Projection**: ids are normalized, `lastAccess` is rendered as local
//!   time, missing optional fields become `None`.
//!
//! A record carrying several signatures is extracted by each matching pass.

#![warn(missing_docs)]

mod error;
mod extractor;

pub mod classifier;
pub mod mapping;
pub mod timestamp;

pub use classifier::{classify, Classification};
pub use error::ExtractorError;
pub use extractor::{extract_document, Extraction, ExtractionReport, Extractor};
pub use mapping::FromPayload;
