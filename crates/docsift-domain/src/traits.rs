//! Trait definitions for external interactions
//!
//! The document store is reached only through [`DocumentSource`]. Store
//! implementations live in other crates.

use crate::document::RawDocument;
use crate::entity::EntityKind;

/// Read port onto a document store
///
/// Implemented by the infrastructure layer (docsift-store)
pub trait DocumentSource {
    /// Error type for store operations
    type Error;

    /// Scan non-deleted documents whose serialized payload contains every
    /// term of the request
    fn scan(&self, request: &ScanRequest) -> Result<Vec<RawDocument>, Self::Error>;
}

/// Ordering hint for a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// Whatever order the store yields
    #[default]
    Unordered,

    /// Newest timestamp first
    RecentFirst,
}

/// Criteria for a document scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    /// Substrings that must all appear in the serialized payload
    pub contains: Vec<String>,

    /// Ordering hint
    pub order: ScanOrder,

    /// Maximum rows to return
    pub limit: Option<usize>,
}

impl ScanRequest {
    /// Pre-filter scan for one entity kind
    ///
    /// Memories and messages are requested newest first; embeddings and player
    /// descriptions are unordered.
    pub fn for_kind(kind: EntityKind) -> Self {
        let order = match kind {
            EntityKind::Memory | EntityKind::Message => ScanOrder::RecentFirst,
            EntityKind::Embedding | EntityKind::PlayerDescription => ScanOrder::Unordered,
        };
        Self {
            contains: kind.signature().prefilter_terms(),
            order,
            limit: None,
        }
    }

    /// Cap the number of rows returned
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}
