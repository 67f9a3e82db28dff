//! Extraction passes over a document source

use crate::classifier::{classify, Classification};
use crate::error::ExtractorError;
use crate::mapping::{project, FromPayload};
use docsift_domain::{
    DocumentSource, Embedding, Entity, EntityKind, Memory, Message, Payload, PlayerDescription,
    RawDocument, ScanRequest,
};
use std::fmt::Display;
use tracing::{debug, warn};

/// Counters for one extraction pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionReport {
    /// Kind the pass extracted
    pub kind: EntityKind,

    /// Rows returned by the pre-filtered scan
    pub scanned: usize,

    /// Entities produced
    pub extracted: usize,

    /// Rows skipped because their payload was not valid JSON
    pub malformed: usize,

    /// Rows that passed the pre-filter but failed confirmation
    pub rejected: usize,
}

impl ExtractionReport {
    fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            scanned: 0,
            extracted: 0,
            malformed: 0,
            rejected: 0,
        }
    }
}

/// Entities of one kind together with the pass counters
#[derive(Debug, Clone)]
pub struct Extraction<T> {
    /// Extracted entities, in scan order
    pub entities: Vec<T>,

    /// Pass counters
    pub report: ExtractionReport,
}

impl<T> Extraction<T> {
    /// Number of extracted entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether nothing was extracted
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Runs classification and extraction passes against a [`DocumentSource`]
///
/// Each pass scans the source with the kind's pre-filter, confirms every row
/// against the kind's signature, and projects confirmed rows into entities.
/// Passes are independent; a document may be extracted by several of them.
///
/// # Examples
///
/// ```
/// use docsift_domain::{InMemorySource, RawDocument};
/// use docsift_extractor::Extractor;
///
/// let source = InMemorySource::new(vec![RawDocument::new(
///     "m1",
///     r#"{"importance": 4.5, "description": "likes tea", "playerId": "p1"}"#,
///     1,
/// )]);
/// let extractor = Extractor::new(&source);
/// let memories = extractor.memories().unwrap();
/// assert_eq!(memories.len(), 1);
/// ```
pub struct Extractor<'a, S> {
    source: &'a S,
}

impl<'a, S> Extractor<'a, S>
where
    S: DocumentSource,
    S::Error: Display,
{
    /// Create an extractor reading from `source`
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Extract all entities of type `T`, optionally capping the scan
    pub fn extract<T: FromPayload>(
        &self,
        limit: Option<usize>,
    ) -> Result<Extraction<T>, ExtractorError> {
        self.run(T::KIND, limit, T::from_payload)
    }

    /// Extract one kind as untyped [`Entity`] values
    pub fn extract_kind(
        &self,
        kind: EntityKind,
        limit: Option<usize>,
    ) -> Result<Extraction<Entity>, ExtractorError> {
        self.run(kind, limit, |doc, payload| project(kind, doc, payload))
    }

    /// All memories, newest first
    pub fn memories(&self) -> Result<Extraction<Memory>, ExtractorError> {
        self.extract(None)
    }

    /// Memories of one player, newest first
    pub fn memories_for_player(
        &self,
        player_id: &str,
    ) -> Result<Extraction<Memory>, ExtractorError> {
        let mut extraction: Extraction<Memory> = self.extract(None)?;
        extraction.entities.retain(|m| m.player_id == player_id);
        extraction.report.extracted = extraction.entities.len();
        Ok(extraction)
    }

    /// All embeddings, unordered
    pub fn embeddings(&self) -> Result<Extraction<Embedding>, ExtractorError> {
        self.extract(None)
    }

    /// Messages, newest first, from at most `limit` candidate rows
    pub fn messages(&self, limit: Option<usize>) -> Result<Extraction<Message>, ExtractorError> {
        self.extract(limit)
    }

    /// Player descriptions, unordered, from at most `limit` candidate rows
    pub fn player_descriptions(
        &self,
        limit: Option<usize>,
    ) -> Result<Extraction<PlayerDescription>, ExtractorError> {
        self.extract(limit)
    }

    fn run<T, F>(
        &self,
        kind: EntityKind,
        limit: Option<usize>,
        mut build: F,
    ) -> Result<Extraction<T>, ExtractorError>
    where
        F: FnMut(&RawDocument, &Payload) -> T,
    {
        let request = ScanRequest::for_kind(kind).with_limit(limit);
        let docs = self
            .source
            .scan(&request)
            .map_err(|e| ExtractorError::Source(e.to_string()))?;

        let mut report = ExtractionReport::new(kind);
        let mut entities = Vec::new();

        for doc in &docs {
            report.scanned += 1;

            // The port promises live rows only; a store that leaks one is still filtered
            if doc.deleted {
                report.rejected += 1;
                continue;
            }

            match classify(&doc.payload) {
                Classification::Unparseable(error) => {
                    warn!(id = %doc.id, kind = %kind, %error, "skipping malformed payload");
                    report.malformed += 1;
                }
                Classification::Classified(payload, kinds) if kinds.contains(&kind) => {
                    entities.push(build(doc, &payload));
                }
                Classification::Classified(..) | Classification::Unclassified => {
                    report.rejected += 1;
                }
            }
        }

        report.extracted = entities.len();
        debug!(
            kind = %kind,
            scanned = report.scanned,
            extracted = report.extracted,
            malformed = report.malformed,
            rejected = report.rejected,
            "extraction pass complete"
        );

        Ok(Extraction { entities, report })
    }
}

/// Every entity a single document yields, one per confirmed kind
///
/// Deleted and malformed documents yield nothing.
pub fn extract_document(doc: &RawDocument) -> Vec<Entity> {
    if doc.deleted {
        return Vec::new();
    }
    match classify(&doc.payload) {
        Classification::Classified(payload, kinds) => kinds
            .into_iter()
            .map(|kind| project(kind, doc, &payload))
            .collect(),
        Classification::Unparseable(error) => {
            warn!(id = %doc.id, %error, "skipping malformed payload");
            Vec::new()
        }
        Classification::Unclassified => Vec::new(),
    }
}
