//! In-memory document source

use crate::document::RawDocument;
use crate::traits::{DocumentSource, ScanOrder, ScanRequest};
use std::convert::Infallible;

/// A [`DocumentSource`] over a vector of documents
///
/// Applies the same visibility rules as a real store: deleted documents are
/// never returned, pre-filter terms are matched verbatim.
///
/// # Examples
///
/// ```
/// use docsift_domain::{DocumentSource, InMemorySource, RawDocument, ScanRequest};
///
/// let source = InMemorySource::new(vec![
///     RawDocument::new("a", r#"{"text":"hi"}"#, 1),
///     RawDocument::new("b", r#"{"text":"bye"}"#, 2).into_deleted(),
/// ]);
/// let docs = source.scan(&ScanRequest::default()).unwrap();
/// assert_eq!(docs.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    documents: Vec<RawDocument>,
}

impl InMemorySource {
    /// Create a source over the given documents, kept in insertion order
    pub fn new(documents: Vec<RawDocument>) -> Self {
        Self { documents }
    }

    /// Append a document
    pub fn push(&mut self, document: RawDocument) {
        self.documents.push(document);
    }
}

impl DocumentSource for InMemorySource {
    type Error = Infallible;

    fn scan(&self, request: &ScanRequest) -> Result<Vec<RawDocument>, Self::Error> {
        let mut docs: Vec<RawDocument> = self
            .documents
            .iter()
            .filter(|doc| !doc.deleted && doc.contains_all(request.contains.as_slice()))
            .cloned()
            .collect();

        if request.order == ScanOrder::RecentFirst {
            docs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }

        if let Some(limit) = request.limit {
            docs.truncate(limit);
        }

        Ok(docs)
    }
}
