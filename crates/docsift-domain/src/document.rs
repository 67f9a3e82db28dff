//! Raw documents as they come out of the store

use std::fmt;

/// Opaque identifier of a stored document
///
/// Stores key their rows by whatever the backend uses (a binary key, a text
/// key, a rowid). The core never interprets the value beyond normalizing it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentId {
    /// Binary key
    Binary(Vec<u8>),

    /// Text key
    Text(String),

    /// Integer key
    Integer(i64),
}

impl DocumentId {
    /// Render the identifier in its normalized string form
    ///
    /// Binary ids become lowercase hex, everything else its natural string form.
    /// The same raw identifier always yields the same string.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsift_domain::DocumentId;
    ///
    /// assert_eq!(DocumentId::Binary(vec![0xAB, 0x01]).normalized(), "ab01");
    /// assert_eq!(DocumentId::Text("doc-7".to_string()).normalized(), "doc-7");
    /// assert_eq!(DocumentId::Integer(42).normalized(), "42");
    /// ```
    pub fn normalized(&self) -> String {
        match self {
            DocumentId::Binary(bytes) => hex::encode(bytes),
            DocumentId::Text(text) => text.clone(),
            DocumentId::Integer(value) => value.to_string(),
        }
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}

impl From<Vec<u8>> for DocumentId {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentId::Binary(bytes)
    }
}

impl From<&str> for DocumentId {
    fn from(text: &str) -> Self {
        DocumentId::Text(text.to_string())
    }
}

impl From<i64> for DocumentId {
    fn from(value: i64) -> Self {
        DocumentId::Integer(value)
    }
}

/// A record of the document store
///
/// Read-only to the core. Only non-deleted documents are ever extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    /// Store identifier
    pub id: DocumentId,

    /// Serialized JSON payload, not yet parsed
    pub payload: String,

    /// Milliseconds since the Unix epoch
    pub timestamp: i64,

    /// Soft-delete flag
    pub deleted: bool,
}

impl RawDocument {
    /// Create a live (non-deleted) document
    pub fn new(id: impl Into<DocumentId>, payload: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            payload: payload.into(),
            timestamp,
            deleted: false,
        }
    }

    /// Mark the document as soft-deleted
    pub fn into_deleted(mut self) -> Self {
        self.deleted = true;
        self
    }

    /// Whether the serialized payload contains every term verbatim
    pub fn contains_all<S: AsRef<str>>(&self, terms: &[S]) -> bool {
        terms.iter().all(|term| self.payload.contains(term.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_binary_id_is_lowercase_hex() {
        let id = DocumentId::Binary(vec![0xDE, 0xAD, 0xBE, 0xEF, 0x00]);
        assert_eq!(id.normalized(), "deadbeef00");
        assert_eq!(id.to_string(), "deadbeef00");
    }

    #[test]
    fn test_empty_binary_id() {
        assert_eq!(DocumentId::Binary(Vec::new()).normalized(), "");
    }

    #[test]
    fn test_contains_all() {
        let doc = RawDocument::new("a", r#"{"text":"hi","author":"p1"}"#, 1);
        assert!(doc.contains_all(&["\"text\"", "\"author\""]));
        assert!(!doc.contains_all(&["\"text\"", "\"conversationId\""]));
    }

    #[test]
    fn test_into_deleted() {
        let doc = RawDocument::new(1i64, "{}", 1).into_deleted();
        assert!(doc.deleted);
    }

    proptest! {
        #[test]
        fn binary_normalization_is_deterministic(
            bytes in proptest::collection::vec(any::<u8>(), 0..64)
        ) {
            let first = DocumentId::Binary(bytes.clone()).normalized();
            let second = DocumentId::Binary(bytes.clone()).normalized();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), bytes.len() * 2);
            prop_assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }

        #[test]
        fn text_normalization_is_identity(text in ".*") {
            prop_assert_eq!(DocumentId::Text(text.clone()).normalized(), text);
        }
    }
}
