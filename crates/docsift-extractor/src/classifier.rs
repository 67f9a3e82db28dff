//! Structural classification of raw payloads

use docsift_domain::{EntityKind, Payload};

/// Outcome of classifying one serialized payload
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The payload is not valid JSON
    Unparseable(String),

    /// Valid JSON that matches no signature (including non-objects)
    Unclassified,

    /// The payload and every kind whose signature it satisfies
    Classified(Payload, Vec<EntityKind>),
}

impl Classification {
    /// Kinds the payload confirmed as; empty unless classified
    pub fn kinds(&self) -> &[EntityKind] {
        match self {
            Classification::Classified(_, kinds) => kinds,
            Classification::Unparseable(_) | Classification::Unclassified => &[],
        }
    }

    /// Whether the payload confirmed as `kind`
    pub fn is(&self, kind: EntityKind) -> bool {
        self.kinds().contains(&kind)
    }
}

/// Whether a parsed payload confirms as `kind`
pub fn confirms(payload: &Payload, kind: EntityKind) -> bool {
    payload.satisfies(kind.signature())
}

/// Every kind a parsed payload confirms as, in [`EntityKind::ALL`] order
///
/// A payload may carry several signatures at once; all of them are reported.
pub fn kinds_of(payload: &Payload) -> Vec<EntityKind> {
    EntityKind::ALL
        .into_iter()
        .filter(|kind| confirms(payload, *kind))
        .collect()
}

/// Classify a serialized payload against all signatures
pub fn classify(raw: &str) -> Classification {
    match Payload::parse(raw) {
        Err(e) => Classification::Unparseable(e.to_string()),
        Ok(None) => Classification::Unclassified,
        Ok(Some(payload)) => {
            let kinds = kinds_of(&payload);
            if kinds.is_empty() {
                Classification::Unclassified
            } else {
                Classification::Classified(payload, kinds)
            }
        }
    }
}
