//! Key signatures identifying each entity kind
//!
//! Nothing in the store declares what a record is. A kind is recognized by the
//! set of JSON object keys its payload carries.

use crate::entity::EntityKind;

/// The fixed set of keys a payload must carry to confirm as a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Kind this signature identifies
    pub kind: EntityKind,

    /// Keys that must all be present
    pub keys: &'static [&'static str],

    /// Key whose value must additionally be a JSON array
    pub array_key: Option<&'static str>,
}

const MEMORY: Signature = Signature {
    kind: EntityKind::Memory,
    keys: &["importance", "description", "playerId"],
    array_key: None,
};

const EMBEDDING: Signature = Signature {
    kind: EntityKind::Embedding,
    keys: &["embedding", "playerId"],
    array_key: Some("embedding"),
};

const MESSAGE: Signature = Signature {
    kind: EntityKind::Message,
    keys: &["text", "author", "conversationId"],
    array_key: None,
};

const PLAYER_DESCRIPTION: Signature = Signature {
    kind: EntityKind::PlayerDescription,
    keys: &["name", "playerId", "character"],
    array_key: None,
};

impl Signature {
    /// Signature of the given kind
    pub fn of(kind: EntityKind) -> &'static Signature {
        match kind {
            EntityKind::Memory => &MEMORY,
            EntityKind::Embedding => &EMBEDDING,
            EntityKind::Message => &MESSAGE,
            EntityKind::PlayerDescription => &PLAYER_DESCRIPTION,
        }
    }

    /// Substrings a serialized payload must contain to be a candidate
    ///
    /// Each key is quoted, so `playerId` becomes `"playerId"`. This is a coarse
    /// filter: a key name inside a string value also passes it.
    ///
    /// # Examples
    ///
    /// ```
    /// use docsift_domain::{EntityKind, Signature};
    ///
    /// let terms = Signature::of(EntityKind::Embedding).prefilter_terms();
    /// assert_eq!(terms, vec!["\"embedding\"", "\"playerId\""]);
    /// ```
    pub fn prefilter_terms(&self) -> Vec<String> {
        self.keys.iter().map(|key| format!("\"{}\"", key)).collect()
    }
}

impl EntityKind {
    /// Signature identifying this kind
    pub fn signature(&self) -> &'static Signature {
        Signature::of(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_kinds_match() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.signature().kind, kind);
        }
    }

    #[test]
    fn test_player_signature_requires_character() {
        let sig = EntityKind::PlayerDescription.signature();
        assert!(sig.keys.contains(&"character"));
        assert!(!sig.keys.contains(&"description"));
    }

    #[test]
    fn test_only_embedding_requires_array() {
        for kind in EntityKind::ALL {
            let sig = kind.signature();
            assert_eq!(sig.array_key.is_some(), kind == EntityKind::Embedding);
        }
    }
}
