//! Kind-specific projections from payload to entity

use crate::timestamp::format_local_millis;
use docsift_domain::{
    Embedding, Entity, EntityKind, Memory, Message, Payload, PlayerDescription, RawDocument,
};

/// An entity type that can be projected out of a confirmed payload
///
/// Implementations assume the payload already satisfies `KIND`'s signature.
pub trait FromPayload: Sized {
    /// Kind this type represents
    const KIND: EntityKind;

    /// Build the entity from its source document and parsed payload
    fn from_payload(doc: &RawDocument, payload: &Payload) -> Self;
}

/// Text of a mandatory key; a `null` value maps to the empty string
fn required_text(payload: &Payload, key: &str) -> String {
    payload.text(key).unwrap_or_default()
}

impl FromPayload for Memory {
    const KIND: EntityKind = EntityKind::Memory;

    fn from_payload(doc: &RawDocument, payload: &Payload) -> Self {
        let last_access_millis = payload.integer("lastAccess");
        Memory {
            id: doc.id.normalized(),
            player_id: required_text(payload, "playerId"),
            description: required_text(payload, "description"),
            importance: payload.number("importance"),
            last_access_millis,
            last_access_readable: last_access_millis.and_then(format_local_millis),
            embedding_id: payload.text("embeddingId"),
            data_type: payload.nested_str(&["data", "type"]),
            record_timestamp: doc.timestamp,
        }
    }
}

impl FromPayload for Embedding {
    const KIND: EntityKind = EntityKind::Embedding;

    fn from_payload(doc: &RawDocument, payload: &Payload) -> Self {
        let vector = payload.number_array("embedding").unwrap_or_default();
        Embedding::new(doc.id.normalized(), required_text(payload, "playerId"), vector)
    }
}

impl FromPayload for Message {
    const KIND: EntityKind = EntityKind::Message;

    fn from_payload(doc: &RawDocument, payload: &Payload) -> Self {
        Message {
            id: doc.id.normalized(),
            conversation_id: required_text(payload, "conversationId"),
            author: required_text(payload, "author"),
            text: required_text(payload, "text"),
            message_uuid: payload.text("messageUuid"),
            record_timestamp: doc.timestamp,
        }
    }
}

impl FromPayload for PlayerDescription {
    const KIND: EntityKind = EntityKind::PlayerDescription;

    fn from_payload(doc: &RawDocument, payload: &Payload) -> Self {
        PlayerDescription {
            id: doc.id.normalized(),
            player_id: required_text(payload, "playerId"),
            name: required_text(payload, "name"),
            // Absent description is an empty string, not None
            description: payload.text("description").unwrap_or_default(),
            character: required_text(payload, "character"),
        }
    }
}

/// Project a payload into the entity of the given kind
pub fn project(kind: EntityKind, doc: &RawDocument, payload: &Payload) -> Entity {
    match kind {
        EntityKind::Memory => Entity::Memory(Memory::from_payload(doc, payload)),
        EntityKind::Embedding => Entity::Embedding(Embedding::from_payload(doc, payload)),
        EntityKind::Message => Entity::Message(Message::from_payload(doc, payload)),
        EntityKind::PlayerDescription => {
            Entity::PlayerDescription(PlayerDescription::from_payload(doc, payload))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(payload: &str) -> (RawDocument, Payload) {
        let raw = RawDocument::new(vec![0x01u8, 0xAB], payload, 1_000);
        let parsed = Payload::parse(payload).unwrap().unwrap();
        (raw, parsed)
    }

    #[test]
    fn test_memory_projection() {
        let (raw, payload) = doc(
            r#"{"importance": 4.5, "description": "likes tea", "playerId": "p1",
                "lastAccess": 1700000000000, "embeddingId": "e9",
                "data": {"type": "relationship"}}"#,
        );
        let memory = Memory::from_payload(&raw, &payload);
        assert_eq!(memory.id, "01ab");
        assert_eq!(memory.player_id, "p1");
        assert_eq!(memory.description, "likes tea");
        assert_eq!(memory.importance, Some(4.5));
        assert_eq!(memory.last_access_millis, Some(1_700_000_000_000));
        assert!(memory.last_access_readable.is_some());
        assert_eq!(memory.embedding_id.as_deref(), Some("e9"));
        assert_eq!(memory.data_type.as_deref(), Some("relationship"));
        assert_eq!(memory.record_timestamp, 1_000);
    }

    #[test]
    fn test_memory_optional_fields_absent() {
        let (raw, payload) = doc(r#"{"importance": "high", "description": "d", "playerId": "p1"}"#);
        let memory = Memory::from_payload(&raw, &payload);
        assert_eq!(memory.importance, None);
        assert_eq!(memory.last_access_millis, None);
        assert_eq!(memory.last_access_readable, None);
        assert_eq!(memory.embedding_id, None);
        assert_eq!(memory.data_type, None);
    }

    #[test]
    fn test_embedding_dimensionality_ignores_payload_metadata() {
        let (raw, payload) =
            doc(r#"{"embedding": [0.1, 0.2, 0.3], "playerId": "p1", "dimension": 1536}"#);
        let embedding = Embedding::from_payload(&raw, &payload);
        assert_eq!(embedding.dimensionality, 3);
        assert_eq!(embedding.vector.len(), embedding.dimensionality);
    }

    #[test]
    fn test_message_projection() {
        let (raw, payload) = doc(
            r#"{"text": "hi", "author": "p1", "conversationId": "c1", "messageUuid": "u-1"}"#,
        );
        let message = Message::from_payload(&raw, &payload);
        assert_eq!(message.text, "hi");
        assert_eq!(message.author, "p1");
        assert_eq!(message.conversation_id, "c1");
        assert_eq!(message.message_uuid.as_deref(), Some("u-1"));
    }

    #[test]
    fn test_player_description_defaults_to_empty() {
        let (raw, payload) = doc(r#"{"name": "Lucky", "playerId": "p1", "character": "f1"}"#);
        let player = PlayerDescription::from_payload(&raw, &payload);
        assert_eq!(player.description, "");
        assert_eq!(player.character, "f1");
    }

    #[test]
    fn test_project_matches_kind() {
        let (raw, payload) = doc(r#"{"name": "Lucky", "playerId": "p1", "character": "f1"}"#);
        for kind in EntityKind::ALL {
            assert_eq!(project(kind, &raw, &payload).kind(), kind);
        }
    }
}
