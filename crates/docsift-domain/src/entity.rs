//! Entity module - the typed records reconstructed from raw documents

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of entity kinds the store is known to hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Semantic memory of a player
    Memory,

    /// Vector embedding of a memory
    Embedding,

    /// Conversational message
    Message,

    /// Player/actor description
    PlayerDescription,
}

impl EntityKind {
    /// All kinds, in extraction order
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Memory,
        EntityKind::Embedding,
        EntityKind::Message,
        EntityKind::PlayerDescription,
    ];

    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Memory => "memory",
            EntityKind::Embedding => "embedding",
            EntityKind::Message => "message",
            EntityKind::PlayerDescription => "player_description",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A memory a player formed about the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    /// Normalized document id
    pub id: String,

    /// Owning player
    pub player_id: String,

    /// Memory text
    pub description: String,

    /// Importance score; `None` when the stored value is not numeric
    pub importance: Option<f64>,

    /// Last access, milliseconds since the Unix epoch
    pub last_access_millis: Option<i64>,

    /// Local-time rendering of `last_access_millis` at one-second precision
    pub last_access_readable: Option<String>,

    /// Id of the embedding document for this memory
    pub embedding_id: Option<String>,

    /// Memory subtype, from the nested `data.type` field
    pub data_type: Option<String>,

    /// Timestamp of the underlying record
    pub record_timestamp: i64,
}

/// An embedding vector
///
/// `dimensionality` always equals `vector.len()`; use [`Embedding::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Embedding {
    /// Normalized document id
    pub id: String,

    /// Owning player
    pub player_id: String,

    /// Vector components
    pub vector: Vec<f64>,

    /// Vector length
    pub dimensionality: usize,
}

impl Embedding {
    /// Create an embedding, deriving the dimensionality from the vector
    pub fn new(id: String, player_id: String, vector: Vec<f64>) -> Self {
        let dimensionality = vector.len();
        Self {
            id,
            player_id,
            vector,
            dimensionality,
        }
    }
}

/// A message in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Normalized document id
    pub id: String,

    /// Conversation the message belongs to
    pub conversation_id: String,

    /// Authoring player
    pub author: String,

    /// Message body
    pub text: String,

    /// Client-side message id, when recorded
    pub message_uuid: Option<String>,

    /// Timestamp of the underlying record
    pub record_timestamp: i64,
}

/// A player (actor) description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerDescription {
    /// Normalized document id
    pub id: String,

    /// Described player
    pub player_id: String,

    /// Display name
    pub name: String,

    /// Free-form description; empty when the payload has none
    pub description: String,

    /// Character sprite/archetype
    pub character: String,
}

/// One extracted entity of any kind
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    /// A memory
    Memory(Memory),

    /// An embedding
    Embedding(Embedding),

    /// A message
    Message(Message),

    /// A player description
    PlayerDescription(PlayerDescription),
}

impl Entity {
    /// The kind of this entity
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Memory(_) => EntityKind::Memory,
            Entity::Embedding(_) => EntityKind::Embedding,
            Entity::Message(_) => EntityKind::Message,
            Entity::PlayerDescription(_) => EntityKind::PlayerDescription,
        }
    }

    /// Normalized id of the source document
    pub fn id(&self) -> &str {
        match self {
            Entity::Memory(m) => &m.id,
            Entity::Embedding(e) => &e.id,
            Entity::Message(m) => &m.id,
            Entity::PlayerDescription(p) => &p.id,
        }
    }
}
