//! docsift Domain Layer
//!
//! This crate contains the domain model for docsift: the raw documents read from
//! a schema-less store, the four entity kinds reconstructed from them, and the
//! read port every document store implements.
//!
//! ## Key Concepts
//!
//! - **RawDocument**: An opaque record (id, serialized JSON payload, timestamp, deletion flag)
//! - **Signature**: The fixed set of JSON keys that identifies an entity kind
//! - **Payload**: A parsed JSON object, the intermediate representation classification runs on
//! - **Entity**: A typed record (memory, embedding, message, player description)
//! - **DocumentSource**: The narrow read port (scan with pre-filter and ordering hint)
//!
//! ## Architecture
//!
//! - No I/O in this crate
//! - Store implementations live in `docsift-store`
//! - Classification and extraction live in `docsift-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod entity;
pub mod payload;
pub mod signature;
pub mod source;
pub mod traits;

// Re-exports for convenience
pub use document::{DocumentId, RawDocument};
pub use entity::{Embedding, Entity, EntityKind, Memory, Message, PlayerDescription};
pub use payload::Payload;
pub use signature::Signature;
pub use source::InMemorySource;
pub use traits::{DocumentSource, ScanOrder, ScanRequest};
