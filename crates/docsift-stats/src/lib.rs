//! docsift Stats
//!
//! Aggregate statistics over extracted entity collections.
//!
//! Every function here is pure: it takes an already-extracted slice, performs no
//! I/O and cannot fail. An empty input yields an empty map or `None`.
//!
//! # Example
//!
//! ```
//! use docsift_domain::Memory;
//! use docsift_stats::importance_stats;
//!
//! let memory = |importance| Memory {
//!     id: "m".into(),
//!     player_id: "p1".into(),
//!     description: "d".into(),
//!     importance: Some(importance),
//!     last_access_millis: None,
//!     last_access_readable: None,
//!     embedding_id: None,
//!     data_type: None,
//!     record_timestamp: 0,
//! };
//! let stats = importance_stats(&[memory(1.0), memory(3.0), memory(5.0)]).unwrap();
//! assert_eq!((stats.mean, stats.min, stats.max), (3.0, 1.0, 5.0));
//! ```

#![warn(missing_docs)]

mod counts;
mod summary;

pub use counts::{count_by_data_type, count_by_player, Counts};
pub use summary::{
    importance_stats, representative_dimensionality, top_by_importance, ImportanceStats,
    MemorySummary,
};
