//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
///
/// Malformed payloads and signature mismatches are not errors; they are
/// skipped and counted in the extraction report.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The document source failed; the pass is aborted
    #[error("Source error: {0}")]
    Source(String),
}
