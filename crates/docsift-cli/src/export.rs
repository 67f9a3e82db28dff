//! Export of entity collections to CSV or JSON files.
//!
//! Both representations hold the same flat records, so a collection written in
//! one can be loaded back from it. Nothing time-dependent is written: exporting
//! the same collection twice produces identical bytes.

use docsift_domain::{Embedding, Memory, Message, PlayerDescription};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Separator between vector components in a CSV cell.
const VECTOR_SEPARATOR: &str = ";";

/// Errors that can occur while exporting or reloading.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Target not writable or source not readable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A reloaded record does not describe a valid entity
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// File representation of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Tabular, comma-delimited
    Csv,
    /// Structured records, pretty-printed JSON array
    Json,
}

impl ExportFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    /// Parse an interactive answer; `None` means do not export.
    pub fn from_answer(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" | "y" | "yes" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

/// An entity collection that can be exported and reloaded.
pub trait Exportable: Serialize + DeserializeOwned + Sized {
    /// Flat CSV record of this entity
    type Row: Serialize + DeserializeOwned;

    /// File stem, e.g. `memories` for `memories_export.csv`
    const FILE_STEM: &'static str;

    /// Convert to a CSV record
    fn to_row(&self) -> Self::Row;

    /// Rebuild from a CSV record
    fn from_row(row: Self::Row) -> Result<Self, ExportError>;

    /// Re-derive computed fields after a JSON reload
    fn revalidate(self) -> Self {
        self
    }
}

impl Exportable for Memory {
    type Row = Memory;
    const FILE_STEM: &'static str = "memories";

    fn to_row(&self) -> Self::Row {
        self.clone()
    }

    fn from_row(row: Self::Row) -> Result<Self, ExportError> {
        Ok(row)
    }
}

impl Exportable for Message {
    type Row = Message;
    const FILE_STEM: &'static str = "messages";

    fn to_row(&self) -> Self::Row {
        self.clone()
    }

    fn from_row(row: Self::Row) -> Result<Self, ExportError> {
        Ok(row)
    }
}

impl Exportable for PlayerDescription {
    type Row = PlayerDescription;
    const FILE_STEM: &'static str = "players";

    fn to_row(&self) -> Self::Row {
        self.clone()
    }

    fn from_row(row: Self::Row) -> Result<Self, ExportError> {
        Ok(row)
    }
}

/// CSV record of an embedding; the vector is flattened into one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingRow {
    /// Normalized document id
    pub id: String,
    /// Owning player
    pub player_id: String,
    /// Vector length
    pub dimensionality: usize,
    /// Components joined by `;`
    pub vector: String,
}

impl Exportable for Embedding {
    type Row = EmbeddingRow;
    const FILE_STEM: &'static str = "embeddings";

    fn to_row(&self) -> Self::Row {
        let vector = self
            .vector
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(VECTOR_SEPARATOR);
        EmbeddingRow {
            id: self.id.clone(),
            player_id: self.player_id.clone(),
            dimensionality: self.dimensionality,
            vector,
        }
    }

    fn from_row(row: Self::Row) -> Result<Self, ExportError> {
        let vector = row
            .vector
            .split(VECTOR_SEPARATOR)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<f64>().map_err(|e| {
                    ExportError::InvalidRecord(format!("embedding {}: {}", row.id, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Embedding::new(row.id, row.player_id, vector))
    }

    fn revalidate(self) -> Self {
        Embedding::new(self.id, self.player_id, self.vector)
    }
}

/// Target path for a collection in the given directory.
pub fn export_path<T: Exportable>(dir: &Path, format: ExportFormat) -> PathBuf {
    dir.join(format!("{}_export.{}", T::FILE_STEM, format.extension()))
}

/// Write a collection to `<dir>/<stem>_export.<ext>` and return the path.
pub fn export_collection<T: Exportable>(
    items: &[T],
    format: ExportFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let path = export_path::<T>(dir, format);
    match format {
        ExportFormat::Csv => write_csv(items, &path)?,
        ExportFormat::Json => write_json(items, &path)?,
    }
    Ok(path)
}

/// Write a collection as a pretty-printed JSON array.
pub fn write_json<T: Exportable>(items: &[T], path: &Path) -> Result<(), ExportError> {
    let mut contents = serde_json::to_string_pretty(items)?;
    contents.push('\n');
    fs::write(path, contents)?;
    Ok(())
}

/// Write a collection as CSV with a header row.
pub fn write_csv<T: Exportable>(items: &[T], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    for item in items {
        writer.serialize(item.to_row())?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a collection written by [`write_json`].
pub fn load_json<T: Exportable>(path: &Path) -> Result<Vec<T>, ExportError> {
    let contents = fs::read_to_string(path)?;
    let items: Vec<T> = serde_json::from_str(&contents)?;
    Ok(items.into_iter().map(Exportable::revalidate).collect())
}

/// Load a collection written by [`write_csv`].
pub fn load_csv<T: Exportable>(path: &Path) -> Result<Vec<T>, ExportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut items = Vec::new();
    for row in reader.deserialize::<T::Row>() {
        items.push(T::from_row(row?)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers() {
        assert_eq!(ExportFormat::from_answer("JSON\n"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_answer(" csv "), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_answer("y"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::from_answer("no"), None);
        assert_eq!(ExportFormat::from_answer(""), None);
    }

    #[test]
    fn test_export_path() {
        let path = export_path::<Memory>(Path::new("out"), ExportFormat::Csv);
        assert_eq!(path, PathBuf::from("out/memories_export.csv"));
    }

    #[test]
    fn test_embedding_row_flattening() {
        let embedding = Embedding::new("e1".into(), "p1".into(), vec![0.5, -1.25, 3.0]);
        let row = embedding.to_row();
        assert_eq!(row.vector, "0.5;-1.25;3");
        assert_eq!(Embedding::from_row(row).unwrap(), embedding);
    }

    #[test]
    fn test_embedding_row_rejects_garbage() {
        let row = EmbeddingRow {
            id: "e1".into(),
            player_id: "p1".into(),
            dimensionality: 2,
            vector: "0.5;abc".into(),
        };
        assert!(matches!(Embedding::from_row(row), Err(ExportError::InvalidRecord(_))));
    }
}
