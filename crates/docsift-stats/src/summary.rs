//! Numeric distributions and the combined memory summary

use crate::counts::{count_by_data_type, count_by_player, Counts};
use docsift_domain::{Embedding, Memory};
use serde::Serialize;
use std::cmp::Ordering;

/// Mean, min and max over the numeric importances of a memory set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImportanceStats {
    /// Memories that contributed (numeric importance only)
    pub count: usize,

    /// Arithmetic mean
    pub mean: f64,

    /// Smallest importance
    pub min: f64,

    /// Largest importance
    pub max: f64,
}

/// Importance distribution, skipping memories without a numeric importance
///
/// Returns `None` when no memory has one.
pub fn importance_stats(memories: &[Memory]) -> Option<ImportanceStats> {
    let values: Vec<f64> = memories
        .iter()
        .filter_map(|m| m.importance)
        .filter(|v| !v.is_nan())
        .collect();
    if values.is_empty() {
        return None;
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(ImportanceStats {
        count: values.len(),
        mean: sum / values.len() as f64,
        min,
        max,
    })
}

/// Dimensionality of the first embedding, taken as representative of the set
///
/// The rest of the set is not checked; embeddings of different lengths may
/// coexist.
pub fn representative_dimensionality(embeddings: &[Embedding]) -> Option<usize> {
    embeddings.first().map(|e| e.dimensionality)
}

/// The `n` most important memories
///
/// Memories without importance sort last; equal importances keep input order.
pub fn top_by_importance(memories: &[Memory], n: usize) -> Vec<&Memory> {
    let mut ranked: Vec<&Memory> = memories.iter().collect();
    ranked.sort_by(|a, b| match (a.importance, b.importance) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked.truncate(n);
    ranked
}

/// Everything the memory analysis reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemorySummary {
    /// Number of memories
    pub total: usize,

    /// Memories per data type, highest first
    pub by_type: Counts<String>,

    /// Importance distribution
    pub importance: Option<ImportanceStats>,

    /// Memories per player, highest first
    pub by_player: Counts<String>,
}

impl MemorySummary {
    /// Compute the summary of a memory set
    pub fn compute(memories: &[Memory]) -> Self {
        Self {
            total: memories.len(),
            by_type: count_by_data_type(memories),
            importance: importance_stats(memories),
            by_player: count_by_player(memories),
        }
    }

    /// Generate a summary report, listing at most `top_players` players
    pub fn summary(&self, top_players: usize) -> String {
        let mut lines = vec![
            "Memory Analysis".to_string(),
            "===============".to_string(),
            format!("Total memories: {}", self.total),
            String::new(),
        ];

        if !self.by_type.is_empty() {
            lines.push("Memories by type:".to_string());
            for (data_type, count) in self.by_type.entries() {
                lines.push(format!("  {}: {}", data_type, count));
            }
            lines.push(String::new());
        }

        if let Some(stats) = &self.importance {
            lines.push("Importance statistics:".to_string());
            lines.push(format!("  Mean: {:.2}", stats.mean));
            lines.push(format!("  Min: {:.2}", stats.min));
            lines.push(format!("  Max: {:.2}", stats.max));
            lines.push(String::new());
        }

        if !self.by_player.is_empty() {
            lines.push("Memories per player:".to_string());
            for (player, count) in self.by_player.top(top_players) {
                lines.push(format!("  {}: {} memories", player, count));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(id: &str, player: &str, importance: Option<f64>) -> Memory {
        Memory {
            id: id.to_string(),
            player_id: player.to_string(),
            description: format!("memory {}", id),
            importance,
            last_access_millis: None,
            last_access_readable: None,
            embedding_id: None,
            data_type: None,
            record_timestamp: 0,
        }
    }

    #[test]
    fn test_importance_stats() {
        let memories = vec![
            memory("a", "p1", Some(1.0)),
            memory("b", "p1", Some(3.0)),
            memory("c", "p2", Some(5.0)),
        ];
        let stats = importance_stats(&memories).unwrap();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_importance_stats_skips_absent() {
        let memories = vec![memory("a", "p1", None), memory("b", "p1", Some(2.0))];
        let stats = importance_stats(&memories).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 2.0);
    }

    #[test]
    fn test_importance_stats_empty() {
        assert_eq!(importance_stats(&[]), None);
        assert_eq!(importance_stats(&[memory("a", "p1", None)]), None);
    }

    #[test]
    fn test_representative_dimensionality_uses_first() {
        let embeddings = vec![
            Embedding::new("e1".into(), "p1".into(), vec![0.0; 4]),
            Embedding::new("e2".into(), "p1".into(), vec![0.0; 8]),
        ];
        assert_eq!(representative_dimensionality(&embeddings), Some(4));
        assert_eq!(representative_dimensionality(&[]), None);
    }

    #[test]
    fn test_top_by_importance() {
        let memories = vec![
            memory("a", "p1", Some(2.0)),
            memory("b", "p1", None),
            memory("c", "p2", Some(9.0)),
            memory("d", "p2", Some(2.0)),
        ];
        let ids: Vec<&str> = top_by_importance(&memories, 3)
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c", "a", "d"]);
        assert_eq!(top_by_importance(&memories, 10).last().unwrap().id, "b");
    }

    #[test]
    fn test_summary_text() {
        let mut memories = vec![
            memory("a", "p1", Some(1.0)),
            memory("b", "p1", Some(3.0)),
            memory("c", "p2", Some(5.0)),
        ];
        memories[0].data_type = Some("relationship".to_string());

        let summary = MemorySummary::compute(&memories);
        assert_eq!(summary.total, 3);

        let text = summary.summary(10);
        assert!(text.contains("Total memories: 3"));
        assert!(text.contains("relationship: 1"));
        assert!(!text.contains("unknown"));
        assert!(text.contains("Mean: 3.00"));
        assert!(text.contains("p1: 2 memories"));
    }

    #[test]
    fn test_summary_of_nothing() {
        let summary = MemorySummary::compute(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.importance.is_none());
        assert!(summary.summary(10).contains("Total memories: 0"));
    }
}
