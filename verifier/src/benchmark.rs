//! Benchmark scores read from a JSON file mapping processor names to scores:
//!
//! ```json
//! { "Intel Core i5-10210U @ 1.60GHz": 2366, "AMD Ryzen 7 3700X 8-Core": 2687 }
//! ```

use crate::time_limit::BenchmarkLookup;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("Failed to read benchmark file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to decode benchmark file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable(HashMap<String, f64>);

impl BenchmarkTable {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn read_from_file(path: &Path) -> Result<Self, BenchmarkError> {
        let contents = fs::read_to_string(path).map_err(|source| BenchmarkError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents).map_err(|source| BenchmarkError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl BenchmarkLookup for BenchmarkTable {
    fn score(&self, processor: &str) -> Option<f64> {
        self.0.score(processor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_scores_from_json() {
        let table = BenchmarkTable::from_json(
            r#"{ "Intel Core i5-10210U @ 1.60GHz": 2366, "AMD Ryzen 7 3700X 8-Core": 2687.5 }"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.score("Intel Core i5-10210U @ 1.60GHz"), Some(2366.));
        assert_eq!(table.score("AMD Ryzen 7 3700X 8-Core"), Some(2687.5));
        assert_eq!(table.score("Intel Core i5"), None);
    }

    #[test]
    fn rejects_non_numeric_scores() {
        assert!(BenchmarkTable::from_json(r#"{ "CPU": "fast" }"#).is_err());
    }

    #[test]
    fn reports_missing_file() {
        let err = BenchmarkTable::read_from_file(Path::new("/nonexistent/cpus.json")).unwrap_err();
        assert!(matches!(err, BenchmarkError::Io { .. }));
    }
}
