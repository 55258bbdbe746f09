//! Model input schema loading.
//!
//! The schema is the ordered list of column names the trained model expects,
//! persisted as a JSON array alongside the model artifact. It defines both the
//! shape of every feature row and the position each feature is serialized at.
//! Loaded once at startup and immutable afterward.

use crate::error::{Result, ViewcastError};
use std::collections::HashMap;
use std::path::Path;

/// Ordered, duplicate-free list of feature columns.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Column names in model training order.
    columns: Vec<String>,
    /// Position lookup by column name.
    index: HashMap<String, usize>,
}

impl Schema {
    /// Creates a schema from an ordered column list. Empty lists and duplicate
    /// names are configuration errors.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ViewcastError::Config(
                "column list contains no columns".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(columns.len());
        for (pos, col) in columns.iter().enumerate() {
            if index.insert(col.clone(), pos).is_some() {
                return Err(ViewcastError::Config(format!(
                    "duplicate schema column: {}",
                    col
                )));
            }
        }

        Ok(Self { columns, index })
    }

    /// Loads the column list from a JSON array file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ViewcastError::Config(format!(
                "Failed to read column list {}: {}",
                path.display(),
                e
            ))
        })?;

        let columns: Vec<String> = serde_json::from_str(&content).map_err(|e| {
            ViewcastError::Config(format!(
                "Failed to parse column list {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::new(columns)
    }

    /// Column names in model order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column in model order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_schema_preserves_order() {
        let schema = Schema::new(columns(&["b", "a", "c"])).unwrap();
        assert_eq!(schema.columns(), &["b", "a", "c"]);
        assert_eq!(schema.position("a"), Some(1));
        assert_eq!(schema.position("missing"), None);
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = Schema::new(Vec::new()).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = Schema::new(columns(&["a", "b", "a"])).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_columns.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(br#"["total_posts", "channel_name_A"]"#).unwrap();

        let schema = Schema::from_file(&path).unwrap();
        assert_eq!(schema.len(), 2);
        assert!(schema.contains("channel_name_A"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = Schema::from_file(Path::new("/nonexistent/columns.json")).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_file_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model_columns.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"{not json").unwrap();

        let err = Schema::from_file(&path).unwrap_err();
        assert!(err.is_configuration());
    }
}
