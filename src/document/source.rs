//! The document query seam and its JSON snapshot implementation

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::model::{Collection, Node, TextStyle, Variable};

/// Errors raised while reading from a document source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read document file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{what} timed out after {attempts} attempt(s)")]
    Timeout { what: String, attempts: u32 },
    #[error("document source unavailable: {0}")]
    Unavailable(String),
}

/// Read access to a design document.
///
/// Single-item lookups return `Ok(None)` when the item does not exist.
#[allow(async_fn_in_trait)]
pub trait DocumentSource {
    async fn text_styles(&self) -> Result<Vec<TextStyle>, SourceError>;

    async fn collections(&self) -> Result<Vec<Collection>, SourceError>;

    async fn collection(&self, id: &str) -> Result<Option<Collection>, SourceError>;

    async fn variable(&self, id: &str) -> Result<Option<Variable>, SourceError>;

    async fn node(&self, id: &str) -> Result<Option<Node>, SourceError>;
}

/// An in-memory document loaded from a JSON export
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    text_styles: Vec<TextStyle>,
    collections: Vec<Collection>,
    variables: HashMap<String, Variable>,
    nodes: Vec<Node>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonDocument {
    #[serde(default)]
    text_styles: Vec<TextStyle>,
    #[serde(default)]
    collections: Vec<Collection>,
    #[serde(default)]
    variables: Vec<Variable>,
    #[serde(default)]
    nodes: Vec<Node>,
}

impl Snapshot {
    /// Load a snapshot from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load a snapshot from a JSON string
    pub fn from_json(content: &str) -> Result<Self, SourceError> {
        let doc: JsonDocument = serde_json::from_str(content)?;
        Ok(Snapshot {
            text_styles: doc.text_styles,
            collections: doc.collections,
            variables: doc
                .variables
                .into_iter()
                .map(|v| (v.id.clone(), v))
                .collect(),
            nodes: doc.nodes,
        })
    }
}

impl DocumentSource for Snapshot {
    async fn text_styles(&self) -> Result<Vec<TextStyle>, SourceError> {
        Ok(self.text_styles.clone())
    }

    async fn collections(&self) -> Result<Vec<Collection>, SourceError> {
        Ok(self.collections.clone())
    }

    async fn collection(&self, id: &str) -> Result<Option<Collection>, SourceError> {
        Ok(self.collections.iter().find(|c| c.id == id).cloned())
    }

    async fn variable(&self, id: &str) -> Result<Option<Variable>, SourceError> {
        Ok(self.variables.get(id).cloned())
    }

    async fn node(&self, id: &str) -> Result<Option<Node>, SourceError> {
        Ok(self.nodes.iter().find_map(|n| n.find(id)).cloned())
    }
}
