//! Errors reported back to the caller of an operation

use thiserror::Error;

use crate::document::SourceError;
use crate::resolve::ResolveError;

#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("unknown operation '{0}'")]
    UnknownOperation(String),

    #[error("operation '{operation}' requires '{parameter}'")]
    MissingParameter {
        operation: String,
        parameter: &'static str,
    },

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] serde_json::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

impl SnippetError {
    pub fn missing(operation: impl Into<String>, parameter: &'static str) -> Self {
        Self::MissingParameter {
            operation: operation.into(),
            parameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_display() {
        let err = SnippetError::missing("export-variables", "collectionId");
        assert_eq!(
            err.to_string(),
            "operation 'export-variables' requires 'collectionId'"
        );
    }

    #[test]
    fn test_resolve_error_is_transparent() {
        let err: SnippetError = ResolveError::cycle("a", vec!["a".into(), "a".into()]).into();
        assert!(err.to_string().starts_with("alias cycle in 'a'"));
    }
}
