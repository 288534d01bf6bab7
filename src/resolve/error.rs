//! Errors raised while following alias chains

use thiserror::Error;

/// Alias resolution failures. Both variants abort the current entry only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// An alias chain revisits a variable it already passed through
    #[error("alias cycle in '{entry}': {}", chain.join(" -> "))]
    CycleDetected { entry: String, chain: Vec<String> },

    /// An alias chain is longer than the configured hop limit
    #[error("alias chain of '{entry}' exceeds {limit} hops: {}", chain.join(" -> "))]
    ExcessiveDepth {
        entry: String,
        limit: usize,
        chain: Vec<String>,
    },
}

impl ResolveError {
    pub fn cycle(entry: impl Into<String>, chain: Vec<String>) -> Self {
        Self::CycleDetected {
            entry: entry.into(),
            chain,
        }
    }

    pub fn too_deep(entry: impl Into<String>, limit: usize, chain: Vec<String>) -> Self {
        Self::ExcessiveDepth {
            entry: entry.into(),
            limit,
            chain,
        }
    }

    /// Name of the entry whose resolution failed
    pub fn entry(&self) -> &str {
        match self {
            Self::CycleDetected { entry, .. } | Self::ExcessiveDepth { entry, .. } => entry,
        }
    }

    /// Variable names visited, starting with the failing entry
    pub fn chain(&self) -> &[String] {
        match self {
            Self::CycleDetected { chain, .. } | Self::ExcessiveDepth { chain, .. } => chain,
        }
    }
}
