//! Design document access
//!
//! This module takes raw document data (collections, variables, text styles,
//! frame nodes) and exposes it behind the async [`DocumentSource`] seam.

mod fetch;
pub mod model;
mod source;

pub use fetch::Fetcher;
pub use model::{
    AliasRef, Collection, Color, FontName, Measure, Mode, ModeValue, Node, NodeKind, Scalar,
    TextStyle, Unit, Variable,
};
pub use source::{DocumentSource, SourceError, Snapshot};
