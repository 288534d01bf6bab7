//! Design Snippets - style-sheet snippets from design documents
//!
//! This library reads typography, color and spacing data from a design
//! document (collections of per-mode variables, text styles and style-guide
//! frames) and formats it through user-supplied templates into Sass mixins,
//! functions or variable declarations.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use design_snippets::substitute;
//!
//! let mut values = HashMap::new();
//! values.insert("name".to_string(), "Heading1".to_string());
//! values.insert("Mobile".to_string(), "16".to_string());
//!
//! let out = substitute("@mixin ${name} { size: ${Mobile}; }", &values);
//! assert_eq!(out, "@mixin Heading1 { size: 16; }");
//! ```

pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod format;
pub mod message;
pub mod naming;
pub mod resolve;
pub mod typography;

pub use config::{Config, ConfigError, OutputMode};
pub use dispatch::{dispatch, dispatch_json, Operation};
pub use document::{DocumentSource, Fetcher, Snapshot, SourceError};
pub use error::SnippetError;
pub use format::{compile, substitute, FormatTemplate, LintWarning};
pub use message::{CollectionSummary, Payload, Request, Response, ResponseKind};
pub use naming::to_identifier;
pub use resolve::{ResolveError, ResolvedValueMap, Resolver};

/// Run one request against a snapshot document with the given configuration
///
/// # Example
///
/// ```rust
/// use design_snippets::{run, Config, Request, Snapshot};
///
/// let doc = Snapshot::from_json(r#"{
///     "collections": [{"id": "c", "name": "Spacing",
///                      "modes": [{"modeId": "m", "name": "Mobile"}],
///                      "variableIds": ["v"]}],
///     "variables": [{"id": "v", "name": "Gap / Small", "variableCollectionId": "c",
///                    "valuesByMode": {"m": 4}}]
/// }"#).unwrap();
///
/// let request = Request::new("export-variables")
///     .with_format("$${name}: ${Mobile}px;")
///     .with_collection("c");
///
/// let responses = tokio::runtime::Builder::new_current_thread()
///     .enable_all()
///     .build()
///     .unwrap()
///     .block_on(run(request, doc, &Config::default()));
///
/// assert_eq!(responses[0].as_text(), Some("$gapSmall: 4px;"));
/// ```
pub async fn run<S: DocumentSource>(request: Request, source: S, config: &Config) -> Vec<Response> {
    let fetcher = Fetcher::new(source, &config.fetch);
    dispatch(request, &fetcher, config).await
}
