//! Operation dispatch
//!
//! Every request maps to one [`Operation`] variant; each variant is handled by
//! a function of its parameters and a read-only document fetcher.

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::config::{Config, OutputMode, OutputOptions};
use crate::document::{Collection, DocumentSource, Fetcher, TextStyle, Variable};
use crate::error::SnippetError;
use crate::format::{compile, lint, substitute};
use crate::message::{CollectionSummary, Request, Response, ResponseKind};
use crate::naming::to_identifier;
use crate::resolve::{Breakpoints, ResolveError, ResolvedValueMap, Resolver, NAME_PLACEHOLDER};
use crate::typography;

/// Placeholder names for the breakpoint export
pub const MOBILE_PLACEHOLDER: &str = "mobile";
pub const DESKTOP_PLACEHOLDER: &str = "desktop";

/// The operations a request can ask for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    ListCollections,
    ExportVariables { format: String, collection_id: String },
    ExportBreakpoints { format: String, collection_id: String },
    ExportTextStyles { format: String },
    TypographyMixins { node_id: String },
    PreviewFormat { format: String },
    LintFormat { format: String },
}

impl Operation {
    pub const LIST_COLLECTIONS: &'static str = "list-collections";
    pub const EXPORT_VARIABLES: &'static str = "export-variables";
    pub const EXPORT_BREAKPOINTS: &'static str = "export-breakpoints";
    pub const EXPORT_TEXT_STYLES: &'static str = "export-text-styles";
    pub const TYPOGRAPHY_MIXINS: &'static str = "typography-mixins";
    pub const PREVIEW_FORMAT: &'static str = "preview-format";
    pub const LINT_FORMAT: &'static str = "lint-format";

    pub fn tag(&self) -> &'static str {
        match self {
            Operation::ListCollections => Self::LIST_COLLECTIONS,
            Operation::ExportVariables { .. } => Self::EXPORT_VARIABLES,
            Operation::ExportBreakpoints { .. } => Self::EXPORT_BREAKPOINTS,
            Operation::ExportTextStyles { .. } => Self::EXPORT_TEXT_STYLES,
            Operation::TypographyMixins { .. } => Self::TYPOGRAPHY_MIXINS,
            Operation::PreviewFormat { .. } => Self::PREVIEW_FORMAT,
            Operation::LintFormat { .. } => Self::LINT_FORMAT,
        }
    }
}

impl TryFrom<Request> for Operation {
    type Error = SnippetError;

    fn try_from(request: Request) -> Result<Self, Self::Error> {
        let Request {
            operation,
            format,
            collection_id,
            node_id,
        } = request;

        let need = |value: Option<String>, parameter: &'static str| {
            value.ok_or_else(|| SnippetError::missing(operation.as_str(), parameter))
        };

        Ok(match operation.as_str() {
            Self::LIST_COLLECTIONS => Operation::ListCollections,
            Self::EXPORT_VARIABLES => Operation::ExportVariables {
                format: need(format, "format")?,
                collection_id: need(collection_id, "collectionId")?,
            },
            Self::EXPORT_BREAKPOINTS => Operation::ExportBreakpoints {
                format: need(format, "format")?,
                collection_id: need(collection_id, "collectionId")?,
            },
            Self::EXPORT_TEXT_STYLES => Operation::ExportTextStyles {
                format: need(format, "format")?,
            },
            Self::TYPOGRAPHY_MIXINS => Operation::TypographyMixins {
                node_id: need(node_id, "nodeId")?,
            },
            Self::PREVIEW_FORMAT => Operation::PreviewFormat {
                format: need(format, "format")?,
            },
            Self::LINT_FORMAT => Operation::LintFormat {
                format: need(format, "format")?,
            },
            _ => return Err(SnippetError::UnknownOperation(operation)),
        })
    }
}

/// Run one request. Failures become `error` responses; an operation may
/// answer with several responses (its result followed by per-entry errors).
pub async fn dispatch<S: DocumentSource>(
    request: Request,
    fetcher: &Fetcher<S>,
    config: &Config,
) -> Vec<Response> {
    let operation = match Operation::try_from(request) {
        Ok(op) => op,
        Err(e) => return vec![Response::error(e.to_string())],
    };
    info!(operation = operation.tag(), "dispatching");

    match run(operation, fetcher, config).await {
        Ok(responses) => responses,
        Err(e) => vec![Response::error(e.to_string())],
    }
}

/// Parse a JSON request and run it
pub async fn dispatch_json<S: DocumentSource>(
    message: &str,
    fetcher: &Fetcher<S>,
    config: &Config,
) -> Vec<Response> {
    match serde_json::from_str::<Request>(message) {
        Ok(request) => dispatch(request, fetcher, config).await,
        Err(e) => vec![Response::error(SnippetError::from(e).to_string())],
    }
}

async fn run<S: DocumentSource>(
    operation: Operation,
    fetcher: &Fetcher<S>,
    config: &Config,
) -> Result<Vec<Response>, SnippetError> {
    match operation {
        Operation::ListCollections => list_collections(fetcher).await.map(|r| vec![r]),
        Operation::ExportVariables {
            format,
            collection_id,
        } => export_variables(fetcher, config, &format, &collection_id).await,
        Operation::ExportBreakpoints {
            format,
            collection_id,
        } => export_breakpoints(fetcher, config, &format, &collection_id).await,
        Operation::ExportTextStyles { format } => {
            export_text_styles(fetcher, config, &format).await.map(|r| vec![r])
        }
        Operation::TypographyMixins { node_id } => {
            typography_mixins(fetcher, config, &node_id).await.map(|r| vec![r])
        }
        Operation::PreviewFormat { format } => Ok(vec![Response::text(
            ResponseKind::Preview,
            compile(&format).render_html(&config.output.class_prefix),
        )]),
        Operation::LintFormat { format } => Ok(vec![lint_format(&format)]),
    }
}

async fn list_collections<S: DocumentSource>(
    fetcher: &Fetcher<S>,
) -> Result<Response, SnippetError> {
    let collections = fetcher.collections().await?;
    Ok(Response::collections(
        collections
            .into_iter()
            .map(|c| CollectionSummary {
                name: c.name,
                id: c.id,
            })
            .collect(),
    ))
}

/// Render the template once per map, in order, for the configured output mode
fn render_snippets(format: &str, maps: &[ResolvedValueMap], output: &OutputOptions) -> String {
    let template = compile(format);
    for warning in lint::unresolved(&template, maps) {
        warn!(%warning, "placeholder left in output");
    }
    let rendered: Vec<String> = match output.mode {
        OutputMode::Plain => {
            let plain = template.render_plain();
            maps.iter().map(|m| substitute(&plain, m)).collect()
        }
        OutputMode::Html => maps
            .iter()
            .map(|m| template.render_html_with(m, &output.class_prefix))
            .collect(),
    };
    rendered.join(&output.separator)
}

async fn load_collection<S: DocumentSource>(
    fetcher: &Fetcher<S>,
    collection_id: &str,
) -> Result<Option<Collection>, SnippetError> {
    let collection = fetcher.collection(collection_id).await?;
    if collection.is_none() {
        warn!(collection = collection_id, "collection not found, nothing to export");
    }
    Ok(collection)
}

/// Fetch the collection's variables concurrently, keeping declaration order
async fn load_entries<S: DocumentSource>(
    fetcher: &Fetcher<S>,
    collection: &Collection,
) -> Vec<Variable> {
    let fetched = join_all(collection.variable_ids.iter().map(|id| fetcher.variable(id))).await;
    collection
        .variable_ids
        .iter()
        .zip(fetched)
        .filter_map(|(id, result)| match result {
            Ok(Some(variable)) => Some(variable),
            Ok(None) => {
                debug!(variable = %id, "variable not found, skipped");
                None
            }
            Err(e) => {
                warn!(variable = %id, error = %e, "variable unreachable, skipped");
                None
            }
        })
        .collect()
}

/// Resolve every entry of a collection concurrently.
///
/// Results keep entry order; entries whose alias chains fail are returned
/// separately.
async fn resolve_collection<S: DocumentSource>(
    fetcher: &Fetcher<S>,
    config: &Config,
    collection: &Collection,
) -> (Vec<(Variable, ResolvedValueMap)>, Vec<ResolveError>) {
    let entries = load_entries(fetcher, collection).await;
    let resolver = Resolver::new(fetcher, &config.resolve);
    let results = join_all(
        entries
            .iter()
            .map(|entry| resolver.resolve_entry(entry, &collection.modes)),
    )
    .await;

    let mut resolved = Vec::new();
    let mut failures = Vec::new();
    for (entry, result) in entries.into_iter().zip(results) {
        match result {
            Ok(map) => resolved.push((entry, map)),
            Err(e) => {
                warn!(error = %e, "entry aborted");
                failures.push(e);
            }
        }
    }
    (resolved, failures)
}

fn with_failures(response: Response, failures: Vec<ResolveError>) -> Vec<Response> {
    std::iter::once(response)
        .chain(failures.into_iter().map(|e| Response::error(e.to_string())))
        .collect()
}

async fn export_variables<S: DocumentSource>(
    fetcher: &Fetcher<S>,
    config: &Config,
    format: &str,
    collection_id: &str,
) -> Result<Vec<Response>, SnippetError> {
    let Some(collection) = load_collection(fetcher, collection_id).await? else {
        return Ok(vec![Response::text(ResponseKind::Snippets, "")]);
    };

    let (resolved, failures) = resolve_collection(fetcher, config, &collection).await;
    let maps: Vec<ResolvedValueMap> = resolved.into_iter().map(|(_, map)| map).collect();
    let output = render_snippets(format, &maps, &config.output);

    Ok(with_failures(
        Response::text(ResponseKind::Snippets, output),
        failures,
    ))
}

async fn export_breakpoints<S: DocumentSource>(
    fetcher: &Fetcher<S>,
    config: &Config,
    format: &str,
    collection_id: &str,
) -> Result<Vec<Response>, SnippetError> {
    let Some(collection) = load_collection(fetcher, collection_id).await? else {
        return Ok(vec![Response::text(ResponseKind::Snippets, "")]);
    };

    let [first, second] = collection.modes.as_slice() else {
        return Err(SnippetError::Unsupported(format!(
            "breakpoint export needs exactly two modes, collection '{}' has {}",
            collection.name,
            collection.modes.len()
        )));
    };
    let (first, second) = (first.name.clone(), second.name.clone());

    let (resolved, failures) = resolve_collection(fetcher, config, &collection).await;
    let maps: Vec<ResolvedValueMap> = resolved
        .into_iter()
        .filter_map(|(entry, map)| {
            let split = match (map.get(&first), map.get(&second)) {
                (Some(a), Some(b)) => Breakpoints::split(a, b),
                _ => None,
            };
            let Some(split) = split else {
                debug!(entry = %entry.name, "no numeric value pair, skipped");
                return None;
            };

            let mut out = ResolvedValueMap::new();
            if let Some(name) = map.get(NAME_PLACEHOLDER) {
                out.insert(NAME_PLACEHOLDER.to_string(), name.clone());
            }
            out.insert(MOBILE_PLACEHOLDER.to_string(), split.mobile);
            if let Some(desktop) = split.desktop {
                out.insert(DESKTOP_PLACEHOLDER.to_string(), desktop);
            }
            Some(out)
        })
        .collect();

    let output = render_snippets(format, &maps, &config.output);
    Ok(with_failures(
        Response::text(ResponseKind::Snippets, output),
        failures,
    ))
}

/// Placeholder values for one text style
pub fn text_style_values(style: &TextStyle) -> ResolvedValueMap {
    [
        (NAME_PLACEHOLDER, to_identifier(&style.name)),
        ("fontFamily", style.font_name.family.clone()),
        ("fontStyle", style.font_name.style.clone()),
        ("fontSize", style.font_size.to_string()),
        ("lineHeight", style.line_height.to_string()),
        ("letterSpacing", style.letter_spacing.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

async fn export_text_styles<S: DocumentSource>(
    fetcher: &Fetcher<S>,
    config: &Config,
    format: &str,
) -> Result<Response, SnippetError> {
    let styles = fetcher.text_styles().await?;
    let maps: Vec<ResolvedValueMap> = styles.iter().map(text_style_values).collect();
    Ok(Response::text(
        ResponseKind::Snippets,
        render_snippets(format, &maps, &config.output),
    ))
}

async fn typography_mixins<S: DocumentSource>(
    fetcher: &Fetcher<S>,
    config: &Config,
    node_id: &str,
) -> Result<Response, SnippetError> {
    let Some(node) = fetcher.node(node_id).await? else {
        warn!(node = node_id, "node not found, nothing to export");
        return Ok(Response::text(ResponseKind::Snippets, ""));
    };
    let data = typography::extract(&node, &config.typography.styles_frame);
    let mixins = typography::to_mixins(&data);
    Ok(Response::text(
        ResponseKind::Snippets,
        typography::render_sass(&mixins),
    ))
}

fn lint_format(format: &str) -> Response {
    let report = lint::check(format)
        .iter()
        .map(|w| w.report(format, "format"))
        .collect::<Vec<_>>()
        .join("\n");
    Response::text(ResponseKind::Lint, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_from_request() {
        let op = Operation::try_from(
            Request::new("export-variables")
                .with_format("${name}")
                .with_collection("c"),
        )
        .unwrap();
        assert_eq!(
            op,
            Operation::ExportVariables {
                format: "${name}".into(),
                collection_id: "c".into()
            }
        );
        assert_eq!(op.tag(), "export-variables");
    }

    #[test]
    fn test_unknown_operation() {
        let err = Operation::try_from(Request::new("create-shapes")).unwrap_err();
        assert!(matches!(err, SnippetError::UnknownOperation(tag) if tag == "create-shapes"));
    }

    #[test]
    fn test_missing_parameter() {
        let err = Operation::try_from(Request::new("export-variables").with_format("x")).unwrap_err();
        assert!(matches!(
            err,
            SnippetError::MissingParameter { parameter: "collectionId", .. }
        ));
    }

    #[test]
    fn test_every_tag_round_trips() {
        let request = |tag: &str| {
            Request::new(tag)
                .with_format("f")
                .with_collection("c")
                .with_node("n")
        };
        for tag in [
            Operation::LIST_COLLECTIONS,
            Operation::EXPORT_VARIABLES,
            Operation::EXPORT_BREAKPOINTS,
            Operation::EXPORT_TEXT_STYLES,
            Operation::TYPOGRAPHY_MIXINS,
            Operation::PREVIEW_FORMAT,
            Operation::LINT_FORMAT,
        ] {
            assert_eq!(Operation::try_from(request(tag)).unwrap().tag(), tag);
        }
    }

    fn values(pairs: &[(&str, &str)]) -> ResolvedValueMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_snippets_modes() {
        let maps = [values(&[("v", "1")]), values(&[("v", "<2>")])];

        let plain = OutputOptions::default();
        assert_eq!(
            render_snippets("a {\n\\tb: ${v}\n}", &maps, &plain),
            "a {\n\tb: 1\n}\n\na {\n\tb: <2>\n}"
        );

        let html = OutputOptions {
            mode: OutputMode::Html,
            class_prefix: String::new(),
            separator: "\n".to_string(),
        };
        assert_eq!(
            render_snippets("${v}", &maps, &html),
            "<div class=\"line only indent-0\">1</div>\n\
             <div class=\"line only indent-0\">&lt;2&gt;</div>"
        );
    }
}
