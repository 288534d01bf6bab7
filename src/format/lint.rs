//! Lint checks for format strings.
//!
//! Substitution never fails: malformed or unknown placeholders are left in the
//! output. These checks explain why a placeholder survived.

use std::collections::BTreeSet;
use std::fmt;

use ariadne::{Color, Config as ReportConfig, Label, Report, ReportKind, Source};

use super::compile::FormatTemplate;
use super::lexer::{placeholder_name, tokenize, Span, Token};
use super::substitute::Values;

/// A lint warning about a format string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
    /// Location in the raw format string, when known
    pub span: Option<Span>,
}

/// Category of format defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    UnterminatedPlaceholder,
    EmptyPlaceholder,
    Unresolved,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::UnterminatedPlaceholder => write!(f, "unterminated"),
            LintCategory::EmptyPlaceholder => write!(f, "empty"),
            LintCategory::Unresolved => write!(f, "unresolved"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Syntactic checks on a raw format string.
pub fn check(format: &str) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    for (tok, span) in tokenize(format) {
        match tok {
            Token::Placeholder if placeholder_name(&format[span.clone()]).trim().is_empty() => {
                warnings.push(LintWarning {
                    category: LintCategory::EmptyPlaceholder,
                    message: "placeholder has no name".to_string(),
                    span: Some(span),
                });
            }
            Token::Unterminated => {
                warnings.push(LintWarning {
                    category: LintCategory::UnterminatedPlaceholder,
                    message: "'${' is not closed by '}' on the same line".to_string(),
                    span: Some(span.start..span.start + 2),
                });
            }
            _ => {}
        }
    }

    warnings
}

/// Placeholders of `template` that none of `maps` could supply.
pub fn unresolved<V: Values>(template: &FormatTemplate, maps: &[V]) -> Vec<LintWarning> {
    let mut seen = BTreeSet::new();
    template
        .placeholders()
        .into_iter()
        .filter(|name| seen.insert(*name))
        .filter(|name| !maps.iter().any(|m| m.lookup(name).is_some()))
        .map(|name| LintWarning {
            category: LintCategory::Unresolved,
            message: format!("no entry supplies a value for '${{{}}}'", name),
            span: None,
        })
        .collect()
}

impl LintWarning {
    /// Format the warning with source context using ariadne, without color
    pub fn report(&self, source: &str, filename: &str) -> String {
        let Some(span) = &self.span else {
            return format!("Warning: {}", self);
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Warning, filename, span.start)
            .with_config(ReportConfig::default().with_color(false))
            .with_message(self.category.to_string())
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(&self.message)
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Warning: {}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::format::compile;

    #[test]
    fn test_clean_format() {
        assert!(check("@mixin ${name} { size: ${Mobile}; }").is_empty());
    }

    #[test]
    fn test_unterminated_placeholder() {
        let warnings = check("size: ${Mobile;\nnext");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::UnterminatedPlaceholder);
        assert_eq!(warnings[0].span, Some(6..8));
    }

    #[test]
    fn test_unclosed_opener_before_valid_placeholder() {
        let warnings = check("size: ${oops ${Mobile};");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::UnterminatedPlaceholder);
        assert_eq!(warnings[0].span, Some(6..8));
    }

    #[test]
    fn test_empty_placeholder() {
        let warnings = check("${}");
        assert_eq!(warnings[0].category, LintCategory::EmptyPlaceholder);
    }

    #[test]
    fn test_lone_dollar_is_fine() {
        assert!(check("$base: 4px;").is_empty());
    }

    #[test]
    fn test_unresolved_names() {
        let tpl = compile("${name} ${Mobile} ${Tablet} ${Tablet}");
        let mut map = HashMap::new();
        map.insert("name".to_string(), "x".to_string());
        map.insert("Mobile".to_string(), "4".to_string());
        let warnings = unresolved(&tpl, &[map]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("${Tablet}"));
    }

    #[test]
    fn test_report_mentions_category() {
        let source = "a ${b";
        let warnings = check(source);
        assert_eq!(warnings.len(), 1);
        let report = warnings[0].report(source, "format");
        assert!(report.contains("unterminated"));
    }
}
