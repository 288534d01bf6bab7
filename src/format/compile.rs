//! Format string compilation into line-tagged templates

use std::fmt::Write as _;

use super::lexer::{tokenize, Token};
use super::substitute::{substitute, Values};

const TAB_MARKER: &str = r"\t";

/// Position of a line within its template, used for caller-side styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    /// The template has a single line
    Only,
    First,
    Middle,
    Last,
}

impl LineTag {
    fn for_index(index: usize, count: usize) -> Self {
        match (index == 0, index + 1 == count) {
            (true, true) => LineTag::Only,
            (true, false) => LineTag::First,
            (false, true) => LineTag::Last,
            (false, false) => LineTag::Middle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineTag::Only => "only",
            LineTag::First => "first",
            LineTag::Middle => "middle",
            LineTag::Last => "last",
        }
    }

    pub fn is_first(self) -> bool {
        matches!(self, LineTag::Only | LineTag::First)
    }

    pub fn is_last(self) -> bool {
        matches!(self, LineTag::Only | LineTag::Last)
    }
}

/// One line of a compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Placeholder-bearing content with escape markers removed
    pub text: String,
    /// Number of leading `\t` markers
    pub indent_depth: usize,
    pub tag: LineTag,
}

/// A format string split into tagged, indented lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatTemplate {
    pub lines: Vec<Line>,
}

/// Compile a raw format string.
///
/// Never fails: empty or markerless input yields a single line of depth 0.
pub fn compile(raw: &str) -> FormatTemplate {
    let raw_lines: Vec<&str> = raw.split('\n').collect();
    let count = raw_lines.len();

    let lines = raw_lines
        .into_iter()
        .enumerate()
        .map(|(index, raw_line)| {
            let raw_line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            let (indent_depth, rest) = strip_indent(raw_line);
            Line {
                text: strip_markers(rest),
                indent_depth,
                tag: LineTag::for_index(index, count),
            }
        })
        .collect();

    FormatTemplate { lines }
}

fn strip_indent(line: &str) -> (usize, &str) {
    let mut depth = 0;
    let mut rest = line;
    while let Some(stripped) = rest.strip_prefix(TAB_MARKER) {
        depth += 1;
        rest = stripped;
    }
    (depth, rest)
}

fn strip_markers(line: &str) -> String {
    tokenize(line)
        .into_iter()
        .filter(|(tok, _)| !tok.is_marker())
        .map(|(_, span)| &line[span])
        .collect()
}

impl FormatTemplate {
    /// Render as raw snippet text: one real tab per indent level
    pub fn render_plain(&self) -> String {
        self.lines
            .iter()
            .map(|line| format!("{}{}", "\t".repeat(line.indent_depth), line.text))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as HTML lines for a preview surface.
    ///
    /// Every line becomes a `div` carrying its position and indent depth as
    /// CSS classes. Text is escaped; placeholders pass through untouched.
    pub fn render_html(&self, class_prefix: &str) -> String {
        self.html_lines(class_prefix, escape_html)
    }

    /// Render as HTML lines with placeholders filled in.
    ///
    /// Values are substituted before escaping, so markup inside a value is
    /// shown as text.
    pub fn render_html_with<V: Values + ?Sized>(&self, values: &V, class_prefix: &str) -> String {
        self.html_lines(class_prefix, |text| escape_html(&substitute(text, values)))
    }

    fn html_lines(&self, class_prefix: &str, content: impl Fn(&str) -> String) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            let _ = write!(
                out,
                r#"<div class="{p}line {p}{tag} {p}indent-{depth}">{text}</div>"#,
                p = class_prefix,
                tag = line.tag.as_str(),
                depth = line.indent_depth,
                text = content(&line.text),
            );
        }
        out
    }

    /// Names of every placeholder in the template, in order of appearance
    pub fn placeholders(&self) -> Vec<&str> {
        self.lines
            .iter()
            .flat_map(|line| {
                tokenize(&line.text)
                    .into_iter()
                    .filter(|(tok, _)| *tok == Token::Placeholder)
                    .map(move |(_, span)| super::lexer::placeholder_name(&line.text[span]))
            })
            .collect()
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_count_and_tags() {
        let tpl = compile("a\nb\nc");
        assert_eq!(tpl.lines.len(), 3);
        assert!(tpl.lines[0].tag.is_first());
        assert_eq!(tpl.lines[1].tag, LineTag::Middle);
        assert!(tpl.lines[2].tag.is_last());
    }

    #[test]
    fn test_empty_input() {
        let tpl = compile("");
        assert_eq!(tpl.lines.len(), 1);
        assert_eq!(tpl.lines[0].text, "");
        assert_eq!(tpl.lines[0].indent_depth, 0);
        assert_eq!(tpl.lines[0].tag, LineTag::Only);
    }

    #[test]
    fn test_leading_tab_markers_set_depth() {
        let tpl = compile("@mixin ${name} {\n\\t\\tfont-size: ${Mobile};\n}");
        assert_eq!(tpl.lines[1].indent_depth, 2);
        assert_eq!(tpl.lines[1].text, "font-size: ${Mobile};");
    }

    #[test]
    fn test_embedded_markers_are_stripped() {
        let tpl = compile(r"\tgap:\t${Mobile};\n");
        assert_eq!(tpl.lines.len(), 1);
        assert_eq!(tpl.lines[0].indent_depth, 1);
        assert_eq!(tpl.lines[0].text, "gap:${Mobile};");
    }

    #[test]
    fn test_real_tabs_do_not_count() {
        let tpl = compile("\tx");
        assert_eq!(tpl.lines[0].indent_depth, 0);
        assert_eq!(tpl.lines[0].text, "\tx");
    }

    #[test]
    fn test_carriage_return_dropped() {
        let tpl = compile("a\r\nb");
        assert_eq!(tpl.lines[0].text, "a");
    }

    #[test]
    fn test_render_plain() {
        let tpl = compile("a {\n\\tb;\n}");
        assert_eq!(tpl.render_plain(), "a {\n\tb;\n}");
    }

    #[test]
    fn test_render_html_escapes_text() {
        let tpl = compile("a < b");
        assert_eq!(
            tpl.render_html(""),
            r#"<div class="line only indent-0">a &lt; b</div>"#
        );
    }

    #[test]
    fn test_render_html_with_escapes_values() {
        let tpl = compile("v: ${v}\n\\t${w}");
        let values: &[(&str, &str)] = &[("v", "a</div><b>")];
        assert_eq!(
            tpl.render_html_with(values, ""),
            "<div class=\"line first indent-0\">v: a&lt;/div&gt;&lt;b&gt;</div>\n\
             <div class=\"line last indent-1\">${w}</div>"
        );
    }

    #[test]
    fn test_placeholders_in_order() {
        let tpl = compile("${name}: ${Mobile}\n${Desktop}");
        assert_eq!(tpl.placeholders(), vec!["name", "Mobile", "Desktop"]);
    }
}
