//! Lexer for snippet format strings using logos

use logos::Logos;
use tracing::debug;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Two-character `\t` escape marker
    #[token(r"\t")]
    TabMarker,

    /// Two-character `\n` escape marker
    #[token(r"\n")]
    NewlineMarker,

    /// A real newline character
    #[token("\n")]
    LineBreak,

    /// `${name}` placeholder; names never contain `$`, braces or backslashes
    #[regex(r"\$\{[^${}\\\n]*\}")]
    Placeholder,

    /// `${` opener not closed before the next `$`, brace, backslash or line end
    #[regex(r"\$\{[^${}\\\n]*")]
    Unterminated,

    /// A backslash that does not start an escape marker
    #[token("\\")]
    Backslash,

    /// A dollar sign that does not start a complete placeholder
    #[token("$")]
    Dollar,

    #[regex(r"[^\\$\n]+")]
    Text,
}

impl Token {
    /// Escape markers are stripped from visible text
    pub fn is_marker(self) -> bool {
        matches!(self, Token::TabMarker | Token::NewlineMarker)
    }
}

/// Name inside a placeholder slice (`${name}` -> `name`)
pub fn placeholder_name(slice: &str) -> &str {
    slice
        .strip_prefix("${")
        .and_then(|s| s.strip_suffix('}'))
        .unwrap_or(slice)
}

/// Tokenize a format string, keeping the source span of every token.
///
/// Every byte belongs to some token class. A lexer error would still be kept
/// as `Text` so that no input is lost, and is logged.
pub fn tokenize(source: &str) -> Vec<(Token, Span)> {
    Token::lexer(source)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(tok) => (tok, span),
            Err(()) => {
                debug!(?span, "unclassified format bytes kept as text");
                (Token::Text, span)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_markers_are_two_characters() {
        assert_eq!(
            kinds(r"\t\tsize"),
            vec![Token::TabMarker, Token::TabMarker, Token::Text]
        );
        assert_eq!(kinds(r"a\nb"), vec![Token::Text, Token::NewlineMarker, Token::Text]);
    }

    #[test]
    fn test_real_tab_is_text() {
        assert_eq!(kinds("\tsize"), vec![Token::Text]);
    }

    #[test]
    fn test_placeholder() {
        let tokens = tokenize("size: ${Mobile};");
        assert_eq!(tokens[1].0, Token::Placeholder);
        assert_eq!(tokens[1].1, 6..15);
        assert_eq!(placeholder_name("${Mobile}"), "Mobile");
    }

    #[test]
    fn test_unterminated_placeholder() {
        assert_eq!(kinds("${oops"), vec![Token::Unterminated]);
        assert_eq!(
            kinds("size: ${Mobile;\nnext"),
            vec![Token::Text, Token::Unterminated, Token::LineBreak, Token::Text]
        );
    }

    #[test]
    fn test_placeholder_after_unclosed_opener() {
        let tokens = tokenize("${oops ${Mobile}");
        assert_eq!(tokens[0], (Token::Unterminated, 0..7));
        assert_eq!(tokens[1], (Token::Placeholder, 7..16));
    }

    #[test]
    fn test_unclosed_opener_stops_at_marker() {
        assert_eq!(
            kinds(r"${a\tb"),
            vec![Token::Unterminated, Token::TabMarker, Token::Text]
        );
    }

    #[test]
    fn test_lone_dollar() {
        assert_eq!(kinds("$base"), vec![Token::Dollar, Token::Text]);
    }

    #[test]
    fn test_lone_backslash() {
        assert_eq!(kinds(r"a\b"), vec![Token::Text, Token::Backslash, Token::Text]);
    }

    #[test]
    fn test_line_break() {
        assert_eq!(kinds("a\nb"), vec![Token::Text, Token::LineBreak, Token::Text]);
    }
}
