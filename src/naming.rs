//! Conversion of human-readable design names into code identifiers

/// Characters that separate words in design names
fn is_separator(c: char) -> bool {
    matches!(c, '/' | '\\' | '-') || c.is_whitespace()
}

/// Convert a name like `Primary / Button-Color` into `primaryButtonColor`.
///
/// Separators and whitespace are dropped, the character after each dropped
/// run is upper-cased, and the first character is always lower-cased.
pub fn to_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut upper_next = false;

    for c in raw.chars() {
        if is_separator(c) {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = false;
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_separators() {
        assert_eq!(to_identifier("Primary / Button-Color"), "primaryButtonColor");
    }

    #[test]
    fn test_backslash_and_tabs() {
        assert_eq!(to_identifier("Spacing\\Large\tGap"), "spacingLargeGap");
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_identifier(""), "");
    }

    #[test]
    fn test_only_separators() {
        assert_eq!(to_identifier(" / - "), "");
    }

    #[test]
    fn test_leading_separator_still_lowercases_first() {
        assert_eq!(to_identifier("/heading"), "heading");
        assert_eq!(to_identifier("-Heading 1"), "heading1");
    }

    #[test]
    fn test_existing_camel_case_kept() {
        assert_eq!(to_identifier("fontSize"), "fontSize");
    }

    #[test]
    fn test_output_has_no_separators() {
        for raw in ["a b/c\\d-e", "  X  ", "Über / öl"] {
            let id = to_identifier(raw);
            assert!(!id.chars().any(is_separator), "{id}");
            if let Some(first) = id.chars().next() {
                assert!(!first.is_uppercase(), "{id}");
            }
        }
    }
}
