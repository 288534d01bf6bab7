//! Mobile/desktop inference from a two-mode numeric value

/// Values of an entry split into breakpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints {
    pub mobile: String,
    /// Absent when both modes carry the same value
    pub desktop: Option<String>,
}

impl Breakpoints {
    /// Split two mode values: the lesser is mobile, the greater desktop.
    ///
    /// Returns `None` unless both values are finite numbers. Declaration order
    /// of the modes does not matter.
    pub fn split(first: &str, second: &str) -> Option<Self> {
        let a = finite(first)?;
        let b = finite(second)?;

        if a == b {
            return Some(Self {
                mobile: first.to_string(),
                desktop: None,
            });
        }

        let (mobile, desktop) = if a < b { (first, second) } else { (second, first) };
        Some(Self {
            mobile: mobile.to_string(),
            desktop: Some(desktop.to_string()),
        })
    }
}

fn finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesser_is_mobile() {
        let bp = Breakpoints::split("24", "16").unwrap();
        assert_eq!(bp.mobile, "16");
        assert_eq!(bp.desktop.as_deref(), Some("24"));
    }

    #[test]
    fn test_equal_values_drop_desktop() {
        let bp = Breakpoints::split("20", "20").unwrap();
        assert_eq!(bp.mobile, "20");
        assert_eq!(bp.desktop, None);
    }

    #[test]
    fn test_numeric_equality_not_textual() {
        let bp = Breakpoints::split("20", "20.0").unwrap();
        assert_eq!(bp.desktop, None);
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(Breakpoints::split("1rem", "2rem"), None);
    }

    #[test]
    fn test_non_finite_text_is_not_numeric() {
        assert_eq!(Breakpoints::split("NaN", "NaN"), None);
        assert_eq!(Breakpoints::split("16", "inf"), None);
        assert_eq!(Breakpoints::split("-infinity", "16"), None);
    }
}
