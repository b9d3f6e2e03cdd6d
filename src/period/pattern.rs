use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Shape of a rolling-period label, e.g. `Oct 24 - Sep 25` or `Dic21-Nov22`:
///
/// ```text
/// label := letters [spaces] [digits] anything '-' [spaces] letters [anything]
/// ```
///
/// The two letter runs are the start and end tokens. The label must start
/// with the first letter run; the second one follows the last hyphen that is
/// itself followed by letters. Only ASCII letters form a token.
static LABEL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)\s*\d*.*-\s*([A-Za-z]+)").expect("valid label regex"));

/// The pair of month tokens that identifies one kind of rolling period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodPattern {
    pub start: String,
    pub end: String,
}

impl PeriodPattern {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Extracts the tokens from an already trimmed label.
    pub fn parse(label: &str) -> Option<Self> {
        let caps = LABEL_SHAPE.captures(label)?;
        Some(Self::new(&caps[1], &caps[2]))
    }

    /// Plain substring test on both tokens, case-sensitive. `Oct` also matches
    /// `October`.
    pub fn matches(&self, label: &str) -> bool {
        label.contains(self.start.as_str()) && label.contains(self.end.as_str())
    }
}

impl fmt::Display for PeriodPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(label: &str) -> Option<(String, String)> {
        PeriodPattern::parse(label).map(|p| (p.start, p.end))
    }

    #[test]
    fn parses_spaced_labels() {
        assert_eq!(tokens("Oct 24 - Sep 25"), Some(("Oct".into(), "Sep".into())));
        assert_eq!(tokens("Dic 23 - Nov 24"), Some(("Dic".into(), "Nov".into())));
    }

    #[test]
    fn parses_compact_labels() {
        assert_eq!(tokens("Dic21-Nov22"), Some(("Dic".into(), "Nov".into())));
        assert_eq!(tokens("Dic 20-Nov21"), Some(("Dic".into(), "Nov".into())));
    }

    #[test]
    fn digits_are_optional() {
        assert_eq!(tokens("Ene - Dic 2023"), Some(("Ene".into(), "Dic".into())));
        assert_eq!(tokens("Enero-Diciembre"), Some(("Enero".into(), "Diciembre".into())));
    }

    #[test]
    fn trailing_text_is_allowed() {
        assert_eq!(tokens("Oct 23 - Sep 24 (p)"), Some(("Oct".into(), "Sep".into())));
    }

    #[test]
    fn rejects_labels_without_the_shape() {
        assert_eq!(tokens("Total"), None);
        assert_eq!(tokens("2023-2024"), None);
        assert_eq!(tokens("Dic 23 -"), None);
        assert_eq!(tokens(""), None);
    }

    #[test]
    fn matching_is_substring_and_case_sensitive() {
        let pattern = PeriodPattern::new("Oct", "Sep");
        assert!(pattern.matches("Oct 22 - Sep 23"));
        assert!(pattern.matches("October 2022 - September 2023"));
        assert!(!pattern.matches("oct 22 - sep 23"));
        assert!(!pattern.matches("Oct 22 - Ago 23"));
    }

    #[test]
    fn displays_as_start_dash_end() {
        assert_eq!(PeriodPattern::new("Dic", "Nov").to_string(), "Dic-Nov");
    }
}
