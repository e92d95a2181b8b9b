//! Name heuristic: the person's name is printed first on most cards.

/// Picks the name from the leading lines of the full text.
///
/// When the first line is a single word and a second line exists, the two
/// are joined, since OCR often splits first and last names across lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameHeuristic;

impl NameHeuristic {
    pub fn new() -> Self {
        Self
    }

    /// Extract the name, or `None` when the text has no non-blank line.
    pub fn extract(&self, text: &str) -> Option<String> {
        let mut lines = text.split('\n').map(str::trim).filter(|l| !l.is_empty());

        let first = lines.next()?;
        let single_word = first.split_whitespace().count() == 1;

        match lines.next() {
            Some(second) if single_word => Some(format!("{} {}", first, second)),
            _ => Some(first.to_string()),
        }
    }
}

/// Extract the name from text.
pub fn extract_name(text: &str) -> Option<String> {
    NameHeuristic::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_name_is_joined() {
        assert_eq!(
            extract_name("John\nSmith\nAcme Corp"),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_multi_word_first_line() {
        assert_eq!(
            extract_name("Jane Doe\nCEO\nAcme Corp"),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(
            extract_name("\n  \n John \n\n Smith \n"),
            Some("John Smith".to_string())
        );
    }

    #[test]
    fn test_single_line() {
        assert_eq!(extract_name("Cher"), Some("Cher".to_string()));
    }

    #[test]
    fn test_no_lines() {
        assert_eq!(extract_name(""), None);
        assert_eq!(extract_name(" \n\t\n"), None);
    }
}
