//! Command normalization

/// A command prepared for matching.
///
/// Matching always runs on the lowercased form; the trimmed original is kept
/// so extracted parameters (task text, app names, URLs) keep their casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedCommand {
    original: String,
    normalized: String,
}

impl NormalizedCommand {
    pub fn new(raw: &str) -> Self {
        let original = raw.trim().to_string();
        let normalized = original.to_lowercase();
        Self {
            original,
            normalized,
        }
    }

    /// Lowercased, trimmed text used for all matching
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Trimmed text with the caller's casing
    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    pub fn contains(&self, phrase: &str) -> bool {
        !phrase.is_empty() && self.normalized.contains(phrase)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.normalized.starts_with(prefix)
    }
}

impl std::fmt::Display for NormalizedCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let command = NormalizedCommand::new("  Add To My To-Do List Buy Milk \n");
        assert_eq!(command.as_str(), "add to my to-do list buy milk");
        assert_eq!(command.original(), "Add To My To-Do List Buy Milk");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(NormalizedCommand::new(" \t ").is_empty());
    }

    #[test]
    fn test_empty_phrase_never_matches() {
        let command = NormalizedCommand::new("anything");
        assert!(!command.contains(""));
        assert!(!command.starts_with(""));
    }
}
