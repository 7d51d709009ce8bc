//! Lowercasing tokenizer
//!
//! Splits on anything that is not alphanumeric. Used both when indexing
//! stored values and when analyzing match-query text, so both sides agree.

/// Tokenize text into lowercase alphanumeric terms
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Normalize a single term the way the tokenizer would
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_and_lowercases() {
        assert_eq!(tokenize("Hello, World! 2024"), vec!["hello", "world", "2024"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("  ,;  ").is_empty());
    }

    #[test]
    fn test_unicode_letters_kept() {
        assert_eq!(tokenize("Café-Öl"), vec!["café", "öl"]);
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term(" Rust "), "rust");
    }
}
