// ============================================================
// Data - Static FEE Identifier
// ============================================================
// Rule-based frame-evoking-element candidate generator: every content
// word is a candidate, where "content word" means a token that is not
// punctuation, not a number, and not on the function-word skip list
// (determiners, prepositions, pronouns, conjunctions, auxiliaries).
// No training involved; the statistical alternative would plug in
// behind the same FeeIdentifier trait.

use crate::domain::traits::FeeIdentifier;

/// Closed-class words that never evoke a frame on their own.
const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "some", "any",
    "each", "every", "no", "of", "in", "on", "at", "to", "from", "by",
    "with", "without", "for", "as", "into", "onto", "over", "under",
    "about", "between", "through", "during", "after", "before", "above",
    "below", "up", "down", "out", "off", "i", "you", "he", "she", "it",
    "we", "they", "me", "him", "her", "us", "them", "my", "your", "his",
    "its", "our", "their", "mine", "yours", "hers", "ours", "theirs",
    "who", "whom", "whose", "which", "what", "and", "or", "but", "nor",
    "so", "yet", "if", "then", "else", "when", "while", "because",
    "although", "though", "than", "whether", "be", "am", "is",
    "are", "was", "were", "been", "being", "have", "has", "had",
    "having", "do", "does", "did", "will", "would", "shall", "should",
    "can", "could", "may", "might", "must", "not", "n't", "there",
];

#[derive(Debug, Default)]
pub struct StaticFeeIdentifier;

impl StaticFeeIdentifier {
    pub fn new() -> Self {
        Self
    }
}

impl FeeIdentifier for StaticFeeIdentifier {
    fn query(&self, sentence: &[String]) -> Vec<String> {
        sentence
            .iter()
            .filter(|token| is_candidate(token))
            .cloned()
            .collect()
    }
}

fn is_candidate(token: &str) -> bool {
    if !token.chars().any(char::is_alphabetic) {
        return false;
    }
    let lower = token.to_lowercase();
    !FUNCTION_WORDS.contains(&lower.as_str())
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_keeps_content_words() {
        let fee = StaticFeeIdentifier::new();
        let candidates = fee.query(&tokens("The cats sleep on the mat ."));
        assert_eq!(candidates, vec!["cats", "sleep", "mat"]);
    }

    #[test]
    fn test_skips_numbers_and_punctuation() {
        let fee = StaticFeeIdentifier::new();
        let candidates = fee.query(&tokens("He paid 42 , didn't he ?"));
        assert_eq!(candidates, vec!["paid", "didn't"]);
    }

    #[test]
    fn test_empty_sentence() {
        let fee = StaticFeeIdentifier::new();
        assert!(fee.query(&[]).is_empty());
    }
}
