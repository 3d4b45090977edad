// ============================================================
// Data - Rule-Based Tokenizer
// ============================================================
// Default SentenceTokenizer implementation for raw-text ingestion.
// Sentence boundaries are terminal punctuation marks (. ! ?);
// within a sentence, whitespace separates tokens and leading/trailing
// punctuation is split off into tokens of its own, matching the
// pre-tokenized corpus format where punctuation stands alone.

use crate::domain::traits::SentenceTokenizer;

#[derive(Debug, Default)]
pub struct RuleTokenizer;

impl RuleTokenizer {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceTokenizer for RuleTokenizer {
    fn tokenize(&self, raw: &str) -> Vec<Vec<String>> {
        let mut sentences = Vec::new();
        let mut current = Vec::new();

        for word in raw.split_whitespace() {
            let terminal = split_word(word, &mut current);
            if terminal {
                sentences.push(std::mem::take(&mut current));
            }
        }

        if !current.is_empty() {
            sentences.push(current);
        }

        sentences
    }
}

/// Splits one whitespace-delimited word into tokens, separating
/// surrounding punctuation. Returns true when the word ends a
/// sentence.
fn split_word(word: &str, out: &mut Vec<String>) -> bool {
    let mut leading = Vec::new();
    let mut trailing = Vec::new();
    let mut core = word;

    while let Some(c) = core.chars().next() {
        if c.is_ascii_punctuation() && core.len() > 1 {
            leading.push(c.to_string());
            core = &core[c.len_utf8()..];
        } else {
            break;
        }
    }

    while let Some(c) = core.chars().last() {
        if c.is_ascii_punctuation() && core.len() > 1 {
            trailing.push(c.to_string());
            core = &core[..core.len() - c.len_utf8()];
        } else {
            break;
        }
    }

    out.extend(leading);
    if !core.is_empty() {
        out.push(core.to_string());
    }

    let mut terminal = false;
    for tok in trailing.into_iter().rev() {
        terminal = matches!(tok.as_str(), "." | "!" | "?");
        out.push(tok);
    }

    terminal || matches!(core, "." | "!" | "?")
}

// ─── Unit Tests ──────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_sentences_on_terminal_punctuation() {
        let sents = RuleTokenizer::new().tokenize("Cats sleep. Dogs run!");
        assert_eq!(sents.len(), 2);
        assert_eq!(sents[0], vec!["Cats", "sleep", "."]);
        assert_eq!(sents[1], vec!["Dogs", "run", "!"]);
    }

    #[test]
    fn test_separates_punctuation_tokens() {
        let sents = RuleTokenizer::new().tokenize("Well, \"hello\" there.");
        assert_eq!(
            sents[0],
            vec!["Well", ",", "\"", "hello", "\"", "there", "."]
        );
    }

    #[test]
    fn test_unterminated_text_yields_final_sentence() {
        let sents = RuleTokenizer::new().tokenize("no terminal mark here");
        assert_eq!(sents.len(), 1);
        assert_eq!(sents[0].len(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(RuleTokenizer::new().tokenize("").is_empty());
    }
}
