use super::{
    Token, TokenSequence,
    text_utils::{count_words, next_word_at, trim_closers},
};

const SENTENCE_MARKS: [char; 3] = ['.', '!', '?'];
const CLAUSE_MARKS: [char; 4] = [',', ';', ':', '\u{2014}'];

/// Split raw text into display tokens.
///
/// Every maximal run of non-whitespace characters becomes one token, with its
/// punctuation kept. Pure: the same input always yields the same sequence, and
/// empty or all-whitespace input yields an empty one.
pub fn tokenize(raw_text: &str) -> TokenSequence {
    let mut tokens = Vec::with_capacity(count_words(raw_text));
    let mut cursor = 0usize;

    while let Some((word, next_cursor)) = next_word_at(raw_text, cursor) {
        cursor = next_cursor;
        let (ends_sentence, ends_clause) = classify(word);
        tokens.push(Token {
            text: word.into(),
            index: tokens.len(),
            ends_sentence,
            ends_clause,
        });
    }

    TokenSequence { tokens }
}

/// Boundary flags for one word as `(ends_sentence, ends_clause)`.
///
/// Sentence punctuation may be wrapped by closing quotes or brackets. The two
/// flags are never both set.
pub(super) fn classify(word: &str) -> (bool, bool) {
    let unwrapped = trim_closers(word);
    let ends_sentence = unwrapped.ends_with(SENTENCE_MARKS);
    let ends_clause = !ends_sentence && (word.ends_with(')') || unwrapped.ends_with(CLAUSE_MARKS));
    (ends_sentence, ends_clause)
}
