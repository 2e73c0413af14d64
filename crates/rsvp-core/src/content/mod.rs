//! Display tokens and the tokenizer that produces them.

mod text_utils;
mod tokenizer;

use core::ops::Index;

pub use tokenizer::tokenize;

/// One display token.
///
/// Tokens are produced once by [`tokenize`] and only handed out by shared
/// reference from a [`TokenSequence`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub text: String,
    pub index: usize,
    pub ends_sentence: bool,
    pub ends_clause: bool,
}

impl Token {
    /// Length in characters, which is what pacing and focus work in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Ordered, read-only token list with contiguous indices `0..len`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub const fn empty() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Build a sequence from already split words, classifying boundaries the
    /// same way [`tokenize`] does. Empty strings are skipped so indices stay
    /// contiguous.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = Vec::new();
        for word in words {
            let text = word.into();
            if text.is_empty() {
                continue;
            }
            let (ends_sentence, ends_clause) = tokenizer::classify(&text);
            tokens.push(Token {
                index: tokens.len(),
                text,
                ends_sentence,
                ends_clause,
            });
        }
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    /// Last valid index, `None` for an empty sequence.
    pub fn last_index(&self) -> Option<usize> {
        self.tokens.len().checked_sub(1)
    }

    /// Texts of up to `max_words` tokens starting at `start`.
    pub fn words_from(&self, start: usize, max_words: usize) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .skip(start)
            .take(max_words)
            .map(|token| token.text.as_str())
    }
}

impl Index<usize> for TokenSequence {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = core::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
