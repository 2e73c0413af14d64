//! Optimal recognition point (ORP) placement.

/// Character index of the ORP within `text`.
///
/// Depends only on the character count. Always in `0..len` for non-empty
/// text; empty text yields `0`.
pub fn compute_orp_index(text: &str) -> usize {
    let len = text.chars().count();
    orp_index_for_len(len).min(len.saturating_sub(1))
}

pub fn orp_index_for_len(len: usize) -> usize {
    match len {
        0..=2 => 0,
        3..=5 => 1,
        6..=9 => 2,
        // floor(len * 0.3) without going through floats
        _ => len * 3 / 10,
    }
}

/// A word cut around its ORP character, for renderers that highlight it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FocusSplit<'a> {
    pub before: &'a str,
    pub focus: &'a str,
    pub after: &'a str,
    /// Character index of `focus` within the word.
    pub orp_index: usize,
}

/// Split `text` into the slices before, at, and after its ORP character.
pub fn split_at_orp(text: &str) -> FocusSplit<'_> {
    let orp_index = compute_orp_index(text);
    let Some((start, ch)) = text.char_indices().nth(orp_index) else {
        return FocusSplit {
            before: text,
            focus: "",
            after: "",
            orp_index,
        };
    };
    let end = start + ch.len_utf8();

    FocusSplit {
        before: &text[..start],
        focus: &text[start..end],
        after: &text[end..],
        orp_index,
    }
}
