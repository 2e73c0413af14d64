pub(super) fn count_words(text: &str) -> usize {
    let mut count = 0usize;
    let mut cursor = 0usize;

    while let Some((_, next_cursor)) = next_word_at(text, cursor) {
        count += 1;
        cursor = next_cursor;
    }

    count
}

/// Return the maximal non-whitespace run starting at or after `cursor` and the
/// byte offset just past it.
pub(super) fn next_word_at(text: &str, cursor: usize) -> Option<(&str, usize)> {
    let rest = text.get(cursor..)?;
    let start = cursor + rest.find(|c: char| !c.is_whitespace())?;
    let end = text[start..]
        .find(char::is_whitespace)
        .map_or(text.len(), |offset| start + offset);

    Some((&text[start..end], end))
}

/// Drop trailing closing quotes and brackets so the punctuation they wrap is
/// visible.
pub(super) fn trim_closers(word: &str) -> &str {
    word.trim_end_matches(['"', '\'', '\u{201d}', '\u{2019}', '\u{bb}', '\u{203a}', ')', ']'])
}
