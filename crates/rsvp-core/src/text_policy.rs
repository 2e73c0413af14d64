//! Shared text shaping and truncation policies for compact UI surfaces
//! (bookmark menus, status lines).

use crate::{bookmarks::Bookmark, content::TokenSequence};

pub const COMPACT_MAX_WORDS: usize = 7;
pub const COMPACT_MAX_CHARS: usize = 34;

pub fn preview_compact<'a, I>(words: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    preview_limited(words, COMPACT_MAX_WORDS, COMPACT_MAX_CHARS)
}

/// Join words with single spaces, stopping at `max_words` words or
/// `max_chars` characters and marking a cut with `...`.
pub fn preview_limited<'a, I>(words: I, max_words: usize, max_chars: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    let mut char_count = 0usize;
    let mut truncated = false;

    'words: for (word_count, word) in words.into_iter().enumerate() {
        if word_count >= max_words {
            truncated = true;
            break;
        }

        if word_count > 0 {
            if char_count >= max_chars {
                truncated = true;
                break;
            }
            out.push(' ');
            char_count += 1;
        }

        for ch in word.chars() {
            if char_count >= max_chars {
                truncated = true;
                break 'words;
            }
            out.push(ch);
            char_count += 1;
        }
    }

    if truncated && !out.is_empty() {
        out.truncate(out.trim_end().len());
        out.push_str("...");
    }
    out
}

/// Menu label for a bookmark: its name and the words it points at.
pub fn bookmark_label(bookmark: &Bookmark, tokens: &TokenSequence) -> String {
    let preview = preview_compact(tokens.words_from(bookmark.token_index, COMPACT_MAX_WORDS + 1));
    if preview.is_empty() {
        format!("{} (word {})", bookmark.name, bookmark.token_index)
    } else {
        format!("{}: {}", bookmark.name, preview)
    }
}

/// `m:ss`, or `h:mm:ss` from one hour up. Rounds to the nearest second.
pub fn duration_label(ms: f64) -> String {
    let total_secs = if ms.is_finite() && ms > 0.0 {
        (ms / 1_000.0).round() as u64
    } else {
        0
    };
    let (hours, minutes, seconds) = (total_secs / 3_600, (total_secs / 60) % 60, total_secs % 60);

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tokenize;

    #[test]
    fn preview_truncates_on_word_limit() {
        let words = ["uno", "dos", "tres", "cuatro"];
        assert_eq!(preview_limited(words, 2, 40), "uno dos...");
        assert_eq!(preview_limited(words, 4, 40), "uno dos tres cuatro");
    }

    #[test]
    fn preview_truncates_on_char_limit() {
        assert_eq!(preview_limited(["caballerías", "andantes"], 5, 12), "caballerías...");
        assert_eq!(preview_limited(["abcdef"], 5, 3), "abc...");
    }

    #[test]
    fn empty_preview_has_no_ellipsis() {
        assert_eq!(preview_compact(core::iter::empty()), "");
    }

    #[test]
    fn bookmark_label_previews_following_words() {
        let tokens = tokenize("En un lugar de la Mancha");
        let bookmark = Bookmark {
            name: "start".into(),
            token_index: 2,
            created_at_ms: 0,
        };
        assert_eq!(bookmark_label(&bookmark, &tokens), "start: lugar de la Mancha");

        let past_end = Bookmark {
            token_index: 99,
            ..bookmark
        };
        assert_eq!(bookmark_label(&past_end, &tokens), "start (word 99)");
    }

    #[test]
    fn duration_labels() {
        assert_eq!(duration_label(0.0), "0:00");
        assert_eq!(duration_label(61_400.0), "1:01");
        assert_eq!(duration_label(3_725_000.0), "1:02:05");
        assert_eq!(duration_label(f64::NAN), "0:00");
    }
}
