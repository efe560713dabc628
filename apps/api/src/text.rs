/// Character budget applied to document text, both when it is sent to the model and when
/// extracted PDF text is returned to the UI.
pub const MAX_INPUT_CHARS: usize = 12_000;

/// Returns at most `max` characters of `text`, cutting on a char boundary.
pub fn clip_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(clip_chars("lease", 10), "lease");
        assert_eq!(clip_chars("", 10), "");
    }

    #[test]
    fn test_clips_exactly_at_budget() {
        assert_eq!(clip_chars("abcdef", 3), "abc");
        assert_eq!(clip_chars("abc", 3), "abc");
    }

    #[test]
    fn test_multibyte_chars_not_split() {
        let clipped = clip_chars("§§§ fee €100", 5);
        assert_eq!(clipped, "§§§ f");
        assert_eq!(clipped.chars().count(), 5);
    }
}
