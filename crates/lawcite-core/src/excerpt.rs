//! Bounded, markdown-stripped previews of retrieved law text.

/// Default preview length, in characters, used by reference-preview
/// surfaces.
pub const DEFAULT_EXCERPT_LEN: usize = 300;

/// Produce a bounded preview of `content`.
///
/// Strips every literal `#`, `*`, and backtick (plain character removal,
/// not markdown parsing), then cuts at `max_len` characters with a trailing
/// `"..."`. The cut is a raw character cut with no word-boundary handling,
/// matching what existing preview callers expect. Short content comes back
/// whole, with no ellipsis.
///
/// Never fails: any content and any `max_len` are valid.
pub fn excerpt(content: &str, max_len: usize) -> String {
    if content.is_empty() {
        return String::new();
    }

    let cleaned: String = content
        .chars()
        .filter(|c| !matches!(c, '#' | '*' | '`'))
        .collect();

    if cleaned.chars().count() <= max_len {
        return cleaned;
    }
    let cut: String = cleaned.chars().take(max_len).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_content() {
        assert_eq!(excerpt("", DEFAULT_EXCERPT_LEN), "");
    }

    #[test]
    fn short_content_returned_whole() {
        let text = "Section 1. Scope and coverage of this Code.";
        assert_eq!(excerpt(text, DEFAULT_EXCERPT_LEN), text);
    }

    #[test]
    fn markdown_markers_stripped() {
        assert_eq!(
            excerpt("# Heading with **bold** and `code`", DEFAULT_EXCERPT_LEN),
            " Heading with bold and code"
        );
    }

    #[test]
    fn markers_stripped_anywhere() {
        assert_eq!(excerpt("a#b*c`d", DEFAULT_EXCERPT_LEN), "abcd");
    }

    #[test]
    fn long_content_cut_with_ellipsis() {
        assert_eq!(excerpt("0123456789abcdef", 10), "0123456789...");
    }

    #[test]
    fn cut_applies_after_stripping() {
        // The bound applies to the cleaned text, not the raw input.
        assert_eq!(excerpt("**abcdefghijkl**", 10), "abcdefghij...");
    }

    #[test]
    fn exact_boundary_keeps_no_ellipsis() {
        assert_eq!(excerpt("0123456789", 10), "0123456789");
    }

    #[test]
    fn zero_max_len() {
        assert_eq!(excerpt("abc", 0), "...");
    }

    #[test]
    fn markers_only_content_becomes_empty() {
        assert_eq!(excerpt("###***```", 10), "");
    }

    #[test]
    fn multibyte_content_cut_on_char_boundary() {
        assert_eq!(excerpt("ñññññ", 3), "ñññ...");
    }

    #[test]
    fn length_bound_holds() {
        let out = excerpt(&"x".repeat(1000), DEFAULT_EXCERPT_LEN);
        assert_eq!(out.chars().count(), DEFAULT_EXCERPT_LEN + 3);
    }
}
