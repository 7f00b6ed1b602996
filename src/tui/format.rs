// Text shaping helpers for the content panel
//
// The content panel tracks element row extents for visibility math, so text
// must be wrapped before rendering rather than letting the Paragraph widget
// wrap it (widget wrapping would make row counts unknowable). Width is
// measured with unicode-width so CJK and emoji don't break the layout.

use unicode_width::UnicodeWidthStr;

/// Greedy word wrap to a display width; never returns an empty Vec
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
                continue;
            }
            if current.width() + 1 + word.width() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Truncate to a display width, appending an ellipsis when cut
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let budget = width.saturating_sub(1);
    for ch in text.chars() {
        let candidate_width = out.width() + unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if candidate_width > budget {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_at_word_boundaries() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("hello", 40), vec!["hello"]);
    }

    #[test]
    fn empty_text_yields_one_empty_line() {
        assert_eq!(wrap("", 40), vec![String::new()]);
    }

    #[test]
    fn newlines_flush_paragraphs() {
        let lines = wrap("alpha\nbeta gamma", 40);
        assert_eq!(lines, vec!["alpha", "beta gamma"]);
    }

    #[test]
    fn long_word_gets_its_own_line() {
        let lines = wrap("hi extraordinarily", 6);
        assert_eq!(lines[0], "hi");
        assert_eq!(lines[1], "extraordinarily");
    }

    #[test]
    fn truncate_respects_width() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello w…");
    }
}
