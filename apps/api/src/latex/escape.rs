//! LaTeX escaping for user-supplied text and link targets.

/// Escapes user-supplied text for interpolation into a LaTeX body.
///
/// Single pass: braces emitted by a replacement (`\textbackslash{}`) are not
/// escaped a second time.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 8);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\textbackslash{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '<' => out.push_str("\\textless{}"),
            '>' => out.push_str("\\textgreater{}"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a URL for the first argument of `\href`.
///
/// hyperref reads the URL verbatim except for `%` and `#`; backslashes and
/// braces cannot appear in a well-formed link and are dropped.
pub fn escape_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.trim().chars() {
        match c {
            '%' | '#' => {
                out.push('\\');
                out.push(c);
            }
            '\\' | '{' | '}' => {}
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_latex("Jane Doe, Berlin"), "Jane Doe, Berlin");
    }

    #[test]
    fn test_special_characters_escaped() {
        assert_eq!(escape_latex("R&D 50% $5 #1 a_b"), "R\\&D 50\\% \\$5 \\#1 a\\_b");
        assert_eq!(escape_latex("{x}"), "\\{x\\}");
        assert_eq!(escape_latex("~^<>"), "\\textasciitilde{}\\textasciicircum{}\\textless{}\\textgreater{}");
    }

    #[test]
    fn test_backslash_braces_not_double_escaped() {
        assert_eq!(escape_latex("C:\\path"), "C:\\textbackslash{}path");
    }

    #[test]
    fn test_unicode_preserved() {
        assert_eq!(escape_latex("Zürich – 東京"), "Zürich – 東京");
    }

    #[test]
    fn test_url_escaping() {
        assert_eq!(
            escape_url(" https://example.com/a_b#frag?x=50% "),
            "https://example.com/a_b\\#frag?x=50\\%"
        );
        assert_eq!(escape_url("https://x.dev/{bad}"), "https://x.dev/bad");
    }
}
