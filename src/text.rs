/// Markup tokens pandoc leaves behind in `--wrap=none` markdown, removed in this order.
const MARKUP_TOKENS: &[&str] = &["*", "[", "]", "{.underline}"];

const BOLD_DELIMITER: &str = "**";

/// Remove bold/link/underline markup from every line of `content`.
///
/// Empty lines and lines that are exactly `**` are kept verbatim. Line order
/// and line count are preserved; `\r\n` endings and a final newline are not.
pub fn strip_markup(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.is_empty() || line == BOLD_DELIMITER {
                line.to_string()
            } else {
                strip_line(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_line(line: &str) -> String {
    let mut out = line.to_string();
    // Removing one token can splice another together ("{.un{.underline}derline}"),
    // so keep going until none is left.
    while MARKUP_TOKENS.iter().any(|t| out.contains(t)) {
        for token in MARKUP_TOKENS {
            out = out.replace(token, "");
        }
    }
    out
}

/// Replace non-breaking spaces with plain spaces, then drop every other
/// non-ASCII character.
pub fn remove_unicode(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\u{a0}' { ' ' } else { c })
        .filter(char::is_ascii)
        .collect()
}

/// Number of ASCII spaces before the first other character.
pub fn count_leading_spaces(s: &str) -> usize {
    s.len() - s.trim_start_matches(' ').len()
}

/// Number of ASCII spaces after the last other character.
pub fn count_trailing_spaces(s: &str) -> usize {
    s.len() - s.trim_end_matches(' ').len()
}
