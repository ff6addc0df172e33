use std::sync::LazyLock;

use regex::Regex;

use crate::model::LineContext;

// `\d` is Unicode Nd, so Arabic-Indic and full-width page numbers count too.
static PAGE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

const BOLD_DELIMITER: &str = "**";

/// Decide whether a line carries content or is noise.
///
/// Noise is an empty line, a bare page number, and (for stripped markdown
/// only) a lone `**` delimiter. Raw paragraph text is checked for emptiness
/// as-is; converter output also treats whitespace-only lines as empty.
/// Title and header extraction both go through here.
pub fn is_content(line: &str, context: LineContext) -> bool {
    let trimmed = line.trim();
    let empty = match context {
        LineContext::Raw => line.is_empty(),
        LineContext::Text | LineContext::Markup => trimmed.is_empty(),
    };
    if empty || is_page_number(trimmed) {
        return false;
    }
    !(context == LineContext::Markup && trimmed == BOLD_DELIMITER)
}

fn is_page_number(trimmed: &str) -> bool {
    PAGE_NUMBER_RE.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [LineContext; 3] = [LineContext::Raw, LineContext::Text, LineContext::Markup];

    #[test]
    fn empty_and_numeric_are_noise_everywhere() {
        for ctx in ALL {
            assert!(!is_content("", ctx));
            assert!(!is_content("42", ctx));
            assert!(!is_content(" 7 ", ctx));
        }
    }

    #[test]
    fn blank_line_is_content_only_in_raw_paragraphs() {
        assert!(is_content("   ", LineContext::Raw));
        assert!(!is_content("   ", LineContext::Text));
        assert!(!is_content("   ", LineContext::Markup));
        assert!(!is_content("\t", LineContext::Markup));
    }

    #[test]
    fn text_is_content() {
        for ctx in ALL {
            assert!(is_content("Report Title", ctx));
        }
        assert!(is_content("Page 3", LineContext::Raw));
        assert!(is_content("3.1", LineContext::Raw));
        assert!(is_content("-4", LineContext::Raw));
    }

    #[test]
    fn bold_delimiter_is_noise_only_in_markup() {
        assert!(!is_content("**", LineContext::Markup));
        assert!(is_content("**", LineContext::Raw));
        assert!(is_content("**", LineContext::Text));
        assert!(is_content("***", LineContext::Markup));
    }

    #[test]
    fn non_ascii_decimal_digits_are_page_numbers() {
        for ctx in ALL {
            assert!(!is_content("١٢", ctx));
            assert!(!is_content("１２", ctx));
            assert!(!is_content("٣", ctx));
        }
    }
}
