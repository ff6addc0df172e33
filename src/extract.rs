use crate::classify::is_content;
use crate::model::{LineContext, Section};

/// First line that is not noise, in input order.
pub fn first_content_line<I, S>(lines: I, context: LineContext) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .find(|line| is_content(line.as_ref(), context))
        .map(|line| line.as_ref().to_string())
}

/// Running header text, one entry per section that has any.
///
/// Sections whose header holds only noise are skipped, so `result[i]` does
/// not necessarily belong to `sections[i]`.
pub fn header_text_per_section(sections: &[Section]) -> Vec<String> {
    sections
        .iter()
        .filter_map(|section| {
            first_content_line(
                section.header.iter().map(|p| p.text.as_str()),
                LineContext::Raw,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;
    use crate::text::strip_markup;

    #[test]
    fn empty_input_has_no_title() {
        let lines: Vec<&str> = Vec::new();
        assert_eq!(first_content_line(lines, LineContext::Raw), None);
    }

    #[test]
    fn skips_blank_and_page_numbers() {
        assert_eq!(
            first_content_line(["", "7", "Hello"], LineContext::Raw).as_deref(),
            Some("Hello")
        );
        assert_eq!(first_content_line(["", "3"], LineContext::Raw), None);
    }

    #[test]
    fn title_is_returned_untrimmed() {
        assert_eq!(
            first_content_line(["  ", "  Indented title "], LineContext::Text).as_deref(),
            Some("  Indented title ")
        );
    }

    #[test]
    fn unicode_page_numbers_are_skipped() {
        assert_eq!(
            first_content_line(["١٢", "１２", "Hello"], LineContext::Raw).as_deref(),
            Some("Hello")
        );
    }

    #[test]
    fn title_from_stripped_markdown() {
        let body = strip_markup("**Title**\n\nBody text");
        assert_eq!(body, "Title\n\nBody text");
        assert_eq!(
            first_content_line(body.lines(), LineContext::Markup).as_deref(),
            Some("Title")
        );
    }

    #[test]
    fn lone_bold_delimiter_is_skipped_in_markdown() {
        let body = strip_markup("**\n12\n**Memo**");
        assert_eq!(
            first_content_line(body.lines(), LineContext::Markup).as_deref(),
            Some("Memo")
        );
    }

    #[test]
    fn title_from_paragraphs() {
        let paragraphs = [Paragraph::new(""), Paragraph::new("1"), Paragraph::new("Agenda")];
        let title = first_content_line(paragraphs.iter().map(|p| &p.text), LineContext::Raw);
        assert_eq!(title.as_deref(), Some("Agenda"));
    }

    #[test]
    fn headers_skip_sections_without_content() {
        let sections = vec![
            Section::with_header(["2"]),
            Section::with_header(["Confidential"]),
            Section::with_header([""]),
        ];
        assert_eq!(header_text_per_section(&sections), vec!["Confidential"]);
    }

    #[test]
    fn headers_take_first_content_line_per_section() {
        let sections = vec![
            Section::with_header(["", "Acme Corp", "Internal"]),
            Section::default(),
            Section::with_header(["4", "Appendix"]),
        ];
        assert_eq!(
            header_text_per_section(&sections),
            vec!["Acme Corp", "Appendix"]
        );
    }

    #[test]
    fn headers_keep_whitespace_only_paragraph() {
        let sections = vec![Section::with_header(["   ", "Confidential"])];
        assert_eq!(header_text_per_section(&sections), vec!["   "]);
    }

    #[test]
    fn headers_keep_raw_bold_delimiter() {
        let sections = vec![Section::with_header(["**"])];
        assert_eq!(header_text_per_section(&sections), vec!["**"]);
    }
}
