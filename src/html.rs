use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Text content of the `<body>` element, or of the whole document when it has none.
///
/// Text nodes are concatenated in document order, so line breaks inside the
/// markup carry through and the result can be scanned line by line.
pub fn body_text(html: &str) -> String {
    let dom = parse_document(RcDom::default(), Default::default()).one(html);
    let root = find_body(&dom.document).unwrap_or_else(|| dom.document.clone());
    let mut out = String::new();
    collect_text(&root, &mut out);
    out
}

fn find_body(node: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &node.data {
        if name.local.to_string().eq_ignore_ascii_case("body") {
            return Some(node.clone());
        }
    }
    for child in node.children.borrow().iter() {
        if let Some(body) = find_body(child) {
            return Some(body);
        }
    }
    None
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => out.push_str(&contents.borrow()),
        NodeData::Element { name, .. } => {
            if matches!(&*name.local, "script" | "style") {
                return;
            }
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        NodeData::Document => {
            for child in node.children.borrow().iter() {
                collect_text(child, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PANDOC_HTML: &str = "<!DOCTYPE html>\n<html>\n<head>\n<title>report</title>\n\
        <style>body { margin: 0 }</style>\n</head>\n<body>\n<p>3</p>\n\
        <p><strong>Quarterly Report</strong></p>\n<p>Summary &amp; outlook</p>\n</body>\n</html>\n";

    #[test]
    fn body_text_skips_head() {
        let text = body_text(PANDOC_HTML);
        assert!(!text.contains("report\n"));
        assert!(!text.contains("margin"));
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines, vec!["3", "Quarterly Report", "Summary & outlook"]);
    }

    #[test]
    fn fragment_without_body_tag() {
        let text = body_text("<p>Only a fragment</p>");
        assert_eq!(text.trim(), "Only a fragment");
    }

    #[test]
    fn upper_case_markup_finds_body() {
        let text = body_text("<HTML><HEAD><TITLE>t</TITLE></HEAD><BODY><STYLE>p {}</STYLE><P>Hi</P></BODY></HTML>");
        assert_eq!(text.trim(), "Hi");
    }

    #[test]
    fn scripts_are_ignored() {
        let text = body_text("<body><script>var x = 1;</script><p>Hi</p></body>");
        assert_eq!(text.trim(), "Hi");
    }
}
