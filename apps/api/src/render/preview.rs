//! HTML preview of the resume, built from the same section plan as the PDF.

use html_escape::{encode_double_quoted_attribute_to_string, encode_text_to_string};

use crate::render::sections::{BlockLine, DocumentPlan};

const PREVIEW_STYLE: &str = "body{margin:0;background:#fff;color:#000}\
.resume{max-width:48rem;margin:0 auto;padding:2rem;font-family:'Times New Roman',Times,serif}\
.resume h2{text-align:center;margin:0 0 .5rem}\
.resume .contact{text-align:center;margin:0 0 1rem}\
.resume h3{text-transform:uppercase;margin:1rem 0 .5rem}\
.resume h4{margin:0}\
.resume .entry{margin-bottom:1rem}\
.resume .subtitle{font-weight:600;margin:0}\
.resume p{white-space:pre-line;margin:.25rem 0}\
.resume a{color:#000}";

/// Renders a standalone HTML page for the plan.
///
/// The name heading and contact line are left out when empty; everything else
/// mirrors the paginated output line for line. All user text is escaped.
pub fn render_preview_html(plan: &DocumentPlan) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<title>Resume Preview</title><style>");
    html.push_str(PREVIEW_STYLE);
    html.push_str("</style></head><body><article class=\"resume\">");

    if !plan.full_name.is_empty() {
        push_element(&mut html, "<h2>", &plan.full_name, "</h2>");
    }
    if !plan.contact_line.is_empty() {
        push_element(&mut html, "<p class=\"contact\">", &plan.contact_line, "</p>");
    }

    for section in &plan.sections {
        html.push_str("<section>");
        push_element(&mut html, "<h3>", section.id.title(), "</h3>");
        for entry in &section.entries {
            html.push_str("<div class=\"entry\">");
            let mut links_open = false;
            for line in &entry.lines {
                if links_open && !matches!(line, BlockLine::Link { .. }) {
                    html.push_str("</ul>");
                    links_open = false;
                }
                match line {
                    BlockLine::Title { text } => push_element(&mut html, "<h4>", text, "</h4>"),
                    BlockLine::Subtitle { text } => {
                        push_element(&mut html, "<p class=\"subtitle\">", text, "</p>")
                    }
                    BlockLine::Paragraph { text } => push_element(&mut html, "<p>", text, "</p>"),
                    BlockLine::Link { label, url } => {
                        if !links_open {
                            html.push_str("<ul>");
                            links_open = true;
                        }
                        html.push_str("<li><a href=\"");
                        encode_double_quoted_attribute_to_string(url, &mut html);
                        html.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                        encode_text_to_string(label, &mut html);
                        html.push_str("</a></li>");
                    }
                }
            }
            if links_open {
                html.push_str("</ul>");
            }
            html.push_str("</div>");
        }
        html.push_str("</section>");
    }

    html.push_str("</article></body></html>");
    html
}

/// Appends `open`, the escaped `text`, then `close`.
fn push_element(html: &mut String, open: &str, text: &str, close: &str) {
    html.push_str(open);
    encode_text_to_string(text, html);
    html.push_str(close);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{ProjectEntry, ProjectLink, ResumeDocument};
    use crate::render::sections::plan_document;

    #[test]
    fn test_blank_document_preview_has_no_sections() {
        let html = render_preview_html(&plan_document(&ResumeDocument::new()));
        assert!(!html.contains("<section>"));
        assert!(!html.contains("<h2>"));
        assert!(html.contains("<article class=\"resume\">"));
    }

    #[test]
    fn test_preview_escapes_user_text() {
        let mut doc = ResumeDocument::new();
        doc.personal.full_name = "<script>alert(1)</script>".to_string();
        doc.personal.summary = "Fish & chips".to_string();
        let html = render_preview_html(&plan_document(&doc));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Fish &amp; chips"));
        assert!(html.contains("PROFESSIONAL SUMMARY") || html.contains("Professional Summary"));
    }

    #[test]
    fn test_preview_links_open_in_new_tab() {
        let mut doc = ResumeDocument::new();
        doc.projects[0] = ProjectEntry {
            name: "Widget".to_string(),
            description: String::new(),
            links: vec![ProjectLink {
                url: "https://example.com/?a=1&b=\"2\"".to_string(),
                name: String::new(),
            }],
        };
        let html = render_preview_html(&plan_document(&doc));
        assert!(html.contains("<h3>Projects</h3>"));
        assert!(html.contains("target=\"_blank\" rel=\"noopener noreferrer\">Widget</a>"));
        assert!(html.contains("&quot;2&quot;"));
        assert!(html.contains("<ul><li>"));
        assert!(html.contains("</li></ul></div>"));
    }

    #[test]
    fn test_contact_and_link_label_are_escaped() {
        let mut doc = ResumeDocument::new();
        doc.personal.email = "a<b>@example.com".to_string();
        doc.projects[0] = ProjectEntry {
            name: "R&D".to_string(),
            description: String::new(),
            links: vec![ProjectLink {
                url: "https://example.com".to_string(),
                name: "<Demo>".to_string(),
            }],
        };
        let html = render_preview_html(&plan_document(&doc));
        assert!(html.contains("<p class=\"contact\">a&lt;b&gt;@example.com</p>"));
        assert!(html.contains("<h4>R&amp;D</h4>"));
        assert!(html.contains("rel=\"noopener noreferrer\">&lt;Demo&gt;</a></li>"));
    }
}
