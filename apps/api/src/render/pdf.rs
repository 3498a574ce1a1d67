//! PDF writer for a `LaidOutDocument`, built on `lopdf`.
//!
//! Text uses the base-14 Times fonts with WinAnsi encoding, so nothing is embedded.
//! Link runs get a `/Link` annotation with a `/URI` action over the run's box.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::layout::font_metrics::Typeface;
use crate::render::paginator::{LaidOutDocument, LaidOutPage, TextRun};
use crate::render::RenderError;

/// Times ascender/descender as a fraction of the font size, for link boxes.
const ASCENT_EM: f32 = 0.683;
const DESCENT_EM: f32 = 0.217;

const PRODUCER: &str = "ResuMate";

/// Writes the laid-out pages as a complete PDF file and returns its bytes.
pub fn write_pdf(layout: &LaidOutDocument, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in [Typeface::Regular, Typeface::Bold] {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(layout.page_width_pt),
        Object::Real(layout.page_height_pt),
    ];

    let mut page_ids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = page_content(page, layout.page_height_pt);
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Content(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let annotations: Vec<Object> = page
            .runs
            .iter()
            .filter_map(|run| link_annotation(run, layout.page_height_pt))
            .map(|annot| Object::Reference(doc.add_object(annot)))
            .collect();

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => media_box.clone(),
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annotations.is_empty() {
            page_dict.set("Annots", Object::Array(annotations));
        }
        page_ids.push(Object::Reference(doc.add_object(page_dict)));
    }

    let page_count = page_ids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => literal(title),
        "Producer" => literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::Write(e.to_string()))?;
    Ok(buffer)
}

fn page_content(page: &LaidOutPage, page_height_pt: f32) -> Content {
    let mut operations = vec![Operation::new("g", vec![Object::Integer(0)])];

    for run in page.runs.iter().filter(|r| !r.text.is_empty()) {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![run.face.resource_name().into(), Object::Real(run.size_pt)],
            ),
            Operation::new(
                "Td",
                vec![
                    Object::Real(run.x_pt),
                    Object::Real(page_height_pt - run.y_pt),
                ],
            ),
            Operation::new("Tj", vec![literal(&run.text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    Content { operations }
}

fn link_annotation(run: &TextRun, page_height_pt: f32) -> Option<Dictionary> {
    let url = run.link.as_deref()?;
    let baseline = page_height_pt - run.y_pt;
    Some(dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![
            Object::Real(run.x_pt),
            Object::Real(baseline - DESCENT_EM * run.size_pt),
            Object::Real(run.x_pt + run.width_pt),
            Object::Real(baseline + ASCENT_EM * run.size_pt),
        ],
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::String(url.as_bytes().to_vec(), StringFormat::Literal),
        },
    })
}

fn literal(text: &str) -> Object {
    Object::String(encode_win_ansi(text), StringFormat::Literal)
}

/// Maps text onto WinAnsiEncoding bytes. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\t' => b' ',
            '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8A,
            '‹' => 0x8B,
            'Œ' => 0x8C,
            'Ž' => 0x8E,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9A,
            '›' => 0x9B,
            'œ' => 0x9C,
            'ž' => 0x9E,
            'Ÿ' => 0x9F,
            _ => b'?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;
    use crate::models::resume::{ExperienceEntry, ProjectEntry, ProjectLink, ResumeDocument};
    use crate::render::paginator::paginate;
    use crate::render::sections::plan_document;

    fn render(doc: &ResumeDocument) -> Document {
        let layout = paginate(&plan_document(doc), &default_page_config());
        let bytes = write_pdf(&layout, "Test Resume").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        Document::load_mem(&bytes).unwrap()
    }

    /// Collects every `Tj` string on a page, in content-stream order.
    fn page_strings(doc: &Document, page_number: u32) -> Vec<Vec<u8>> {
        let page_id = doc.get_pages()[&page_number];
        let raw = doc.get_page_content(page_id).unwrap();
        let content = Content::decode(&raw).unwrap();
        content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_experience_text_reaches_the_pdf() {
        let mut doc = ResumeDocument::new();
        doc.personal.full_name = "Jane Doe".to_string();
        doc.experience[0] = ExperienceEntry {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2020-01-01".to_string(),
            end_date: String::new(),
            description: "Built things.".to_string(),
            currently_working: true,
        };
        let pdf = render(&doc);
        assert_eq!(pdf.get_pages().len(), 1);

        let strings = page_strings(&pdf, 1);
        assert_eq!(
            strings,
            vec![
                b"JANE DOE".to_vec(),
                b"EXPERIENCE".to_vec(),
                b"Engineer".to_vec(),
                b"Acme | January 2020 - Present".to_vec(),
                b"Built things.".to_vec(),
            ]
        );
    }

    #[test]
    fn test_blank_document_is_a_single_empty_page() {
        let pdf = render(&ResumeDocument::new());
        assert_eq!(pdf.get_pages().len(), 1);
        assert!(page_strings(&pdf, 1).is_empty());
    }

    #[test]
    fn test_link_annotation_carries_uri() {
        let mut doc = ResumeDocument::new();
        doc.projects[0] = ProjectEntry {
            name: "Widget".to_string(),
            description: "A widget.".to_string(),
            links: vec![ProjectLink {
                url: "https://example.com/widget".to_string(),
                name: "Source".to_string(),
            }],
        };
        let pdf = render(&doc);
        let page_id = pdf.get_pages()[&1];
        let page = pdf.get_object(page_id).unwrap().as_dict().unwrap();
        let annots = page.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);

        let annot_id = annots[0].as_reference().unwrap();
        let annot = pdf.get_object(annot_id).unwrap().as_dict().unwrap();
        let action = annot.get(b"A").unwrap().as_dict().unwrap();
        match action.get(b"URI").unwrap() {
            Object::String(bytes, _) => assert_eq!(bytes, b"https://example.com/widget"),
            other => panic!("expected URI string, got {other:?}"),
        }
        assert!(page_strings(&pdf, 1).contains(&b"Source".to_vec()));
    }

    #[test]
    fn test_overflowing_document_has_several_pages() {
        let mut doc = ResumeDocument::new();
        doc.skills = (0..400).map(|i| format!("Skill{i}")).collect();
        doc.personal.summary = "Long summary text. ".repeat(200);
        let pdf = render(&doc);
        assert!(pdf.get_pages().len() >= 2);
        assert!(!page_strings(&pdf, 2).is_empty());
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("Acme"), b"Acme".to_vec());
        assert_eq!(encode_win_ansi("Zürich"), vec![b'Z', 0xFC, b'r', b'i', b'c', b'h']);
        assert_eq!(encode_win_ansi("a – b"), vec![b'a', b' ', 0x96, b' ', b'b']);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }
}
