//! Turns a `DocumentPlan` into positioned text runs on fixed-size pages.
//!
//! # Cursor model
//! A vertical cursor walks down the page in points, measured from the top edge.
//! Every emitted line is placed with its baseline at the cursor, then the cursor
//! advances by that line's fixed advance. Before each line the cursor is checked
//! against the bottom margin; once past it, a fresh page starts and the cursor
//! returns to the top margin, so long sections continue on the next page.
//! Pages are only created when a line needs one, so the last page is never blank.
//! A section title that would be the last line on its page moves to the next
//! page together with the section's first line.
//!
//! Centered header lines wider than the printable width are set at a smaller
//! size so they stay inside the margins.

use serde::Serialize;
use tracing::debug;

use crate::layout::font_metrics::{get_metrics, PageConfig, Typeface};
use crate::layout::wrap::wrap_text;
use crate::render::sections::{BlockLine, DocumentPlan};

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
}

/// One positioned line of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    /// Left edge, in points from the left page edge.
    pub x_pt: f32,
    /// Baseline, in points from the top page edge.
    pub y_pt: f32,
    pub face: Typeface,
    pub size_pt: f32,
    pub align: Align,
    /// Measured advance width of `text`.
    pub width_pt: f32,
    /// Target URL when the run is a clickable link.
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaidOutPage {
    pub runs: Vec<TextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutDocument {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub pages: Vec<LaidOutPage>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All run texts in reading order across pages.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .flat_map(|p| p.runs.iter())
            .map(|r| r.text.as_str())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct PageCursor<'a> {
    config: &'a PageConfig,
    pages: Vec<LaidOutPage>,
    y: f32,
}

impl<'a> PageCursor<'a> {
    fn new(config: &'a PageConfig) -> Self {
        PageCursor {
            config,
            pages: vec![LaidOutPage::default()],
            y: config.margin_pt,
        }
    }

    /// Starts a new page when the cursor has run past the bottom margin.
    fn ensure_room(&mut self) {
        if self.y > self.config.bottom_limit_pt() {
            self.new_page();
        }
    }

    /// Starts a new page when a line emitted now would leave no room for the
    /// line `advance_pt` below it.
    fn keep_with_next(&mut self, advance_pt: f32) {
        let page_has_runs = self.pages.last().is_some_and(|p| !p.runs.is_empty());
        if page_has_runs && self.y + advance_pt > self.config.bottom_limit_pt() {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.y = self.config.margin_pt;
    }

    fn emit(
        &mut self,
        text: &str,
        face: Typeface,
        size_pt: f32,
        align: Align,
        link: Option<&str>,
        advance_pt: f32,
    ) {
        self.ensure_room();

        let metrics = get_metrics(face);
        let mut size_pt = size_pt;
        let mut width_pt = metrics.width_pt(text, size_pt);
        let x_pt = match align {
            Align::Left => self.config.margin_pt,
            Align::Center => {
                let printable = self.config.printable_width_pt();
                if width_pt > printable {
                    size_pt *= printable / width_pt;
                    width_pt = metrics.width_pt(text, size_pt);
                }
                (self.config.page_width_pt - width_pt) / 2.0
            }
        };

        let run = TextRun {
            text: text.to_string(),
            x_pt,
            y_pt: self.y,
            face,
            size_pt,
            align,
            width_pt,
            link: link.map(str::to_string),
        };
        if let Some(page) = self.pages.last_mut() {
            page.runs.push(run);
        }
        self.y += advance_pt;
    }

    /// Moves down without drawing anything.
    fn skip(&mut self, by_pt: f32) {
        self.y += by_pt;
    }

    fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            page_width_pt: self.config.page_width_pt,
            page_height_pt: self.config.page_height_pt,
            pages: self.pages,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Lays out a plan on pages of `config`'s size.
///
/// The name and contact lines are always emitted, even when empty.
pub fn paginate(plan: &DocumentPlan, config: &PageConfig) -> LaidOutDocument {
    let mut cursor = PageCursor::new(config);
    let wrap_width = config.printable_width_pt();
    let regular = get_metrics(Typeface::Regular);

    cursor.emit(
        &plan.full_name,
        Typeface::Bold,
        config.name_size_pt,
        Align::Center,
        None,
        config.header_advance_pt,
    );
    cursor.emit(
        &plan.contact_line,
        Typeface::Regular,
        config.body_size_pt,
        Align::Center,
        None,
        config.header_advance_pt,
    );

    for section in &plan.sections {
        cursor.keep_with_next(config.section_title_advance_pt);
        cursor.emit(
            &section.id.title().to_uppercase(),
            Typeface::Bold,
            config.section_title_size_pt,
            Align::Left,
            None,
            config.section_title_advance_pt,
        );

        for entry in &section.entries {
            for line in &entry.lines {
                match line {
                    BlockLine::Title { text } => cursor.emit(
                        text,
                        Typeface::Bold,
                        config.entry_title_size_pt,
                        Align::Left,
                        None,
                        config.entry_line_advance_pt,
                    ),
                    BlockLine::Subtitle { text } => cursor.emit(
                        text,
                        Typeface::Bold,
                        config.body_size_pt,
                        Align::Left,
                        None,
                        config.entry_line_advance_pt,
                    ),
                    BlockLine::Paragraph { text } => {
                        for wrapped in wrap_text(text, regular, config.body_size_pt, wrap_width) {
                            if wrapped.is_empty() {
                                cursor.skip(config.body_line_height_pt);
                            } else {
                                cursor.emit(
                                    &wrapped,
                                    Typeface::Regular,
                                    config.body_size_pt,
                                    Align::Left,
                                    None,
                                    config.body_line_height_pt,
                                );
                            }
                        }
                    }
                    BlockLine::Link { label, url } => cursor.emit(
                        label,
                        Typeface::Regular,
                        config.body_size_pt,
                        Align::Left,
                        Some(url),
                        config.body_line_height_pt,
                    ),
                }
            }
            if entry.gap_after {
                cursor.skip(config.entry_gap_pt);
            }
        }

        cursor.skip(config.section_gap_pt);
    }

    let laid_out = cursor.finish();
    debug!(
        pages = laid_out.page_count(),
        sections = plan.sections.len(),
        "Paginated resume"
    );
    laid_out
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::default_page_config;
    use crate::models::resume::{ExperienceEntry, ProjectEntry, ProjectLink, ResumeDocument};
    use crate::render::sections::plan_document;

    fn layout(doc: &ResumeDocument) -> LaidOutDocument {
        paginate(&plan_document(doc), &default_page_config())
    }

    fn long_experience(i: usize) -> ExperienceEntry {
        ExperienceEntry {
            title: format!("Engineer {i}"),
            company: "Acme".to_string(),
            start_date: "2015-01-01".to_string(),
            end_date: "2016-01-01".to_string(),
            description: "Designed, built, and operated services that handled a large share of \
                          the company's traffic while mentoring engineers and shaping the roadmap \
                          for the platform group across several product launches."
                .to_string(),
            currently_working: false,
        }
    }

    #[test]
    fn test_blank_document_only_has_header_lines() {
        let laid_out = layout(&ResumeDocument::new());
        assert_eq!(laid_out.page_count(), 1);
        let runs = &laid_out.pages[0].runs;
        assert_eq!(runs.len(), 2, "only name and contact lines expected");
        assert_eq!(runs[0].text, "");
        assert_eq!(runs[1].text, "");
    }

    #[test]
    fn test_header_is_centered_and_bold() {
        let mut doc = ResumeDocument::new();
        doc.personal.full_name = "Jane Doe".to_string();
        let config = default_page_config();
        let laid_out = paginate(&plan_document(&doc), &config);
        let name = &laid_out.pages[0].runs[0];
        assert_eq!(name.text, "JANE DOE");
        assert_eq!(name.face, Typeface::Bold);
        assert_eq!(name.align, Align::Center);
        let center = name.x_pt + name.width_pt / 2.0;
        assert!((center - config.page_width_pt / 2.0).abs() < 1e-3);
        assert!((name.y_pt - config.margin_pt).abs() < 1e-3);
    }

    #[test]
    fn test_experience_end_to_end_lines_and_positions() {
        let mut doc = ResumeDocument::new();
        doc.experience[0] = ExperienceEntry {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "2020-01-01".to_string(),
            end_date: String::new(),
            description: "Built things.".to_string(),
            currently_working: true,
        };
        let config = default_page_config();
        let laid_out = paginate(&plan_document(&doc), &config);
        let texts: Vec<&str> = laid_out.texts().collect();
        assert_eq!(
            texts,
            vec![
                "",
                "",
                "EXPERIENCE",
                "Engineer",
                "Acme | January 2020 - Present",
                "Built things."
            ]
        );

        let runs = &laid_out.pages[0].runs;
        // margin + name + contact advances
        assert!((runs[2].y_pt - 90.0).abs() < 1e-3);
        // section title advance
        assert!((runs[3].y_pt - 110.0).abs() < 1e-3);
        assert!((runs[4].y_pt - 125.0).abs() < 1e-3);
        assert!((runs[5].y_pt - 140.0).abs() < 1e-3);
        assert_eq!(runs[3].face, Typeface::Bold);
        assert_eq!(runs[4].face, Typeface::Bold);
        assert_eq!(runs[5].face, Typeface::Regular);
    }

    #[test]
    fn test_long_document_continues_on_new_pages() {
        let mut doc = ResumeDocument::new();
        doc.personal.full_name = "Jane Doe".to_string();
        doc.experience = (0..30).map(long_experience).collect();
        let config = default_page_config();
        let laid_out = paginate(&plan_document(&doc), &config);

        assert!(laid_out.page_count() > 1, "30 entries should overflow one page");
        for page in &laid_out.pages {
            assert!(!page.runs.is_empty(), "no page may be blank");
            for run in &page.runs {
                assert!(run.y_pt >= config.margin_pt - 1e-3);
                assert!(
                    run.y_pt <= config.bottom_limit_pt() + 1e-3,
                    "run '{}' at {} is below the bottom margin",
                    run.text,
                    run.y_pt
                );
            }
        }

        // Every entry title survives in order.
        let titles: Vec<&str> = laid_out
            .texts()
            .filter(|t| t.starts_with("Engineer "))
            .collect();
        let expected: Vec<String> = (0..30).map(|i| format!("Engineer {i}")).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_new_page_restarts_at_top_margin() {
        let mut doc = ResumeDocument::new();
        doc.experience = (0..30).map(long_experience).collect();
        let config = default_page_config();
        let laid_out = paginate(&plan_document(&doc), &config);
        let first_on_second_page = &laid_out.pages[1].runs[0];
        assert!((first_on_second_page.y_pt - config.margin_pt).abs() < 1e-3);
    }

    #[test]
    fn test_links_carry_their_url() {
        let mut doc = ResumeDocument::new();
        doc.projects[0] = ProjectEntry {
            name: "Widget".to_string(),
            description: String::new(),
            links: vec![ProjectLink {
                url: "https://example.com/widget".to_string(),
                name: String::new(),
            }],
        };
        let laid_out = layout(&doc);
        let link_run = laid_out.pages[0]
            .runs
            .iter()
            .find(|r| r.link.is_some())
            .expect("link run");
        assert_eq!(link_run.text, "Widget");
        assert_eq!(link_run.link.as_deref(), Some("https://example.com/widget"));
        assert!(link_run.width_pt > 0.0);
    }

    #[test]
    fn test_long_summary_wraps_to_several_runs() {
        let mut doc = ResumeDocument::new();
        doc.personal.summary = "Reliable engineer ".repeat(40);
        let laid_out = layout(&doc);
        let body: Vec<&TextRun> = laid_out.pages[0]
            .runs
            .iter()
            .filter(|r| r.face == Typeface::Regular && !r.text.is_empty())
            .collect();
        assert!(body.len() > 1);
        let rejoined = body
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, doc.personal.summary.trim());
    }

    #[test]
    fn test_section_title_never_ends_a_page() {
        let config = default_page_config();
        for summary_lines in 30..70 {
            let mut doc = ResumeDocument::new();
            doc.personal.summary = vec!["Line"; summary_lines].join("\n");
            doc.experience[0].title = "Engineer".to_string();
            let laid_out = paginate(&plan_document(&doc), &config);

            let (last, earlier) = laid_out.pages.split_last().expect("at least one page");
            for page in earlier {
                let final_run = page.runs.last().expect("no blank pages");
                assert!(
                    final_run.size_pt != config.section_title_size_pt,
                    "'{}' ends a page with {summary_lines} summary lines",
                    final_run.text
                );
            }
            assert!(!last.runs.is_empty());

            let experience_page = laid_out
                .pages
                .iter()
                .position(|p| p.runs.iter().any(|r| r.text == "EXPERIENCE"))
                .expect("experience title");
            let engineer_page = laid_out
                .pages
                .iter()
                .position(|p| p.runs.iter().any(|r| r.text == "Engineer"))
                .expect("entry title");
            assert_eq!(experience_page, engineer_page);
        }
    }

    #[test]
    fn test_overlong_centered_name_stays_inside_margins() {
        let mut doc = ResumeDocument::new();
        doc.personal.full_name = "W".repeat(70);
        let config = default_page_config();
        let laid_out = paginate(&plan_document(&doc), &config);

        let name = &laid_out.pages[0].runs[0];
        assert!(name.size_pt < config.name_size_pt);
        assert!(name.x_pt >= config.margin_pt - 1e-3);
        assert!(name.width_pt <= config.printable_width_pt() + 1e-3);
        let center = name.x_pt + name.width_pt / 2.0;
        assert!((center - config.page_width_pt / 2.0).abs() < 1e-3);
    }
}
