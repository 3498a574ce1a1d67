//! Section plan: which sections and records appear, in what order, with which lines.
//!
//! Both the HTML preview and the paginated PDF walk the same `DocumentPlan`,
//! so a section or line can never appear in one output and not the other.

use serde::Serialize;

use crate::models::resume::{
    is_blank_str, CertificationEntry, EducationEntry, ExperienceEntry, PersonalInfo,
    ProjectEntry, ProjectLink, ResumeDocument, Significance,
};
use crate::render::dates::date_range;

pub const FIELD_SEPARATOR: &str = " | ";
pub const SKILL_SEPARATOR: &str = ", ";

// ────────────────────────────────────────────────────────────────────────────
// Plan types
// ────────────────────────────────────────────────────────────────────────────

/// Rendered sections, in their fixed display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionId {
    pub const ORDER: [SectionId; 6] = [
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Certifications,
    ];

    /// Heading text before upper-casing.
    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Summary => "Professional Summary",
            SectionId::Experience => "Experience",
            SectionId::Education => "Education",
            SectionId::Skills => "Skills",
            SectionId::Projects => "Projects",
            SectionId::Certifications => "Certifications",
        }
    }
}

/// One line of an entry, tagged with the role that decides its styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum BlockLine {
    /// Bold entry heading (title, degree, project or certification name).
    Title { text: String },
    /// Bold organisation and date-range line.
    Subtitle { text: String },
    /// Regular free text, wrapped to the printable width.
    Paragraph { text: String },
    /// Clickable project link.
    Link { label: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryBlock {
    pub lines: Vec<BlockLine>,
    /// Whether the entry is followed by the per-entry gap.
    pub gap_after: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionPlan {
    pub id: SectionId,
    pub entries: Vec<EntryBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentPlan {
    /// Already upper-cased.
    pub full_name: String,
    pub contact_line: String,
    pub sections: Vec<SectionPlan>,
}

// ────────────────────────────────────────────────────────────────────────────
// Planning
// ────────────────────────────────────────────────────────────────────────────

/// Builds the plan for a document snapshot. Sections without a significant
/// record are left out; blank records inside a kept section are skipped.
pub fn plan_document(doc: &ResumeDocument) -> DocumentPlan {
    let sections = SectionId::ORDER
        .iter()
        .filter_map(|id| plan_section(*id, doc))
        .collect();

    DocumentPlan {
        full_name: doc.personal.full_name.trim().to_uppercase(),
        contact_line: contact_line(&doc.personal),
        sections,
    }
}

fn plan_section(id: SectionId, doc: &ResumeDocument) -> Option<SectionPlan> {
    let entries: Vec<EntryBlock> = match id {
        SectionId::Summary => {
            if is_blank_str(&doc.personal.summary) {
                Vec::new()
            } else {
                vec![EntryBlock {
                    lines: vec![paragraph(&doc.personal.summary)],
                    gap_after: false,
                }]
            }
        }
        SectionId::Experience => significant(&doc.experience).map(experience_block).collect(),
        SectionId::Education => significant(&doc.education).map(education_block).collect(),
        SectionId::Skills => {
            let line = skills_line(&doc.skills);
            if line.is_empty() {
                Vec::new()
            } else {
                vec![EntryBlock {
                    lines: vec![BlockLine::Paragraph { text: line }],
                    gap_after: false,
                }]
            }
        }
        SectionId::Projects => significant(&doc.projects).map(project_block).collect(),
        SectionId::Certifications => significant(&doc.certifications)
            .map(certification_block)
            .collect(),
    };

    if entries.is_empty() {
        None
    } else {
        Some(SectionPlan { id, entries })
    }
}

fn significant<T: Significance>(records: &[T]) -> impl Iterator<Item = &T> {
    records.iter().filter(|r| r.is_significant())
}

fn experience_block(exp: &ExperienceEntry) -> EntryBlock {
    let mut lines = Vec::new();
    push_title(&mut lines, &exp.title);
    push_subtitle(
        &mut lines,
        &exp.company,
        date_range(&exp.start_date, &exp.end_date, exp.currently_working),
    );
    push_paragraph(&mut lines, &exp.description);
    EntryBlock {
        lines,
        gap_after: true,
    }
}

fn education_block(edu: &EducationEntry) -> EntryBlock {
    let mut lines = Vec::new();
    push_title(&mut lines, &edu.degree);
    push_subtitle(
        &mut lines,
        &edu.institution,
        date_range(&edu.start_date, &edu.end_date, edu.currently_studying),
    );
    EntryBlock {
        lines,
        gap_after: false,
    }
}

fn project_block(project: &ProjectEntry) -> EntryBlock {
    let mut lines = Vec::new();
    push_title(&mut lines, &project.name);
    push_paragraph(&mut lines, &project.description);

    for (ordinal, link) in project
        .links
        .iter()
        .filter(|l| l.is_significant())
        .enumerate()
    {
        lines.push(BlockLine::Link {
            label: link_label(link, project, ordinal + 1),
            url: link.url.trim().to_string(),
        });
    }

    EntryBlock {
        lines,
        gap_after: true,
    }
}

fn certification_block(cert: &CertificationEntry) -> EntryBlock {
    let mut lines = Vec::new();
    push_title(&mut lines, &cert.name);
    // Certifications show both dates literally; they have no ongoing flag.
    push_subtitle(
        &mut lines,
        &cert.issuer,
        date_range(&cert.start_date, &cert.end_date, false),
    );
    push_paragraph(&mut lines, &cert.description);
    EntryBlock {
        lines,
        gap_after: true,
    }
}

fn push_title(lines: &mut Vec<BlockLine>, text: &str) {
    if !is_blank_str(text) {
        lines.push(BlockLine::Title {
            text: text.trim().to_string(),
        });
    }
}

fn push_subtitle(lines: &mut Vec<BlockLine>, organisation: &str, range: Option<String>) {
    let text = join_non_blank(
        [organisation.to_string(), range.unwrap_or_default()],
        FIELD_SEPARATOR,
    );
    if !text.is_empty() {
        lines.push(BlockLine::Subtitle { text });
    }
}

fn push_paragraph(lines: &mut Vec<BlockLine>, text: &str) {
    if !is_blank_str(text) {
        lines.push(paragraph(text));
    }
}

fn paragraph(text: &str) -> BlockLine {
    BlockLine::Paragraph {
        text: text.trim().to_string(),
    }
}

fn join_non_blank<I>(parts: I, separator: &str) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    parts
        .into_iter()
        .map(|p| p.as_ref().trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

// ────────────────────────────────────────────────────────────────────────────
// Line builders shared with callers
// ────────────────────────────────────────────────────────────────────────────

/// Email, phone, and location joined with `" | "`, skipping blanks.
pub fn contact_line(personal: &PersonalInfo) -> String {
    join_non_blank(
        [&personal.email, &personal.phone, &personal.location],
        FIELD_SEPARATOR,
    )
}

/// Non-blank skills joined with `", "`.
pub fn skills_line(skills: &[String]) -> String {
    join_non_blank(skills, SKILL_SEPARATOR)
}

/// Label for a project link: its own name, else the project name, else
/// `"Project Link <ordinal>"` (1-based among the project's links with a URL).
pub fn link_label(link: &ProjectLink, project: &ProjectEntry, ordinal: usize) -> String {
    if !is_blank_str(&link.name) {
        link.name.trim().to_string()
    } else if !is_blank_str(&project.name) {
        project.name.trim().to_string()
    } else {
        format!("Project Link {ordinal}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
