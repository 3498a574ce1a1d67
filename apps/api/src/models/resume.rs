//! The resume document held by the builder session.
//!
//! Every field is a plain string; "absent" and "blank" are the same thing.
//! Whitespace-only values count as blank everywhere a record's visibility is decided.

use std::fmt;

use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub start_date: String,
    /// Kept as entered even while `currently_working` is set.
    pub end_date: String,
    pub description: String,
    pub currently_working: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub currently_studying: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLink {
    pub url: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub links: Vec<ProjectLink>,
}

impl Default for ProjectEntry {
    /// A new project starts with one empty link row.
    fn default() -> Self {
        ProjectEntry {
            name: String::new(),
            description: String::new(),
            links: vec![ProjectLink::default()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// The whole resume. List order is display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    pub personal: PersonalInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
}

impl ResumeDocument {
    /// A fresh document: blank personal fields and one placeholder entry per list.
    pub fn new() -> Self {
        ResumeDocument {
            personal: PersonalInfo::default(),
            experience: vec![ExperienceEntry::default()],
            education: vec![EducationEntry::default()],
            skills: vec![String::new()],
            projects: vec![ProjectEntry::default()],
            certifications: vec![CertificationEntry::default()],
        }
    }

    /// Number of entries currently held by a list section.
    pub fn section_len(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Experience => self.experience.len(),
            SectionKind::Education => self.education.len(),
            SectionKind::Skills => self.skills.len(),
            SectionKind::Projects => self.projects.len(),
            SectionKind::Certifications => self.certifications.len(),
        }
    }

    /// Appends an entry to the list matching its variant.
    pub fn push_entry(&mut self, entry: SectionEntry) {
        match entry {
            SectionEntry::Experience(e) => self.experience.push(e),
            SectionEntry::Education(e) => self.education.push(e),
            SectionEntry::Skill(s) => self.skills.push(s),
            SectionEntry::Project(p) => self.projects.push(p),
            SectionEntry::Certification(c) => self.certifications.push(c),
        }
    }

    /// Removes and returns the entry at `index`, or `None` when out of range.
    pub fn remove_entry(&mut self, kind: SectionKind, index: usize) -> Option<SectionEntry> {
        if index >= self.section_len(kind) {
            return None;
        }
        let removed = match kind {
            SectionKind::Experience => SectionEntry::Experience(self.experience.remove(index)),
            SectionKind::Education => SectionEntry::Education(self.education.remove(index)),
            SectionKind::Skills => SectionEntry::Skill(self.skills.remove(index)),
            SectionKind::Projects => SectionEntry::Project(self.projects.remove(index)),
            SectionKind::Certifications => {
                SectionEntry::Certification(self.certifications.remove(index))
            }
        };
        Some(removed)
    }

    /// True when nothing in the document would be rendered beyond the header.
    #[cfg(test)]
    pub fn is_blank(&self) -> bool {
        is_blank_str(&self.personal.full_name)
            && is_blank_str(&self.personal.email)
            && is_blank_str(&self.personal.phone)
            && is_blank_str(&self.personal.location)
            && is_blank_str(&self.personal.summary)
            && self.experience.iter().all(Significance::is_blank)
            && self.education.iter().all(Significance::is_blank)
            && self.skills.iter().all(|s| is_blank_str(s))
            && self.projects.iter().all(Significance::is_blank)
            && self.certifications.iter().all(Significance::is_blank)
    }
}

impl Default for ResumeDocument {
    fn default() -> Self {
        Self::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section kinds and the per-section sum type
// ────────────────────────────────────────────────────────────────────────────

/// The list-valued sections of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
}

impl SectionKind {
    #[cfg(test)]
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One record of any list section, carrying that section's own field set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entry", rename_all = "snake_case")]
pub enum SectionEntry {
    Experience(ExperienceEntry),
    Education(EducationEntry),
    Skill(String),
    Project(ProjectEntry),
    Certification(CertificationEntry),
}

impl SectionEntry {
    /// The empty-valued placeholder appended by "add entry".
    pub fn blank(kind: SectionKind) -> Self {
        match kind {
            SectionKind::Experience => SectionEntry::Experience(ExperienceEntry::default()),
            SectionKind::Education => SectionEntry::Education(EducationEntry::default()),
            SectionKind::Skills => SectionEntry::Skill(String::new()),
            SectionKind::Projects => SectionEntry::Project(ProjectEntry::default()),
            SectionKind::Certifications => {
                SectionEntry::Certification(CertificationEntry::default())
            }
        }
    }

    #[cfg(test)]
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionEntry::Experience(_) => SectionKind::Experience,
            SectionEntry::Education(_) => SectionKind::Education,
            SectionEntry::Skill(_) => SectionKind::Skills,
            SectionEntry::Project(_) => SectionKind::Projects,
            SectionEntry::Certification(_) => SectionKind::Certifications,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Significance
// ────────────────────────────────────────────────────────────────────────────

/// Decides whether a record has anything worth rendering.
pub trait Significance {
    fn is_blank(&self) -> bool;

    fn is_significant(&self) -> bool {
        !self.is_blank()
    }
}

pub fn is_blank_str(s: &str) -> bool {
    s.trim().is_empty()
}

impl Significance for ExperienceEntry {
    fn is_blank(&self) -> bool {
        is_blank_str(&self.title) && is_blank_str(&self.company) && is_blank_str(&self.description)
    }
}

impl Significance for EducationEntry {
    fn is_blank(&self) -> bool {
        is_blank_str(&self.degree) && is_blank_str(&self.institution)
    }
}

impl Significance for ProjectLink {
    /// A link without a URL is never rendered, whatever its name.
    fn is_blank(&self) -> bool {
        is_blank_str(&self.url)
    }
}

impl Significance for ProjectEntry {
    fn is_blank(&self) -> bool {
        is_blank_str(&self.name)
            && is_blank_str(&self.description)
            && self.links.iter().all(Significance::is_blank)
    }
}

impl Significance for CertificationEntry {
    fn is_blank(&self) -> bool {
        is_blank_str(&self.name) && is_blank_str(&self.issuer) && is_blank_str(&self.description)
    }
}

impl Significance for SectionEntry {
    fn is_blank(&self) -> bool {
        match self {
            SectionEntry::Experience(e) => e.is_blank(),
            SectionEntry::Education(e) => e.is_blank(),
            SectionEntry::Skill(s) => is_blank_str(s),
            SectionEntry::Project(p) => p.is_blank(),
            SectionEntry::Certification(c) => c.is_blank(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
