//! Form operations over `ResumeDocument`.
//!
//! Every operation takes the current snapshot by reference and returns a new one;
//! the input is never mutated. Errors leave the caller's snapshot as it was.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resume::{ResumeDocument, SectionEntry, SectionKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{section} entry {index} does not exist")]
    IndexOutOfRange { section: SectionKind, index: usize },

    #[error("project {project} has no link {link}")]
    LinkOutOfRange { project: usize, link: usize },

    #[error("{section} entries have no sub-entries")]
    SubIndexNotSupported { section: SectionKind },

    #[error("the end date of {section} entry {index} is disabled while it is ongoing")]
    FieldDisabled { section: SectionKind, index: usize },
}

impl FormError {
    /// True for errors that name something that does not exist.
    pub fn is_missing_target(&self) -> bool {
        matches!(
            self,
            FormError::IndexOutOfRange { .. } | FormError::LinkOutOfRange { .. }
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Actions
// ────────────────────────────────────────────────────────────────────────────

/// One edit submitted by the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormAction {
    SetField {
        update: FieldUpdate,
    },
    AddEntry {
        section: SectionKind,
    },
    RemoveEntry {
        section: SectionKind,
        index: usize,
        #[serde(default)]
        sub_index: Option<usize>,
    },
    AddProjectLink {
        project_index: usize,
    },
}

/// A typed field edit. Each section carries only the fields it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum FieldUpdate {
    Personal {
        field: PersonalField,
        value: String,
    },
    Experience {
        index: usize,
        change: ExperienceChange,
    },
    Education {
        index: usize,
        change: EducationChange,
    },
    Skill {
        index: usize,
        value: String,
    },
    Project {
        index: usize,
        change: ProjectChange,
    },
    ProjectLink {
        index: usize,
        link_index: usize,
        field: LinkField,
        value: String,
    },
    Certification {
        index: usize,
        change: CertificationChange,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonalField {
    FullName,
    Email,
    Phone,
    Location,
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkField {
    Url,
    Name,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ExperienceChange {
    Title(String),
    Company(String),
    StartDate(String),
    EndDate(String),
    Description(String),
    CurrentlyWorking(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum EducationChange {
    Degree(String),
    Institution(String),
    StartDate(String),
    EndDate(String),
    CurrentlyStudying(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProjectChange {
    Name(String),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum CertificationChange {
    Name(String),
    Issuer(String),
    StartDate(String),
    EndDate(String),
    Description(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Applies one action and returns the resulting snapshot.
pub fn apply_action(doc: &ResumeDocument, action: FormAction) -> Result<ResumeDocument, FormError> {
    match action {
        FormAction::SetField { update } => set_field(doc, update),
        FormAction::AddEntry { section } => Ok(add_entry(doc, section)),
        FormAction::RemoveEntry {
            section,
            index,
            sub_index,
        } => remove_entry(doc, section, index, sub_index),
        FormAction::AddProjectLink { project_index } => add_project_link(doc, project_index),
    }
}

pub fn set_field(doc: &ResumeDocument, update: FieldUpdate) -> Result<ResumeDocument, FormError> {
    let mut next = doc.clone();

    match update {
        FieldUpdate::Personal { field, value } => {
            let personal = &mut next.personal;
            let slot = match field {
                PersonalField::FullName => &mut personal.full_name,
                PersonalField::Email => &mut personal.email,
                PersonalField::Phone => &mut personal.phone,
                PersonalField::Location => &mut personal.location,
                PersonalField::Summary => &mut personal.summary,
            };
            *slot = value;
        }
        FieldUpdate::Experience { index, change } => {
            let entry = entry_mut(&mut next.experience, SectionKind::Experience, index)?;
            match change {
                ExperienceChange::Title(v) => entry.title = v,
                ExperienceChange::Company(v) => entry.company = v,
                ExperienceChange::StartDate(v) => entry.start_date = v,
                ExperienceChange::EndDate(v) => {
                    if entry.currently_working {
                        return Err(FormError::FieldDisabled {
                            section: SectionKind::Experience,
                            index,
                        });
                    }
                    entry.end_date = v;
                }
                ExperienceChange::Description(v) => entry.description = v,
                // The stored end date survives toggling.
                ExperienceChange::CurrentlyWorking(v) => entry.currently_working = v,
            }
        }
        FieldUpdate::Education { index, change } => {
            let entry = entry_mut(&mut next.education, SectionKind::Education, index)?;
            match change {
                EducationChange::Degree(v) => entry.degree = v,
                EducationChange::Institution(v) => entry.institution = v,
                EducationChange::StartDate(v) => entry.start_date = v,
                EducationChange::EndDate(v) => {
                    if entry.currently_studying {
                        return Err(FormError::FieldDisabled {
                            section: SectionKind::Education,
                            index,
                        });
                    }
                    entry.end_date = v;
                }
                EducationChange::CurrentlyStudying(v) => entry.currently_studying = v,
            }
        }
        FieldUpdate::Skill { index, value } => {
            *entry_mut(&mut next.skills, SectionKind::Skills, index)? = value;
        }
        FieldUpdate::Project { index, change } => {
            let entry = entry_mut(&mut next.projects, SectionKind::Projects, index)?;
            match change {
                ProjectChange::Name(v) => entry.name = v,
                ProjectChange::Description(v) => entry.description = v,
            }
        }
        FieldUpdate::ProjectLink {
            index,
            link_index,
            field,
            value,
        } => {
            let project = entry_mut(&mut next.projects, SectionKind::Projects, index)?;
            let link = project
                .links
                .get_mut(link_index)
                .ok_or(FormError::LinkOutOfRange {
                    project: index,
                    link: link_index,
                })?;
            match field {
                LinkField::Url => link.url = value,
                LinkField::Name => link.name = value,
            }
        }
        FieldUpdate::Certification { index, change } => {
            let entry = entry_mut(&mut next.certifications, SectionKind::Certifications, index)?;
            match change {
                CertificationChange::Name(v) => entry.name = v,
                CertificationChange::Issuer(v) => entry.issuer = v,
                CertificationChange::StartDate(v) => entry.start_date = v,
                CertificationChange::EndDate(v) => entry.end_date = v,
                CertificationChange::Description(v) => entry.description = v,
            }
        }
    }

    Ok(next)
}

pub fn add_entry(doc: &ResumeDocument, section: SectionKind) -> ResumeDocument {
    let mut next = doc.clone();
    next.push_entry(SectionEntry::blank(section));
    next
}

/// Removes an entry, or with `sub_index` on projects, one link of that project.
/// Lists are allowed to become empty.
pub fn remove_entry(
    doc: &ResumeDocument,
    section: SectionKind,
    index: usize,
    sub_index: Option<usize>,
) -> Result<ResumeDocument, FormError> {
    let mut next = doc.clone();

    match (section, sub_index) {
        (SectionKind::Projects, Some(link)) => {
            let project = entry_mut(&mut next.projects, SectionKind::Projects, index)?;
            if link >= project.links.len() {
                return Err(FormError::LinkOutOfRange {
                    project: index,
                    link,
                });
            }
            project.links.remove(link);
        }
        (_, Some(_)) => return Err(FormError::SubIndexNotSupported { section }),
        (_, None) => {
            next.remove_entry(section, index)
                .ok_or(FormError::IndexOutOfRange { section, index })?;
        }
    }

    Ok(next)
}

pub fn add_project_link(
    doc: &ResumeDocument,
    project_index: usize,
) -> Result<ResumeDocument, FormError> {
    let mut next = doc.clone();
    entry_mut(&mut next.projects, SectionKind::Projects, project_index)?
        .links
        .push(Default::default());
    Ok(next)
}

fn entry_mut<T>(list: &mut [T], section: SectionKind, index: usize) -> Result<&mut T, FormError> {
    list.get_mut(index)
        .ok_or(FormError::IndexOutOfRange { section, index })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
