//! Résumé Document: the loosely-shaped JSON payload produced by the backend's
//! CV builder, and the canonical form the renderer templates from.
//!
//! Every field is optional. Sections arrive either as a bare list or wrapped in
//! an object (`{"skillsList": [...]}`), and some concepts have two key names.
//! Both are absorbed here so `render::template` only ever sees [`Resume`].

use serde::de::{Deserializer, Error as _};
use serde::Deserialize;
use serde_json::Value;

use crate::models::lenient::{opt_lines, opt_text, Lines, TextList};

// ────────────────────────────────────────────────────────────────────────────
// Wire shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeDocument {
    pub contact_info: Option<ContactInfo>,
    pub skills: Option<SkillsField>,
    pub education: Option<EducationField>,
    pub certifications: Option<CertificationsField>,
    pub experience: Option<ExperienceField>,
    pub projects: Option<ProjectsField>,
    pub professional_summary: Option<ProfessionalSummary>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub linkedin: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub github: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub portfolio: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub professional_title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsField {
    List(TextList),
    Wrapped {
        #[serde(rename = "skillsList", default)]
        skills_list: TextList,
    },
}

impl SkillsField {
    pub fn normalize(self) -> Vec<String> {
        match self {
            SkillsField::List(TextList(items)) => items,
            SkillsField::Wrapped { skills_list } => skills_list.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default, deserialize_with = "opt_text")]
    pub university: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub institution: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub major: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub degree: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub graduation_year: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EducationField {
    Many(Vec<EducationEntry>),
    One(#[serde(deserialize_with = "education_object")] EducationEntry),
}

/// Accepts only a JSON object; a derived struct also takes arrays positionally.
fn education_object<'de, D>(deserializer: D) -> Result<EducationEntry, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => EducationEntry::deserialize(value).map_err(D::Error::custom),
        _ => Err(D::Error::custom(
            "expected an education object or a list of them",
        )),
    }
}

impl EducationField {
    pub fn normalize(self) -> Vec<Education> {
        let entries = match self {
            EducationField::Many(entries) => entries,
            EducationField::One(entry) => vec![entry],
        };
        entries.into_iter().map(Education::from).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub date_received: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CertificationsField {
    List(Vec<Certification>),
    Wrapped {
        #[serde(rename = "certificationsList", default)]
        certifications_list: Vec<Certification>,
    },
}

impl CertificationsField {
    pub fn normalize(self) -> Vec<Certification> {
        match self {
            CertificationsField::List(items) => items,
            CertificationsField::Wrapped {
                certifications_list,
            } => certifications_list,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default, deserialize_with = "opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub date_range: Option<String>,
    #[serde(default, deserialize_with = "opt_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_lines")]
    pub achievements: Option<Lines>,
    #[serde(default, deserialize_with = "opt_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ExperienceField {
    List(Vec<ExperienceEntry>),
    Wrapped {
        #[serde(default)]
        experiences: Vec<ExperienceEntry>,
    },
}

impl ExperienceField {
    pub fn normalize(self) -> Vec<Experience> {
        let entries = match self {
            ExperienceField::List(entries) => entries,
            ExperienceField::Wrapped { experiences } => experiences,
        };
        entries.into_iter().map(Experience::from).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opt_lines")]
    pub technologies: Option<Lines>,
    #[serde(default, deserialize_with = "opt_lines")]
    pub highlights: Option<Lines>,
    #[serde(default, deserialize_with = "opt_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ProjectsField {
    List(Vec<ProjectEntry>),
    Wrapped {
        #[serde(rename = "projectsList", default)]
        projects_list: Vec<ProjectEntry>,
    },
}

impl ProjectsField {
    pub fn normalize(self) -> Vec<Project> {
        let entries = match self {
            ProjectsField::List(entries) => entries,
            ProjectsField::Wrapped { projects_list } => projects_list,
        };
        entries.into_iter().map(Project::from).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfessionalSummary {
    #[serde(default)]
    pub summary_points: TextList,
}

// ────────────────────────────────────────────────────────────────────────────
// Canonical shape
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Education {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub location: Option<String>,
}

impl From<EducationEntry> for Education {
    fn from(entry: EducationEntry) -> Self {
        Education {
            institution: entry.university.or(entry.institution),
            degree: entry.major.or(entry.degree),
            year: entry.graduation_year.or(entry.year),
            location: entry.location,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Experience {
    pub title: Option<String>,
    pub company: Option<String>,
    pub date_range: Option<String>,
    pub location: Option<String>,
    /// Bullets or a single paragraph; `description` is only used when
    /// `achievements` is absent or empty.
    pub details: Option<Lines>,
}

impl From<ExperienceEntry> for Experience {
    fn from(entry: ExperienceEntry) -> Self {
        let details = entry
            .achievements
            .and_then(Lines::non_empty)
            .or_else(|| entry.description.map(Lines::Paragraph));

        Experience {
            title: entry.title,
            company: entry.company,
            date_range: entry.date_range,
            location: entry.location,
            details,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Project {
    pub name: Option<String>,
    pub technologies: Option<String>,
    pub details: Option<Lines>,
}

impl From<ProjectEntry> for Project {
    fn from(entry: ProjectEntry) -> Self {
        let details = entry
            .highlights
            .and_then(Lines::non_empty)
            .or_else(|| entry.description.map(Lines::Paragraph));

        Project {
            name: entry.name,
            technologies: entry.technologies.and_then(Lines::joined),
            details,
        }
    }
}

/// A résumé with every section collapsed to one canonical list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resume {
    pub contact: ContactInfo,
    pub skills: Vec<String>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub summary_points: Vec<String>,
}

impl From<ResumeDocument> for Resume {
    fn from(doc: ResumeDocument) -> Self {
        Resume {
            contact: doc.contact_info.unwrap_or_default(),
            skills: doc.skills.map(SkillsField::normalize).unwrap_or_default(),
            education: doc
                .education
                .map(EducationField::normalize)
                .unwrap_or_default(),
            certifications: doc
                .certifications
                .map(CertificationsField::normalize)
                .unwrap_or_default(),
            experience: doc
                .experience
                .map(ExperienceField::normalize)
                .unwrap_or_default(),
            projects: doc
                .projects
                .map(ProjectsField::normalize)
                .unwrap_or_default(),
            summary_points: doc
                .professional_summary
                .map(|s| s.summary_points.0)
                .unwrap_or_default(),
        }
    }
}

impl Resume {
    /// `professionalTitle`, else the first experience entry's title, else "Professional".
    pub fn display_title(&self) -> &str {
        self.contact
            .professional_title
            .as_deref()
            .or_else(|| self.experience.first().and_then(|e| e.title.as_deref()))
            .unwrap_or("Professional")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn resume(value: Value) -> Resume {
        let doc: ResumeDocument = serde_json::from_value(value).unwrap();
        Resume::from(doc)
    }

    #[test]
    fn test_empty_object_is_empty_resume() {
        assert_eq!(resume(json!({})), Resume::default());
    }

    #[test]
    fn test_skills_bare_and_wrapped_normalize_identically() {
        let bare = resume(json!({ "skills": ["Rust", "SQL"] }));
        let wrapped = resume(json!({ "skills": { "skillsList": ["Rust", "SQL"] } }));
        assert_eq!(bare.skills, vec!["Rust", "SQL"]);
        assert_eq!(bare.skills, wrapped.skills);
    }

    #[test]
    fn test_wrapper_without_list_is_empty() {
        let r = resume(json!({ "skills": {}, "projects": { "other": 1 } }));
        assert!(r.skills.is_empty());
        assert!(r.projects.is_empty());
    }

    #[test]
    fn test_education_single_object_and_alternate_keys() {
        let r = resume(json!({
            "education": {
                "institution": "Cebu Institute of Technology",
                "degree": "BS Computer Science",
                "year": 2025
            }
        }));
        assert_eq!(
            r.education,
            vec![Education {
                institution: Some("Cebu Institute of Technology".to_string()),
                degree: Some("BS Computer Science".to_string()),
                year: Some("2025".to_string()),
                location: None,
            }]
        );
    }

    #[test]
    fn test_education_primary_keys_win() {
        let r = resume(json!({
            "education": [{
                "university": "UP Diliman",
                "institution": "Ignored",
                "major": "Computer Engineering",
                "degree": "Ignored",
                "graduationYear": "2024",
                "year": "1999"
            }]
        }));
        let edu = &r.education[0];
        assert_eq!(edu.institution.as_deref(), Some("UP Diliman"));
        assert_eq!(edu.degree.as_deref(), Some("Computer Engineering"));
        assert_eq!(edu.year.as_deref(), Some("2024"));
    }

    #[test]
    fn test_experience_wrapper_and_details_precedence() {
        let r = resume(json!({
            "experience": { "experiences": [
                { "title": "Intern", "achievements": ["Did X"], "description": "ignored" },
                { "title": "Dev", "achievements": [], "description": "Did stuff" }
            ]}
        }));
        assert_eq!(
            r.experience[0].details,
            Some(Lines::Bullets(vec!["Did X".to_string()]))
        );
        assert_eq!(
            r.experience[1].details,
            Some(Lines::Paragraph("Did stuff".to_string()))
        );
    }

    #[test]
    fn test_certifications_wrapped() {
        let r = resume(json!({
            "certifications": { "certificationsList": [
                { "name": "AWS Cloud Practitioner", "issuer": "Amazon", "dateReceived": "2024-05" }
            ]}
        }));
        assert_eq!(r.certifications.len(), 1);
        assert_eq!(r.certifications[0].issuer.as_deref(), Some("Amazon"));
    }

    #[test]
    fn test_project_technologies_list_is_joined() {
        let r = resume(json!({
            "projects": { "projectsList": [
                { "name": "OJT Tracker", "technologies": ["React", "Spring Boot"], "highlights": "Shipped it" }
            ]}
        }));
        let project = &r.projects[0];
        assert_eq!(project.technologies.as_deref(), Some("React, Spring Boot"));
        assert_eq!(
            project.details,
            Some(Lines::Paragraph("Shipped it".to_string()))
        );
    }

    #[test]
    fn test_display_title_fallback_chain() {
        let r = resume(json!({
            "contactInfo": { "professionalTitle": "Data Analyst" },
            "experience": [{ "title": "Backend Engineer" }]
        }));
        assert_eq!(r.display_title(), "Data Analyst");

        let r = resume(json!({ "experience": [{ "title": "Backend Engineer" }] }));
        assert_eq!(r.display_title(), "Backend Engineer");

        let r = resume(json!({ "experience": [] }));
        assert_eq!(r.display_title(), "Professional");
    }

    #[test]
    fn test_unexpected_field_type_fails() {
        let result: Result<ResumeDocument, _> =
            serde_json::from_value(json!({ "contactInfo": { "name": { "first": "Jane" } } }));
        assert!(result.is_err());

        let result: Result<ResumeDocument, _> = serde_json::from_value(json!({ "skills": 42 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_education_list_of_strings_is_rejected() {
        let result: Result<ResumeDocument, _> =
            serde_json::from_value(json!({ "education": ["BS CS", "UP"] }));
        assert!(result.is_err());

        let result: Result<ResumeDocument, _> =
            serde_json::from_value(json!({ "education": "BS CS" }));
        assert!(result.is_err());
    }
}
