//! Template Renderer: résumé JSON → complete, printable HTML document.
//!
//! Section policy:
//! - Skills, Education and Experience always render a header, with a
//!   "No ... listed" fallback inside it.
//! - Certifications, Professional Summary and Projects are omitted entirely
//!   when empty.
//! - Contact lines render only for fields that are present.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::lenient::Lines;
use crate::models::resume::{
    Certification, ContactInfo, Education, Experience, Project, Resume, ResumeDocument,
};
use crate::render::html::{document, escape_html, generation_error_document};
use crate::render::RenderError;

const RESUME_STYLE: &str = r#"
    * { box-sizing: border-box; }
    body { font-family: 'Segoe UI', Arial, sans-serif; margin: 0; padding: 0; color: #333; background: #fff; line-height: 1.5; }
    .resume { max-width: 900px; margin: 0 auto; padding: 40px; }
    .resume-header { border-bottom: 3px solid #1a4b8c; padding-bottom: 16px; margin-bottom: 24px; }
    .resume-header h1 { margin: 0; font-size: 32px; color: #1a4b8c; }
    .resume-header h2 { margin: 4px 0 0; font-size: 18px; font-weight: 400; color: #555; }
    .resume-body { display: flex; gap: 32px; }
    .sidebar { flex: 0 0 30%; }
    .main { flex: 1; }
    .section { margin-bottom: 24px; }
    .section-title { font-size: 15px; text-transform: uppercase; letter-spacing: 1px; color: #1a4b8c; border-bottom: 1px solid #ddd; padding-bottom: 4px; margin: 0 0 12px; }
    .contact-line { font-size: 13px; margin-bottom: 6px; word-break: break-all; }
    .contact-icon { display: inline-block; width: 20px; }
    .skills-list { padding-left: 18px; margin: 0; font-size: 13px; }
    .entry { margin-bottom: 14px; }
    .entry-header { display: flex; justify-content: space-between; align-items: baseline; }
    .entry-title { font-weight: 600; }
    .entry-subtitle { font-style: italic; color: #555; font-size: 14px; }
    .entry-meta { color: #777; font-size: 13px; }
    .entry ul { margin: 6px 0 0; padding-left: 18px; font-size: 14px; }
    .entry p { margin: 6px 0 0; font-size: 14px; }
    .empty { color: #999; font-style: italic; font-size: 13px; }
    @media print {
        .resume { padding: 0; }
        .section { page-break-inside: avoid; }
    }
"#;

/// Renders a résumé payload as a complete HTML document.
///
/// Never fails: shape errors produce the "Resume Generation Error" page.
pub fn generate_resume_html(value: &Value) -> String {
    match try_generate(value) {
        Ok(html) => html,
        Err(e) => {
            warn!("Resume generation failed: {e}");
            generation_error_document(&e.to_string())
        }
    }
}

fn try_generate(value: &Value) -> Result<String, RenderError> {
    let unwrapped = unwrap_json_content(value)?;
    let doc = ResumeDocument::deserialize(&unwrapped)?;
    let resume = Resume::from(doc);
    debug!(
        skills = resume.skills.len(),
        education = resume.education.len(),
        experience = resume.experience.len(),
        projects = resume.projects.len(),
        "Rendering resume"
    );
    Ok(render(&resume))
}

/// Unwraps one level of `{"jsonContent": ...}`. A string payload is decoded as JSON.
fn unwrap_json_content(value: &Value) -> Result<Value, RenderError> {
    match value.get("jsonContent") {
        Some(Value::String(inner)) => {
            serde_json::from_str(inner).map_err(RenderError::JsonContent)
        }
        Some(inner) => Ok(inner.clone()),
        None => Ok(value.clone()),
    }
}

fn render(resume: &Resume) -> String {
    let name = resume.contact.name.as_deref().unwrap_or("Your Name");

    let mut sidebar = String::new();
    sidebar.push_str(&render_contact(&resume.contact));
    sidebar.push_str(&render_skills(&resume.skills));
    sidebar.push_str(&render_education(&resume.education));
    sidebar.push_str(&render_certifications(&resume.certifications));

    let mut main = String::new();
    main.push_str(&render_summary(&resume.summary_points));
    main.push_str(&render_experience(&resume.experience));
    main.push_str(&render_projects(&resume.projects));

    let body = format!(
        r#"<div class="resume">
  <header class="resume-header">
    <h1>{name}</h1>
    <h2>{title}</h2>
  </header>
  <div class="resume-body">
    <aside class="sidebar">
{sidebar}    </aside>
    <main class="main">
{main}    </main>
  </div>
</div>"#,
        name = escape_html(name),
        title = escape_html(resume.display_title()),
    );

    document(&format!("{name} - Resume"), RESUME_STYLE, &body)
}

fn section(title: &str, inner: &str) -> String {
    format!(
        "      <section class=\"section\">\n        <h3 class=\"section-title\">{title}</h3>\n{inner}      </section>\n"
    )
}

fn empty_note(text: &str) -> String {
    format!("        <p class=\"empty\">{text}</p>\n")
}

fn render_contact(contact: &ContactInfo) -> String {
    let fields = [
        ("📧", &contact.email),
        ("📱", &contact.phone),
        ("📍", &contact.location),
        ("🔗", &contact.linkedin),
        ("💻", &contact.github),
        ("🌐", &contact.portfolio),
    ];

    let lines: String = fields
        .iter()
        .filter_map(|(icon, value)| {
            value.as_deref().map(|v| {
                format!(
                    "        <div class=\"contact-line\"><span class=\"contact-icon\">{icon}</span>{}</div>\n",
                    escape_html(v)
                )
            })
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }
    section("Contact", &lines)
}

fn render_skills(skills: &[String]) -> String {
    if skills.is_empty() {
        return section("Skills", &empty_note("No skills listed"));
    }
    section("Skills", &bullet_list(skills, "        ", Some("skills-list")))
}

fn render_education(education: &[Education]) -> String {
    if education.is_empty() {
        return section("Education", &empty_note("No education listed"));
    }

    let entries: String = education
        .iter()
        .map(|edu| {
            let mut out = String::from("        <div class=\"entry\">\n");
            out.push_str(&format!(
                "          <div class=\"entry-title\">{}</div>\n",
                escape_html(edu.institution.as_deref().unwrap_or("University"))
            ));
            out.push_str(&format!(
                "          <div class=\"entry-subtitle\">{}</div>\n",
                escape_html(edu.degree.as_deref().unwrap_or("Degree"))
            ));
            if let Some(year) = &edu.year {
                out.push_str(&meta(year));
            }
            if let Some(location) = &edu.location {
                out.push_str(&meta(location));
            }
            out.push_str("        </div>\n");
            out
        })
        .collect();

    section("Education", &entries)
}

fn render_certifications(certifications: &[Certification]) -> String {
    if certifications.is_empty() {
        return String::new();
    }

    let entries: String = certifications
        .iter()
        .map(|cert| {
            let mut out = String::from("        <div class=\"entry\">\n");
            if let Some(name) = &cert.name {
                out.push_str(&format!(
                    "          <div class=\"entry-title\">{}</div>\n",
                    escape_html(name)
                ));
            }
            if let Some(issuer) = &cert.issuer {
                out.push_str(&format!(
                    "          <div class=\"entry-subtitle\">{}</div>\n",
                    escape_html(issuer)
                ));
            }
            if let Some(date) = &cert.date_received {
                out.push_str(&meta(date));
            }
            out.push_str("        </div>\n");
            out
        })
        .collect();

    section("Certifications", &entries)
}

fn render_summary(points: &[String]) -> String {
    if points.is_empty() {
        return String::new();
    }
    section(
        "Professional Summary",
        &bullet_list(points, "        ", Some("summary-list")),
    )
}

fn render_experience(experience: &[Experience]) -> String {
    if experience.is_empty() {
        return section("Experience", &empty_note("No experience listed"));
    }

    let entries: String = experience
        .iter()
        .map(|exp| {
            let mut out = String::from("        <div class=\"entry\">\n");
            out.push_str("          <div class=\"entry-header\">");
            if let Some(title) = &exp.title {
                out.push_str(&format!(
                    "<span class=\"entry-title\">{}</span>",
                    escape_html(title)
                ));
            }
            if let Some(range) = &exp.date_range {
                out.push_str(&format!(
                    "<span class=\"entry-meta\">{}</span>",
                    escape_html(range)
                ));
            }
            out.push_str("</div>\n");

            let subtitle: Vec<&str> = [exp.company.as_deref(), exp.location.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !subtitle.is_empty() {
                out.push_str(&format!(
                    "          <div class=\"entry-subtitle\">{}</div>\n",
                    escape_html(&subtitle.join(" | "))
                ));
            }

            if let Some(details) = &exp.details {
                out.push_str(&render_details(details));
            }
            out.push_str("        </div>\n");
            out
        })
        .collect();

    section("Experience", &entries)
}

fn render_projects(projects: &[Project]) -> String {
    if projects.is_empty() {
        return String::new();
    }

    let entries: String = projects
        .iter()
        .map(|project| {
            let mut out = String::from("        <div class=\"entry\">\n");
            if let Some(name) = &project.name {
                out.push_str(&format!(
                    "          <div class=\"entry-title\">{}</div>\n",
                    escape_html(name)
                ));
            }
            if let Some(tech) = &project.technologies {
                out.push_str(&meta(&format!("Technologies: {tech}")));
            }
            if let Some(details) = &project.details {
                out.push_str(&render_details(details));
            }
            out.push_str("        </div>\n");
            out
        })
        .collect();

    section("Projects", &entries)
}

/// Bullets become a `<ul>`, a single string becomes one `<p>`. Never both.
fn render_details(details: &Lines) -> String {
    match details {
        Lines::Bullets(items) => bullet_list(items, "          ", None),
        Lines::Paragraph(text) => format!("          <p>{}</p>\n", escape_html(text)),
    }
}

fn bullet_list(items: &[String], indent: &str, class: Option<&str>) -> String {
    let mut out = match class {
        Some(class) => format!("{indent}<ul class=\"{class}\">\n"),
        None => format!("{indent}<ul>\n"),
    };
    for item in items {
        out.push_str(&format!("{indent}  <li>{}</li>\n", escape_html(item)));
    }
    out.push_str(&format!("{indent}</ul>\n"));
    out
}

fn meta(text: &str) -> String {
    format!(
        "          <div class=\"entry-meta\">{}</div>\n",
        escape_html(text)
    )
}
