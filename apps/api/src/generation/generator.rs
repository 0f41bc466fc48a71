//! Resume Generation: turns a profile into a complete LaTeX document.
//!
//! Flow: build prompt → Generator → sanitize → placeholder check → wrap.
//!
//! The model is best-effort. Any failure along the way (transport error,
//! empty reply, template filler in the reply) falls back to the deterministic
//! template, so this pipeline always produces a document.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::generation::prompts::{NO_JOB_DESCRIPTION, RESUME_PROMPT_TEMPLATE, RESUME_STRUCTURE};
use crate::latex::template::write_header;
use crate::latex::{sanitize, template_resume, wrap_document};
use crate::llm_client::prompts::REAL_DATA_INSTRUCTION;
use crate::llm_client::{GenerationOptions, Generator};
use crate::models::profile::{non_empty, Profile};

/// Strings that only show up when the model copied the prompt's examples
/// instead of using the candidate's data.
const PLACEHOLDER_MARKERS: &[&str] = &[
    "Company Name",
    "Position, Location",
    "University Name",
    "Project Name",
    "Brief description",
    "Another Company",
    "Month Year",
    "XYZ Company",
];

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Request body for resume generation. `profile` and `target_role` are
/// required; they are optional here so a missing field becomes a 400 rather
/// than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResumeRequest {
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub target_role: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeSource {
    Ai,
    Template,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResume {
    pub latex: String,
    pub source: ResumeSource,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Generates a complete resume document for `profile`.
pub async fn generate_resume(
    generator: &dyn Generator,
    options: &GenerationOptions,
    profile: &Profile,
    job_description: Option<&str>,
    target_role: &str,
) -> GeneratedResume {
    let generated =
        generate_body(generator, options, profile, job_description, target_role).await;
    let (body, source) = match generated {
        Some(body) => (body, ResumeSource::Ai),
        None => (template_resume(profile, target_role), ResumeSource::Template),
    };

    info!(
        "Generated resume for '{}' ({:?}, {} chars)",
        target_role,
        source,
        body.len()
    );

    GeneratedResume {
        latex: wrap_document(&body),
        source,
    }
}

/// The sanitized model body, or `None` when the template should be used.
async fn generate_body(
    generator: &dyn Generator,
    options: &GenerationOptions,
    profile: &Profile,
    job_description: Option<&str>,
    target_role: &str,
) -> Option<String> {
    let prompt = build_resume_prompt(profile, job_description, target_role);

    let raw = match generator.generate(&prompt, options).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("AI generation failed, falling back to template: {e}");
            return None;
        }
    };

    let body = sanitize(raw.as_str());
    if body.is_empty() {
        warn!("AI returned no usable content, falling back to template");
        return None;
    }
    if is_placeholder_content(&body) {
        warn!("AI generated placeholder content, falling back to template");
        return None;
    }

    Some(body)
}

pub fn is_placeholder_content(content: &str) -> bool {
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| content.contains(marker))
}

// ────────────────────────────────────────────────────────────────────────────
// Prompt building
// ────────────────────────────────────────────────────────────────────────────

pub fn build_resume_prompt(
    profile: &Profile,
    job_description: Option<&str>,
    target_role: &str,
) -> String {
    let job_description = job_description
        .map(str::trim)
        .filter(|jd| !jd.is_empty())
        .unwrap_or(NO_JOB_DESCRIPTION);

    let prompt = RESUME_PROMPT_TEMPLATE
        .replace("{candidate_data}", &candidate_data(profile))
        .replace("{target_role}", target_role)
        .replace("{job_description}", job_description)
        .replace("{structure}", &structure(profile, target_role));

    format!("{}\n{REAL_DATA_INSTRUCTION}", prompt.trim_end())
}

/// Section skeleton, with the real header filled in and optional sections
/// requested only when the profile has data for them.
fn structure(profile: &Profile, target_role: &str) -> String {
    let mut out = String::new();
    write_header(&mut out, profile);
    out.push_str(&RESUME_STRUCTURE.replace("{target_role}", target_role));

    for (title, items) in [
        ("Achievements", &profile.achievements),
        ("Publications", &profile.publications),
    ] {
        if !items.is_empty() {
            out.push_str(&format!("\n\n\\section*{{{title}}}\n[List {}]", title.to_lowercase()));
        }
    }
    if !profile.certifications.is_empty() {
        out.push_str("\n\n\\section*{Certifications}\n[List certifications]");
    }
    out
}

fn comma_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn numbered_list(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text dump of the profile for the model. Unescaped: the model sees
/// the user's own words and the sanitizer handles its output.
fn candidate_data(profile: &Profile) -> String {
    let mut out = String::new();

    out.push_str(&format!("Name: {}\n", profile.full_name));
    out.push_str(&format!("Email: {}\n", profile.email));
    out.push_str(&format!("Phone: {}\n", profile.phone));
    out.push_str(&format!("Location: {}\n", profile.location));
    for (label, url) in profile.links() {
        out.push_str(&format!("{label}: {url}\n"));
    }

    out.push_str(&format!("\nEXPERIENCE ({} entries):\n", profile.experience.len()));
    if profile.experience.is_empty() {
        out.push_str("No experience data provided\n");
    }
    for (i, exp) in profile.experience.iter().enumerate() {
        out.push_str(&format!("{}. {} at {}\n", i + 1, exp.position, exp.company));
        out.push_str(&format!("   Location: {}\n", exp.location));
        out.push_str(&format!("   Duration: {} - {}\n", exp.start_date, exp.end_label()));
        out.push_str("   Responsibilities:\n");
        for line in &exp.description {
            out.push_str(&format!("   - {line}\n"));
        }
        out.push_str(&format!("   Technologies: {}\n", exp.technologies.join(", ")));
    }

    out.push_str(&format!("\nEDUCATION ({} entries):\n", profile.education.len()));
    if profile.education.is_empty() {
        out.push_str("No education data provided\n");
    }
    for (i, edu) in profile.education.iter().enumerate() {
        out.push_str(&format!("{}. {} in {}\n", i + 1, edu.degree, edu.field));
        out.push_str(&format!("   Institution: {}\n", edu.institution));
        out.push_str(&format!("   Location: {}\n", edu.location));
        out.push_str(&format!("   Duration: {} - {}\n", edu.start_date, edu.end_label()));
        if let Some(gpa) = non_empty(&edu.gpa) {
            out.push_str(&format!("   GPA: {gpa}\n"));
        }
    }

    out.push_str(&format!(
        "\nTECHNICAL SKILLS ({} skills):\n{}\n",
        profile.technical_skills.len(),
        comma_list(&profile.technical_skills, "No technical skills")
    ));
    out.push_str(&format!(
        "\nSOFT SKILLS ({} skills):\n{}\n",
        profile.soft_skills.len(),
        comma_list(&profile.soft_skills, "No soft skills")
    ));

    out.push_str(&format!("\nPROJECTS ({} entries):\n", profile.projects.len()));
    if profile.projects.is_empty() {
        out.push_str("No projects data provided\n");
    }
    for (i, project) in profile.projects.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, project.name));
        out.push_str(&format!("   Description: {}\n", project.description));
        out.push_str(&format!("   Technologies: {}\n", project.technologies.join(", ")));
        match non_empty(&project.end_date) {
            Some(end) => out.push_str(&format!("   Duration: {} - {end}\n", project.start_date)),
            None => out.push_str(&format!("   Duration: {}\n", project.start_date)),
        }
        if let Some(link) = non_empty(&project.link) {
            out.push_str(&format!("   Link: {link}\n"));
        }
    }

    out.push_str(&format!("\nCERTIFICATIONS ({} entries):\n", profile.certifications.len()));
    if profile.certifications.is_empty() {
        out.push_str("No certifications\n");
    }
    for (i, cert) in profile.certifications.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, cert.name));
        out.push_str(&format!("   Issuer: {}\n", cert.issuer));
        out.push_str(&format!("   Issue Date: {}\n", cert.issue_date));
        if let Some(expiry) = non_empty(&cert.expiry_date) {
            out.push_str(&format!("   Expiry: {expiry}\n"));
        }
        if let Some(id) = non_empty(&cert.credential_id) {
            out.push_str(&format!("   ID: {id}\n"));
        }
        if let Some(link) = non_empty(&cert.link) {
            out.push_str(&format!("   Link: {link}\n"));
        }
    }

    out.push_str(&format!(
        "\nLANGUAGES ({} languages):\n{}\n",
        profile.languages.len(),
        comma_list(&profile.languages, "No languages")
    ));
    out.push_str(&format!(
        "\nACHIEVEMENTS ({} achievements):\n{}\n",
        profile.achievements.len(),
        numbered_list(&profile.achievements, "No achievements")
    ));
    out.push_str(&format!(
        "\nPUBLICATIONS ({} publications):\n{}",
        profile.publications.len(),
        numbered_list(&profile.publications, "No publications")
    ));

    out
}
