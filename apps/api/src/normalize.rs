//! Normalization of AI-extracted resume JSON into the canonical document.
//!
//! Provider output is untrusted: it is parsed into an intermediate shape
//! where every field is optional, shape-checked, and only then promoted to
//! [`ResumeDocument`]. A reply that fails here is treated exactly like a
//! provider failure — the fallback chain moves on.

use serde::Deserialize;

use crate::models::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument,
};

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("reply JSON does not look like a resume (no personalInfo or skills key)")]
    NotAResume,
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Validate a provider's structured-extraction reply and promote it to the
/// canonical document. Ids are positional (index-as-string, encounter order),
/// so identical input always yields identical ids. No date, email, or content
/// plausibility checks happen here — fields pass through verbatim.
pub fn normalize(raw_provider_text: &str) -> Result<ResumeDocument, NormalizeError> {
    let text = strip_json_fences(raw_provider_text);
    let value: serde_json::Value = serde_json::from_str(text)?;

    // Minimum-viable-shape check before deserializing the full structure
    let looks_like_resume = value
        .as_object()
        .is_some_and(|o| o.contains_key("personalInfo") || o.contains_key("skills"));
    if !looks_like_resume {
        return Err(NormalizeError::NotAResume);
    }

    let raw: RawResume = serde_json::from_value(value)?;

    Ok(ResumeDocument {
        personal_info: PersonalInfo {
            full_name: raw.personal_info.full_name,
            email: raw.personal_info.email,
            phone: raw.personal_info.phone,
            location: raw.personal_info.location,
            title: raw.personal_info.title,
            website: raw.personal_info.website,
            linkedin: raw.personal_info.linkedin,
            photo: String::new(),
        },
        summary: raw.summary,
        experience: raw
            .experience
            .into_iter()
            .enumerate()
            .map(|(i, e)| ExperienceEntry {
                id: i.to_string(),
                company: e.company,
                position: e.position,
                start_date: e.start_date,
                end_date: e.end_date,
                description: e.description,
            })
            .collect(),
        education: raw
            .education
            .into_iter()
            .enumerate()
            .map(|(i, e)| EducationEntry {
                id: i.to_string(),
                school: e.school,
                degree: e.degree,
                field: e.field,
                start_date: e.start_date,
                end_date: e.end_date,
            })
            .collect(),
        projects: raw
            .projects
            .into_iter()
            .enumerate()
            .map(|(i, p)| ProjectEntry {
                id: i.to_string(),
                name: p.name,
                role: p.role,
                description: p.description,
                start_date: p.start_date,
                end_date: p.end_date,
                // The extraction schema does not ask providers for a url
                url: String::new(),
            })
            .collect(),
        skills: raw.skills,
        languages: Vec::new(),
        certifications: Vec::new(),
    })
}

// Untrusted wire shapes: every field optional, defaulted to empty.

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawResume {
    personal_info: RawPersonalInfo,
    summary: String,
    experience: Vec<RawExperience>,
    education: Vec<RawEducation>,
    projects: Vec<RawProject>,
    skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawPersonalInfo {
    full_name: String,
    email: String,
    phone: String,
    location: String,
    title: String,
    website: String,
    linkedin: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawExperience {
    company: String,
    position: String,
    start_date: String,
    end_date: String,
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawEducation {
    school: String,
    degree: String,
    field: String,
    start_date: String,
    end_date: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawProject {
    name: String,
    role: String,
    description: String,
    start_date: String,
    end_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPLY: &str = r#"{
        "personalInfo": {"fullName": "Jane Doe", "email": "jane@x.io", "phone": "", "location": "Berlin", "title": "Backend Engineer", "website": "", "linkedin": ""},
        "summary": "Builds reliable services.",
        "experience": [
            {"company": "Acme", "position": "Engineer", "startDate": "2020", "endDate": "2023", "description": "Shipped."},
            {"company": "Globex", "position": "Senior Engineer", "startDate": "2023", "endDate": "", "description": ""}
        ],
        "education": [{"school": "TU Berlin", "degree": "MSc", "field": "CS", "startDate": "", "endDate": ""}],
        "projects": [{"name": "Tracker", "role": "Maintainer", "description": "CLI tool"}],
        "skills": ["Rust", "Postgres"]
    }"#;

    #[test]
    fn test_full_reply_promotes_with_positional_ids() {
        let doc = normalize(FULL_REPLY).unwrap();
        assert_eq!(doc.personal_info.full_name, "Jane Doe");
        assert_eq!(doc.experience[0].id, "0");
        assert_eq!(doc.experience[1].id, "1");
        assert_eq!(doc.education[0].id, "0");
        assert_eq!(doc.projects[0].id, "0");
        assert_eq!(doc.skills, vec!["Rust", "Postgres"]);
    }

    #[test]
    fn test_project_url_forced_empty_and_omitted_dates_default() {
        let doc = normalize(FULL_REPLY).unwrap();
        assert_eq!(doc.projects[0].url, "");
        assert_eq!(doc.projects[0].start_date, "");
        assert_eq!(doc.projects[0].end_date, "");
        assert_eq!(doc.projects[0].role, "Maintainer");
    }

    #[test]
    fn test_project_dates_pass_through_when_provided() {
        let reply = r#"{
            "personalInfo": {"fullName": "Jane Doe"},
            "projects": [{"name": "Tracker", "role": "Maintainer", "description": "CLI tool", "startDate": "Jan 2021", "endDate": "Mar 2022"}]
        }"#;
        let doc = normalize(reply).unwrap();
        assert_eq!(doc.projects[0].start_date, "Jan 2021");
        assert_eq!(doc.projects[0].end_date, "Mar 2022");
        assert_eq!(doc.projects[0].url, "");
    }

    #[test]
    fn test_normalization_is_idempotent_on_identical_input() {
        let a = normalize(FULL_REPLY).unwrap();
        let b = normalize(FULL_REPLY).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fenced_reply_is_accepted() {
        let fenced = format!("```json\n{FULL_REPLY}\n```");
        let doc = normalize(&fenced).unwrap();
        assert_eq!(doc.personal_info.full_name, "Jane Doe");
    }

    #[test]
    fn test_skills_only_reply_passes_shape_check() {
        let doc = normalize(r#"{"skills": ["Go"]}"#).unwrap();
        assert_eq!(doc.skills, vec!["Go"]);
        assert_eq!(doc.personal_info.full_name, "");
        assert!(doc.experience.is_empty());
    }

    #[test]
    fn test_json_without_resume_keys_is_rejected() {
        let err = normalize(r#"{"answer": "I could not parse that resume"}"#).unwrap_err();
        assert!(matches!(err, NormalizeError::NotAResume));
    }

    #[test]
    fn test_non_json_reply_is_rejected() {
        let err = normalize("Sure! Here is the resume you asked for:").unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidJson(_)));
    }

    #[test]
    fn test_strip_json_fences_variants() {
        assert_eq!(strip_json_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_json_fences("{\"a\":1}"), "{\"a\":1}");
    }
}
