//! Canonical structured resume — the shape every extraction path converges on.
//!
//! Both the AI extraction normalizer and the heuristic fallback parser emit
//! this document. Unknown fields are always empty strings / empty vectors,
//! never null: the frontend treats the document as fully populated.

use serde::{Deserialize, Serialize};

/// A complete resume document, serialized camelCase on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: Vec<String>,
    pub languages: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub title: String,
    pub website: String,
    pub linkedin: String,
    pub photo: String,
}

/// One work-experience entry. `id` is positional (index-as-string), assigned
/// when the document is built and stable within a single extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub id: String,
    pub name: String,
    pub role: String,
    pub url: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_serializes_camel_case() {
        let doc = ResumeDocument {
            personal_info: PersonalInfo {
                full_name: "Jane Doe".into(),
                ..Default::default()
            },
            experience: vec![ExperienceEntry {
                id: "0".into(),
                start_date: "Jan 2020".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["personalInfo"]["fullName"], "Jane Doe");
        assert_eq!(json["experience"][0]["startDate"], "Jan 2020");
        // Unset fields serialize as empty strings, never null
        assert_eq!(json["personalInfo"]["photo"], "");
        assert_eq!(json["summary"], "");
    }

    #[test]
    fn test_document_deserializes_with_missing_fields() {
        // A document missing whole sections must still produce defaults
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"personalInfo": {"fullName": "X"}}"#).unwrap();
        assert_eq!(doc.personal_info.full_name, "X");
        assert!(doc.experience.is_empty());
        assert!(doc.skills.is_empty());
        assert_eq!(doc.personal_info.email, "");
    }
}
