//! All AI prompt constants and templates.

use serde::{Deserialize, Serialize};

/// Enhancement mode selected by the caller. Unknown values coerce to
/// `Improve` rather than failing the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhanceMode {
    #[default]
    Improve,
    Shorten,
    Expand,
    Ats,
    Regenerate,
}

impl EnhanceMode {
    pub fn from_param(value: &str) -> Self {
        match value {
            "shorten" => Self::Shorten,
            "expand" => Self::Expand,
            "ats" => Self::Ats,
            "regenerate" => Self::Regenerate,
            _ => Self::Improve,
        }
    }

    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Improve => {
                "You are a professional resume writer. Improve the grammar, clarity, and \
                 professional tone of this resume text. Keep the same facts, just make it \
                 sound more polished and impactful. Return ONLY the improved text, no \
                 explanations."
            }
            Self::Shorten => {
                "You are a professional resume writer. Shorten this resume text to be more \
                 concise and impactful. Remove unnecessary words while keeping the key \
                 achievements and metrics. Return ONLY the shortened text as bullet points \
                 starting with action verbs."
            }
            Self::Expand => {
                "You are a professional resume writer. Expand this resume text with more \
                 detail, impact metrics, and professional language. Add relevant context \
                 and accomplishments. Return ONLY the expanded text as bullet points."
            }
            Self::Ats => {
                "You are an ATS optimization expert. Rewrite this resume text to be highly \
                 ATS-friendly: use standard action verbs, quantifiable achievements, and \
                 industry-standard keywords. Return ONLY the optimized text as bullet points."
            }
            Self::Regenerate => {
                "You are a professional resume writer. Completely rewrite this resume \
                 content from a fresh angle, keeping the same job/role but using different \
                 language and structure. Return ONLY the rewritten text as bullet points \
                 starting with strong action verbs."
            }
        }
    }
}

pub fn enhance_prompt(text: &str, mode: EnhanceMode) -> String {
    format!("{}\n\nResume text:\n{}", mode.instruction(), text)
}

/// Structured-extraction prompt. The schema here is the bit-exact contract
/// the normalizer validates against.
const EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are a resume parsing engine. Extract structured data from the resume text below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "personalInfo": {
    "fullName": "",
    "email": "",
    "phone": "",
    "location": "",
    "title": "",
    "website": "",
    "linkedin": ""
  },
  "summary": "",
  "experience": [
    {"company": "", "position": "", "startDate": "", "endDate": "", "description": ""}
  ],
  "education": [
    {"school": "", "degree": "", "field": "", "startDate": "", "endDate": ""}
  ],
  "projects": [
    {"name": "", "role": "", "description": "", "startDate": "", "endDate": ""}
  ],
  "skills": ["skill1", "skill2"]
}

Rules:
- Use empty strings for anything you cannot find — never null, never omit a key.
- Keep dates exactly as written in the resume (do not reformat them).
- You MUST respond with valid JSON only. Do NOT use markdown code fences.
- Do NOT include explanations outside the JSON object.

RESUME TEXT:
{resume_text}"#;

pub fn extraction_prompt(resume_text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

const SKILL_SUGGESTION_PROMPT_TEMPLATE: &str = r#"You are a resume skills assistant. Given the partial skill input below, suggest up to 8 related professional skills a candidate might list on a resume.

Return ONLY a JSON array of short skill name strings, for example:
["Python", "Django", "REST APIs"]

Do NOT use markdown code fences. Do NOT include explanations.

INPUT:
{input}"#;

pub fn skill_suggestion_prompt(input: &str) -> String {
    SKILL_SUGGESTION_PROMPT_TEMPLATE.replace("{input}", input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_mode_coerces_to_improve() {
        assert_eq!(EnhanceMode::from_param("improve"), EnhanceMode::Improve);
        assert_eq!(EnhanceMode::from_param("ats"), EnhanceMode::Ats);
        assert_eq!(EnhanceMode::from_param("make-it-pop"), EnhanceMode::Improve);
        assert_eq!(EnhanceMode::from_param(""), EnhanceMode::Improve);
    }

    #[test]
    fn test_enhance_prompt_embeds_text_after_instruction() {
        let prompt = enhance_prompt("Built things.", EnhanceMode::Shorten);
        assert!(prompt.starts_with(EnhanceMode::Shorten.instruction()));
        assert!(prompt.ends_with("Resume text:\nBuilt things."));
    }

    #[test]
    fn test_extraction_prompt_carries_schema_and_text() {
        let prompt = extraction_prompt("RESUME BODY HERE");
        assert!(prompt.contains("\"personalInfo\""));
        assert!(prompt.contains("\"skills\""));
        assert!(prompt.ends_with("RESUME BODY HERE"));
        assert!(!prompt.contains("{resume_text}"));
    }
}
