//! Request-level AI flows: resume import, text enhancement, skill
//! suggestions.
//!
//! The import flow is a linear state machine with no back-branching:
//! bytes → extracted text → provider chain → (normalized AI document |
//! heuristic-parsed document). Only text extraction can abort it; once text
//! exists the flow always produces a document.

use serde::Serialize;
use tracing::info;

use crate::ai::{prompts, prompts::EnhanceMode, CompletionOptions, ProviderChain};
use crate::extract::{self, ExtractError};
use crate::models::ResumeDocument;
use crate::normalize;
use crate::parser;

const MAX_SUGGESTIONS: usize = 8;
const SUGGESTION_MAX_CHARS: usize = 50;
const MIN_SUGGESTION_QUERY_CHARS: usize = 2;

/// Which path produced an imported document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    Ai,
    Manual,
}

#[derive(Debug)]
pub struct ImportedResume {
    pub document: ResumeDocument,
    pub source: ExtractionSource,
}

/// Import an uploaded resume file. AI extraction is attempted first; if every
/// provider is down, unconfigured, or replies with something the normalizer
/// rejects, the heuristic parser takes over on the same extracted text.
pub async fn import_resume(
    chain: &ProviderChain,
    bytes: &[u8],
    extension: &str,
) -> Result<ImportedResume, ExtractError> {
    let text = extract::extract_text(bytes, extension)?;
    let prompt = prompts::extraction_prompt(&text);

    match chain
        .try_in_order_parsed(&prompt, &CompletionOptions::extraction(), |reply| {
            normalize::normalize(reply)
        })
        .await
    {
        Some(document) => Ok(ImportedResume {
            document,
            source: ExtractionSource::Ai,
        }),
        None => {
            info!("no provider produced a usable extraction, using heuristic parser");
            Ok(ImportedResume {
                document: parser::parse(&text),
                source: ExtractionSource::Manual,
            })
        }
    }
}

/// Rewrite resume text in the requested mode. `None` means every provider
/// was unavailable; the caller reports that, never a partial result.
pub async fn enhance_text(chain: &ProviderChain, text: &str, mode: EnhanceMode) -> Option<String> {
    chain
        .try_in_order(
            &prompts::enhance_prompt(text, mode),
            &CompletionOptions::enhancement(),
        )
        .await
}

/// Suggest skills related to a partial input. Degrades to an empty list on
/// short input, provider exhaustion, or a reply that is not a string array.
pub async fn suggest_skills(chain: &ProviderChain, input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.chars().count() < MIN_SUGGESTION_QUERY_CHARS {
        return Vec::new();
    }

    match chain
        .try_in_order(
            &prompts::skill_suggestion_prompt(trimmed),
            &CompletionOptions::enhancement(),
        )
        .await
    {
        Some(reply) => parse_suggestions(&reply),
        None => Vec::new(),
    }
}

fn parse_suggestions(reply: &str) -> Vec<String> {
    let text = normalize::strip_json_fences(reply);
    let Ok(values) = serde_json::from_str::<Vec<serde_json::Value>>(text) else {
        return Vec::new();
    };

    values
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.chars().count() < SUGGESTION_MAX_CHARS)
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}
