//! Heuristic resume parser — the last-resort extraction path.
//!
//! When every AI provider is down or unconfigured, this module still has to
//! turn raw resume text into a well-formed [`ResumeDocument`]. It is a pure
//! function built from cheap keyword and regex heuristics: total, never
//! errors, fills everything it cannot locate with empty strings. The bounds
//! below are deliberate cheap cutoffs, not tuned values.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{
    EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument,
};

const NAME_SCAN_LINES: usize = 5;
const NAME_MAX_CHARS: usize = 60;

const MAX_EXPERIENCE_ENTRIES: usize = 5;
const MAX_EDUCATION_ENTRIES: usize = 3;
const MAX_PROJECT_ENTRIES: usize = 3;
const MAX_SKILLS: usize = 20;

const COMPANY_MAX_CHARS: usize = 30;
const POSITION_MAX_CHARS: usize = 40;
const SCHOOL_MAX_CHARS: usize = 50;
const SKILL_MAX_CHARS: usize = 50;
const PROJECT_NAME_MAX_CHARS: usize = 60;
const EXPERIENCE_DESC_MAX_CHARS: usize = 500;
const PROJECT_DESC_MAX_CHARS: usize = 300;

/// Any line containing one of these (lowercased) ends the section currently
/// being scanned. The set is shared across all sections: a stray mention of
/// "skills" inside an experience paragraph will cut that section short. Known
/// quirk, kept for parity with the extraction behavior users already see.
const SECTION_BOUNDARY_KEYWORDS: [&str; 5] =
    ["experience", "education", "skills", "projects", "summary"];

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap());

// 7-20 chars total, including any leading + or (, drawn from
// digits/space/punctuation and anchored on digits at both ends so date
// ranges like "2020 - " don't qualify. The prefixed alternative uses a
// shorter inner repeat so the prefix counts toward the length budget.
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[+(]\d[\d\s().\-]{4,17}\d|\d[\d\s().\-]{5,18}\d)").unwrap()
});

static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linkedin\.com/in/[A-Za-z0-9\-_%]+").unwrap());

// A capitalized word run ending in a job-title suffix marks the start of a
// new experience entry ("Senior Software Engineer", "Product Manager").
static JOB_TITLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Z][A-Za-z]*\s+)*(?:Engineer|Developer|Manager|Designer|Analyst|Architect)\b")
        .unwrap()
});

static DEGREE_LEVEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(bachelor|master|phd|associate)\b").unwrap());

// Catches compact degree mentions ("BS Computer Science") that the broad
// keyword test below would otherwise miss.
static DEGREE_ABBREV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(bsc|msc|btech|mtech|mba|bs|ba|ms|ma)\b").unwrap());

const EDUCATION_KEYWORDS: [&str; 6] =
    ["degree", "bachelor", "master", "phd", "university", "college"];

/// Parse raw resume text into a document. Total: any input, including empty
/// or binary garbage, yields a valid document with empty-string defaults.
pub fn parse(raw_text: &str) -> ResumeDocument {
    let lines: Vec<&str> = raw_text.lines().collect();

    let experience_body = extract_section(&lines, &["experience", "employment", "work history"]);
    let education_body = extract_section(&lines, &["education", "academic"]);
    let skills_body = extract_section(&lines, &["skills", "technologies"]);
    let projects_body = extract_section(&lines, &["projects"]);
    let summary_body = extract_section(&lines, &["summary", "objective", "profile"]);

    ResumeDocument {
        personal_info: extract_personal_info(raw_text, &lines),
        summary: summary_body.join(" ").trim().to_string(),
        experience: parse_experience(&experience_body),
        education: parse_education(&education_body),
        projects: parse_projects(&projects_body),
        skills: parse_skills(&skills_body),
        languages: Vec::new(),
        certifications: Vec::new(),
    }
}

fn extract_personal_info(raw_text: &str, lines: &[&str]) -> PersonalInfo {
    PersonalInfo {
        full_name: extract_name(lines),
        email: first_match(&EMAIL_RE, raw_text),
        phone: first_match(&PHONE_RE, raw_text),
        linkedin: first_match(&LINKEDIN_RE, raw_text),
        ..Default::default()
    }
}

fn first_match(re: &Regex, text: &str) -> String {
    re.find(text)
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

/// The candidate name is the first short, contact-free line near the top.
fn extract_name(lines: &[&str]) -> String {
    lines
        .iter()
        .take(NAME_SCAN_LINES)
        .map(|l| l.trim())
        .find(|l| {
            !l.is_empty()
                && l.chars().count() < NAME_MAX_CHARS
                && !l.contains('@')
                && !l.contains('•')
        })
        .unwrap_or_default()
        .to_string()
}

/// Locate the first line containing any of `keywords` (lowercased substring
/// match) and return the body lines that follow, up to the next line that
/// contains any shared boundary keyword.
fn extract_section<'a>(lines: &[&'a str], keywords: &[&str]) -> Vec<&'a str> {
    let header = lines.iter().position(|line| {
        let lower = line.to_lowercase();
        keywords.iter().any(|k| lower.contains(k))
    });
    let Some(start) = header else {
        return Vec::new();
    };

    let mut body = Vec::new();
    for line in &lines[start + 1..] {
        let lower = line.to_lowercase();
        if SECTION_BOUNDARY_KEYWORDS.iter().any(|k| lower.contains(k)) {
            break;
        }
        body.push(*line);
    }
    body
}

/// Group section lines into entries: a line matching `is_entry_start` opens
/// a new entry, following lines attach to it. Lines before the first entry
/// start are dropped.
fn split_entries<'a>(body: &[&'a str], is_entry_start: impl Fn(&str) -> bool) -> Vec<Vec<&'a str>> {
    let mut entries: Vec<Vec<&'a str>> = Vec::new();
    for line in body {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if is_entry_start(trimmed) {
            entries.push(vec![trimmed]);
        } else if let Some(current) = entries.last_mut() {
            current.push(trimmed);
        }
    }
    entries
}

fn parse_experience(body: &[&str]) -> Vec<ExperienceEntry> {
    split_entries(body, |line| JOB_TITLE_RE.is_match(line))
        .into_iter()
        .take(MAX_EXPERIENCE_ENTRIES)
        .enumerate()
        .map(|(i, entry)| {
            let first = entry[0];
            let company = match first.split_once('|') {
                Some((before, _)) => before.trim().to_string(),
                None => truncate_chars(first, COMPANY_MAX_CHARS),
            };
            ExperienceEntry {
                id: i.to_string(),
                company,
                position: truncate_chars(first, POSITION_MAX_CHARS),
                description: truncate_chars(&entry[1..].join("\n"), EXPERIENCE_DESC_MAX_CHARS),
                ..Default::default()
            }
        })
        .collect()
}

fn parse_education(body: &[&str]) -> Vec<EducationEntry> {
    split_entries(body, starts_uppercase)
        .into_iter()
        .filter(|entry| {
            let joined = entry.join(" ");
            let lower = joined.to_lowercase();
            EDUCATION_KEYWORDS.iter().any(|k| lower.contains(k))
                || DEGREE_ABBREV_RE.is_match(&joined)
        })
        .take(MAX_EDUCATION_ENTRIES)
        .enumerate()
        .map(|(i, entry)| {
            let first = entry[0];
            let school = match first.split_once('|') {
                Some((before, _)) => before.trim().to_string(),
                None => truncate_chars(first, SCHOOL_MAX_CHARS),
            };
            EducationEntry {
                id: i.to_string(),
                school,
                degree: degree_label(&entry.join(" ")),
                ..Default::default()
            }
        })
        .collect()
}

/// Title-cased degree level when the entry names one, placeholder otherwise.
fn degree_label(entry_text: &str) -> String {
    match DEGREE_LEVEL_RE.find(entry_text) {
        Some(m) => {
            let lower = m.as_str().to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => lower,
            }
        }
        None => "Degree".to_string(),
    }
}

fn parse_skills(body: &[&str]) -> Vec<String> {
    body.join("\n")
        .split(['\n', ',', '•'])
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.chars().count() < SKILL_MAX_CHARS)
        .take(MAX_SKILLS)
        .map(str::to_string)
        .collect()
}

fn parse_projects(body: &[&str]) -> Vec<ProjectEntry> {
    split_entries(body, starts_uppercase)
        .into_iter()
        .take(MAX_PROJECT_ENTRIES)
        .enumerate()
        .map(|(i, entry)| ProjectEntry {
            id: i.to_string(),
            name: truncate_chars(entry[0], PROJECT_NAME_MAX_CHARS),
            role: "Developer".to_string(),
            description: truncate_chars(&entry[1..].join("\n"), PROJECT_DESC_MAX_CHARS),
            ..Default::default()
        })
        .collect()
}

fn starts_uppercase(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_uppercase())
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.trim().chars().take(max).collect()
}
