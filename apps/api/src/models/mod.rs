pub mod document;
pub mod resume;
pub mod user;

pub use document::{EducationEntry, ExperienceEntry, PersonalInfo, ProjectEntry, ResumeDocument};
