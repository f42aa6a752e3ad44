use std::path::{Path, PathBuf};

use serde_json::{json, Value};

use crate::errors::InterviewError;

/// Rendered in place of the resume when none was supplied.
pub const NO_RESUME_TEXT: &str = "No resume information available.";

/// Pre-extracted candidate background (skills, experience, education, projects).
///
/// Kept as an opaque JSON value: the interviewer never inspects its structure,
/// it only renders it into prompts.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeContext(Value);

impl ResumeContext {
    /// Loads a resume context from a JSON file. Any valid JSON document is accepted.
    pub fn from_path(path: &Path) -> Result<Self, InterviewError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            InterviewError::ResumeContext(format!("failed to read {}: {e}", path.display()))
        })?;
        let value: Value = serde_json::from_str(&raw).map_err(|e| {
            InterviewError::ResumeContext(format!("{} is not valid JSON: {e}", path.display()))
        })?;
        Ok(Self(value))
    }

    /// Built-in sample used when no resume file is given.
    pub fn sample() -> Self {
        Self(json!({
            "skills": ["Python", "Data Analysis", "Machine Learning", "SQL", "Project Management"],
            "experience": [
                {
                    "company": "TechCorp",
                    "role": "Data Scientist",
                    "duration": "2019-2022",
                    "highlights": ["Led a team of 3 analysts", "Improved model accuracy by 25%"]
                },
                {
                    "company": "DataSystems",
                    "role": "Analyst",
                    "duration": "2017-2019",
                    "highlights": ["Developed ETL pipelines", "Automated reporting processes"]
                }
            ],
            "education": [
                {"degree": "M.S. Computer Science", "institution": "Tech University", "year": "2017"}
            ],
            "projects": ["Customer Segmentation Analysis", "Predictive Maintenance System"]
        }))
    }

    /// Prompt rendering. Compact JSON keeps the prompt short.
    pub fn render(&self) -> String {
        self.0.to_string()
    }

    #[cfg(test)]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Where the session's resume context comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeSource {
    /// Built-in sample resume.
    Sample,
    File(PathBuf),
    None,
}

impl ResumeSource {
    pub fn load(&self) -> Result<Option<ResumeContext>, InterviewError> {
        match self {
            ResumeSource::Sample => Ok(Some(ResumeContext::sample())),
            ResumeSource::File(path) => ResumeContext::from_path(path).map(Some),
            ResumeSource::None => Ok(None),
        }
    }
}

/// Renders an optional resume for prompt inclusion.
pub fn render_resume(resume: Option<&ResumeContext>) -> String {
    resume
        .map(ResumeContext::render)
        .unwrap_or_else(|| NO_RESUME_TEXT.to_string())
}
