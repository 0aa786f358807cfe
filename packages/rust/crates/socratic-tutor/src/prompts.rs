//! Versioned prompt templates with named insertion points.
//!
//! Template text is data: the defaults are compiled in from `prompts/`, and the tutoring
//! template can be replaced from a file at startup. Insertion points are written as
//! `{name}`; any other brace (JSON examples in the template body) is left alone.

use std::path::Path;

use crate::error::{Result, TutorError};

const SOCRATIC_TEMPLATE_V1: &str = include_str!("../prompts/socratic.v1.md");
const QUIZ_FEEDBACK_TEMPLATE_V1: &str = include_str!("../prompts/quiz_feedback.v1.md");

/// Insertion points of the tutoring template.
pub const SOCRATIC_SLOTS: &[&str] = &["algorithm", "mastery", "context"];
/// Insertion points of the quiz feedback template.
pub const QUIZ_FEEDBACK_SLOTS: &[&str] = &["score", "total", "skill_level", "questions"];

/// Appended after the rendered tutoring template.
const JSON_ONLY_INSTRUCTION: &str = "Generate your Socratic response as a valid JSON object following the specified format. Do not include any markdown formatting or additional text.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    version: String,
    body: String,
    slots: &'static [&'static str],
}

impl PromptTemplate {
    /// Build a template, rejecting bodies that miss any of `slots`.
    pub fn parse(
        version: impl Into<String>,
        body: impl Into<String>,
        slots: &'static [&'static str],
    ) -> Result<Self> {
        let version = version.into();
        let body = body.into();
        let missing: Vec<&str> = slots
            .iter()
            .copied()
            .filter(|slot| !body.contains(&format!("{{{slot}}}")))
            .collect();
        if !missing.is_empty() {
            return Err(TutorError::Config(format!(
                "prompt template '{version}' is missing insertion points: {}",
                missing.join(", ")
            )));
        }
        Ok(Self {
            version,
            body,
            slots,
        })
    }

    pub fn socratic_default() -> Self {
        Self {
            version: "socratic.v1".to_string(),
            body: SOCRATIC_TEMPLATE_V1.to_string(),
            slots: SOCRATIC_SLOTS,
        }
    }

    pub fn quiz_feedback_default() -> Self {
        Self {
            version: "quiz_feedback.v1".to_string(),
            body: QUIZ_FEEDBACK_TEMPLATE_V1.to_string(),
            slots: QUIZ_FEEDBACK_SLOTS,
        }
    }

    /// Load a tutoring template from `path`; the file stem becomes its version.
    pub fn load_socratic(path: &Path) -> Result<Self> {
        let body = std::fs::read_to_string(path).map_err(|error| {
            TutorError::Config(format!(
                "failed to read prompt template {}: {error}",
                path.display()
            ))
        })?;
        let version = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("custom")
            .to_string();
        Self::parse(version, body, SOCRATIC_SLOTS)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Substitute insertion points in one pass, so inserted text is never re-expanded.
    pub fn render(&self, values: &[(&str, &str)]) -> String {
        let mut out = String::with_capacity(self.body.len() + 256);
        let mut rest = self.body.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let tail = &rest[open + 1..];
            let replaced = tail.find('}').and_then(|close| {
                let name = &tail[..close];
                if !self.slots.contains(&name) {
                    return None;
                }
                values
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value, close))
            });
            match replaced {
                Some((value, close)) => {
                    out.push_str(value);
                    rest = &tail[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = tail;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Values for the tutoring template.
#[derive(Debug, Clone, Copy)]
pub struct PromptVars<'a> {
    pub algorithm: &'a str,
    pub mastery: f64,
    pub context: &'a str,
}

/// Render the full tutoring prompt: template plus the JSON-only instruction.
pub fn render_socratic_prompt(template: &PromptTemplate, vars: PromptVars<'_>) -> String {
    let mastery = format!("{:.2}", vars.mastery);
    let mut prompt = template.render(&[
        ("algorithm", vars.algorithm),
        ("mastery", mastery.as_str()),
        ("context", vars.context),
    ]);
    prompt.push_str("\n\n");
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt
}
