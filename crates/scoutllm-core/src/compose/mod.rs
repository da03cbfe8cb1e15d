//! Request composer
//!
//! Assembles the context block sent ahead of the task instruction: the
//! subject text, optional extracted skills, and optional named sections.
//! Sections keep insertion order and their labels are only upper-cased;
//! nothing here interprets the text.

mod prompts;

pub use prompts::{job_match_task, DEFAULT_SYSTEM_PROMPT, JOB_MATCH_SYSTEM_PROMPT, RESUME_TASK};

use serde::{Deserialize, Serialize};

/// Maximum characters of a section shown in the context
pub const SECTION_PREVIEW_CHARS: usize = 200;

/// Marker appended to a truncated section
pub const ELLIPSIS: &str = "...";

/// Skills already extracted from the subject text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSummary {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

impl SkillSummary {
    pub fn new<T, S>(technical: T, soft: S) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            technical: technical.into_iter().map(Into::into).collect(),
            soft: soft.into_iter().map(Into::into).collect(),
        }
    }
}

/// Named sections in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideInformation {
    fields: Vec<(String, String)>,
}

impl SideInformation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a section; re-inserting a label replaces its value in place
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == label) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((label, value)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for SideInformation {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut info = Self::new();
        for (label, value) in iter {
            info.insert(label, value);
        }
        info
    }
}

/// Everything known about the subject document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeInput {
    pub text: String,
    pub skills: Option<SkillSummary>,
    pub sections: Option<SideInformation>,
}

impl ResumeInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_skills(mut self, skills: SkillSummary) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn with_sections(mut self, sections: SideInformation) -> Self {
        self.sections = Some(sections);
        self
    }

    /// Composed context for this input
    pub fn context(&self) -> String {
        compose_context(&self.text, self.skills.as_ref(), self.sections.as_ref())
    }
}

/// Build the context block
///
/// ```text
/// Resume Text:
///
/// <subject>
///
/// Extracted Technical Skills: a, b
///
/// Extracted Soft Skills: c
///
/// Extracted Resume Sections:
/// LABEL: <preview>
/// ```
pub fn compose_context(
    subject: &str,
    skills: Option<&SkillSummary>,
    sections: Option<&SideInformation>,
) -> String {
    let mut context = format!("Resume Text:\n\n{}\n\n", subject);

    if let Some(skills) = skills {
        context.push_str(&format!(
            "Extracted Technical Skills: {}\n\n",
            skills.technical.join(", ")
        ));
        context.push_str(&format!(
            "Extracted Soft Skills: {}\n\n",
            skills.soft.join(", ")
        ));
    }

    if let Some(sections) = sections.filter(|s| !s.is_empty()) {
        context.push_str("Extracted Resume Sections:\n");
        for (label, value) in sections.iter() {
            context.push_str(&format!("{}: {}\n\n", label.to_uppercase(), preview(value)));
        }
    }

    context
}

/// First [`SECTION_PREVIEW_CHARS`] characters, with [`ELLIPSIS`] if cut
pub fn preview(value: &str) -> String {
    match value.char_indices().nth(SECTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &value[..cut], ELLIPSIS),
        None => value.to_string(),
    }
}
