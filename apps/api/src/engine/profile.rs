//! Job profile — the raw, user-facing inputs one analysis starts from.

use serde::{Deserialize, Serialize};

/// Skill input modes are mutually exclusive by construction: a profile either
/// carries an explicit selection or a free-text description, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillInput {
    Selected(Vec<String>),
    Described(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub title: String,
    pub skills: SkillInput,
    pub location: String,
    pub experience: String,
    pub remote: bool,
}

impl JobProfile {
    /// Whether the profile already carries the named skill. Selection mode
    /// matches the label exactly; description mode matches the lowercased
    /// name as a substring of the text.
    pub fn holds_skill(&self, name: &str) -> bool {
        match &self.skills {
            SkillInput::Selected(skills) => skills.iter().any(|s| s == name),
            SkillInput::Described(text) => text.to_lowercase().contains(&name.to_lowercase()),
        }
    }

    /// A copy of the profile with one skill added, for what-if scoring.
    /// Selection mode appends to the list; description mode appends the name
    /// to the text so the keyword scan picks it up.
    pub fn with_skill(&self, name: &str) -> JobProfile {
        let mut variant = self.clone();
        variant.skills = match &self.skills {
            SkillInput::Selected(skills) => {
                let mut skills = skills.clone();
                skills.push(name.to_string());
                SkillInput::Selected(skills)
            }
            SkillInput::Described(text) => SkillInput::Described(format!("{text} {name}")),
        };
        variant
    }

    /// A copy of the profile with the location substituted.
    pub fn with_location(&self, location: &str) -> JobProfile {
        let mut variant = self.clone();
        variant.location = location.to_string();
        variant
    }

    /// Skill summary line used by the consultation report.
    pub fn skill_summary(&self) -> String {
        match &self.skills {
            SkillInput::Selected(skills) if skills.is_empty() => "None specified".to_string(),
            SkillInput::Selected(skills) => skills.join(", "),
            SkillInput::Described(_) => "Derived from description".to_string(),
        }
    }
}
