//! Feature builder — turns a `JobProfile` into the complete, model-shaped
//! `FeatureRecord` the regression model was trained on.
//!
//! Every record is built fresh per inference call; nothing here caches or
//! mutates shared state, so identical profiles always produce identical
//! records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::engine::profile::{JobProfile, SkillInput};
use crate::errors::AppError;
use crate::metadata::AppMetadata;

/// Keywords scanned in description mode, each mapped to a `has_{keyword}`
/// indicator column.
const TEXT_KEYWORDS: [&str; 8] = [
    "python",
    "sql",
    "java",
    "aws",
    "azure",
    "spark",
    "react",
    "kubernetes",
];

/// One fully-populated scoring request. Field names mirror the training
/// columns exactly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub title_clean: String,
    pub description_clean: String,
    pub location_group: String,
    pub experience_encoded: u8,
    pub remote_allowed: u8,
    pub text_feature: String,
    pub pay_period: String,
    pub company_size: String,
    pub employment_type: String,
    pub title_seniority_ordinal: u8,
    /// One binary column per known skill indicator. A `BTreeMap` keeps the
    /// column order deterministic across rebuilds.
    pub skill_indicators: BTreeMap<String, u8>,
}

/// Fixed lookup from level index to (seniority ordinal, encoded experience).
///
/// Levels 0 and 1 share encoded value 1, preserved as trained. The catch-all
/// folds anything above 3 into (4, 4); callers must pass levels in 0–4.
pub fn level_mapping(level: u8) -> (u8, u8) {
    match level {
        0 => (0, 1),
        1 => (1, 1),
        2 => (2, 3),
        3 => (3, 4),
        _ => (4, 4),
    }
}

/// Resolves which skill-indicator columns a profile activates. Two
/// strategies, selected by the profile's input mode.
trait SkillResolver {
    fn activate(&self, columns: &mut BTreeMap<String, u8>);
}

/// Explicit-selection strategy: exact column-key match first, then a
/// substring fallback so a label like "Apache Spark" still lights up
/// columns such as `has_apache_spark`.
struct SelectedSkillResolver<'a> {
    skills: &'a [String],
}

impl SkillResolver for SelectedSkillResolver<'_> {
    fn activate(&self, columns: &mut BTreeMap<String, u8>) {
        for skill in self.skills {
            let lowered = skill.to_lowercase();
            let simple_col = format!("has_{}", lowered.replace(' ', "_"));
            if let Some(flag) = columns.get_mut(&simple_col) {
                *flag = 1;
                continue;
            }
            for (column, flag) in columns.iter_mut() {
                if column.contains(&lowered) {
                    *flag = 1;
                }
            }
        }
    }
}

/// Free-text strategy: scans the combined text feature for the fixed keyword
/// list. `k8s` counts as kubernetes. Keywords without a known column are
/// silently ignored.
struct KeywordSkillResolver<'a> {
    text: &'a str,
}

impl SkillResolver for KeywordSkillResolver<'_> {
    fn activate(&self, columns: &mut BTreeMap<String, u8>) {
        let lowered = self.text.to_lowercase();
        for keyword in TEXT_KEYWORDS {
            let hit = lowered.contains(keyword)
                || (keyword == "kubernetes" && lowered.contains("k8s"));
            if hit {
                if let Some(flag) = columns.get_mut(&format!("has_{keyword}")) {
                    *flag = 1;
                }
            }
        }
    }
}

/// Builds the complete scoring record for a profile.
///
/// `level_override` probes alternate seniority levels while leaving the rest
/// of the profile untouched; the profile's own experience label is still
/// validated either way. Unknown location or experience labels fail before
/// any model call.
pub fn build_record(
    profile: &JobProfile,
    metadata: &AppMetadata,
    level_override: Option<u8>,
) -> Result<FeatureRecord, AppError> {
    if !metadata.has_location(&profile.location) {
        return Err(AppError::Validation(format!(
            "Unknown location '{}'",
            profile.location
        )));
    }
    let profile_level = metadata.level_of(&profile.experience).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown experience level '{}'",
            profile.experience
        ))
    })?;
    let level = level_override.unwrap_or(profile_level);
    let (title_seniority_ordinal, experience_encoded) = level_mapping(level);

    let description_clean = match &profile.skills {
        SkillInput::Selected(skills) => {
            format!("Job for {}. Skills: {}.", profile.title, skills.join(", "))
        }
        SkillInput::Described(text) => text.clone(),
    };
    let text_feature = format!("{} {}", profile.title, description_clean);

    let mut skill_indicators: BTreeMap<String, u8> = metadata
        .skill_columns
        .iter()
        .map(|column| (column.clone(), 0))
        .collect();
    match &profile.skills {
        SkillInput::Selected(skills) => {
            SelectedSkillResolver { skills }.activate(&mut skill_indicators)
        }
        SkillInput::Described(_) => {
            KeywordSkillResolver { text: &text_feature }.activate(&mut skill_indicators)
        }
    }

    Ok(FeatureRecord {
        title_clean: profile.title.clone(),
        description_clean,
        location_group: profile.location.clone(),
        experience_encoded,
        remote_allowed: u8::from(profile.remote),
        text_feature,
        pay_period: "YEARLY".to_string(),
        company_size: "Unknown".to_string(),
        employment_type: "Full-time".to_string(),
        title_seniority_ordinal,
        skill_indicators,
    })
}
