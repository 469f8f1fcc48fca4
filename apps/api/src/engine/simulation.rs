//! What-if simulation engine — derives comparative insights by re-scoring
//! the profile with exactly one dimension perturbed at a time.
//!
//! Deliberately brute-force: every variant is a fresh record and a fresh
//! model call, and the base estimate is computed once and reused as the
//! comparison baseline for every insight. A full pass costs
//! `1 + |candidates not held| + (|locations| − 1) + 5` model calls.
//!
//! No partial success: if any variant call fails, the whole insight pass
//! fails rather than reporting a ranking with silent holes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::engine::features::build_record;
use crate::engine::profile::JobProfile;
use crate::errors::AppError;
use crate::metadata::{AppMetadata, LEVEL_LABELS};
use crate::model::SalaryModel;

/// High-value skills probed by the gap recommendation. List order is the
/// tie-break: equal uplifts keep the earlier candidate.
pub const CANDIDATE_SKILLS: [&str; 5] = ["AWS", "Spark", "Kubernetes", "TensorFlow", "React"];

/// Minimum yearly uplift before a skill recommendation is worth surfacing.
pub const MIN_SKILL_UPLIFT: f64 = 1000.0;

/// The relocation ranking keeps only the top entries.
pub const RELOCATION_TOP_N: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkillAdvice {
    /// Learning `skill` is estimated to add `uplift` currency units per year.
    Learn { skill: String, uplift: f64 },
    /// No single candidate skill clears the significance floor.
    CompetitiveSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelocationEntry {
    pub location: String,
    pub estimate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub level: String,
    pub estimate: f64,
}

/// One completed analysis: the base estimate, its derived presentation
/// values, and all three comparative insights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub point_estimate: f64,
    pub low: f64,
    pub high: f64,
    pub monthly: f64,
    pub skill_advice: SkillAdvice,
    pub relocations: Vec<RelocationEntry>,
    pub seniority_curve: Vec<CurvePoint>,
}

/// Scores one profile variant end to end: build → predict → `expm1`.
fn score(
    profile: &JobProfile,
    metadata: &AppMetadata,
    model: &dyn SalaryModel,
    level_override: Option<u8>,
) -> Result<f64, AppError> {
    let record = build_record(profile, metadata, level_override)?;
    Ok(model.predict(&record)?.exp_m1())
}

/// The base salary estimate every insight compares against.
pub fn base_estimate(
    profile: &JobProfile,
    metadata: &AppMetadata,
    model: &dyn SalaryModel,
) -> Result<f64, AppError> {
    score(profile, metadata, model, None)
}

/// Greedy single-skill search over the fixed candidate list. Skills already
/// held are skipped; combinations are deliberately not explored.
pub fn recommend_skill(
    profile: &JobProfile,
    base: f64,
    metadata: &AppMetadata,
    model: &dyn SalaryModel,
) -> Result<SkillAdvice, AppError> {
    let mut best_uplift = 0.0_f64;
    let mut best_skill: Option<&str> = None;

    for candidate in CANDIDATE_SKILLS {
        if profile.holds_skill(candidate) {
            continue;
        }
        let estimate = score(&profile.with_skill(candidate), metadata, model, None)?;
        let uplift = estimate - base;
        // Strictly greater, so ties keep the earlier candidate.
        if uplift > best_uplift {
            best_uplift = uplift;
            best_skill = Some(candidate);
        }
    }

    match best_skill {
        Some(skill) if best_uplift > MIN_SKILL_UPLIFT => Ok(SkillAdvice::Learn {
            skill: skill.to_string(),
            uplift: best_uplift,
        }),
        _ => Ok(SkillAdvice::CompetitiveSet),
    }
}

/// Scores every metadata location except the current one and returns the top
/// entries, highest first. The sort is stable: equal estimates preserve the
/// metadata enumeration order.
pub fn rank_relocations(
    profile: &JobProfile,
    metadata: &AppMetadata,
    model: &dyn SalaryModel,
) -> Result<Vec<RelocationEntry>, AppError> {
    let mut entries = Vec::new();
    for location in &metadata.locations {
        if location == &profile.location {
            continue;
        }
        let estimate = score(&profile.with_location(location), metadata, model, None)?;
        entries.push(RelocationEntry {
            location: location.clone(),
            estimate,
        });
    }

    entries.sort_by(|a, b| b.estimate.partial_cmp(&a.estimate).unwrap_or(Ordering::Equal));
    entries.truncate(RELOCATION_TOP_N);
    Ok(entries)
}

/// Scores the profile at all five seniority levels, in fixed level order,
/// regardless of the profile's own level.
pub fn seniority_curve(
    profile: &JobProfile,
    metadata: &AppMetadata,
    model: &dyn SalaryModel,
) -> Result<Vec<CurvePoint>, AppError> {
    LEVEL_LABELS
        .iter()
        .enumerate()
        .map(|(level, label)| {
            score(profile, metadata, model, Some(level as u8)).map(|estimate| CurvePoint {
                level: label.to_string(),
                estimate,
            })
        })
        .collect()
}

/// Runs the full insight pass for one profile.
pub fn run_analysis(
    profile: &JobProfile,
    metadata: &AppMetadata,
    model: &dyn SalaryModel,
) -> Result<Analysis, AppError> {
    let point_estimate = base_estimate(profile, metadata, model)?;
    let skill_advice = recommend_skill(profile, point_estimate, metadata, model)?;
    let relocations = rank_relocations(profile, metadata, model)?;
    let seniority_curve = seniority_curve(profile, metadata, model)?;

    Ok(Analysis {
        point_estimate,
        low: point_estimate * 0.88,
        high: point_estimate * 1.12,
        monthly: point_estimate / 12.0,
        skill_advice,
        relocations,
        seniority_curve,
    })
}
