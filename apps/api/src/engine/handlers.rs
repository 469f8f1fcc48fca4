use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::profile::{JobProfile, SkillInput};
use crate::engine::report::{consultation_report, PayPeriod};
use crate::engine::simulation::{run_analysis, Analysis};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub title: String,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    pub experience: String,
    #[serde(default)]
    pub remote: bool,
    #[serde(default)]
    pub pay_period: PayPeriod,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis_id: Uuid,
    pub role: String,
    #[serde(flatten)]
    pub analysis: Analysis,
    pub report: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    pub experience_levels: Vec<String>,
    pub locations: Vec<String>,
    pub skills: Vec<String>,
}

/// GET /api/v1/metadata
/// Reference data the profile form is populated from.
pub async fn handle_metadata(State(state): State<AppState>) -> Json<MetadataResponse> {
    Json(MetadataResponse {
        experience_levels: state
            .metadata
            .experience_levels()
            .iter()
            .map(|s| s.to_string())
            .collect(),
        locations: state.metadata.locations.clone(),
        skills: state.metadata.skill_list.clone(),
    })
}

/// POST /api/v1/analysis
pub async fn handle_analysis(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let profile = build_profile(&req)?;

    // The full insight pass is CPU-bound (a dozen-plus model calls); run it
    // off the async executor.
    let metadata = state.metadata.clone();
    let model = state.model.clone();
    let pass_profile = profile.clone();
    let analysis =
        tokio::task::spawn_blocking(move || run_analysis(&pass_profile, &metadata, model.as_ref()))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("spawn_blocking failed in analysis: {e}"))
            })??;

    let report = consultation_report(&profile, &analysis, req.pay_period);
    info!(
        role = %profile.title,
        estimate = analysis.point_estimate,
        "Analysis complete"
    );

    Ok(Json(AnalysisResponse {
        analysis_id: Uuid::new_v4(),
        role: profile.title.clone(),
        analysis,
        report,
        generated_at: Utc::now(),
    }))
}

/// Turns a raw request into a validated `JobProfile`. Presentation-level
/// checks live here so the engine only ever sees well-formed profiles.
fn build_profile(req: &AnalysisRequest) -> Result<JobProfile, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Job title must not be empty".to_string()));
    }

    let skills = match (&req.skills, &req.description) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "Provide either a skill selection or a free-text description, not both"
                    .to_string(),
            ))
        }
        (Some(list), None) => SkillInput::Selected(list.clone()),
        (None, Some(text)) => SkillInput::Described(text.clone()),
        (None, None) => SkillInput::Selected(Vec::new()),
    };

    Ok(JobProfile {
        title: req.title.trim().to_string(),
        skills,
        location: req.location.clone(),
        experience: req.experience.clone(),
        remote: req.remote,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request() -> AnalysisRequest {
        AnalysisRequest {
            title: "Data Scientist".to_string(),
            skills: Some(vec!["Python".to_string()]),
            description: None,
            location: "NY".to_string(),
            experience: "Entry Level".to_string(),
            remote: false,
            pay_period: PayPeriod::Yearly,
        }
    }

    #[test]
    fn test_build_profile_selected_mode() {
        let profile = build_profile(&make_request()).unwrap();
        assert_eq!(
            profile.skills,
            SkillInput::Selected(vec!["Python".to_string()])
        );
    }

    #[test]
    fn test_build_profile_described_mode() {
        let mut req = make_request();
        req.skills = None;
        req.description = Some("Own the data platform".to_string());

        let profile = build_profile(&req).unwrap();
        assert_eq!(
            profile.skills,
            SkillInput::Described("Own the data platform".to_string())
        );
    }

    #[test]
    fn test_build_profile_neither_mode_defaults_to_empty_selection() {
        let mut req = make_request();
        req.skills = None;

        let profile = build_profile(&req).unwrap();
        assert_eq!(profile.skills, SkillInput::Selected(vec![]));
    }

    #[test]
    fn test_build_profile_both_modes_rejected() {
        let mut req = make_request();
        req.description = Some("also text".to_string());

        let err = build_profile(&req).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_build_profile_blank_title_rejected() {
        let mut req = make_request();
        req.title = "   ".to_string();

        let err = build_profile(&req).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_build_profile_trims_title() {
        let mut req = make_request();
        req.title = "  Data Scientist  ".to_string();

        let profile = build_profile(&req).unwrap();
        assert_eq!(profile.title, "Data Scientist");
    }
}
