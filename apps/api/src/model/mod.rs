/// Salary model — the single inference entry point for the service.
///
/// ARCHITECTURAL RULE: no other module scores a record directly. All
/// inference goes through the `SalaryModel` trait, carried in `AppState` as
/// `Arc<dyn SalaryModel>` so tests and future backends can swap the
/// implementation without touching the engine.
use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::engine::features::FeatureRecord;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("model artifact parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Opaque regression model: one fully-populated record in, one log-scale
/// salary out. Callers inverse-transform with `f64::exp_m1` before comparing
/// or presenting values.
pub trait SalaryModel: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError>;
}

/// Linear scorer over the engineered features, loaded from the JSON
/// coefficient artifact exported by the training pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    intercept: f64,
    experience_weight: f64,
    seniority_weight: f64,
    remote_weight: f64,
    #[serde(default)]
    location_offsets: HashMap<String, f64>,
    #[serde(default)]
    skill_weights: HashMap<String, f64>,
}

impl LinearModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        let model: LinearModel = serde_json::from_str(&raw)?;
        debug!(
            locations = model.location_offsets.len(),
            skills = model.skill_weights.len(),
            "Linear model loaded"
        );
        Ok(model)
    }
}

impl SalaryModel for LinearModel {
    fn predict(&self, record: &FeatureRecord) -> Result<f64, ModelError> {
        let mut score = self.intercept
            + self.experience_weight * f64::from(record.experience_encoded)
            + self.seniority_weight * f64::from(record.title_seniority_ordinal)
            + self.remote_weight * f64::from(record.remote_allowed);

        // Unknown groups and columns contribute nothing rather than failing.
        score += self
            .location_offsets
            .get(&record.location_group)
            .copied()
            .unwrap_or(0.0);

        for (column, &active) in &record.skill_indicators {
            if active == 1 {
                score += self.skill_weights.get(column).copied().unwrap_or(0.0);
            }
        }

        if !score.is_finite() {
            return Err(ModelError::Inference(format!(
                "non-finite score for title '{}'",
                record.title_clean
            )));
        }

        Ok(score)
    }
}
