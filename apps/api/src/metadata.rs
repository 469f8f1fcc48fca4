//! Metadata store — static reference data the salary model was trained
//! against: experience levels, location groups, selectable skills, and the
//! skill-indicator columns every scoring record must carry.
//!
//! Loaded once at startup from a JSON artifact and shared read-only via
//! `AppState`. Entries the rest of the service depends on are defaulted at
//! load time so a thin artifact cannot take the service down.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Canonical experience-level labels, indexed by ordinal 0–4.
pub const LEVEL_LABELS: [&str; 5] = [
    "Internship",
    "Entry Level",
    "Mid Level",
    "Senior Level",
    "Executive",
];

/// Skills offered when the artifact ships without a selectable skill list.
const FALLBACK_SKILLS: [&str; 5] = ["Python", "SQL", "Java", "AWS", "Excel"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    /// Experience label → level ordinal (0–4).
    pub experience_map: HashMap<String, u8>,
    /// Location groups the model recognizes, in training enumeration order.
    pub locations: Vec<String>,
    /// Skills offered for selection on the profile form.
    #[serde(default)]
    pub skill_list: Vec<String>,
    /// Binary skill-indicator columns the model expects on every record.
    #[serde(default)]
    pub skill_columns: Vec<String>,
}

impl AppMetadata {
    /// Loads the metadata artifact, applies safety defaults, and rejects
    /// artifacts the engine cannot work with.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read metadata artifact {}", path.display()))?;
        let mut metadata: AppMetadata = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse metadata artifact {}", path.display()))?;

        metadata.apply_defaults();
        metadata.validate()?;
        Ok(metadata)
    }

    fn apply_defaults(&mut self) {
        if !self.experience_map.contains_key("Internship") {
            warn!("Metadata artifact lacks 'Internship'; defaulting it to ordinal 0");
            self.experience_map.insert("Internship".to_string(), 0);
        }
        if self.skill_list.is_empty() {
            warn!("Metadata artifact lacks a skill list; using fallback skills");
            self.skill_list = FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect();
        }
    }

    fn validate(&self) -> Result<()> {
        for (label, &ordinal) in &self.experience_map {
            if ordinal > 4 {
                bail!("Experience level '{label}' has out-of-range ordinal {ordinal} (must be 0–4)");
            }
        }
        if self.locations.is_empty() {
            bail!("Metadata artifact lists no locations");
        }
        Ok(())
    }

    /// Experience labels present in the artifact, in canonical ordinal order.
    pub fn experience_levels(&self) -> Vec<&str> {
        LEVEL_LABELS
            .iter()
            .copied()
            .filter(|label| self.experience_map.contains_key(*label))
            .collect()
    }

    /// Ordinal for an experience label, if the label is known.
    pub fn level_of(&self, label: &str) -> Option<u8> {
        self.experience_map.get(label).copied()
    }

    pub fn has_location(&self, location: &str) -> bool {
        self.locations.iter().any(|l| l == location)
    }
}
