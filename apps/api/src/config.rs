use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Artifact paths default to the repository layout; PORT must parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: String,
    pub metadata_path: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "artifacts/salary_model.json".to_string()),
            metadata_path: std::env::var("METADATA_PATH")
                .unwrap_or_else(|_| "artifacts/app_metadata.json".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
