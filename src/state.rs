//! Application state: Gemini client, prompt templates, upload directory.
//!
//! Everything here is constructed once in `main` and shared read-only via
//! `Arc`. Per-request data never lands in this struct; the uploads directory
//! on disk is the only cross-request side effect.

use std::path::PathBuf;

use tracing::{info, instrument};

use crate::config::{AppConfig, Prompts};
use crate::gemini::Gemini;

pub struct AppState {
    pub gemini: Gemini,
    pub prompts: Prompts,
    pub upload_dir: PathBuf,
}

impl AppState {
    /// Build state from an explicit client + config; creates the upload dir.
    #[instrument(level = "info", skip_all)]
    pub fn new(gemini: Gemini, cfg: AppConfig) -> std::io::Result<Self> {
        let upload_dir = PathBuf::from(
            std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
        );
        std::fs::create_dir_all(&upload_dir)?;

        info!(
            target: "quizgen_backend",
            base_url = %gemini.base_url,
            model = %gemini.model,
            upload_dir = %upload_dir.display(),
            "Gemini enabled."
        );

        Ok(Self {
            gemini,
            prompts: cfg.prompts,
            upload_dir,
        })
    }
}
