//! Loading generator configuration (prompts + generation tuning) from TOML.
//!
//! See `AppConfig` and `Prompts` for expected schema.

use serde::Deserialize;
use tracing::{info, error};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub generation: Generation,
}

/// Generation parameters forwarded verbatim to the Gemini API.
/// Defaults match what the service has always sent.
#[derive(Clone, Debug, Deserialize)]
pub struct Generation {
  #[serde(default = "default_temperature")]
  pub temperature: f32,
  #[serde(default = "default_top_p")]
  pub top_p: f32,
  #[serde(default = "default_max_output_tokens")]
  pub max_output_tokens: u32,
}

fn default_temperature() -> f32 { 0.9 }
fn default_top_p() -> f32 { 1.0 }
fn default_max_output_tokens() -> u32 { 2048 }

impl Default for Generation {
  fn default() -> Self {
    Self {
      temperature: default_temperature(),
      top_p: default_top_p(),
      max_output_tokens: default_max_output_tokens(),
    }
  }
}

/// Prompt templates used when talking to Gemini. Defaults reproduce the fixed
/// wording the service ships with; override them in TOML to tune phrasing.
/// `{topic}` and `{count}` are the only placeholders.
#[derive(Clone, Debug, Deserialize)]
pub struct Prompts {
  pub quiz_preamble_template: String,
  pub assessment_template: String,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      quiz_preamble_template: "Generate {count} multiple-choice quiz questions on the topic '{topic}'. Each question should have 4 answer options, one of which is correct. Format the output as follows:\n".into(),
      assessment_template: "Generate 10 open-ended assessment questions on the topic '{topic}'. Each question should be in plain text and not require any formatting.".into(),
    }
  }
}

/// Attempt to load `AppConfig` from QUIZGEN_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_app_config_from_env() -> Option<AppConfig> {
  let path = std::env::var("QUIZGEN_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<AppConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quizgen_backend", %path, "Loaded generator config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quizgen_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "quizgen_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
