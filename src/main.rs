//! Quizgen · Quiz & Assessment Generator Backend
//!
//! - Axum HTTP API with server-rendered pages (maud)
//! - Google Gemini integration (via environment variables)
//! - Tesseract OCR / PDF text extraction for uploaded sources
//! - Static assets from ./static
//!
//! Important env variables:
//!   PORT          : u16 (default 3000)
//!   GEMINI_API_KEY    : required, grants generateContent access
//!   GEMINI_BASE_URL    : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL  : default "gemini-1.0-pro"
//!   QUIZGEN_CONFIG_PATH  : path to TOML config (prompts + generation tuning)
//!   UPLOAD_DIR    : where uploaded files land (default "uploads")
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod prompt;
mod parser;
mod extract;
mod state;
mod gemini;
mod logic;
mod views;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::config::load_app_config_from_env;
use crate::gemini::Gemini;
use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state explicitly: config, Gemini client, upload dir.
  let cfg = load_app_config_from_env().unwrap_or_default();
  let gemini = Gemini::from_env(cfg.generation.clone())
    .ok_or("GEMINI_API_KEY not set; the generator cannot run without it")?;
  let state = Arc::new(AppState::new(gemini, cfg)?);

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizgen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
