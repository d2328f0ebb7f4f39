//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Form, Multipart, State};
use maud::Markup;
use tracing::{info, instrument};

use crate::error::QuizError;
use crate::logic::*;
use crate::state::AppState;
use crate::views;

/// Fields accepted by the generation forms (multipart).
#[derive(Debug, Default)]
pub struct UploadForm {
  pub quiz_type: Option<String>,
  pub topic: Option<String>,
  pub image: Option<(String, Vec<u8>)>,
  pub pdf: Option<(String, Vec<u8>)>,
}

/// Drain a multipart stream into the known form fields.
/// A file part with an empty client filename counts as absent (browsers send
/// one for an empty file input).
async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, QuizError> {
  let mut form = UploadForm::default();
  while let Some(field) = multipart.next_field().await.map_err(|e| {
    QuizError::SourceReadFailure(format!("failed to read multipart field: {}", e))
  })? {
    let name = field.name().unwrap_or_default().to_string();
    match name.as_str() {
      "quiz_type" => form.quiz_type = Some(text_field(field).await?),
      "topic" | "assessment_topic" => form.topic = Some(text_field(field).await?),
      "image" => form.image = file_field(field).await?,
      "pdf" => form.pdf = file_field(field).await?,
      _ => {}
    }
  }
  Ok(form)
}

async fn text_field(field: Field<'_>) -> Result<String, QuizError> {
  field.text().await.map_err(|e| {
    QuizError::SourceReadFailure(format!("failed to read field data: {}", e))
  })
}

async fn file_field(field: Field<'_>) -> Result<Option<(String, Vec<u8>)>, QuizError> {
  let filename = field.file_name().unwrap_or_default().to_string();
  if filename.is_empty() {
    return Ok(None);
  }
  let bytes = field.bytes().await.map_err(|e| {
    QuizError::SourceReadFailure(format!("failed to read field data: {}", e))
  })?;
  Ok(Some((filename, bytes.to_vec())))
}

#[instrument(level = "info")]
pub async fn http_index() -> Markup {
  views::index()
}

#[instrument(level = "info", skip(state, multipart))]
pub async fn http_generate_quiz(
  State(state): State<Arc<AppState>>,
  multipart: Multipart,
) -> Result<Markup, QuizError> {
  let form = read_upload_form(multipart).await?;
  let quiz_type = form.quiz_type.clone().unwrap_or_else(|| "topic".into());
  let source = pick_source(form.image, form.pdf, form.topic);
  let topic = resolve_topic(&state.upload_dir, source)?;
  let questions = generate_quiz(&state, &topic, 10).await?;
  info!(target: "quiz", %quiz_type, count = questions.len(), "HTTP quiz served");
  Ok(views::quiz(&questions))
}

#[instrument(level = "info", skip(state, multipart))]
pub async fn http_generate_assessment(
  State(state): State<Arc<AppState>>,
  multipart: Multipart,
) -> Result<Markup, QuizError> {
  let form = read_upload_form(multipart).await?;
  let source = pick_source(form.image, form.pdf, form.topic);
  let topic = resolve_topic(&state.upload_dir, source)?;
  let questions = generate_assessment(&state, &topic).await?;
  info!(target: "quiz", count = questions.len(), "HTTP assessment served");
  Ok(views::assessment(&questions))
}

/// Legacy flow: five questions, the answer key rides along to `/evaluate`.
#[instrument(level = "info", skip(state, multipart))]
pub async fn http_generate_quiz_legacy(
  State(state): State<Arc<AppState>>,
  multipart: Multipart,
) -> Result<Markup, QuizError> {
  let form = read_upload_form(multipart).await?;
  let source = pick_source(form.image, form.pdf, form.topic);
  let topic = resolve_topic(&state.upload_dir, source)?;
  let (questions, correct_answers) = generate_quiz_with_key(&state, &topic, 5).await?;
  info!(target: "quiz", count = questions.len(), "HTTP legacy quiz served");
  Ok(views::legacy_quiz(&questions, &correct_answers))
}

#[instrument(level = "info", skip(form))]
pub async fn http_evaluate(
  Form(form): Form<HashMap<String, String>>,
) -> Result<Markup, QuizError> {
  let correct: Vec<String> = form
    .get("correct_answers")
    .ok_or_else(|| QuizError::ParseFailure("missing correct_answers field".into()))?
    .split(',')
    .map(str::to_string)
    .collect();
  let submitted: Vec<String> = (0..correct.len())
    .map(|i| form.get(&format!("answer_{}", i)).cloned().unwrap_or_default())
    .collect();
  let eval = score_submission(&correct, &submitted);
  info!(target: "quiz", score = eval.score, total = eval.total, "HTTP submission evaluated");
  Ok(views::result(&eval))
}
