//! Core behaviors shared by the HTTP handlers.
//!
//! This includes:
//!   - Choosing and resolving the topic source (image > pdf > raw text)
//!   - Generating quizzes and assessments (prompt, model call, parse)
//!   - Scoring legacy quiz submissions

use std::path::Path;

use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::{Evaluation, QuestionFeedback, QuestionRecord, TopicSource};
use crate::error::QuizError;
use crate::extract::{ocr_image_text, pdf_text, save_upload};
use crate::parser::{parse_assessment, parse_quiz, parse_quiz_with_key};
use crate::prompt::{build_assessment_prompt, build_quiz_prompt};
use crate::state::AppState;
use crate::util::trunc_for_log;

/// Choose which submitted source drives the topic.
/// Image text wins over PDF text, which wins over the raw form field.
pub fn pick_source(
  image: Option<(String, Vec<u8>)>,
  pdf: Option<(String, Vec<u8>)>,
  raw: Option<String>,
) -> TopicSource {
  if let Some((filename, bytes)) = image {
    TopicSource::ImageUpload { filename, bytes }
  } else if let Some((filename, bytes)) = pdf {
    TopicSource::PdfUpload { filename, bytes }
  } else {
    TopicSource::RawText(raw.unwrap_or_default())
  }
}

/// Resolve a `TopicSource` into the plain topic string fed to the prompt.
/// Uploads are persisted first; extraction happens on the persisted file.
#[instrument(level = "info", skip_all)]
pub fn resolve_topic(upload_dir: &Path, source: TopicSource) -> Result<String, QuizError> {
  match source {
    TopicSource::ImageUpload { filename, bytes } => {
      let path = save_upload(upload_dir, &filename, &bytes)?;
      let text = ocr_image_text(&path)?;
      let text = text.trim();
      if text.is_empty() {
        return Err(QuizError::ExtractionEmpty("uploaded image"));
      }
      info!(target: "quiz", %filename, topic_preview = %trunc_for_log(text, 60), "Topic from image OCR");
      Ok(text.to_string())
    }
    TopicSource::PdfUpload { filename, bytes } => {
      let path = save_upload(upload_dir, &filename, &bytes)?;
      let text = pdf_text(&path)?;
      let text = text.trim();
      if text.is_empty() {
        return Err(QuizError::ExtractionEmpty("PDF"));
      }
      info!(target: "quiz", %filename, topic_preview = %trunc_for_log(text, 60), "Topic from PDF text");
      Ok(text.to_string())
    }
    TopicSource::RawText(raw) => {
      let raw = raw.trim();
      if raw.is_empty() {
        Ok("general knowledge".to_string())
      } else {
        Ok(raw.to_string())
      }
    }
  }
}

/// Generate a quiz: prompt, model call, parse with inline correct answers.
#[instrument(level = "info", skip(state, topic), fields(topic_len = topic.len(), count))]
pub async fn generate_quiz(
  state: &AppState,
  topic: &str,
  count: usize,
) -> Result<Vec<QuestionRecord>, QuizError> {
  let quiz_id = Uuid::new_v4();
  let prompt = build_quiz_prompt(&state.prompts, topic, count);
  let reply = state.gemini.generate_text(&prompt).await
    .map_err(QuizError::UpstreamGenerationFailure)?;
  debug!(target: "quiz", %quiz_id, reply_preview = %trunc_for_log(&reply, 120), "Raw model reply");
  let questions = parse_quiz(&reply)?;
  info!(target: "quiz", %quiz_id, requested = count, parsed = questions.len(), "Quiz generated");
  Ok(questions)
}

/// Legacy variant: the flat answer key is kept aside for `/evaluate`.
#[instrument(level = "info", skip(state, topic), fields(topic_len = topic.len(), count))]
pub async fn generate_quiz_with_key(
  state: &AppState,
  topic: &str,
  count: usize,
) -> Result<(Vec<QuestionRecord>, Vec<String>), QuizError> {
  let quiz_id = Uuid::new_v4();
  let prompt = build_quiz_prompt(&state.prompts, topic, count);
  let reply = state.gemini.generate_text(&prompt).await
    .map_err(QuizError::UpstreamGenerationFailure)?;
  debug!(target: "quiz", %quiz_id, reply_preview = %trunc_for_log(&reply, 120), "Raw model reply");
  let (questions, key) = parse_quiz_with_key(&reply)?;
  info!(target: "quiz", %quiz_id, requested = count, parsed = questions.len(), key_len = key.len(), "Quiz generated (legacy)");
  Ok((questions, key))
}

/// Generate open-ended assessment questions, one per non-empty reply line.
#[instrument(level = "info", skip(state, topic), fields(topic_len = topic.len()))]
pub async fn generate_assessment(
  state: &AppState,
  topic: &str,
) -> Result<Vec<String>, QuizError> {
  let prompt = build_assessment_prompt(&state.prompts, topic);
  let reply = state.gemini.generate_text(&prompt).await
    .map_err(QuizError::UpstreamGenerationFailure)?;
  let questions = parse_assessment(&reply);
  info!(target: "quiz", parsed = questions.len(), "Assessment generated");
  Ok(questions)
}

/// Score a legacy submission: exact string equality, position by position.
/// No normalization of case, whitespace, or punctuation.
pub fn score_submission(correct: &[String], submitted: &[String]) -> Evaluation {
  let mut score = 0;
  let mut feedback = Vec::with_capacity(correct.len());
  for (i, expected) in correct.iter().enumerate() {
    let given = submitted.get(i).cloned().unwrap_or_default();
    let matched = given == *expected;
    if matched {
      score += 1;
    }
    feedback.push(QuestionFeedback {
      submitted: given,
      expected: expected.clone(),
      matched,
    });
  }
  Evaluation { score, total: correct.len(), feedback }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn image_wins_over_pdf_and_raw() {
    let src = pick_source(
      Some(("a.png".into(), vec![1])),
      Some(("b.pdf".into(), vec![2])),
      Some("raw topic".into()),
    );
    assert!(matches!(src, TopicSource::ImageUpload { .. }));
  }

  #[test]
  fn pdf_wins_over_raw() {
    let src = pick_source(None, Some(("b.pdf".into(), vec![2])), Some("raw topic".into()));
    assert!(matches!(src, TopicSource::PdfUpload { .. }));
  }

  #[test]
  fn raw_text_is_last_resort() {
    let src = pick_source(None, None, Some("ok".into()));
    assert!(matches!(src, TopicSource::RawText(t) if t == "ok"));
  }

  #[test]
  fn empty_raw_topic_defaults_to_general_knowledge() {
    let t = resolve_topic(Path::new("uploads"), TopicSource::RawText("   ".into()))
      .expect("raw text never fails");
    assert_eq!(t, "general knowledge");
    let t = resolve_topic(Path::new("uploads"), TopicSource::RawText(" physics ".into()))
      .expect("raw text never fails");
    assert_eq!(t, "physics");
  }

  #[test]
  fn scoring_is_exact_and_case_sensitive() {
    let correct: Vec<String> = vec!["Paris".into(), "4".into(), "Blue".into()];
    let submitted: Vec<String> = vec!["paris".into(), "4".into(), "Blue ".into()];
    let eval = score_submission(&correct, &submitted);
    assert_eq!(eval.score, 1);
    assert_eq!(eval.total, 3);
    assert!(!eval.feedback[0].matched);
    assert!(eval.feedback[1].matched);
    assert!(!eval.feedback[2].matched);
  }

  #[test]
  fn missing_submissions_count_as_empty() {
    let correct: Vec<String> = vec!["A".into(), "B".into()];
    let eval = score_submission(&correct, &["A".to_string()]);
    assert_eq!(eval.score, 1);
    assert_eq!(eval.feedback[1].submitted, "");
    assert!(!eval.feedback[1].matched);
  }
}
