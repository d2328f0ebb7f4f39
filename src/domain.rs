//! Domain models used by the backend: question records, topic sources, and
//! the legacy evaluation result.

use serde::Serialize;

/// One parsed multiple-choice question, as recovered from the model reply.
/// Immutable once appended to a result sequence; nothing is persisted.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuestionRecord {
  pub question_text: String,
  pub choices: Vec<String>,
  /// Text of the `A1:` option attributed to this question, when one was seen.
  pub correct_answer: Option<String>,
}

/// Where the topic driving generation came from. Resolved once per request
/// into a plain topic string before prompt construction.
#[derive(Debug)]
pub enum TopicSource {
  RawText(String),
  ImageUpload { filename: String, bytes: Vec<u8> },
  PdfUpload { filename: String, bytes: Vec<u8> },
}

/// Outcome of scoring a legacy quiz submission.
#[derive(Clone, Debug, Serialize)]
pub struct Evaluation {
  pub score: usize,
  pub total: usize,
  pub feedback: Vec<QuestionFeedback>,
}

/// Per-question comparison echoed back on the result page.
#[derive(Clone, Debug, Serialize)]
pub struct QuestionFeedback {
  pub submitted: String,
  pub expected: String,
  pub matched: bool,
}
