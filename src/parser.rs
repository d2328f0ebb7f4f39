//! Line-oriented parsing of model replies into question records.
//!
//! A quiz reply is `Qn: ...` question lines each followed by `An: ...`
//! option lines, with `A1:` holding the correct answer. Correct-answer
//! attribution takes the most recently seen `A1:` line at flush time; that
//! relies strictly on line ordering (each question flushes before the next
//! block's `A1:` arrives). A reply with a missing `A1:` or shuffled lines
//! silently inherits the previous block's answer — reproduced as observed,
//! not fixed.

use tracing::debug;

use crate::domain::QuestionRecord;
use crate::error::QuizError;

/// Split one `A`-option line into its text after the first `": "`.
fn option_text(line: &str) -> Result<String, QuizError> {
  line.split_once(": ")
    .map(|(_, rest)| rest.to_string())
    .ok_or_else(|| {
      QuizError::ParseFailure(format!("option line without ': ' separator: {:?}", line))
    })
}

/// Parse a quiz reply, attributing each question its correct answer inline.
pub fn parse_quiz(reply: &str) -> Result<Vec<QuestionRecord>, QuizError> {
  let mut questions = Vec::new();
  let mut current_question: Option<String> = None;
  let mut options: Vec<String> = Vec::new();
  let mut correct_answers: Vec<String> = Vec::new();

  for raw in reply.lines() {
    let line = raw.trim();
    if line.starts_with('Q') {
      // A new question begins: flush the open one first.
      if let Some(q) = current_question.take() {
        questions.push(QuestionRecord {
          question_text: q,
          choices: std::mem::take(&mut options),
          correct_answer: correct_answers.last().cloned(),
        });
      }
      current_question = Some(line.to_string());
    } else if line.starts_with('A') {
      let text = option_text(line)?;
      options.push(text.clone());
      if line.starts_with("A1:") {
        correct_answers.push(text);
      }
    }
  }

  // Append the last question if one is still open.
  if let Some(q) = current_question {
    questions.push(QuestionRecord {
      question_text: q,
      choices: options,
      correct_answer: correct_answers.last().cloned(),
    });
  }

  debug!(target: "quiz", count = questions.len(), "Parsed quiz reply");
  Ok(questions)
}

/// Legacy parse: records carry no inline answer; the flat `A1:` list is
/// returned alongside, for the `/evaluate` comparison step.
pub fn parse_quiz_with_key(
  reply: &str,
) -> Result<(Vec<QuestionRecord>, Vec<String>), QuizError> {
  let mut questions = Vec::new();
  let mut current_question: Option<String> = None;
  let mut options: Vec<String> = Vec::new();
  let mut correct_answers: Vec<String> = Vec::new();

  for raw in reply.lines() {
    let line = raw.trim();
    if line.starts_with('Q') {
      if let Some(q) = current_question.take() {
        questions.push(QuestionRecord {
          question_text: q,
          choices: std::mem::take(&mut options),
          correct_answer: None,
        });
      }
      current_question = Some(line.to_string());
    } else if line.starts_with('A') {
      let text = option_text(line)?;
      options.push(text.clone());
      if line.starts_with("A1:") {
        correct_answers.push(text);
      }
    }
  }

  if let Some(q) = current_question {
    questions.push(QuestionRecord {
      question_text: q,
      choices: options,
      correct_answer: None,
    });
  }

  debug!(target: "quiz", count = questions.len(), key_len = correct_answers.len(), "Parsed quiz reply (legacy)");
  Ok((questions, correct_answers))
}

/// Assessment replies are plain lines; keep each non-empty trimmed line.
pub fn parse_assessment(reply: &str) -> Vec<String> {
  reply.lines()
    .map(str::trim)
    .filter(|l| !l.is_empty())
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn block(n: usize) -> String {
    format!(
      "Q{n}: Question {n}?\nA1: Right {n}.\nA2: Wrong a.\nA3: Wrong b.\nA4: Wrong c.\n"
    )
  }

  #[test]
  fn well_formed_reply_parses_in_order() {
    let reply: String = (1..=10).map(block).collect();
    let qs = parse_quiz(&reply).expect("parse");
    assert_eq!(qs.len(), 10);
    for (i, q) in qs.iter().enumerate() {
      let n = i + 1;
      assert_eq!(q.question_text, format!("Q{n}: Question {n}?"));
      assert_eq!(q.choices.len(), 4);
      assert_eq!(q.correct_answer.as_deref(), Some(format!("Right {n}.").as_str()));
    }
  }

  #[test]
  fn no_question_lines_yields_empty() {
    let qs = parse_quiz("Here are your questions!\n\nEnjoy.").expect("parse");
    assert!(qs.is_empty());
  }

  #[test]
  fn short_block_keeps_a1_as_answer() {
    let qs = parse_quiz("Q1: X?\nA1: Yes\nA2: No").expect("parse");
    assert_eq!(
      qs,
      vec![QuestionRecord {
        question_text: "Q1: X?".into(),
        choices: vec!["Yes".into(), "No".into()],
        correct_answer: Some("Yes".into()),
      }]
    );
  }

  #[test]
  fn missing_a1_inherits_previous_answer() {
    let reply = "Q1: First?\nA1: Alpha\nA2: Beta\nQ2: Second?\nA2: Gamma\nA3: Delta";
    let qs = parse_quiz(reply).expect("parse");
    assert_eq!(qs[0].correct_answer.as_deref(), Some("Alpha"));
    // No A1 in the second block: the last one seen still wins.
    assert_eq!(qs[1].correct_answer.as_deref(), Some("Alpha"));
  }

  #[test]
  fn no_a1_anywhere_leaves_answer_absent() {
    let qs = parse_quiz("Q1: First?\nA2: Beta\nA3: Gamma").expect("parse");
    assert_eq!(qs[0].correct_answer, None);
  }

  #[test]
  fn option_line_without_separator_is_a_parse_failure() {
    let err = parse_quiz("Q1: X?\nA1 Yes").unwrap_err();
    assert!(matches!(err, QuizError::ParseFailure(_)));
  }

  #[test]
  fn lines_are_trimmed_before_prefix_matching() {
    let qs = parse_quiz("  Q1: X?\n\tA1: Yes").expect("parse");
    assert_eq!(qs[0].question_text, "Q1: X?");
    assert_eq!(qs[0].choices, vec!["Yes"]);
  }

  #[test]
  fn legacy_parse_returns_flat_answer_key() {
    let reply: String = (1..=5).map(block).collect();
    let (qs, key) = parse_quiz_with_key(&reply).expect("parse");
    assert_eq!(qs.len(), 5);
    assert!(qs.iter().all(|q| q.correct_answer.is_none()));
    assert_eq!(key, vec!["Right 1.", "Right 2.", "Right 3.", "Right 4.", "Right 5."]);
  }

  #[test]
  fn assessment_lines_keep_only_nonempty() {
    let qs = parse_assessment("1. What is X?\n\n  2. Why Y?  \n");
    assert_eq!(qs, vec!["1. What is X?", "2. Why Y?"]);
  }
}
