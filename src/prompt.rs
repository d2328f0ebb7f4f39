//! Prompt construction: topic string in, fixed-template prompt out.
//!
//! The multiple-choice prompt enumerates an example `Qn:`/`An:` block per
//! question so the model locks onto the exact line format the parser scans.
//! No parameterization beyond the topic and the question count.

use crate::config::Prompts;
use crate::util::fill_template;

/// Build the multiple-choice prompt for `count` questions about `topic`.
pub fn build_quiz_prompt(prompts: &Prompts, topic: &str, count: usize) -> String {
  let mut out = fill_template(
    &prompts.quiz_preamble_template,
    &[("topic", topic), ("count", &count.to_string())],
  );
  for n in 1..=count {
    out.push_str(&format!(
      "Q{n}: Question {n}?\nA1: Correct Answer {n}.\nA2: Incorrect Answer 1.\nA3: Incorrect Answer 2.\nA4: Incorrect Answer 3."
    ));
    if n < count {
      out.push('\n');
    }
  }
  out
}

/// Build the open-ended assessment prompt.
pub fn build_assessment_prompt(prompts: &Prompts, topic: &str) -> String {
  fill_template(&prompts.assessment_template, &[("topic", topic)])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::Prompts;

  #[test]
  fn quiz_prompt_embeds_topic_and_enumerates_blocks() {
    let p = build_quiz_prompt(&Prompts::default(), "rust lifetimes", 5);
    assert!(p.contains("Generate 5 multiple-choice quiz questions"));
    assert!(p.contains("'rust lifetimes'"));
    assert!(p.contains("Q1: Question 1?"));
    assert!(p.contains("Q5: Question 5?"));
    assert!(!p.contains("Q6:"));
    assert!(!p.ends_with('\n'));
  }

  #[test]
  fn ten_question_prompt_reaches_q10() {
    let p = build_quiz_prompt(&Prompts::default(), "history", 10);
    assert!(p.contains("Q10: Question 10?"));
  }

  #[test]
  fn assessment_prompt_is_plain() {
    let p = build_assessment_prompt(&Prompts::default(), "photosynthesis");
    assert!(p.contains("'photosynthesis'"));
    assert!(p.contains("open-ended"));
    assert!(!p.contains("{topic}"));
  }
}
