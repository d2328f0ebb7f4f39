//! Server-rendered pages (maud): layout plus one view per route outcome.

use maud::{html, Markup, DOCTYPE};

use crate::domain::{Evaluation, QuestionRecord};

fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Quizgen" }
                link rel="stylesheet" href="/static/index.css";
            }
            body {
                header {
                    nav {
                        a href="/" { strong { "Quizgen" } }
                    }
                }
                main { (content) }
            }
        }
    }
}

/// Landing page: one form per generation flow.
pub fn index() -> Markup {
    page("Home", html! {
        h1 { "Generate a quiz or assessment" }

        section {
            h2 { "Multiple-choice quiz" }
            form method="post" action="/generate-quiz" enctype="multipart/form-data" {
                label {
                    "Quiz type"
                    select name="quiz_type" {
                        option value="topic" { "From a topic" }
                        option value="image" { "From an image" }
                        option value="pdf" { "From a PDF" }
                    }
                }
                label { "Topic" input type="text" name="topic" placeholder="general knowledge"; }
                label { "Image" input type="file" name="image" accept="image/*"; }
                label { "PDF" input type="file" name="pdf" accept="application/pdf"; }
                button type="submit" { "Generate 10 questions" }
            }
        }

        section {
            h2 { "Interactive quiz (scored)" }
            form method="post" action="/legacy/generate-quiz" enctype="multipart/form-data" {
                label { "Topic" input type="text" name="topic" placeholder="general knowledge"; }
                label { "Image" input type="file" name="image" accept="image/*"; }
                label { "PDF" input type="file" name="pdf" accept="application/pdf"; }
                button type="submit" { "Generate 5 questions" }
            }
        }

        section {
            h2 { "Open-ended assessment" }
            form method="post" action="/generate-assessment" enctype="multipart/form-data" {
                label { "Topic" input type="text" name="assessment_topic" placeholder="general knowledge"; }
                label { "Image" input type="file" name="image" accept="image/*"; }
                label { "PDF" input type="file" name="pdf" accept="application/pdf"; }
                button type="submit" { "Generate assessment" }
            }
        }
    })
}

/// Quiz page with correct answers revealed inline.
pub fn quiz(questions: &[QuestionRecord]) -> Markup {
    page("Quiz", html! {
        h1 { "Generated quiz" }
        @if questions.is_empty() {
            p { "The model returned no questions. Try a narrower topic." }
        }
        ol."questions" {
            @for q in questions {
                li {
                    p."question" { (q.question_text) }
                    ul."choices" {
                        @for choice in &q.choices {
                            li { (choice) }
                        }
                    }
                    @if let Some(correct) = &q.correct_answer {
                        details {
                            summary { "Show answer" }
                            p { (correct) }
                        }
                    }
                }
            }
        }
    })
}

/// Legacy quiz page: radio inputs per question, answer key in a hidden
/// field, submission posted to `/evaluate`.
pub fn legacy_quiz(questions: &[QuestionRecord], correct_answers: &[String]) -> Markup {
    page("Quiz", html! {
        h1 { "Quiz" }
        @if questions.is_empty() {
            p { "The model returned no questions. Try a narrower topic." }
        }
        form method="post" action="/evaluate" {
            input type="hidden" name="correct_answers" value=(correct_answers.join(","));
            @for (i, q) in questions.iter().enumerate() {
                fieldset {
                    legend { (q.question_text) }
                    @for choice in &q.choices {
                        label {
                            input type="radio" name=(format!("answer_{i}")) value=(choice);
                            " " (choice)
                        }
                    }
                }
            }
            button type="submit" { "Submit answers" }
        }
    })
}

/// Open-ended assessment page: plain numbered questions.
pub fn assessment(questions: &[String]) -> Markup {
    page("Assessment", html! {
        h1 { "Generated assessment" }
        @if questions.is_empty() {
            p { "The model returned no questions. Try a narrower topic." }
        }
        ol."questions" {
            @for q in questions {
                li { (q) }
            }
        }
    })
}

/// Score page for the legacy flow.
pub fn result(eval: &Evaluation) -> Markup {
    page("Result", html! {
        h1 { "Score: " (eval.score) " / " (eval.total) }
        ol."feedback" {
            @for f in &eval.feedback {
                li {
                    p { "Your answer: " (f.submitted) }
                    p { "Correct answer: " (f.expected) "." }
                }
            }
        }
    })
}

pub fn error_page(message: &str) -> Markup {
    page("Error", html! {
        h1 { "Something went wrong" }
        p { (message) }
        p { a href="/" { "Back to the generator" } }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QuestionRecord;

    fn record() -> QuestionRecord {
        QuestionRecord {
            question_text: "Q1: X?".into(),
            choices: vec!["Yes".into(), "No".into()],
            correct_answer: None,
        }
    }

    #[test]
    fn legacy_quiz_embeds_answer_key_and_indexed_inputs() {
        let html = legacy_quiz(&[record()], &["Yes".to_string()]).into_string();
        assert!(html.contains(r#"name="correct_answers""#));
        assert!(html.contains(r#"value="Yes""#));
        assert!(html.contains(r#"name="answer_0""#));
        assert!(html.contains(r#"action="/evaluate""#));
    }

    #[test]
    fn quiz_page_reveals_inline_answer_only_when_present() {
        let mut q = record();
        let html = quiz(&[q.clone()]).into_string();
        assert!(!html.contains("Show answer"));
        q.correct_answer = Some("Yes".into());
        let html = quiz(&[q]).into_string();
        assert!(html.contains("Show answer"));
    }

    #[test]
    fn error_page_carries_the_message() {
        let html = error_page("No text found in the PDF.").into_string();
        assert!(html.contains("No text found in the PDF."));
    }
}
