//! Per-question review of an attempt.

use serde::{Deserialize, Serialize};

use crate::model::{AnswerValue, Question, QuestionKind, Quiz, Response};
use crate::scoring::{find_response, question_outcome};

/// Shown when a question has no usable answer.
pub const NOT_ANSWERED: &str = "Not Answered";

/// How one question went for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionReview {
    /// 0-based question index.
    pub index: usize,
    pub text: String,
    /// Question type as written in quiz files, e.g. `multi-choice`.
    pub question_type: String,
    /// The student's answer as display text.
    pub student_answer: String,
    /// The canonical answer as display text.
    pub correct_answer: String,
    pub is_correct: bool,
    /// Seconds spent, 0 when there is no response.
    pub time_taken_seconds: f64,
}

/// Review every question of a quiz against a set of responses.
pub fn review_attempt(quiz: &Quiz, responses: &[Response]) -> Vec<QuestionReview> {
    review_responses(&quiz.questions, responses)
}

/// Review a question list directly, for drafts that were never published.
pub fn review_responses(questions: &[Question], responses: &[Response]) -> Vec<QuestionReview> {
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let response = find_response(responses, index);
            QuestionReview {
                index,
                text: question.text.clone(),
                question_type: question.kind.type_name().to_string(),
                student_answer: display_answer(
                    question,
                    response.and_then(|r| r.selected_answer.as_ref()),
                ),
                correct_answer: display_correct_answer(question),
                is_correct: question_outcome(question, response),
                time_taken_seconds: response.map_or(0.0, |r| r.time_taken_seconds),
            }
        })
        .collect()
}

fn option_label(options: &[String], index: usize) -> Option<&str> {
    options.get(index).map(String::as_str)
}

fn join_labels<'a>(options: &[String], indices: impl Iterator<Item = &'a usize>) -> String {
    indices
        .filter_map(|&i| option_label(options, i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.0}")
    } else {
        n.to_string()
    }
}

/// Render a submitted answer in the terms of the question.
pub fn display_answer(question: &Question, answer: Option<&AnswerValue>) -> String {
    let rendered = match (&question.kind, answer) {
        (_, None) => None,
        (QuestionKind::SingleChoice { options, .. }, Some(AnswerValue::Choice(i))) => {
            option_label(options, *i).map(str::to_string)
        }
        (QuestionKind::MultiChoice { options, .. }, Some(AnswerValue::Choices(indices))) => {
            Some(join_labels(options, indices.iter())).filter(|s| !s.is_empty())
        }
        (QuestionKind::SingleChoice { .. } | QuestionKind::MultiChoice { .. }, Some(_)) => None,
        (_, Some(AnswerValue::Text(text))) => Some(text.clone()).filter(|s| !s.is_empty()),
        (_, Some(AnswerValue::Number(n))) => Some(format_number(*n)),
        (_, Some(AnswerValue::Choice(i))) => Some(i.to_string()),
        (_, Some(AnswerValue::Choices(indices))) => Some(
            indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        ),
    };
    rendered.unwrap_or_else(|| NOT_ANSWERED.to_string())
}

/// Render a question's canonical answer.
pub fn display_correct_answer(question: &Question) -> String {
    match &question.kind {
        QuestionKind::SingleChoice {
            options,
            correct_answer,
        } => option_label(options, *correct_answer)
            .unwrap_or_default()
            .to_string(),
        QuestionKind::MultiChoice {
            options,
            correct_answer,
        } => join_labels(options, correct_answer.iter()),
        QuestionKind::ShortAnswer { correct_answer } => correct_answer.clone(),
        QuestionKind::Numerical { correct_answer } => format_number(*correct_answer),
    }
}
