//! Attempt scoring.
//!
//! One point per correctly answered question. Both the full scorer and the
//! per-question review go through [`question_outcome`], so a question is
//! classified the same way everywhere.

use crate::equivalence::is_correct;
use crate::model::{Question, Response};

/// Find the response recorded for a question.
///
/// Responses may be sparse or out of order, so this matches on
/// `question_index` rather than position. The first match wins.
pub fn find_response(responses: &[Response], question_index: usize) -> Option<&Response> {
    responses.iter().find(|r| r.question_index == question_index)
}

/// Whether `response` answers `question` correctly. A missing response is
/// incorrect.
pub fn question_outcome(question: &Question, response: Option<&Response>) -> bool {
    response.is_some_and(|r| is_correct(question, r.selected_answer.as_ref()))
}

/// Score a set of responses against a list of questions.
///
/// The result is always in `0..=questions.len()`. Responses pointing past
/// the last question are ignored.
pub fn score(questions: &[Question], responses: &[Response]) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| question_outcome(q, find_response(responses, *i)))
        .count()
}

/// Per-question correctness, in question order.
pub fn outcomes(questions: &[Question], responses: &[Response]) -> Vec<bool> {
    questions
        .iter()
        .enumerate()
        .map(|(i, q)| question_outcome(q, find_response(responses, i)))
        .collect()
}

/// Total seconds spent across all responses.
pub fn total_time_seconds(responses: &[Response]) -> f64 {
    responses.iter().map(|r| r.time_taken_seconds).sum()
}
