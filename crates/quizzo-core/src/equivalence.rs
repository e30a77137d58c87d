//! Answer equivalence: does a submitted answer match a question's canonical
//! answer?
//!
//! Every check is total. A shape that does not fit the question type, an
//! unparseable number or a missing answer is simply "not correct".

use std::collections::BTreeSet;

use crate::model::{AnswerValue, Question, QuestionKind};

/// Check a submitted answer against a question.
///
/// `None` represents an unanswered question and is never correct.
pub fn is_correct(question: &Question, answer: Option<&AnswerValue>) -> bool {
    let Some(answer) = answer else {
        return false;
    };

    match &question.kind {
        QuestionKind::SingleChoice { correct_answer, .. } => {
            matches!(answer, AnswerValue::Choice(i) if i == correct_answer)
        }
        QuestionKind::MultiChoice { correct_answer, .. } => match answer {
            AnswerValue::Choices(selected) => {
                let selected: BTreeSet<usize> = selected.iter().copied().collect();
                !selected.is_empty() && &selected == correct_answer
            }
            _ => false,
        },
        QuestionKind::ShortAnswer { correct_answer } => match answer {
            // No trimming: " Paris" does not match "Paris".
            AnswerValue::Text(text) => text.to_lowercase() == correct_answer.to_lowercase(),
            _ => false,
        },
        QuestionKind::Numerical { correct_answer } => {
            numeric_value(answer).is_some_and(|v| v == *correct_answer)
        }
    }
}

/// Numeric reading of an answer, if it has one.
fn numeric_value(answer: &AnswerValue) -> Option<f64> {
    match answer {
        AnswerValue::Number(n) => Some(*n),
        AnswerValue::Choice(i) => Some(*i as f64),
        // The whole trimmed text must parse; a numeric prefix such as
        // "3abc" is not read as 3.
        AnswerValue::Text(text) => text.trim().parse::<f64>().ok(),
        AnswerValue::Choices(_) => None,
    }
}
