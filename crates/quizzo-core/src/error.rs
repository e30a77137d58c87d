//! Quiz service error types.
//!
//! Scoring and ranking never fail; these cover publishing, lookup and
//! submission. They travel inside `anyhow::Error` so callers can downcast
//! and tell a student mistake from an I/O failure.

use thiserror::Error;

/// Errors raised by the quiz service.
#[derive(Debug, Error)]
pub enum QuizError {
    /// No quiz is published under this code.
    #[error("quiz not found: {0}")]
    QuizNotFound(String),

    /// The student already has an attempt for this quiz.
    #[error("student {student_id} has already attempted quiz {quiz_id}")]
    AlreadyAttempted { quiz_id: String, student_id: String },

    /// The draft failed validation.
    #[error("invalid quiz: {}", .0.join("; "))]
    InvalidQuiz(Vec<String>),

    /// A submitted response carries data that cannot be stored, such as a
    /// time that is not a finite, non-negative number.
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),

    /// No free code was found after several tries.
    #[error("could not allocate a unique quiz code after {0} attempts")]
    CodeSpaceExhausted(u32),
}

impl QuizError {
    /// Returns `true` if the error stems from what the user typed or
    /// submitted, as opposed to a storage problem.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuizError::QuizNotFound(_)
                | QuizError::AlreadyAttempted { .. }
                | QuizError::InvalidQuiz(_)
                | QuizError::InvalidSubmission(_)
        )
    }
}
