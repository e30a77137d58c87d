//! Quiz service: publishing, joining by code, submitting and ranking.
//!
//! This is the glue between the pure scoring core and a [`QuizStore`].
//! Duplicate-attempt prevention lives here, not in the scorer.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::code::{
    generate_quiz_code, is_well_formed_code, normalize_quiz_code, DEFAULT_CODE_LENGTH,
};
use crate::error::QuizError;
use crate::leaderboard::{rank, RankedAttempt};
use crate::model::{Attempt, Quiz, QuizDraft, Response};
use crate::parser::{validate_draft, Severity};
use crate::scoring::score;
use crate::store::QuizStore;

/// How many random codes to try before giving up.
const MAX_CODE_ATTEMPTS: u32 = 16;

/// A student's finished response set, ready to be scored.
#[derive(Debug, Clone)]
pub struct Submission {
    pub student_id: String,
    pub student_name: String,
    pub responses: Vec<Response>,
    pub timed_out: bool,
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct QuizServiceConfig {
    /// Length of generated quiz codes.
    pub code_length: usize,
}

impl Default for QuizServiceConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
        }
    }
}

/// Quiz operations over a store.
pub struct QuizService {
    store: Arc<dyn QuizStore>,
    config: QuizServiceConfig,
}

impl QuizService {
    pub fn new(store: Arc<dyn QuizStore>, config: QuizServiceConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &Arc<dyn QuizStore> {
        &self.store
    }

    /// Validate a draft and publish it under a fresh id and unused code.
    pub async fn publish(&self, draft: QuizDraft) -> Result<Quiz> {
        let errors: Vec<String> = validate_draft(&draft)
            .into_iter()
            .filter(|i| i.severity == Severity::Error)
            .map(|i| match i.question {
                Some(q) => format!("question {}: {}", q + 1, i.message),
                None => i.message,
            })
            .collect();
        if !errors.is_empty() {
            return Err(QuizError::InvalidQuiz(errors).into());
        }

        let code = self.allocate_code().await?;
        let quiz = Quiz::from_draft(draft, Uuid::new_v4().to_string(), code, Utc::now());
        self.store.insert_quiz(&quiz).await?;

        tracing::info!(
            quiz_id = %quiz.id,
            code = %quiz.code,
            questions = quiz.questions.len(),
            "published quiz"
        );
        Ok(quiz)
    }

    async fn allocate_code(&self) -> Result<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = generate_quiz_code(self.config.code_length);
            if self.store.find_quiz_by_code(&code).await?.is_none() {
                return Ok(code);
            }
            tracing::debug!(%code, "quiz code already taken, retrying");
        }
        Err(QuizError::CodeSpaceExhausted(MAX_CODE_ATTEMPTS).into())
    }

    /// Look up a quiz by a code as typed by a student.
    pub async fn find_by_code(&self, code: &str) -> Result<Quiz> {
        let code = normalize_quiz_code(code);
        if !is_well_formed_code(&code) {
            return Err(QuizError::QuizNotFound(code).into());
        }
        self.store
            .find_quiz_by_code(&code)
            .await?
            .ok_or_else(|| QuizError::QuizNotFound(code).into())
    }

    /// Score and persist a student's submission.
    ///
    /// A student gets one attempt per quiz. The score is computed once here
    /// and cached on the attempt. Every response time must be a finite,
    /// non-negative number of seconds.
    pub async fn submit(&self, quiz: &Quiz, submission: Submission) -> Result<Attempt> {
        if let Some(bad) = submission
            .responses
            .iter()
            .find(|r| !r.time_taken_seconds.is_finite() || r.time_taken_seconds < 0.0)
        {
            return Err(QuizError::InvalidSubmission(format!(
                "question {} has time {} seconds",
                bad.question_index, bad.time_taken_seconds
            ))
            .into());
        }

        if self
            .store
            .find_attempt(&quiz.id, &submission.student_id)
            .await?
            .is_some()
        {
            return Err(QuizError::AlreadyAttempted {
                quiz_id: quiz.id.clone(),
                student_id: submission.student_id,
            }
            .into());
        }

        let out_of_range = submission
            .responses
            .iter()
            .filter(|r| r.question_index >= quiz.questions.len())
            .count();
        if out_of_range > 0 {
            tracing::warn!(
                quiz_id = %quiz.id,
                student_id = %submission.student_id,
                out_of_range,
                "submission has responses for unknown questions; they score zero"
            );
        }

        let attempt = Attempt {
            id: Uuid::new_v4().to_string(),
            quiz_id: quiz.id.clone(),
            score: score(&quiz.questions, &submission.responses),
            student_id: submission.student_id,
            student_name: submission.student_name,
            responses: submission.responses,
            timed_out: submission.timed_out,
            submitted_at: Utc::now(),
        };
        self.store.insert_attempt(&attempt).await?;

        tracing::info!(
            quiz_id = %quiz.id,
            student_id = %attempt.student_id,
            score = attempt.score,
            total = quiz.questions.len(),
            "attempt submitted"
        );
        Ok(attempt)
    }

    /// Current leaderboard for a quiz, recomputed from all stored attempts.
    pub async fn leaderboard(&self, quiz: &Quiz) -> Result<Vec<RankedAttempt>> {
        let attempts = self.store.attempts_for_quiz(&quiz.id).await?;
        Ok(rank(&attempts))
    }

    /// A student's stored attempt.
    pub async fn attempt_of(&self, quiz: &Quiz, student_id: &str) -> Result<Option<Attempt>> {
        self.store.find_attempt(&quiz.id, student_id).await
    }
}
