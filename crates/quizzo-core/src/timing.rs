//! Per-question time accounting.
//!
//! The quiz clock is read each time a student moves on. A question is
//! charged the clock reading minus everything already charged to earlier
//! questions.

use crate::model::{AnswerValue, QuizMode, Response};

/// Builds the response list of an attempt from clock readings.
#[derive(Debug, Clone)]
pub struct ResponseRecorder {
    mode: QuizMode,
    responses: Vec<Response>,
    charged_seconds: f64,
}

impl ResponseRecorder {
    pub fn new(mode: QuizMode) -> Self {
        Self {
            mode,
            responses: Vec::new(),
            charged_seconds: 0.0,
        }
    }

    /// Seconds already charged to recorded responses.
    pub fn charged_seconds(&self) -> f64 {
        self.charged_seconds
    }

    /// Record an answer given when the clock showed `elapsed_seconds` since
    /// the start. Readings past the limit of a timed test are capped. A
    /// reading that is not a finite number charges nothing.
    pub fn record(
        &mut self,
        question_index: usize,
        answer: Option<AnswerValue>,
        elapsed_seconds: f64,
    ) -> &Response {
        let elapsed = if elapsed_seconds.is_finite() {
            match self.mode.time_limit_seconds() {
                Some(limit) => elapsed_seconds.min(limit),
                None => elapsed_seconds,
            }
        } else {
            self.charged_seconds
        };
        let time_taken_seconds = (elapsed - self.charged_seconds).max(0.0);
        self.charged_seconds += time_taken_seconds;

        self.responses.push(Response {
            question_index,
            selected_answer: answer,
            time_taken_seconds,
        });
        &self.responses[self.responses.len() - 1]
    }

    /// Record an answer given when a countdown showed `remaining_seconds`.
    pub fn record_countdown(
        &mut self,
        question_index: usize,
        answer: Option<AnswerValue>,
        remaining_seconds: f64,
    ) -> &Response {
        let elapsed = self.mode.elapsed_from_countdown(remaining_seconds);
        self.record(question_index, answer, elapsed)
    }

    /// Finish normally.
    pub fn finish(self) -> Vec<Response> {
        self.responses
    }

    /// Finish because the countdown of a timed test hit zero.
    ///
    /// The question on screen is charged with whatever remained of the time
    /// limit. For untimed quizzes there is no limit, so the pending answer is
    /// charged nothing beyond what was already recorded.
    pub fn finish_timed_out(
        mut self,
        pending_index: usize,
        pending_answer: Option<AnswerValue>,
    ) -> Vec<Response> {
        let elapsed = self
            .mode
            .time_limit_seconds()
            .unwrap_or(self.charged_seconds);
        self.record(pending_index, pending_answer, elapsed);
        self.responses
    }
}
