//! Aggregate statistics over a quiz's attempts.

use serde::{Deserialize, Serialize};

use crate::model::{Attempt, Quiz};
use crate::scoring::{find_response, question_outcome};

/// Class-wide statistics for one quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    /// Number of attempts.
    pub attempt_count: usize,
    /// Mean cached score.
    pub mean_score: f64,
    /// Highest cached score.
    pub best_score: usize,
    /// Mean of each attempt's total time.
    pub mean_total_time_seconds: f64,
    /// Per-question breakdown, in question order.
    pub per_question: Vec<QuestionStats>,
}

/// Statistics for a single question across all attempts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionStats {
    pub index: usize,
    /// Attempts that recorded a response for this question.
    pub answered_count: usize,
    /// Attempts that answered it correctly.
    pub correct_count: usize,
    /// `correct_count / attempt_count`, 0 when there are no attempts.
    pub correct_rate: f64,
    /// Mean time over recorded responses, 0 when none.
    pub mean_time_seconds: f64,
}

fn mean(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Compute statistics for a quiz from its attempts.
///
/// Per-question correctness is classified with the same routine the scorer
/// uses; the overall numbers use the cached scores.
pub fn compute_quiz_stats(quiz: &Quiz, attempts: &[Attempt]) -> QuizStats {
    let n = attempts.len();

    let per_question = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let mut answered_count = 0;
            let mut correct_count = 0;
            let mut time_sum = 0.0;

            for attempt in attempts {
                let response = find_response(&attempt.responses, index);
                if let Some(r) = response {
                    answered_count += 1;
                    time_sum += r.time_taken_seconds;
                }
                if question_outcome(question, response) {
                    correct_count += 1;
                }
            }

            QuestionStats {
                index,
                answered_count,
                correct_count,
                correct_rate: mean(correct_count as f64, n),
                mean_time_seconds: mean(time_sum, answered_count),
            }
        })
        .collect();

    QuizStats {
        attempt_count: n,
        mean_score: mean(attempts.iter().map(|a| a.score as f64).sum(), n),
        best_score: attempts.iter().map(|a| a.score).max().unwrap_or(0),
        mean_total_time_seconds: mean(attempts.iter().map(Attempt::total_time_seconds).sum(), n),
        per_question,
    }
}
