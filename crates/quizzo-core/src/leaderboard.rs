//! Leaderboard ranking.
//!
//! Attempts are ordered by score (higher first), then by total time spent
//! (lower first). The sort is stable, and ranks are sequential positions:
//! two attempts with identical score and time still get distinct ranks.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::Attempt;

/// An attempt together with its leaderboard position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAttempt {
    /// 1-based position in the leaderboard.
    pub rank: usize,
    /// Sum of `time_taken_seconds` over the attempt's responses.
    pub total_time_seconds: f64,
    pub attempt: Attempt,
}

/// Leaderboard ordering of two attempts, by precomputed total time.
fn compare(a: (&Attempt, f64), b: (&Attempt, f64)) -> Ordering {
    b.0.score.cmp(&a.0.score).then_with(|| a.1.total_cmp(&b.1))
}

/// Rank a collection of attempts.
///
/// The input is left untouched; the result holds copies. Attempts that tie
/// on both keys keep their input order.
pub fn rank(attempts: &[Attempt]) -> Vec<RankedAttempt> {
    let mut keyed: Vec<(&Attempt, f64)> = attempts
        .iter()
        .map(|a| (a, a.total_time_seconds()))
        .collect();

    // `sort_by` is stable.
    keyed.sort_by(|a, b| compare(*a, *b));

    keyed
        .into_iter()
        .enumerate()
        .map(|(i, (attempt, total_time_seconds))| RankedAttempt {
            rank: i + 1,
            total_time_seconds,
            attempt: attempt.clone(),
        })
        .collect()
}

/// Look up a student's rank in an already ranked leaderboard.
pub fn rank_of(ranked: &[RankedAttempt], student_id: &str) -> Option<usize> {
    ranked
        .iter()
        .find(|r| r.attempt.student_id == student_id)
        .map(|r| r.rank)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerValue, Response};
    use chrono::Utc;

    fn attempt(id: &str, score: usize, times: &[f64]) -> Attempt {
        Attempt {
            id: id.into(),
            quiz_id: "quiz".into(),
            student_id: format!("student-{id}"),
            student_name: id.to_uppercase(),
            responses: times
                .iter()
                .enumerate()
                .map(|(i, t)| Response::new(i, AnswerValue::Choice(0), *t))
                .collect(),
            score,
            timed_out: false,
            submitted_at: Utc::now(),
        }
    }

    fn ranks_by_id(ranked: &[RankedAttempt]) -> Vec<(&str, usize)> {
        ranked
            .iter()
            .map(|r| (r.attempt.id.as_str(), r.rank))
            .collect()
    }

    #[test]
    fn score_then_time() {
        let attempts = vec![
            attempt("a", 5, &[10.0]),
            attempt("b", 5, &[5.0]),
            attempt("c", 3, &[1.0]),
        ];
        let ranked = rank(&attempts);
        assert_eq!(ranks_by_id(&ranked), vec![("b", 1), ("a", 2), ("c", 3)]);

        // Ranks per input position.
        let by_input: Vec<usize> = attempts
            .iter()
            .map(|a| rank_of(&ranked, &a.student_id).unwrap())
            .collect();
        assert_eq!(by_input, vec![2, 1, 3]);
    }

    #[test]
    fn total_time_sums_all_responses() {
        let attempts = vec![attempt("a", 2, &[4.0, 4.0, 4.0]), attempt("b", 2, &[11.0])];
        let ranked = rank(&attempts);
        assert_eq!(ranks_by_id(&ranked), vec![("b", 1), ("a", 2)]);
        assert_eq!(ranked[1].total_time_seconds, 12.0);
    }

    #[test]
    fn exact_ties_keep_input_order_with_distinct_ranks() {
        let attempts = vec![
            attempt("top", 9, &[1.0]),
            attempt("x", 4, &[3.0, 3.0]),
            attempt("y", 4, &[6.0]),
            attempt("z", 4, &[2.0, 4.0]),
        ];
        let ranked = rank(&attempts);
        assert_eq!(
            ranks_by_id(&ranked),
            vec![("top", 1), ("x", 2), ("y", 3), ("z", 4)]
        );
    }

    #[test]
    fn empty_input_gives_empty_leaderboard() {
        assert!(rank(&[]).is_empty());
    }

    #[test]
    fn input_is_not_mutated() {
        let attempts = vec![attempt("slow", 1, &[9.0]), attempt("fast", 1, &[1.0])];
        let before = attempts.clone();
        let _ = rank(&attempts);
        assert_eq!(attempts, before);
    }

    #[test]
    fn higher_score_beats_faster_time() {
        let attempts = vec![attempt("quick", 1, &[0.5]), attempt("thorough", 2, &[500.0])];
        let ranked = rank(&attempts);
        assert_eq!(ranked[0].attempt.id, "thorough");
    }

    #[test]
    fn rank_of_unknown_student() {
        let ranked = rank(&[attempt("a", 1, &[1.0])]);
        assert_eq!(rank_of(&ranked, "student-a"), Some(1));
        assert_eq!(rank_of(&ranked, "nobody"), None);
    }

    #[test]
    fn ranking_is_deterministic() {
        let attempts = vec![
            attempt("a", 3, &[2.0]),
            attempt("b", 3, &[2.0]),
            attempt("c", 1, &[0.0]),
        ];
        assert_eq!(rank(&attempts), rank(&attempts));
    }
}
