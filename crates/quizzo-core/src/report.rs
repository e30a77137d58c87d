//! Leaderboard report types with JSON persistence and markdown output.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::leaderboard::RankedAttempt;
use crate::model::{Attempt, Quiz};
use crate::statistics::{compute_quiz_stats, QuizStats};

/// A leaderboard snapshot for one quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// Summary of the quiz.
    pub quiz: QuizSummary,
    /// Ranked entries, best first.
    pub entries: Vec<LeaderboardEntry>,
    /// Aggregate statistics.
    pub stats: QuizStats,
}

/// Summary of a quiz (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub title: String,
    pub code: String,
    pub mode: String,
    pub question_count: usize,
}

/// One row of the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub student_id: String,
    pub student_name: String,
    pub score: usize,
    pub total_time_seconds: f64,
    pub timed_out: bool,
}

impl From<&RankedAttempt> for LeaderboardEntry {
    fn from(r: &RankedAttempt) -> Self {
        Self {
            rank: r.rank,
            student_id: r.attempt.student_id.clone(),
            student_name: r.attempt.student_name.clone(),
            score: r.attempt.score,
            total_time_seconds: r.total_time_seconds,
            timed_out: r.attempt.timed_out,
        }
    }
}

impl LeaderboardReport {
    /// Build a report from a quiz and its ranked attempts.
    pub fn new(quiz: &Quiz, ranked: &[RankedAttempt]) -> Self {
        let attempts: Vec<Attempt> = ranked.iter().map(|r| r.attempt.clone()).collect();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            quiz: QuizSummary {
                id: quiz.id.clone(),
                title: quiz.title.clone(),
                code: quiz.code.clone(),
                mode: quiz.mode.to_string(),
                question_count: quiz.questions.len(),
            },
            entries: ranked.iter().map(LeaderboardEntry::from).collect(),
            stats: compute_quiz_stats(quiz, &attempts),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: LeaderboardReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the leaderboard as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## Leaderboard: {}\n\n", self.quiz.title));
        md.push_str(&format!(
            "**Code:** {} | **Mode:** {} | **Attempts:** {} | **Mean score:** {:.2}/{}\n\n",
            self.quiz.code,
            self.quiz.mode,
            self.stats.attempt_count,
            self.stats.mean_score,
            self.quiz.question_count
        ));

        if self.entries.is_empty() {
            md.push_str("No attempts yet.\n");
            return md;
        }

        md.push_str("| Rank | Student | Score | Time |\n");
        md.push_str("|------|---------|-------|------|\n");
        for e in &self.entries {
            md.push_str(&format!(
                "| {} | {}{} | {}/{} | {}s |\n",
                e.rank,
                e.student_name,
                if e.timed_out { " (timed out)" } else { "" },
                e.score,
                self.quiz.question_count,
                e.total_time_seconds
            ));
        }
        md.push('\n');

        md.push_str("### Questions\n\n");
        md.push_str("| # | Answered | Correct | Correct % | Mean time |\n");
        md.push_str("|---|----------|---------|-----------|-----------|\n");
        for q in &self.stats.per_question {
            md.push_str(&format!(
                "| {} | {} | {} | {:.1}% | {:.1}s |\n",
                q.index + 1,
                q.answered_count,
                q.correct_count,
                q.correct_rate * 100.0,
                q.mean_time_seconds
            ));
        }

        md
    }
}
