//! The `quizzo review` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizzo_core::leaderboard::rank_of;
use quizzo_core::review::{review_attempt, QuestionReview};

use super::StoreArgs;

pub async fn execute(code: String, student_id: String, store: StoreArgs) -> Result<()> {
    let (service, _) = store.open()?;
    let quiz = service.find_by_code(&code).await?;

    let attempt = service
        .attempt_of(&quiz, &student_id)
        .await?
        .ok_or_else(|| {
            anyhow::anyhow!("no attempt by {student_id} for quiz {}", quiz.code)
        })?;

    println!("{} ({})", quiz.title, attempt.student_name);
    print_review(&review_attempt(&quiz, &attempt.responses));
    println!(
        "Score: {}/{} in {}s{}",
        attempt.score,
        quiz.question_count(),
        attempt.total_time_seconds(),
        if attempt.timed_out { " (timed out)" } else { "" }
    );

    let board = service.leaderboard(&quiz).await?;
    if let Some(rank) = rank_of(&board, &student_id) {
        println!("Rank: {rank} of {}", board.len());
    }

    Ok(())
}

/// Print a per-question review table.
pub fn print_review(review: &[QuestionReview]) {
    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Question",
        "Type",
        "Answer",
        "Correct answer",
        "Result",
        "Time",
    ]);

    for q in review {
        table.add_row(vec![
            Cell::new(q.index + 1),
            Cell::new(&q.text),
            Cell::new(&q.question_type),
            Cell::new(&q.student_answer),
            Cell::new(&q.correct_answer),
            Cell::new(if q.is_correct { "correct" } else { "wrong" }),
            Cell::new(format!("{}s", q.time_taken_seconds)),
        ]);
    }

    println!("{table}");
}
