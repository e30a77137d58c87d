//! The `quizzo submit` command.

use std::path::PathBuf;

use anyhow::Result;

use quizzo_core::leaderboard::rank_of;
use quizzo_core::parser::parse_response_sheet;
use quizzo_core::service::Submission;

use super::StoreArgs;

pub async fn execute(
    code: String,
    student_id: String,
    student_name: String,
    responses_path: PathBuf,
    timed_out: bool,
    store: StoreArgs,
) -> Result<()> {
    let mut sheet = parse_response_sheet(&responses_path)?;
    sheet.timed_out |= timed_out;

    let (service, _) = store.open()?;
    let quiz = service.find_by_code(&code).await?;

    let submission = Submission {
        student_id,
        student_name,
        timed_out: sheet.timed_out,
        responses: sheet.into_responses(quiz.mode),
    };
    let attempt = service.submit(&quiz, submission).await?;

    println!(
        "Score: {}/{} in {}s",
        attempt.score,
        quiz.question_count(),
        attempt.total_time_seconds()
    );

    let board = service.leaderboard(&quiz).await?;
    if let Some(rank) = rank_of(&board, &attempt.student_id) {
        println!("Rank: {rank} of {}", board.len());
    }

    Ok(())
}
