//! The `quizzo publish` command.

use std::path::PathBuf;

use anyhow::Result;

use quizzo_core::parser::parse_quiz_draft;

use super::StoreArgs;

pub async fn execute(quiz_path: PathBuf, store: StoreArgs) -> Result<()> {
    let draft = parse_quiz_draft(&quiz_path)?;
    let (service, _) = store.open()?;

    let quiz = service.publish(draft).await?;

    println!(
        "Published \"{}\" ({} questions, {})",
        quiz.title,
        quiz.question_count(),
        quiz.mode
    );
    println!("Quiz code: {}", quiz.code);

    Ok(())
}
