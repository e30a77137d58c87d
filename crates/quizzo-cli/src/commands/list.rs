//! The `quizzo list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use super::StoreArgs;

pub async fn execute(store: StoreArgs) -> Result<()> {
    let (service, config) = store.open()?;
    let quizzes = service.store().list_quizzes().await?;

    if quizzes.is_empty() {
        println!(
            "No quizzes in {}. Run `quizzo publish --quiz <file>` to add one.",
            config.store_dir.display()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Code",
        "Title",
        "Mode",
        "Questions",
        "Attempts",
        "Created",
    ]);

    for quiz in &quizzes {
        let attempts = service.store().attempts_for_quiz(&quiz.id).await?;
        table.add_row(vec![
            Cell::new(&quiz.code),
            Cell::new(&quiz.title),
            Cell::new(quiz.mode),
            Cell::new(quiz.question_count()),
            Cell::new(attempts.len()),
            Cell::new(quiz.created_at.format("%Y-%m-%d %H:%M")),
        ]);
    }

    println!("{table}");
    Ok(())
}
