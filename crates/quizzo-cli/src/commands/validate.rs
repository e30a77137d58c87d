//! The `quizzo validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizzo_core::parser::{self, Severity};

pub fn execute(quiz_path: PathBuf) -> Result<()> {
    let drafts = if quiz_path.is_dir() {
        parser::load_quiz_directory(&quiz_path)?
    } else {
        vec![parser::parse_quiz_draft(&quiz_path)?]
    };

    let mut total_errors = 0;
    let mut total_warnings = 0;

    for draft in &drafts {
        println!(
            "Quiz: {} ({} questions, {})",
            draft.title,
            draft.questions.len(),
            draft.mode
        );

        for issue in parser::validate_draft(draft) {
            let prefix = issue
                .question
                .map(|q| format!("  [Q{}]", q + 1))
                .unwrap_or_else(|| "  ".to_string());
            match issue.severity {
                Severity::Error => {
                    total_errors += 1;
                    println!("{prefix} ERROR: {}", issue.message);
                }
                Severity::Warning => {
                    total_warnings += 1;
                    println!("{prefix} WARNING: {}", issue.message);
                }
            }
        }
    }

    anyhow::ensure!(total_errors == 0, "{total_errors} error(s) found");

    if total_warnings == 0 {
        println!("All quizzes valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
