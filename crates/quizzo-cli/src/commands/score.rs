//! The `quizzo score` command: offline scoring of a response sheet.

use std::path::PathBuf;

use anyhow::Result;

use quizzo_core::parser::{has_errors, parse_quiz_draft, parse_response_sheet, validate_draft};
use quizzo_core::review::review_responses;
use quizzo_core::scoring::{score, total_time_seconds};

use super::review::print_review;

pub fn execute(quiz_path: PathBuf, responses_path: PathBuf) -> Result<()> {
    let draft = parse_quiz_draft(&quiz_path)?;
    anyhow::ensure!(
        !has_errors(&validate_draft(&draft)),
        "{} is not a valid quiz; run `quizzo validate --quiz {}`",
        quiz_path.display(),
        quiz_path.display()
    );

    let sheet = parse_response_sheet(&responses_path)?;
    let timed_out = sheet.timed_out;
    let responses = sheet.into_responses(draft.mode);

    print_review(&review_responses(&draft.questions, &responses));
    println!(
        "Score: {}/{} in {}s{}",
        score(&draft.questions, &responses),
        draft.questions.len(),
        total_time_seconds(&responses),
        if timed_out { " (timed out)" } else { "" }
    );

    Ok(())
}
