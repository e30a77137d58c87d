//! The `quizzo leaderboard` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizzo_core::leaderboard::{rank_of, RankedAttempt};
use quizzo_core::model::Quiz;
use quizzo_core::report::LeaderboardReport;
use quizzo_report::html::{generate_html, write_html_report};

use super::StoreArgs;

pub async fn execute(
    code: String,
    student_id: Option<String>,
    format: Option<String>,
    output: Option<PathBuf>,
    store: StoreArgs,
) -> Result<()> {
    let (service, config) = store.open()?;
    let quiz = service.find_by_code(&code).await?;
    let ranked = service.leaderboard(&quiz).await?;

    let format = format.unwrap_or(config.default_format);
    let report = LeaderboardReport::new(&quiz, &ranked);

    match (format.as_str(), &output) {
        ("json", Some(path)) => report.save_json(path)?,
        ("html", Some(path)) => write_html_report(&report, path)?,
        (fmt, _) => {
            let rendered = match fmt {
                "text" => render_table(&quiz, &ranked),
                "json" => serde_json::to_string_pretty(&report)?,
                "markdown" | "md" => report.to_markdown(),
                "html" => generate_html(&report),
                other => {
                    anyhow::bail!("unknown format: {other} (expected text, json, markdown or html)")
                }
            };
            match &output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, rendered)?;
                }
                None => println!("{rendered}"),
            }
        }
    }
    if let Some(path) = &output {
        eprintln!("Leaderboard written to: {}", path.display());
    }

    if let Some(id) = student_id {
        match rank_of(&ranked, &id) {
            Some(rank) => println!("Your rank: {rank} of {}", ranked.len()),
            None => println!("{id} has not attempted this quiz"),
        }
    }

    Ok(())
}

fn render_table(quiz: &Quiz, ranked: &[RankedAttempt]) -> String {
    if ranked.is_empty() {
        return format!("{} ({}): no attempts yet.", quiz.title, quiz.code);
    }

    let mut table = Table::new();
    table.set_header(vec!["Rank", "Student", "Score", "Time"]);

    for r in ranked {
        let name = if r.attempt.timed_out {
            format!("{} (timed out)", r.attempt.student_name)
        } else {
            r.attempt.student_name.clone()
        };
        table.add_row(vec![
            Cell::new(r.rank),
            Cell::new(name),
            Cell::new(format!("{}/{}", r.attempt.score, quiz.question_count())),
            Cell::new(format!("{}s", r.total_time_seconds)),
        ]);
    }

    format!("{} ({})\n{table}", quiz.title, quiz.code)
}
