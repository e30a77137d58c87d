//! HTML leaderboard generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use quizzo_core::report::LeaderboardReport;
use quizzo_core::statistics::QuestionStats;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML page from a leaderboard report.
pub fn generate_html(report: &LeaderboardReport) -> String {
    let mut html = String::new();
    let total = report.quiz.question_count;

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>quizzo leaderboard: {}</title>\n",
        html_escape(&report.quiz.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&report.quiz.title)));
    html.push_str(&format!(
        "<p class=\"meta\">Code <strong>{}</strong> | {} | {} questions | {} attempts | {}</p>\n",
        html_escape(&report.quiz.code),
        html_escape(&report.quiz.mode),
        total,
        report.stats.attempt_count,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Leaderboard
    html.push_str("<section class=\"leaderboard\">\n");
    html.push_str("<h2>Leaderboard</h2>\n");
    if report.entries.is_empty() {
        html.push_str("<p class=\"empty\">No attempts yet.</p>\n");
    } else {
        html.push_str("<table id=\"leaderboard\">\n");
        html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Rank</th><th onclick=\"sortTable(1)\">Student</th><th onclick=\"sortTable(2)\">Score</th><th onclick=\"sortTable(3)\">Time (s)</th></tr></thead>\n");
        html.push_str("<tbody>\n");
        for e in &report.entries {
            let class = if e.rank <= 3 { "podium" } else { "" };
            let flag = if e.timed_out {
                " <span class=\"timed-out\">timed out</span>"
            } else {
                ""
            };
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td>{}{}</td><td>{}/{}</td><td>{}</td></tr>\n",
                class,
                e.rank,
                html_escape(&e.student_name),
                flag,
                e.score,
                total,
                e.total_time_seconds
            ));
        }
        html.push_str("</tbody></table>\n");
    }
    html.push_str("</section>\n");

    // Per-question breakdown
    html.push_str("<section class=\"questions\">\n");
    html.push_str("<h2>Questions</h2>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Mean score {:.2}/{} | best {} | mean time {:.1}s</p>\n",
        report.stats.mean_score,
        total,
        report.stats.best_score,
        report.stats.mean_total_time_seconds
    ));
    if !report.stats.per_question.is_empty() {
        html.push_str(&generate_bar_chart(&report.stats.per_question));
    }
    html.push_str("</section>\n");

    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML leaderboard to a file.
pub fn write_html_report(report: &LeaderboardReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Horizontal bars of the correct rate per question.
fn generate_bar_chart(per_question: &[QuestionStats]) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 60;

    let total_height = per_question.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, q) in per_question.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (q.correct_rate * max_width as f64) as usize;

        let color = if q.correct_rate >= 0.8 {
            "#22c55e"
        } else if q.correct_rate >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">Q{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            q.index + 1
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.0}% ({}/{})</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            q.correct_rate * 100.0,
            q.correct_count,
            q.answered_count
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --podium: #fef9c3; --warn: #b45309; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --podium: #713f12; --warn: #fbbf24; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, .empty { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.podium { background: var(--podium); }
.timed-out { color: var(--warn); font-size: 0.8rem; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('leaderboard');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = isNaN(na) || isNaN(nb) ? va.localeCompare(vb) : na - nb;
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
