//! quizzo-report: Leaderboard report output formats.
//!
//! Markdown and JSON live next to the report type in `quizzo-core`; this
//! crate renders the self-contained HTML page.

pub mod html;
