//! TOML quiz and response-sheet parser.
//!
//! Loads quiz drafts from TOML files and directories, validates them, and
//! reads response sheets for offline scoring and submission.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnswerValue, ModeName, Question, QuestionKind, QuizDraft, QuizMode, Response};
use crate::timing::ResponseRecorder;

/// Intermediate TOML structure for quiz files.
#[derive(Debug, Deserialize)]
struct TomlQuizFile {
    quiz: TomlQuizHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlQuizHeader {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_mode_str")]
    mode: String,
    #[serde(default)]
    time_limit_minutes: Option<u32>,
    #[serde(default)]
    teacher_id: String,
    #[serde(default)]
    teacher_name: String,
}

fn default_mode_str() -> String {
    "quiz".to_string()
}

/// Parse a single TOML file into a `QuizDraft`.
pub fn parse_quiz_draft(path: &Path) -> Result<QuizDraft> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read quiz file: {}", path.display()))?;

    parse_quiz_draft_str(&content, path)
}

/// Parse a TOML string into a `QuizDraft` (useful for testing).
pub fn parse_quiz_draft_str(content: &str, source_path: &Path) -> Result<QuizDraft> {
    let parsed: TomlQuizFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mode_name: ModeName = parsed
        .quiz
        .mode
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let mode = match (mode_name, parsed.quiz.time_limit_minutes) {
        (ModeName::Test, Some(time_limit_minutes)) => QuizMode::Test { time_limit_minutes },
        (ModeName::Test, None) => anyhow::bail!(
            "{}: test mode requires time_limit_minutes",
            source_path.display()
        ),
        (ModeName::Quiz, limit) => {
            if limit.is_some() {
                tracing::warn!(
                    "{}: time_limit_minutes ignored for untimed quiz",
                    source_path.display()
                );
            }
            QuizMode::Quiz
        }
    };

    Ok(QuizDraft {
        title: parsed.quiz.title,
        description: parsed.quiz.description,
        mode,
        teacher_id: parsed.quiz.teacher_id,
        teacher_name: parsed.quiz.teacher_name,
        questions: parsed.questions,
    })
}

/// Recursively load all `.toml` quiz files from a directory.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<QuizDraft>> {
    let mut drafts = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            drafts.extend(load_quiz_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_quiz_draft(&path) {
                Ok(draft) => drafts.push(draft),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(drafts)
}

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The quiz cannot be published.
    Error,
    /// Publishable, but probably not what the author meant.
    Warning,
}

/// A finding from quiz validation.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Question index (if applicable).
    pub question: Option<usize>,
    pub severity: Severity,
    pub message: String,
}

impl ValidationIssue {
    fn error(question: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            question,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(question: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            question,
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Returns `true` if any issue blocks publishing.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Validate a draft against the quiz invariants.
pub fn validate_draft(draft: &QuizDraft) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if draft.title.trim().is_empty() {
        issues.push(ValidationIssue::error(None, "title is empty"));
    }

    if draft.questions.is_empty() {
        issues.push(ValidationIssue::error(None, "quiz has no questions"));
    }

    if let QuizMode::Test {
        time_limit_minutes: 0,
    } = draft.mode
    {
        issues.push(ValidationIssue::error(
            None,
            "time_limit_minutes must be greater than zero",
        ));
    }

    for (i, question) in draft.questions.iter().enumerate() {
        let at = Some(i);

        if question.text.trim().is_empty() {
            issues.push(ValidationIssue::warning(at, "question text is empty"));
        }

        let options = question.kind.options();
        if matches!(
            question.kind,
            QuestionKind::SingleChoice { .. } | QuestionKind::MultiChoice { .. }
        ) {
            if options.len() < 2 {
                issues.push(ValidationIssue::error(
                    at,
                    format!("needs at least 2 options, found {}", options.len()),
                ));
            }
            let mut seen = HashSet::new();
            for option in options {
                if !seen.insert(option.trim()) {
                    issues.push(ValidationIssue::warning(
                        at,
                        format!("duplicate option: {option}"),
                    ));
                }
            }
        }

        match &question.kind {
            QuestionKind::SingleChoice { correct_answer, .. } => {
                if *correct_answer >= options.len() {
                    issues.push(ValidationIssue::error(
                        at,
                        format!("correct_answer {correct_answer} is not a valid option index"),
                    ));
                }
            }
            QuestionKind::MultiChoice { correct_answer, .. } => {
                if correct_answer.is_empty() {
                    issues.push(ValidationIssue::error(at, "correct_answer set is empty"));
                }
                for idx in correct_answer.iter().filter(|&&idx| idx >= options.len()) {
                    issues.push(ValidationIssue::error(
                        at,
                        format!("correct_answer {idx} is not a valid option index"),
                    ));
                }
            }
            QuestionKind::ShortAnswer { correct_answer } => {
                if correct_answer.is_empty() {
                    issues.push(ValidationIssue::error(at, "correct_answer is empty"));
                } else if correct_answer.trim() != correct_answer {
                    issues.push(ValidationIssue::warning(
                        at,
                        "correct_answer has surrounding whitespace; answers are not trimmed",
                    ));
                }
            }
            QuestionKind::Numerical { correct_answer } => {
                if !correct_answer.is_finite() {
                    issues.push(ValidationIssue::error(
                        at,
                        "correct_answer must be a finite number",
                    ));
                }
            }
        }
    }

    issues
}

/// A student's answers with raw clock readings, as read from a TOML sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseSheet {
    /// Whether the countdown ran out. The last entry is then the question
    /// that was on screen.
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub responses: Vec<SheetEntry>,
}

/// One answered (or skipped) question in a response sheet.
#[derive(Debug, Clone, Deserialize)]
pub struct SheetEntry {
    pub question_index: usize,
    #[serde(default)]
    pub answer: Option<AnswerValue>,
    /// Quiz clock reading, in seconds since the start, when the student
    /// moved on.
    #[serde(default)]
    pub elapsed_seconds: f64,
}

impl ResponseSheet {
    /// Turn clock readings into per-question responses for a quiz mode.
    pub fn into_responses(self, mode: QuizMode) -> Vec<Response> {
        let mut recorder = ResponseRecorder::new(mode);
        let mut entries = self.responses.into_iter().peekable();

        while let Some(entry) = entries.next() {
            if self.timed_out && entries.peek().is_none() {
                return recorder.finish_timed_out(entry.question_index, entry.answer);
            }
            recorder.record(entry.question_index, entry.answer, entry.elapsed_seconds);
        }

        recorder.finish()
    }
}

/// Parse a response sheet file.
pub fn parse_response_sheet(path: &Path) -> Result<ResponseSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read response sheet: {}", path.display()))?;
    parse_response_sheet_str(&content, path)
}

/// Parse a response sheet from a TOML string.
///
/// TOML accepts `inf` and `nan` as floats; clock readings must be finite and
/// non-negative.
pub fn parse_response_sheet_str(content: &str, source_path: &Path) -> Result<ResponseSheet> {
    let sheet: ResponseSheet = toml::from_str(content)
        .with_context(|| format!("failed to parse response sheet: {}", source_path.display()))?;

    for entry in &sheet.responses {
        if !entry.elapsed_seconds.is_finite() || entry.elapsed_seconds < 0.0 {
            anyhow::bail!(
                "{}: question_index {}: elapsed_seconds must be a finite, non-negative number",
                source_path.display(),
                entry.question_index
            );
        }
    }

    Ok(sheet)
}
