//! Core data model types for quizzo.
//!
//! Quizzes and attempts are independent records correlated only by string
//! ids. Everything here is plain data: values are cloned, never shared.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One item inside a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt shown to the student.
    pub text: String,
    /// Question type together with its options and canonical answer.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The four supported question types.
///
/// The canonical answer lives inside the variant, so its shape always
/// matches the question type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionKind {
    SingleChoice {
        options: Vec<String>,
        correct_answer: usize,
    },
    MultiChoice {
        options: Vec<String>,
        correct_answer: BTreeSet<usize>,
    },
    ShortAnswer {
        correct_answer: String,
    },
    Numerical {
        correct_answer: f64,
    },
}

impl QuestionKind {
    /// The options of a choice question; empty for free-form types.
    pub fn options(&self) -> &[String] {
        match self {
            QuestionKind::SingleChoice { options, .. }
            | QuestionKind::MultiChoice { options, .. } => options,
            QuestionKind::ShortAnswer { .. } | QuestionKind::Numerical { .. } => &[],
        }
    }

    /// Wire name of the type, e.g. `"multi-choice"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice { .. } => "single-choice",
            QuestionKind::MultiChoice { .. } => "multi-choice",
            QuestionKind::ShortAnswer { .. } => "short-answer",
            QuestionKind::Numerical { .. } => "numerical",
        }
    }
}

impl Question {
    pub fn single_choice(text: &str, options: &[&str], correct: usize) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::SingleChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_answer: correct,
            },
        }
    }

    pub fn multi_choice(text: &str, options: &[&str], correct: &[usize]) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::MultiChoice {
                options: options.iter().map(|o| o.to_string()).collect(),
                correct_answer: correct.iter().copied().collect(),
            },
        }
    }

    pub fn short_answer(text: &str, correct: &str) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::ShortAnswer {
                correct_answer: correct.into(),
            },
        }
    }

    pub fn numerical(text: &str, correct: f64) -> Self {
        Self {
            text: text.into(),
            kind: QuestionKind::Numerical {
                correct_answer: correct,
            },
        }
    }
}

/// A submitted answer.
///
/// The variant a student sends does not have to match the question type;
/// mismatches are scored as incorrect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// A single option index.
    Choice(usize),
    /// Several option indices, in the order they were ticked.
    Choices(Vec<usize>),
    /// A non-integer number.
    Number(f64),
    /// Free text, also used for numbers typed into a text box.
    Text(String),
}

/// Whether a quiz is untimed or a timed test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum QuizMode {
    /// Untimed; the clock counts up.
    Quiz,
    /// Timed; the clock counts down from the limit.
    Test { time_limit_minutes: u32 },
}

impl QuizMode {
    /// Total time allowed, if any.
    pub fn time_limit_seconds(&self) -> Option<f64> {
        match self {
            QuizMode::Quiz => None,
            QuizMode::Test { time_limit_minutes } => Some(f64::from(*time_limit_minutes) * 60.0),
        }
    }

    /// Convert a countdown reading into seconds elapsed since the start.
    ///
    /// For untimed quizzes the reading already is the elapsed time.
    pub fn elapsed_from_countdown(&self, remaining_seconds: f64) -> f64 {
        match self.time_limit_seconds() {
            Some(limit) => (limit - remaining_seconds).clamp(0.0, limit),
            None => remaining_seconds.max(0.0),
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Quiz => write!(f, "quiz"),
            QuizMode::Test { time_limit_minutes } => write!(f, "test ({time_limit_minutes} min)"),
        }
    }
}

/// Mode name as written in authoring files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeName {
    Quiz,
    Test,
}

impl FromStr for ModeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "quiz" | "untimed" => Ok(ModeName::Quiz),
            "test" | "timed" => Ok(ModeName::Test),
            other => Err(format!("unknown quiz mode: {other}")),
        }
    }
}

/// A quiz as authored, before it is published with an id and a code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub mode: QuizMode,
    /// Opaque id of the authoring teacher.
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
    pub questions: Vec<Question>,
}

/// A published quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub mode: QuizMode,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub teacher_name: String,
    pub questions: Vec<Question>,
    /// Short shareable code students use to join.
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl Quiz {
    /// Turn a draft into a quiz with the given identity.
    pub fn from_draft(
        draft: QuizDraft,
        id: String,
        code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            mode: draft.mode,
            teacher_id: draft.teacher_id,
            teacher_name: draft.teacher_name,
            questions: draft.questions,
            code,
            created_at,
        }
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

/// One answer to one question within an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Position of the question in the quiz (0-based).
    pub question_index: usize,
    /// `None` when the student moved on without answering.
    #[serde(default)]
    pub selected_answer: Option<AnswerValue>,
    /// Seconds spent on this question.
    #[serde(default)]
    pub time_taken_seconds: f64,
}

impl Response {
    pub fn new(question_index: usize, answer: AnswerValue, time_taken_seconds: f64) -> Self {
        Self {
            question_index,
            selected_answer: Some(answer),
            time_taken_seconds,
        }
    }

    pub fn unanswered(question_index: usize, time_taken_seconds: f64) -> Self {
        Self {
            question_index,
            selected_answer: None,
            time_taken_seconds,
        }
    }
}

/// One student's completed run of a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub id: String,
    pub quiz_id: String,
    pub student_id: String,
    pub student_name: String,
    pub responses: Vec<Response>,
    /// Cached at submission time; never recomputed on read.
    pub score: usize,
    /// Whether the countdown of a timed test ran out.
    #[serde(default)]
    pub timed_out: bool,
    pub submitted_at: DateTime<Utc>,
}

impl Attempt {
    /// Sum of the time spent on every response.
    pub fn total_time_seconds(&self) -> f64 {
        self.responses.iter().map(|r| r.time_taken_seconds).sum()
    }
}
