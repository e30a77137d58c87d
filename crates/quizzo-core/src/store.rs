//! Data access for quizzes and attempts.
//!
//! The service talks to persistence through [`QuizStore`]. Two
//! implementations ship: an in-memory one for tests and embedding, and a
//! directory of JSON documents for the CLI.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::model::{Attempt, Quiz};

/// Storage backend for quizzes and attempts.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Persist a newly published quiz.
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<()>;

    /// Fetch a quiz by id.
    async fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>>;

    /// Fetch a quiz by its (already normalized) code.
    async fn find_quiz_by_code(&self, code: &str) -> Result<Option<Quiz>>;

    /// All quizzes, newest first.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>>;

    /// Persist a submitted attempt.
    async fn insert_attempt(&self, attempt: &Attempt) -> Result<()>;

    /// Attempts for a quiz, in submission order.
    async fn attempts_for_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>>;

    /// A student's attempt at a quiz, if any.
    async fn find_attempt(&self, quiz_id: &str, student_id: &str) -> Result<Option<Attempt>> {
        Ok(self
            .attempts_for_quiz(quiz_id)
            .await?
            .into_iter()
            .find(|a| a.student_id == student_id))
    }
}

fn sort_newest_first(quizzes: &mut [Quiz]) {
    quizzes.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn sort_by_submission(attempts: &mut [Attempt]) {
    attempts.sort_by(|a, b| {
        a.submitted_at
            .cmp(&b.submitted_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Store that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    quizzes: RwLock<HashMap<String, Quiz>>,
    attempts: RwLock<Vec<Attempt>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<()> {
        self.quizzes
            .write()
            .await
            .insert(quiz.id.clone(), quiz.clone());
        Ok(())
    }

    async fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        Ok(self.quizzes.read().await.get(quiz_id).cloned())
    }

    async fn find_quiz_by_code(&self, code: &str) -> Result<Option<Quiz>> {
        Ok(self
            .quizzes
            .read()
            .await
            .values()
            .find(|q| q.code == code)
            .cloned())
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = self.quizzes.read().await.values().cloned().collect();
        sort_newest_first(&mut quizzes);
        Ok(quizzes)
    }

    async fn insert_attempt(&self, attempt: &Attempt) -> Result<()> {
        self.attempts.write().await.push(attempt.clone());
        Ok(())
    }

    async fn attempts_for_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>> {
        // Insertion order is submission order.
        Ok(self
            .attempts
            .read()
            .await
            .iter()
            .filter(|a| a.quiz_id == quiz_id)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// JSON file store
// ---------------------------------------------------------------------------

/// Store backed by a directory of JSON documents:
///
/// ```text
/// <root>/quizzes/<quiz_id>.json
/// <root>/attempts/<quiz_id>/<attempt_id>.json
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn quizzes_dir(&self) -> PathBuf {
        self.root.join("quizzes")
    }

    fn attempts_dir(&self, quiz_id: &str) -> PathBuf {
        self.root.join("attempts").join(quiz_id)
    }

    async fn write_document<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("failed to serialize document")?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("failed to write {}", path.display()))
    }

    async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Read every `.json` document in a directory; a missing directory is
    /// empty. Unreadable documents are skipped with a warning.
    async fn read_all<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
        let mut docs = Vec::new();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(docs),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read directory: {}", dir.display()))
            }
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match Self::read_document(&path).await {
                    Ok(doc) => docs.push(doc),
                    Err(e) => tracing::warn!("skipping {}: {:#}", path.display(), e),
                }
            }
        }
        Ok(docs)
    }
}

#[async_trait]
impl QuizStore for FileStore {
    async fn insert_quiz(&self, quiz: &Quiz) -> Result<()> {
        let path = self.quizzes_dir().join(format!("{}.json", quiz.id));
        Self::write_document(&path, quiz).await
    }

    async fn get_quiz(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        let path = self.quizzes_dir().join(format!("{quiz_id}.json"));
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        Self::read_document(&path).await.map(Some)
    }

    async fn find_quiz_by_code(&self, code: &str) -> Result<Option<Quiz>> {
        Ok(self
            .list_quizzes()
            .await?
            .into_iter()
            .find(|q| q.code == code))
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>> {
        let mut quizzes: Vec<Quiz> = Self::read_all(&self.quizzes_dir()).await?;
        sort_newest_first(&mut quizzes);
        Ok(quizzes)
    }

    async fn insert_attempt(&self, attempt: &Attempt) -> Result<()> {
        let path = self
            .attempts_dir(&attempt.quiz_id)
            .join(format!("{}.json", attempt.id));
        Self::write_document(&path, attempt).await
    }

    async fn attempts_for_quiz(&self, quiz_id: &str) -> Result<Vec<Attempt>> {
        let mut attempts: Vec<Attempt> = Self::read_all(&self.attempts_dir(quiz_id)).await?;
        sort_by_submission(&mut attempts);
        Ok(attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AnswerValue, Question, QuizMode, Response};
    use chrono::{Duration, TimeZone, Utc};

    fn quiz(id: &str, code: &str, minutes_after: i64) -> Quiz {
        Quiz {
            id: id.into(),
            title: format!("Quiz {id}"),
            description: String::new(),
            mode: QuizMode::Quiz,
            teacher_id: "t".into(),
            teacher_name: "Teacher".into(),
            questions: vec![Question::numerical("1 + 1", 2.0)],
            code: code.into(),
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap()
                + Duration::minutes(minutes_after),
        }
    }

    fn attempt(id: &str, quiz_id: &str, student: &str, seconds_after: i64) -> Attempt {
        Attempt {
            id: id.into(),
            quiz_id: quiz_id.into(),
            student_id: student.into(),
            student_name: student.to_uppercase(),
            responses: vec![Response::new(0, AnswerValue::Text("2".into()), 4.0)],
            score: 1,
            timed_out: false,
            submitted_at: Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap()
                + Duration::seconds(seconds_after),
        }
    }

    async fn exercise(store: &dyn QuizStore) {
        store.insert_quiz(&quiz("q1", "AAA111", 0)).await.unwrap();
        store.insert_quiz(&quiz("q2", "BBB222", 5)).await.unwrap();

        let listed = store.list_quizzes().await.unwrap();
        assert_eq!(
            listed.iter().map(|q| q.id.as_str()).collect::<Vec<_>>(),
            vec!["q2", "q1"]
        );

        let found = store.find_quiz_by_code("BBB222").await.unwrap().unwrap();
        assert_eq!(found.id, "q2");
        assert!(store.find_quiz_by_code("ZZZ999").await.unwrap().is_none());
        assert_eq!(store.get_quiz("q1").await.unwrap().unwrap().code, "AAA111");
        assert!(store.get_quiz("missing").await.unwrap().is_none());

        store.insert_attempt(&attempt("a1", "q1", "ann", 0)).await.unwrap();
        store.insert_attempt(&attempt("a2", "q1", "bob", 30)).await.unwrap();
        store.insert_attempt(&attempt("a3", "q2", "ann", 10)).await.unwrap();

        let q1_attempts = store.attempts_for_quiz("q1").await.unwrap();
        assert_eq!(
            q1_attempts.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            vec!["a1", "a2"]
        );
        assert!(store.find_attempt("q1", "bob").await.unwrap().is_some());
        assert!(store.find_attempt("q2", "bob").await.unwrap().is_none());
        assert!(store.attempts_for_quiz("nope").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn memory_store_roundtrip() {
        exercise(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        exercise(&store).await;

        assert!(dir.path().join("quizzes/q1.json").exists());
        assert!(dir.path().join("attempts/q1/a2.json").exists());
    }

    #[tokio::test]
    async fn file_store_skips_corrupt_documents() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.insert_quiz(&quiz("q1", "AAA111", 0)).await.unwrap();
        std::fs::write(dir.path().join("quizzes/broken.json"), "{ not json").unwrap();

        let listed = store.list_quizzes().await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn file_store_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("does-not-exist-yet"));
        assert!(store.list_quizzes().await.unwrap().is_empty());
    }
}
