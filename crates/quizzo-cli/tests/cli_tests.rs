//! CLI integration tests using assert_cmd.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const QUIZ: &str = r#"[quiz]
title = "Science Check"
mode = "test"
time_limit_minutes = 5
teacher_id = "t-1"
teacher_name = "Dr. Imani"

[[questions]]
type = "single-choice"
text = "Closest planet to the sun?"
options = ["Venus", "Mercury", "Mars"]
correct_answer = 1

[[questions]]
type = "multi-choice"
text = "Which are prime?"
options = ["2", "4", "7", "9"]
correct_answer = [0, 2]

[[questions]]
type = "short-answer"
text = "Chemical symbol for gold?"
correct_answer = "Au"

[[questions]]
type = "numerical"
text = "12 * 12"
correct_answer = 144
"#;

fn sheet(answers: [&str; 4], elapsed: [u32; 4]) -> String {
    let mut s = String::new();
    for (i, (answer, t)) in answers.iter().zip(elapsed).enumerate() {
        s.push_str(&format!(
            "[[responses]]\nquestion_index = {i}\nanswer = {answer}\nelapsed_seconds = {t}\n\n"
        ));
    }
    s
}

fn all_right_slow() -> String {
    sheet(["1", "[2, 0]", "\"au\"", "\"144\""], [12, 30, 41, 58])
}

fn all_right_fast() -> String {
    sheet(["1", "[0, 2]", "\"AU\"", "144"], [10, 20, 30, 40])
}

fn half_right() -> String {
    sheet(["1", "[0]", "\"Ag\"", "144"], [5, 10, 15, 20])
}

/// A command isolated from any config in the user's home or cwd.
fn quizzo(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizzo").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("QUIZZO_STORE_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

fn store_dir(dir: &Path) -> PathBuf {
    dir.join("store")
}

/// Publish the test quiz and return its code.
fn publish(dir: &Path) -> String {
    let quiz = write(dir, "quiz.toml", QUIZ);
    let output = quizzo(dir)
        .arg("publish")
        .arg("--quiz")
        .arg(&quiz)
        .arg("--store")
        .arg(store_dir(dir))
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    stdout
        .lines()
        .find_map(|l| l.strip_prefix("Quiz code: "))
        .expect("publish should print the quiz code")
        .trim()
        .to_string()
}

fn submit(dir: &Path, code: &str, student: &str, sheet_body: &str) -> assert_cmd::assert::Assert {
    let sheet = write(dir, &format!("{student}.toml"), sheet_body);
    quizzo(dir)
        .arg("submit")
        .arg("--code")
        .arg(code)
        .arg("--student-id")
        .arg(student)
        .arg("--student-name")
        .arg(student.to_uppercase())
        .arg("--responses")
        .arg(&sheet)
        .arg("--store")
        .arg(store_dir(dir))
        .assert()
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    quizzo(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Classroom quizzes"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    quizzo(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizzo"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizzo(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizzo.toml"))
        .stdout(predicate::str::contains("Created quizzes/example.toml"));

    assert!(dir.path().join("quizzo.toml").exists());
    assert!(dir.path().join("quizzes/example.toml").exists());
    assert!(dir.path().join("responses/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    quizzo(dir.path()).arg("init").assert().success();

    quizzo(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_example_validates_and_scores() {
    let dir = TempDir::new().unwrap();
    quizzo(dir.path()).arg("init").assert().success();

    quizzo(dir.path())
        .args(["validate", "--quiz", "quizzes/example.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 questions"))
        .stdout(predicate::str::contains("All quizzes valid."));

    quizzo(dir.path())
        .args([
            "score",
            "--quiz",
            "quizzes/example.toml",
            "--responses",
            "responses/example.toml",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 4/4 in 58s"));
}

#[test]
fn validate_directory() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("quizzes")).unwrap();
    write(dir.path(), "quizzes/a.toml", QUIZ);
    write(
        dir.path(),
        "quizzes/b.toml",
        "[quiz]\ntitle = \"Tiny\"\n\n[[questions]]\ntype = \"short-answer\"\ntext = \"hi\"\ncorrect_answer = \"hello\"\n",
    );

    quizzo(dir.path())
        .args(["validate", "--quiz", "quizzes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Science Check"))
        .stdout(predicate::str::contains("Tiny"));
}

#[test]
fn validate_reports_errors() {
    let dir = TempDir::new().unwrap();
    let bad = write(
        dir.path(),
        "bad.toml",
        r#"[quiz]
title = "Broken"

[[questions]]
type = "single-choice"
text = "Pick"
options = ["a", "b"]
correct_answer = 5
"#,
    );

    quizzo(dir.path())
        .arg("validate")
        .arg("--quiz")
        .arg(&bad)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "[Q1] ERROR: correct_answer 5 is not a valid option index",
        ))
        .stderr(predicate::str::contains("1 error(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();
    quizzo(dir.path())
        .args(["validate", "--quiz", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn score_offline() {
    let dir = TempDir::new().unwrap();
    let quiz = write(dir.path(), "quiz.toml", QUIZ);
    let sheet = write(dir.path(), "sheet.toml", &half_right());

    quizzo(dir.path())
        .arg("score")
        .arg("--quiz")
        .arg(&quiz)
        .arg("--responses")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Mercury"))
        .stdout(predicate::str::contains("2, 7"))
        .stdout(predicate::str::contains("Score: 2/4 in 20s"));

    assert!(!store_dir(dir.path()).exists());
}

#[test]
fn score_timed_out_sheet() {
    let dir = TempDir::new().unwrap();
    let quiz = write(dir.path(), "quiz.toml", QUIZ);
    let sheet = write(
        dir.path(),
        "sheet.toml",
        "timed_out = true\n\n[[responses]]\nquestion_index = 0\nanswer = 1\nelapsed_seconds = 100\n\n[[responses]]\nquestion_index = 1\nanswer = [0, 2]\n",
    );

    quizzo(dir.path())
        .arg("score")
        .arg("--quiz")
        .arg(&quiz)
        .arg("--responses")
        .arg(&sheet)
        .assert()
        .success()
        .stdout(predicate::str::contains("Not Answered"))
        .stdout(predicate::str::contains("Score: 2/4 in 300s (timed out)"));
}

#[test]
fn publish_submit_and_rank() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());
    assert_eq!(code.len(), 6);

    submit(dir.path(), &code, "slow", &all_right_slow())
        .success()
        .stdout(predicate::str::contains("Score: 4/4 in 58s"))
        .stdout(predicate::str::contains("Rank: 1 of 1"));

    // Codes are matched case-insensitively.
    submit(dir.path(), &code.to_lowercase(), "fast", &all_right_fast())
        .success()
        .stdout(predicate::str::contains("Rank: 1 of 2"));

    submit(dir.path(), &code, "half", &half_right())
        .success()
        .stdout(predicate::str::contains("Score: 2/4"))
        .stdout(predicate::str::contains("Rank: 3 of 3"));

    let output = quizzo(dir.path())
        .args(["leaderboard", "--code", &code, "--format", "json"])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = report["entries"].as_array().unwrap();
    let order: Vec<&str> = entries
        .iter()
        .map(|e| e["student_id"].as_str().unwrap())
        .collect();
    assert_eq!(order, ["fast", "slow", "half"]);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[2]["score"], 2);
}

#[test]
fn second_submission_is_rejected() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());

    submit(dir.path(), &code, "ann", &half_right()).success();
    submit(dir.path(), &code, "ann", &all_right_fast())
        .failure()
        .stderr(predicate::str::contains("already attempted"));
}

#[test]
fn infinite_clock_reading_is_rejected() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());

    let body = half_right().replace("elapsed_seconds = 20", "elapsed_seconds = inf");
    submit(dir.path(), &code, "ann", &body)
        .failure()
        .stderr(predicate::str::contains("finite"));

    quizzo(dir.path())
        .args(["leaderboard", "--code", &code])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("no attempts yet"));

    submit(dir.path(), &code, "ann", &half_right()).success();
    submit(dir.path(), &code, "ann", &body)
        .failure()
        .stderr(predicate::str::contains("finite"));
}

#[test]
fn unknown_code_fails() {
    let dir = TempDir::new().unwrap();
    quizzo(dir.path())
        .args(["leaderboard", "--code", "zzzzzz"])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("quiz not found: ZZZZZZ"));
}

#[test]
fn leaderboard_text_and_student_rank() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());
    submit(dir.path(), &code, "half", &half_right()).success();
    submit(dir.path(), &code, "fast", &all_right_fast()).success();

    quizzo(dir.path())
        .args(["leaderboard", "--code", &code, "--student-id", "half"])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Science Check"))
        .stdout(predicate::str::contains("FAST"))
        .stdout(predicate::str::contains("4/4"))
        .stdout(predicate::str::contains("Your rank: 2 of 2"));
}

#[test]
fn leaderboard_empty() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());

    quizzo(dir.path())
        .args(["leaderboard", "--code", &code])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("no attempts yet"));
}

#[test]
fn leaderboard_html_to_file() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());
    submit(dir.path(), &code, "fast", &all_right_fast()).success();
    let out = dir.path().join("reports/board.html");

    quizzo(dir.path())
        .args(["leaderboard", "--code", &code, "--format", "html", "--output"])
        .arg(&out)
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .success()
        .stderr(predicate::str::contains("Leaderboard written to"));

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("<html"));
    assert!(html.contains("FAST"));
}

#[test]
fn leaderboard_unknown_format() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());

    quizzo(dir.path())
        .args(["leaderboard", "--code", &code, "--format", "pdf"])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format: pdf"));
}

#[test]
fn review_attempt() {
    let dir = TempDir::new().unwrap();
    let code = publish(dir.path());
    submit(dir.path(), &code, "half", &half_right()).success();

    quizzo(dir.path())
        .args(["review", "--code", &code, "--student-id", "half"])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Ag"))
        .stdout(predicate::str::contains("wrong"))
        .stdout(predicate::str::contains("Score: 2/4 in 20s"))
        .stdout(predicate::str::contains("Rank: 1 of 1"));

    quizzo(dir.path())
        .args(["review", "--code", &code, "--student-id", "nobody"])
        .arg("--store")
        .arg(store_dir(dir.path()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no attempt by nobody"));
}

#[test]
fn list_quizzes_from_env_store() {
    let dir = TempDir::new().unwrap();

    quizzo(dir.path())
        .arg("list")
        .env("QUIZZO_STORE_DIR", store_dir(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("No quizzes"));

    let code = publish(dir.path());

    quizzo(dir.path())
        .arg("list")
        .env("QUIZZO_STORE_DIR", store_dir(dir.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains(code))
        .stdout(predicate::str::contains("Science Check"))
        .stdout(predicate::str::contains("test (5 min)"));
}

#[test]
fn config_file_sets_store_dir() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "quizzo.toml", "store_dir = \"./store\"\n");
    let code = publish(dir.path());

    // No --store: picks up ./quizzo.toml from the working directory.
    quizzo(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains(code));
}
