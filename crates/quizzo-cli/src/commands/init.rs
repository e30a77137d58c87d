//! The `quizzo init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizzo.toml").exists() {
        println!("quizzo.toml already exists, skipping.");
    } else {
        std::fs::write("quizzo.toml", SAMPLE_CONFIG)?;
        println!("Created quizzo.toml");
    }

    std::fs::create_dir_all("quizzes")?;
    let example_path = std::path::Path::new("quizzes/example.toml");
    if example_path.exists() {
        println!("quizzes/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created quizzes/example.toml");
    }

    std::fs::create_dir_all("responses")?;
    let sheet_path = std::path::Path::new("responses/example.toml");
    if sheet_path.exists() {
        println!("responses/example.toml already exists, skipping.");
    } else {
        std::fs::write(sheet_path, EXAMPLE_SHEET)?;
        println!("Created responses/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizzo validate --quiz quizzes/example.toml");
    println!("  2. Run: quizzo publish --quiz quizzes/example.toml");
    println!(
        "  3. Run: quizzo score --quiz quizzes/example.toml --responses responses/example.toml"
    );
    println!("  4. Share the code printed by `publish` with your class");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizzo configuration

# Where published quizzes and attempts are stored.
store_dir = "./quizzo-data"

# Length of generated join codes.
code_length = 6

# Default output of `quizzo leaderboard`: text, json, markdown, html
default_format = "text"
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
title = "Example Quiz"
description = "One question of each kind"
mode = "test"
time_limit_minutes = 5
teacher_id = "teacher-1"
teacher_name = "Example Teacher"

[[questions]]
type = "single-choice"
text = "Which planet is closest to the sun?"
options = ["Venus", "Mercury", "Mars"]
correct_answer = 1

[[questions]]
type = "multi-choice"
text = "Which of these are prime numbers?"
options = ["2", "4", "7", "9"]
correct_answer = [0, 2]

[[questions]]
type = "short-answer"
text = "What is the chemical symbol for gold?"
correct_answer = "Au"

[[questions]]
type = "numerical"
text = "What is 12 * 12?"
correct_answer = 144
"#;

const EXAMPLE_SHEET: &str = r#"# Submit with:
#   quizzo submit --code <CODE> --student-id s1 --student-name "Sam" --responses responses/example.toml
#
# elapsed_seconds is the quiz clock when the student left each question.

[[responses]]
question_index = 0
answer = 1
elapsed_seconds = 12

[[responses]]
question_index = 1
answer = [2, 0]
elapsed_seconds = 30

[[responses]]
question_index = 2
answer = "au"
elapsed_seconds = 41

[[responses]]
question_index = 3
answer = "144"
elapsed_seconds = 58
"#;
