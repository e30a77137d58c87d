//! quizzo CLI: publish quizzes, take submissions, and show leaderboards.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::StoreArgs;

#[derive(Parser)]
#[command(name = "quizzo", version, about = "Classroom quizzes with scoring and leaderboards")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create starter config and an example quiz
    Init,

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Publish a quiz and print its join code
    Publish {
        /// Path to the quiz TOML file
        #[arg(long)]
        quiz: PathBuf,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Submit a student's response sheet for a published quiz
    Submit {
        /// Quiz join code (case-insensitive)
        #[arg(long)]
        code: String,

        /// Student identifier
        #[arg(long)]
        student_id: String,

        /// Student display name
        #[arg(long)]
        student_name: String,

        /// Path to the response sheet TOML
        #[arg(long)]
        responses: PathBuf,

        /// The countdown expired on the last question of the sheet
        #[arg(long)]
        timed_out: bool,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Score a response sheet against a quiz file without storing anything
    Score {
        /// Path to the quiz TOML file
        #[arg(long)]
        quiz: PathBuf,

        /// Path to the response sheet TOML
        #[arg(long)]
        responses: PathBuf,
    },

    /// Show the leaderboard of a published quiz
    Leaderboard {
        /// Quiz join code (case-insensitive)
        #[arg(long)]
        code: String,

        /// Highlight this student's rank
        #[arg(long)]
        student_id: Option<String>,

        /// Output format: text, json, markdown, html
        #[arg(long)]
        format: Option<String>,

        /// Write the output to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Review a student's attempt question by question
    Review {
        /// Quiz join code (case-insensitive)
        #[arg(long)]
        code: String,

        /// Student identifier
        #[arg(long)]
        student_id: String,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// List published quizzes
    List {
        #[command(flatten)]
        store: StoreArgs,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizzo=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Publish { quiz, store } => commands::publish::execute(quiz, store).await,
        Commands::Submit {
            code,
            student_id,
            student_name,
            responses,
            timed_out,
            store,
        } => {
            commands::submit::execute(code, student_id, student_name, responses, timed_out, store)
                .await
        }
        Commands::Score { quiz, responses } => commands::score::execute(quiz, responses),
        Commands::Leaderboard {
            code,
            student_id,
            format,
            output,
            store,
        } => commands::leaderboard::execute(code, student_id, format, output, store).await,
        Commands::Review {
            code,
            student_id,
            store,
        } => commands::review::execute(code, student_id, store).await,
        Commands::List { store } => commands::list::execute(store).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
