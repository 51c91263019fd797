//! carryquiz CLI: column addition and subtraction practice in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

use config::QuizArgs;

#[derive(Parser)]
#[command(
    name = "carryquiz",
    version,
    about = "Column addition and subtraction practice for young learners"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Practise interactively
    Practice {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Don't say whether each answer was right until the results
        #[arg(long)]
        no_feedback: bool,

        /// Hide right/wrong marks and the running score while reviewing
        #[arg(long)]
        hide_review_results: bool,
    },

    /// Print a worksheet of problems
    Generate {
        #[command(flatten)]
        quiz: QuizArgs,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Grade a filled-in JSON worksheet
    Grade {
        /// Worksheet JSON produced by `generate --format json`
        #[arg(long)]
        worksheet: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carryquiz=warn".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            quiz,
            no_feedback,
            hide_review_results,
        } => commands::practice::execute(quiz, no_feedback, hide_review_results),
        Commands::Generate {
            quiz,
            format,
            output,
        } => commands::generate::execute(quiz, format, output),
        Commands::Grade { worksheet, format } => commands::grade::execute(worksheet, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
