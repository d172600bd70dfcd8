//! mnemo CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mnemo", version, about = "Spaced-repetition learning tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive drill session over a question bank
    Drill {
        /// Path to a .toml question bank, or a directory of banks
        /// (defaults to the configured bank directory)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Limit the session to this many questions
        #[arg(long)]
        count: Option<usize>,

        /// Restrict to question types (comma-separated, e.g. "mc,tf")
        #[arg(long)]
        types: Option<String>,

        /// Restrict to one difficulty: easy, medium, hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Directory session reports are written to
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Generate questions from a learning material
    Generate {
        /// Material to generate from
        #[arg(long)]
        material: String,

        /// Number of questions to generate (defaults from config)
        #[arg(long)]
        count: Option<usize>,

        /// Restrict to question types (comma-separated, e.g. "mc,tf")
        #[arg(long)]
        types: Option<String>,

        /// Target difficulty: easy, medium, hard
        #[arg(long)]
        difficulty: Option<String>,

        /// Only generate from materials carrying this topic
        #[arg(long)]
        topic: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the upcoming review schedule
    Schedule {
        /// Directory of session reports (defaults to the configured one)
        #[arg(long)]
        sessions: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show mastery statistics for a session
    Stats {
        /// Session report JSON, or a directory (uses the newest report)
        #[arg(long)]
        session: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory (defaults to the configured
        /// bank directory)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mnemo=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Drill {
            bank,
            count,
            types,
            difficulty,
            output,
            config,
        } => commands::drill::execute(bank, count, types, difficulty, output, config),
        Commands::Generate {
            material,
            count,
            types,
            difficulty,
            topic,
            format,
            config,
        } => {
            commands::generate::execute(material, count, types, difficulty, topic, format, config)
                .await
        }
        Commands::Schedule { sessions, config } => commands::schedule::execute(sessions, config),
        Commands::Stats { session, config } => commands::stats::execute(session, config),
        Commands::Validate { bank, config } => commands::validate::execute(bank, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
