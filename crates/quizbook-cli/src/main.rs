//! quizbook CLI — the user-facing terminal player.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod session;

#[derive(Parser)]
#[command(name = "quizbook", version, about = "Interactive exercise book player")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content document (overrides config)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Data directory for saved progress (overrides config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and example content document
    Init,

    /// Validate a content document
    Validate,

    /// Set or clear the learner identity
    Identity {
        /// Learner name
        #[arg(long)]
        name: Option<String>,

        /// ITQAN id
        #[arg(long)]
        id: Option<String>,

        /// Clear the stored identity
        #[arg(long)]
        clear: bool,
    },

    /// Show a chapter with its questions and current answers
    Show {
        /// Chapter index (defaults to the current chapter)
        #[arg(long)]
        chapter: Option<usize>,
    },

    /// Record an answer for a question
    Answer {
        /// Question id, e.g. q_0_1
        question: String,

        /// Selected option index (choice questions)
        #[arg(long)]
        choice: Option<usize>,

        /// Typed text (fill-in-blank questions)
        #[arg(long)]
        text: Option<String>,

        /// Place a token into a drop position: "<position>=<token>"
        #[arg(long)]
        place: Option<String>,

        /// Empty a drop position
        #[arg(long)]
        clear_slot: Option<usize>,
    },

    /// Grade one question, or the whole current chapter
    Check {
        /// Question id; omit to check the current chapter
        question: Option<String>,
    },

    /// Jump to a chapter
    Goto {
        /// Chapter index
        chapter: usize,
    },

    /// Show progress statistics
    Status,

    /// Show the final score summary
    Finish,

    /// Export progress as a JSON document
    Export {
        /// Output file
        #[arg(long, default_value = "quizbook-export.json")]
        output: PathBuf,
    },

    /// Erase all recorded answers
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Also clear the stored identity
        #[arg(long)]
        identity: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizbook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config = match config::load_config_from(cli.config.as_deref()) {
        Ok(mut config) => {
            if let Some(content) = cli.content {
                config.content = content;
            }
            if let Some(data_dir) = cli.data_dir {
                config.data_dir = data_dir;
            }
            config
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Validate => commands::validate::execute(&config),
        Commands::Identity { name, id, clear } => {
            commands::identity::execute(&config, name, id, clear)
        }
        Commands::Show { chapter } => commands::show::execute(&config, chapter),
        Commands::Answer {
            question,
            choice,
            text,
            place,
            clear_slot,
        } => commands::answer::execute(&config, question, choice, text, place, clear_slot),
        Commands::Check { question } => commands::check::execute(&config, question),
        Commands::Goto { chapter } => commands::goto::execute(&config, chapter),
        Commands::Status => commands::status::execute(&config),
        Commands::Finish => commands::finish::execute(&config),
        Commands::Export { output } => commands::export::execute(&config, output),
        Commands::Reset { yes, identity } => commands::reset::execute(&config, yes, identity),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
