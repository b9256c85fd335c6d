use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use clearmind_engine::{
    config::{Config, LogFormat},
    engine::AnalysisEngine,
    ConversationTurn,
};

/// Analyze thoughts for cognitive-behavioral patterns from the command line.
#[derive(Parser)]
#[command(name = "clearmind-engine", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Identify cognitive distortions and reframes in a thought
    Analyze {
        /// The thought to analyze
        thought: String,
    },
    /// Get one coaching reply for a message (no prior history)
    Chat {
        /// The message to respond to
        message: String,
    },
    /// Categorize a thought snippet into themes and emotions
    Categorize {
        /// The thought to categorize
        thought: String,
    },
    /// Break a concern down into an action plan
    Plan {
        /// The concern to plan around
        thought: String,
        /// Optional additional context
        #[arg(long, default_value = "")]
        context: String,
    },
    /// Generate a reminder suggestion for a thought
    Remind {
        /// The thought to be reminded about
        thought: String,
        /// Optional user note for the reminder text
        #[arg(long, default_value = "")]
        note: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend_configured = config.backend.api_key.is_some(),
        "ClearMind analysis engine starting"
    );

    let engine = AnalysisEngine::from_config(&config)?;

    let output = match cli.command {
        Command::Analyze { thought } => {
            serde_json::to_string_pretty(&engine.analyze_distortions(&thought).await)?
        }
        Command::Chat { message } => {
            let history: Vec<ConversationTurn> = Vec::new();
            serde_json::to_string_pretty(&engine.chat(&message, &history).await)?
        }
        Command::Categorize { thought } => {
            serde_json::to_string_pretty(&engine.categorize(&thought).await)?
        }
        Command::Plan { thought, context } => {
            serde_json::to_string_pretty(&engine.action_plan(&thought, &context).await)?
        }
        Command::Remind { thought, note } => {
            serde_json::to_string_pretty(&engine.reminder(&thought, &note).await)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
