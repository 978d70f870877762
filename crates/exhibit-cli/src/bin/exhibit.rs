//! CLI for the AI exhibition

use clap::Parser;
use exhibit::Exhibition;
use exhibit_cli::{commands, error::CliError, load_config};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "exhibit")]
#[command(author, version, about = "AI exhibition: curator and audience loops", long_about = None)]
struct Cli {
    /// Config file path (.json or .toml)
    #[arg(short, long, env = "EXHIBIT_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Directory holding the images and texts folders
    #[arg(short, long, env = "EXHIBIT_BASE_DIR", global = true)]
    base_dir: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "EXHIBIT_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Create the exhibition folders, .env and a default config
    Init,
    /// Run the curator under its monitor
    Curator {
        /// Produce a single exhibition and exit
        #[arg(long)]
        once: bool,
        /// Ignore the opening hours
        #[arg(long)]
        always: bool,
    },
    /// Run one audience member under its monitor
    Audience {
        /// Audience number, selects audience_feedback<N>.txt
        #[arg(long, short, default_value_t = 1)]
        id: u32,
        /// Comment on the latest image once and exit
        #[arg(long)]
        once: bool,
        /// Question put to the model instead of the default
        #[arg(long, short)]
        prompt: Option<String>,
    },
    /// Show the audience feedback the curator will consider next
    Feedback {
        /// Most recent entries per audience member
        #[arg(long, short)]
        entries: Option<usize>,
    },
    /// Show the latest image and which audiences reacted to it
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(level: &str) {
    let filter = format!("exhibit={level},exhibit_cli={level},exhibit_gemini={level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_exhibition(config: exhibit::ExhibitConfig) -> Result<Exhibition, CliError> {
    Ok(Exhibition::builder(config).gemini()?.build()?)
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref(), cli.base_dir, cli.log_level)?;
    init_tracing(&config.log_level);
    if let Some(path) = &cli.config {
        info!("Configuration loaded from: {}", path.display());
    }

    match cli.command {
        Some(Commands::Init) => {
            commands::run_init(&config).await?;
        }
        Some(Commands::Curator { once, always }) => {
            let exhibition = build_exhibition(config)?;
            commands::run_curator(&exhibition, once, always).await?;
        }
        Some(Commands::Audience { id, once, prompt }) => {
            let exhibition = build_exhibition(config)?;
            commands::run_audience(&exhibition, id, once, prompt).await?;
        }
        Some(Commands::Feedback { entries }) => {
            commands::run_feedback(&config, entries).await?;
        }
        Some(Commands::Status { json }) => {
            commands::run_status(&config, json).await?;
        }
        None => {
            println!("AI Exhibition");
            println!("Use --help for more information");
        }
    }

    Ok(())
}
