#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use memgate_config::Config;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod command;

use command::{
    CheckInput, CheckStrategy, CommandStrategy, ExpandStrategy, InfoStrategy, InitStrategy,
    QueryInput, RiskStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "memgate")]
#[command(about = "Memory retrieval gate for conversational assistants", long_about = None)]
struct Cli {
    /// Config file (defaults to ~/memgate/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the skip decision, risk flag and expanded query
    Check {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the query with policy anchors appended when risky
    Expand {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Print whether the query is risk-related
    Risk {
        /// Query text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show the effective gate configuration
    Info,
    /// Initialize configuration
    Init,
    /// Show version
    Version,
}

fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run(command: Commands, config: &Config) -> anyhow::Result<()> {
    match command {
        Commands::Check { query, json } => {
            CheckStrategy
                .execute(CheckInput {
                    query: QueryInput::new(config, &query)?,
                    json,
                })
                .await
        }
        Commands::Expand { query } => {
            ExpandStrategy
                .execute(QueryInput::new(config, &query)?)
                .await
        }
        Commands::Risk { query } => {
            RiskStrategy
                .execute(QueryInput::new(config, &query)?)
                .await
        }
        Commands::Info => InfoStrategy.execute(config.clone()).await,
        // Handled before the config is loaded.
        Commands::Init | Commands::Version => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_tracing("warn")?;
            InitStrategy.execute(cli.config).await
        }
        Commands::Version => VersionStrategy.execute(()).await,
        command => {
            let config = Config::load_or_default(cli.config.as_deref())?;
            init_tracing(&config.logging.level)?;
            run(command, &config).await
        }
    }
}
