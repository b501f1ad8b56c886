use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use fxdash::core::log::init_logging;
use fxdash::dashboard::Selection;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxdash::AppCommand {
    fn from(cmd: Commands) -> fxdash::AppCommand {
        match cmd {
            Commands::Serve => fxdash::AppCommand::Serve,
            Commands::Show {
                currency,
                start,
                end,
            } => fxdash::AppCommand::Show(Selection {
                currency,
                start_date: start,
                end_date: end,
            }),
            Commands::Currencies => fxdash::AppCommand::Currencies,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve the dashboard (default)
    Serve,
    /// Print the daily closes of a currency for a date range
    Show {
        /// Display name of the currency, as listed by `currencies`
        #[arg(long)]
        currency: String,
        /// First day of the range (YYYY-MM-DD), defaults to the oldest available
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the range (YYYY-MM-DD), defaults to the newest available
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List supported currencies
    Currencies,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxdash::cli::setup::setup(),
        Some(cmd) => fxdash::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => fxdash::run_command(fxdash::AppCommand::Serve, cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
