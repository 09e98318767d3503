use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use currex::core::currency::CurrencyCode;
use currex::core::log::init_logging;

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

impl From<Commands> for currex::AppCommand {
    fn from(cmd: Commands) -> currex::AppCommand {
        match cmd {
            Commands::Status => currex::AppCommand::Status,
            Commands::Refresh { force } => currex::AppCommand::Refresh { force },
            Commands::Rates => currex::AppCommand::Rates,
            Commands::Convert { amount, from, to } => {
                currex::AppCommand::Convert { amount, from, to }
            }
            Commands::Switch => currex::AppCommand::Switch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show whether cached rates are fresh
    Status,
    /// Fetch exchange rates when the cache is stale
    Refresh {
        /// Fetch even if the cached rates are fresh
        #[arg(short, long)]
        force: bool,
    },
    /// List cached exchange rates
    Rates,
    /// Convert an amount between the selected currencies
    Convert {
        amount: f64,
        /// Source currency code, saved for later runs
        #[arg(short, long)]
        from: Option<CurrencyCode>,
        /// Target currency code, saved for later runs
        #[arg(short, long)]
        to: Option<CurrencyCode>,
    },
    /// Swap the source and target currencies
    Switch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => currex::cli::setup::setup(),
        Some(cmd) => currex::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
