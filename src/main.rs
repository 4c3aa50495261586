use anyhow::Result;
use bankctl::core::log::init_logging;
use clap::{CommandFactory, Parser, Subcommand};

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

impl From<Commands> for bankctl::AppCommand {
    fn from(cmd: Commands) -> bankctl::AppCommand {
        match cmd {
            Commands::Currencies { retry_failed } => {
                bankctl::AppCommand::Currencies { retry_failed }
            }
            Commands::Pay {
                amount,
                currency,
                from,
                to,
            } => bankctl::AppCommand::Pay(bankctl::PayOptions {
                amount,
                currency,
                from_account: from,
                to_account: to,
            }),
            Commands::Transactions => bankctl::AppCommand::Transactions,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch and display currency information for all countries
    Currencies {
        /// Retry the failed lookups once after the full refresh
        #[arg(long)]
        retry_failed: bool,
    },
    /// Submit a payment through the gateway
    Pay {
        /// Amount to transfer
        #[arg(long)]
        amount: f64,
        /// Payment currency (defaults to the configured currency)
        #[arg(long)]
        currency: Option<String>,
        /// Source account, e.g. ACC12345
        #[arg(long)]
        from: String,
        /// Destination account, e.g. ACC67890
        #[arg(long)]
        to: String,
    },
    /// Display transaction history
    Transactions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => bankctl::cli::setup::setup(),
        Some(cmd) => bankctl::run_command(cmd.into(), cli.config_path.as_deref()).await,
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
