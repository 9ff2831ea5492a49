mod report;
mod scout;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "irscout")]
#[command(about = "Find investor-relations pages and recent company news for stock tickers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve each ticker, gather recent news and filings, and print a digest
    Scout {
        /// Ticker symbols, e.g. AAPL MSFT
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Look-back window in days (defaults to IRSCOUT_LOOKBACK_DAYS)
        #[arg(long)]
        days: Option<u32>,

        /// Maximum filings per ticker (defaults to IRSCOUT_FILINGS_LIMIT)
        #[arg(long)]
        filings_limit: Option<u32>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the resolved IR page for each ticker
    Resolve {
        #[arg(required = true)]
        tickers: Vec<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = irscout_core::load_app_config()?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Scout {
            tickers,
            days,
            filings_limit,
            json,
        } => {
            let options = scout::ScoutOptions {
                lookback_days: days.unwrap_or(config.lookback_days),
                filings_limit: filings_limit.unwrap_or(config.filings_limit),
                json,
            };
            scout::run_scout(&config, &tickers, &options).await?;
        }
        Commands::Resolve { tickers, json } => {
            scout::run_resolve(&config, &tickers, json).await?;
        }
    }

    Ok(())
}
