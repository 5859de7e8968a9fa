//! Rates CLI
//!
//! Command-line interface for the exchange rates API.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use rates_client::RatesClient;
use rates_types::CurrencyId;

#[derive(Parser)]
#[command(name = "rates")]
#[command(author, version, about = "Exchange rates API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Rates API
    #[arg(long, env = "RATES_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Rate of a currency at midnight UTC of a date
    Rate {
        /// NBRB currency ID
        currency_id: String,
        /// Calendar date (YYYY-MM-DD)
        #[arg(long)]
        date: String,
    },
    /// List stored rates, ten per page
    List {
        /// Page number, starting at 1
        #[arg(long, default_value = "1")]
        page: u32,
    },
}

fn parse_currency_id(s: &str) -> Result<CurrencyId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid currency ID: {}", s))
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| anyhow::anyhow!("Invalid date: {}. Expected YYYY-MM-DD", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = RatesClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Rate { currency_id, date } => {
            let currency_id = parse_currency_id(&currency_id)?;
            let date = parse_date(&date)?;
            let rate = client.get_rate(currency_id, date).await?;
            println!("{}", serde_json::to_string_pretty(&rate)?);
        }

        Commands::List { page } => {
            if page == 0 {
                anyhow::bail!("Page numbers start at 1");
            }
            let page = client.list_rates(page).await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}
