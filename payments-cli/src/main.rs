//! Payments CLI
//!
//! Command-line interface for the Payments API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use payments_client::PaymentsClient;
use payments_types::PaymentId;

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payments API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new payment
    Accept {
        /// Card number of the paying instrument
        #[arg(long)]
        card: String,
        /// Amount, e.g. 100.00
        #[arg(long)]
        amount: String,
    },
    /// Stop a payment accepted less than 15 minutes ago
    Stop {
        /// Payment ID
        id: String,
    },
    /// List all payments for a card
    List {
        /// Card number
        card: String,
    },
    /// List active payments for a card
    Active {
        /// Card number
        card: String,
    },
    /// Check API health
    Health,
}

fn parse_amount(s: &str) -> Result<Decimal> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid amount: {}", s))
}

fn parse_payment_id(s: &str) -> Result<PaymentId> {
    s.parse()
        .map_err(|_| anyhow::anyhow!("Invalid payment ID: {}", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PaymentsClient::new(&cli.api_url);

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

        Commands::Accept { card, amount } => {
            let amount = parse_amount(&amount)?;
            let payment = client.accept_payment(&card, amount).await?;
            println!("{}", serde_json::to_string_pretty(&payment)?);
        }

        Commands::Stop { id } => {
            let id = parse_payment_id(&id)?;
            let message = client.stop_payment(id).await?;
            println!("✓ {}", message);
        }

        Commands::List { card } => {
            let payments = client.payments_by_card(&card).await?;
            println!("{}", serde_json::to_string_pretty(&payments)?);
        }

        Commands::Active { card } => {
            let details = client.active_payments_by_card(&card).await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
    }

    Ok(())
}
