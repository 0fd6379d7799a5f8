//! Client example demonstrating the payment lifecycle against a running server.
//!
//! Run with: cargo run -p payments-app --example client_example --no-default-features --features sqlite

use payments_client::{ClientError, PaymentsClient};
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use rust_decimal::Decimal;
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payments.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    let repo = build_repo(&db_url).await?;

    // Start server in background
    let service = PaymentService::new(repo);
    let router = HttpServer::new(service).router();

    let listener = TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    let client = PaymentsClient::new(format!("http://127.0.0.1:{port}"));
    let card = "4111111111111111";

    // ─────────────────────────────────────────────────────────────────────────
    // Accept two payments
    // ─────────────────────────────────────────────────────────────────────────
    let small = client.accept_payment(card, Decimal::new(10000, 2)).await?;
    let large = client.accept_payment(card, Decimal::new(1500000, 2)).await?;
    println!("✓ Accepted payment {} for {}", small.id, small.amount);
    println!("✓ Accepted payment {} for {}", large.id, large.amount);

    // ─────────────────────────────────────────────────────────────────────────
    // Stop them
    // ─────────────────────────────────────────────────────────────────────────
    println!("✓ {}", client.stop_payment(small.id).await?);

    match client.stop_payment(large.id).await {
        Err(ClientError::Api { status, message }) => {
            println!("✗ Stop of {} rejected ({status}): {message}", large.id)
        }
        other => println!("? Unexpected stop result: {other:?}"),
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────
    let payments = client.payments_by_card(card).await?;
    println!("📋 {} payment(s) on record for {card}", payments.len());

    let active = client.active_payments_by_card(card).await?;
    for detail in &active {
        println!("   active: #{} {} at {}", detail.id, detail.amount, detail.timestamp);
    }

    Ok(())
}
