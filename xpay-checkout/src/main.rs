//! Command-line checkout against the XPay gateway.
//!
//! # Usage
//!
//! ```bash
//! # Resolve the chargeable total for 100 EGP
//! xpay-checkout --api-key "$KEY" --payment-profile-id 60 --community-id m2J7eBK \
//!     prepare --amount 100
//!
//! # Full flow: prepare, pay by card, authorize in the browser, show the result
//! xpay-checkout checkout --amount 100 --name "Jane Doe" \
//!     --email jane@example.com --phone +201000000000
//!
//! # Configure logging level
//! RUST_LOG=debug xpay-checkout transaction 0b9b6d2a-2e47-4b6b-9d6e-3f1a0f6c1f11
//! ```
//!
//! # Environment Variables
//!
//! - `XPAY_MODE` — `live` or `sandbox` (default: `sandbox`)
//! - `XPAY_API_KEY` — Community API key
//! - `XPAY_PAYMENT_PROFILE_ID` — Payment profile (variable amount) id
//! - `XPAY_COMMUNITY_ID` — Community id
//! - `XPAY_BASE_URL` — Override the API base URL
//! - `XPAY_TIMEOUT_SECS` — Per-request timeout
//! - `RUST_LOG` — Log level filter (default: `info`)
//!
//! A `.env` file in the working directory is loaded first.

mod cli;
mod console;

use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::EnvFilter;
use xpay_http::{Checkout, XPayClient};

use crate::cli::{Cli, Command};
use crate::console::ConsoleRedirect;

#[tokio::main]
async fn main() {
    let dotenv = dotenvy::dotenv();

    // Logs go to stderr; stdout carries the JSON results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env: {e}"),
    }

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!("Checkout failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.client_config();
    tracing::info!(
        mode = %config.mode(),
        base_url = %config.base_url(),
        community_id = config.community_id(),
        "Loaded configuration"
    );
    let client = XPayClient::new(config)?;

    match cli.command {
        Command::Prepare { amount } => {
            let prepared = client.prepare_amount(amount).await?;
            tracing::info!(
                "Payment details: {} {}",
                prepared.total_amount,
                prepared.currency
            );
            emit(&prepared)?;
        }
        Command::Pay {
            amount,
            original_amount,
            payer,
        } => {
            let request = payer.payment_request(amount, original_amount.unwrap_or(amount));
            let checkout = checkout(client, payer.redirect_timeout());
            let submission = checkout.make_payment(&request).await?;
            tracing::info!(
                transaction_uuid = %submission.transaction_uuid,
                status = %submission.transaction_status,
                "Payment submitted"
            );
            emit(&submission)?;
        }
        Command::Transaction { uuid } => {
            let record = client.fetch_transaction(&uuid).await?;
            tracing::info!(
                "Transaction {}: {} {} {}",
                record.uuid,
                record.status,
                record.total_amount,
                record.currency
            );
            emit(&record)?;
        }
        Command::Checkout { amount, payer } => {
            let checkout = checkout(client, payer.redirect_timeout());

            let prepared = checkout.prepare_amount(amount).await?;
            tracing::info!(
                "Payment details: {} {}",
                prepared.total_amount,
                prepared.currency
            );

            let request = payer.payment_request(prepared.total_amount, amount);
            let submission = checkout.make_payment(&request).await?;

            let record = checkout
                .fetch_transaction(&submission.transaction_uuid)
                .await?;
            tracing::info!(
                "Transaction {}: {}",
                record.uuid,
                record.status
            );

            emit(&json!({
                "prepared": prepared,
                "submission": submission,
                "transaction": record,
            }))?;
        }
    }

    Ok(())
}

fn checkout(
    client: XPayClient,
    redirect_timeout: Option<std::time::Duration>,
) -> Checkout<ConsoleRedirect> {
    let checkout = Checkout::new(client, ConsoleRedirect);
    match redirect_timeout {
        Some(timeout) => checkout.with_redirect_timeout(timeout),
        None => checkout,
    }
}

/// Writes a result to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
fn emit<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
