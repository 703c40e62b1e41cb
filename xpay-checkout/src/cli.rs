//! Command-line arguments.
//!
//! Every connection setting can come from a flag, the process environment,
//! or a `.env` file in the working directory (loaded before parsing).

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use url::Url;
use xpay::proto::{BillingContact, Currency, PaymentMethod, PaymentRequest};
use xpay::{ClientConfig, SdkMode};

/// Talk to the XPay gateway from a terminal.
#[derive(Debug, Parser)]
#[command(name = "xpay-checkout", version, about)]
pub struct Cli {
    /// Gateway environment: `live` or `sandbox`.
    #[arg(long, env = "XPAY_MODE", default_value_t = SdkMode::Sandbox)]
    pub mode: SdkMode,

    /// Community API key.
    #[arg(long, env = "XPAY_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Payment profile (variable amount) identifier.
    #[arg(long, env = "XPAY_PAYMENT_PROFILE_ID")]
    pub payment_profile_id: u64,

    /// Community identifier.
    #[arg(long, env = "XPAY_COMMUNITY_ID")]
    pub community_id: String,

    /// Override the API base URL derived from the mode.
    #[arg(long, env = "XPAY_BASE_URL")]
    pub base_url: Option<Url>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "XPAY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

/// What to do.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve an amount into the chargeable total.
    Prepare {
        /// Requested amount.
        #[arg(long)]
        amount: Decimal,
    },
    /// Submit a payment and walk through the authorization page.
    Pay {
        /// Amount to charge.
        #[arg(long)]
        amount: Decimal,
        /// Amount before fees; defaults to `--amount`.
        #[arg(long)]
        original_amount: Option<Decimal>,
        #[command(flatten)]
        payer: PayerArgs,
    },
    /// Show a transaction.
    Transaction {
        /// Transaction UUID returned when paying.
        uuid: String,
    },
    /// Prepare, pay the prepared total, then show the resulting transaction.
    Checkout {
        /// Requested amount.
        #[arg(long)]
        amount: Decimal,
        #[command(flatten)]
        payer: PayerArgs,
    },
}

/// Payment options shared by `pay` and `checkout`.
#[derive(Debug, Clone, Args)]
pub struct PayerArgs {
    /// Currency code.
    #[arg(long, default_value_t = Currency::Egp)]
    pub currency: Currency,

    /// Payment method: `card`, `fawry` or `meeza/digital`.
    #[arg(long, default_value_t = PaymentMethod::Card)]
    pub method: PaymentMethod,

    /// Payer name.
    #[arg(long)]
    pub name: String,

    /// Payer email.
    #[arg(long)]
    pub email: String,

    /// Payer phone number.
    #[arg(long)]
    pub phone: String,

    /// Stop waiting for the authorization page after this many seconds.
    #[arg(long)]
    pub redirect_timeout_secs: Option<u64>,
}

impl Cli {
    /// Builds the client configuration from the connection arguments.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(
            self.mode,
            self.api_key.clone(),
            self.payment_profile_id,
            self.community_id.clone(),
        );
        if let Some(base_url) = &self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

impl PayerArgs {
    /// Builds a payment request for `amount`.
    #[must_use]
    pub fn payment_request(&self, amount: Decimal, original_amount: Decimal) -> PaymentRequest {
        PaymentRequest::new(
            amount,
            BillingContact::new(self.name.clone(), self.email.clone(), self.phone.clone()),
        )
        .with_original_amount(original_amount)
        .with_currency(self.currency)
        .with_method(self.method)
    }

    /// Returns the redirect timeout, if any.
    #[must_use]
    pub fn redirect_timeout(&self) -> Option<Duration> {
        self.redirect_timeout_secs.map(Duration::from_secs)
    }
}
