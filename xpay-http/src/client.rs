//! Async HTTP client for the XPay gateway API.
//!
//! [`XPayClient`] covers the three endpoints an SDK integration needs:
//!
//! - `POST v1/payments/prepare-amount/` via [`XPayClient::prepare_amount`]
//! - `POST v1/payments/pay/variable-amount` via [`XPayClient::submit_payment`]
//! - `GET v1/communities/{id}/transactions/{uuid}/` via [`XPayClient::fetch_transaction`]
//!
//! Every call is one-shot: no retries, no caching. Responses go through a
//! single decoding pipeline (see [`ClientError`] for the failure taxonomy)
//! and only the envelope's `data` is returned on success.
//!
//! ## Telemetry
//!
//! With the `telemetry` feature each call runs in a `tracing` span named
//! `xpay.client.<operation>` and failures are logged as error events.

use std::fmt::Display;
use std::sync::Arc;

use http::header::{HeaderMap, HeaderValue};
use http::StatusCode;
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use url::Url;
use xpay::ClientConfig;
use xpay::proto::{
    PayBody, PaymentRequest, PaymentSubmission, PrepareAmountBody, PreparedAmount, RawEnvelope,
    TransactionRecord,
};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::constants::{
    API_KEY_HEADER, COMMUNITIES_PATH, PAY_VARIABLE_AMOUNT_PATH, PREPARE_AMOUNT_PATH,
};
use crate::error::ClientError;

/// A client for the XPay gateway.
///
/// Cloning is cheap: clones share the connection pool and the configuration.
///
/// # Example
///
/// ```no_run
/// use rust_decimal::Decimal;
/// use xpay::{ClientConfig, SdkMode};
/// use xpay_http::XPayClient;
///
/// # async fn run() -> Result<(), xpay_http::ClientError> {
/// let config = ClientConfig::new(SdkMode::Sandbox, "api-key", 60, "m2J7eBK");
/// let client = XPayClient::new(config)?;
/// let prepared = client.prepare_amount(Decimal::from(100)).await?;
/// println!("{} {}", prepared.total_amount, prepared.currency);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct XPayClient {
    /// Immutable configuration shared by all clones
    config: Arc<ClientConfig>,
    /// Full URL of `POST prepare-amount`
    prepare_amount_url: Url,
    /// Full URL of `POST pay/variable-amount`
    pay_url: Url,
    /// `v1/communities/{community_id}/transactions/`, completed per request
    transactions_url: Url,
    /// Headers sent with every request (the API key)
    headers: HeaderMap,
    /// Shared Reqwest HTTP client
    client: Client,
}

impl XPayClient {
    /// Constructs a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if an endpoint URL cannot be built or the API
    /// key is not a valid header value.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::with_http_client(config, Client::new())
    }

    /// Constructs a client that sends requests through a pre-configured
    /// reqwest client (proxies, custom TLS roots, user agent).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if an endpoint URL cannot be built or the API
    /// key is not a valid header value.
    pub fn with_http_client(config: ClientConfig, client: Client) -> Result<Self, ClientError> {
        let base_url = config.base_url();
        let prepare_amount_url =
            base_url
                .join(PREPARE_AMOUNT_PATH)
                .map_err(|e| ClientError::UrlParse {
                    context: "Failed to construct prepare-amount URL",
                    source: e,
                })?;
        let pay_url = base_url
            .join(PAY_VARIABLE_AMOUNT_PATH)
            .map_err(|e| ClientError::UrlParse {
                context: "Failed to construct pay URL",
                source: e,
            })?;
        let mut transactions_url =
            base_url
                .join(COMMUNITIES_PATH)
                .map_err(|e| ClientError::UrlParse {
                    context: "Failed to construct communities URL",
                    source: e,
                })?;
        transactions_url
            .path_segments_mut()
            .map_err(|()| ClientError::UrlParse {
                context: "Base URL cannot hold a path",
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .push(config.community_id())
            .push("transactions")
            .push("");

        let mut api_key =
            HeaderValue::from_str(config.api_key()).map_err(ClientError::InvalidApiKey)?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);

        Ok(Self {
            config: Arc::new(config),
            prepare_amount_url,
            pay_url,
            transactions_url,
            headers,
            client,
        })
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns the computed prepare-amount URL.
    #[must_use]
    pub const fn prepare_amount_url(&self) -> &Url {
        &self.prepare_amount_url
    }

    /// Returns the computed pay URL.
    #[must_use]
    pub const fn pay_url(&self) -> &Url {
        &self.pay_url
    }

    /// Returns the URL of a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidTransactionId`] for an empty, `.` or `..`
    /// UUID, and [`ClientError::UrlParse`] if the base URL cannot hold a path.
    pub fn transaction_url(&self, uuid: &str) -> Result<Url, ClientError> {
        // `push` drops dot segments, which would address the collection
        if matches!(uuid, "" | "." | "..") {
            return Err(ClientError::InvalidTransactionId {
                uuid: uuid.to_owned(),
            });
        }
        let mut target = self.transactions_url.clone();
        target
            .path_segments_mut()
            .map_err(|()| ClientError::UrlParse {
                context: "Base URL cannot hold a path",
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            })?
            .pop_if_empty()
            .push(uuid)
            .push("");
        Ok(target)
    }

    /// Resolves a requested amount into the chargeable total.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, empty or undecodable
    /// body, or a rejected status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "xpay.client.prepare_amount", skip_all, fields(amount = %amount))
    )]
    pub async fn prepare_amount(&self, amount: Decimal) -> Result<PreparedAmount, ClientError> {
        let body = PrepareAmountBody::new(&self.config, amount);
        let request = self.client.post(self.prepare_amount_url.clone()).json(&body);
        self.send(request, "POST prepare-amount").await
    }

    /// Submits a variable-amount payment.
    ///
    /// This only creates the payment; see [`Checkout`](crate::Checkout) for
    /// the flow that also drives the authorization redirect.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, empty or undecodable
    /// body, or a rejected status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "xpay.client.submit_payment",
            skip_all,
            fields(amount = %request.amount, currency = %request.currency, method = %request.method)
        )
    )]
    pub async fn submit_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentSubmission, ClientError> {
        let body = PayBody::new(&self.config, request);
        let request = self.client.post(self.pay_url.clone()).json(&body);
        self.send(request, "POST pay/variable-amount").await
    }

    /// Fetches a transaction by its UUID.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, empty or undecodable
    /// body, or a rejected status.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "xpay.client.fetch_transaction", skip(self))
    )]
    pub async fn fetch_transaction(&self, uuid: &str) -> Result<TransactionRecord, ClientError> {
        let url = self.transaction_url(uuid)?;
        let request = self.client.get(url);
        self.send(request, "GET transaction").await
    }

    /// Attaches headers and timeout, sends, and decodes the envelope.
    ///
    /// `context` is a human-readable identifier used in tracing and error
    /// messages (e.g. `"POST prepare-amount"`).
    async fn send<R>(&self, request: RequestBuilder, context: &'static str) -> Result<R, ClientError>
    where
        R: DeserializeOwned,
    {
        let mut request = request.headers(self.headers.clone());
        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        let result = execute(request, context).await;

        record_result(context, &result);

        result
    }
}

async fn execute<R>(request: RequestBuilder, context: &'static str) -> Result<R, ClientError>
where
    R: DeserializeOwned,
{
    let response = request
        .send()
        .await
        .map_err(|source| ClientError::Transport { context, source })?;
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| ClientError::Transport { context, source })?;
    decode_response(context, status, &body)
}

/// Turns a raw HTTP response into the envelope payload.
///
/// Order matters: an empty body is never parsed, and a rejected envelope is
/// an error even if its `data` would decode.
pub(crate) fn decode_response<R>(
    context: &'static str,
    status: StatusCode,
    body: &[u8],
) -> Result<R, ClientError>
where
    R: DeserializeOwned,
{
    if body.is_empty() {
        return Err(ClientError::NoData { context });
    }

    let envelope = match RawEnvelope::from_slice(body) {
        Ok(envelope) => envelope,
        Err(source) if status.is_success() => return Err(ClientError::Decode { context, source }),
        Err(_) => {
            return Err(ClientError::HttpStatus {
                context,
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            });
        }
    };

    if !envelope.is_success() {
        return Err(ClientError::Rejected {
            context,
            source: envelope.status.into(),
        });
    }
    if !status.is_success() {
        let source = xpay::StatusError::new(u32::from(status.as_u16()), envelope.status.message)
            .with_errors(envelope.status.errors);
        return Err(ClientError::Rejected { context, source });
    }

    envelope
        .decode_data()
        .map_err(|source| ClientError::Decode { context, source })
}

/// Logs the outcome of a request.
#[cfg(feature = "telemetry")]
fn record_result<R, E: Display>(context: &'static str, result: &Result<R, E>) {
    match result {
        Ok(_) => tracing::debug!(context, "Request to gateway succeeded"),
        Err(err) => tracing::error!(context, error = %err, "Request to gateway failed"),
    }
}

/// Logs the outcome of a request.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result<R, E: Display>(_context: &'static str, _result: &Result<R, E>) {}
