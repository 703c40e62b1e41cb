//! Error types for the HTTP client and the checkout flow.

use std::time::Duration;

use http::StatusCode;
use xpay::StatusError;
use xpay::proto::PaymentSubmission;

/// Errors that can occur while calling the gateway.
///
/// `context` names the endpoint (e.g. `"POST prepare-amount"`) in every
/// variant tied to a request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An endpoint URL could not be built from the configuration.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The transaction UUID cannot name a single path segment (empty, `.`
    /// or `..`).
    #[error("invalid transaction UUID {uuid:?}")]
    InvalidTransactionId {
        /// The rejected UUID.
        uuid: String,
    },
    /// The configured API key is not a valid header value.
    #[error("API key is not a valid header value: {0}")]
    InvalidApiKey(#[source] http::header::InvalidHeaderValue),
    /// The request never produced a response body (DNS, connect, TLS,
    /// timeout, interrupted read).
    #[error("HTTP transport error: {context}: {source}")]
    Transport {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The gateway answered with an empty body.
    #[error("No data in response: {context}")]
    NoData {
        /// Human-readable context.
        context: &'static str,
    },
    /// The body is not a valid envelope, or its payload does not match the
    /// expected schema.
    #[error("Failed to decode response: {context}: {source}")]
    Decode {
        /// Human-readable context.
        context: &'static str,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// Non-2xx HTTP status with a body that is not an envelope.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        /// Human-readable context.
        context: &'static str,
        /// The HTTP status code.
        status: StatusCode,
        /// The response body.
        body: String,
    },
    /// The gateway rejected the request in the envelope status.
    #[error("Request rejected: {context}: {source}")]
    Rejected {
        /// Human-readable context.
        context: &'static str,
        /// Status block returned by the gateway.
        #[source]
        source: StatusError,
    },
}

impl ClientError {
    /// Returns the gateway status if this is a rejection.
    #[must_use]
    pub const fn status(&self) -> Option<&StatusError> {
        match self {
            Self::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors that can end a checkout flow.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// Submitting the payment failed; no redirect was shown.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The payment was created but its authorization URL is malformed.
    #[error("invalid redirect URL for transaction {}: {source}", .submission.transaction_uuid)]
    InvalidRedirectUrl {
        /// The submission as returned by the gateway.
        submission: Box<PaymentSubmission>,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The redirect was not dismissed within the configured timeout.
    #[error("redirect for transaction {} not dismissed within {timeout:?}", .submission.transaction_uuid)]
    RedirectTimedOut {
        /// The submission as returned by the gateway.
        submission: Box<PaymentSubmission>,
        /// The timeout that elapsed.
        timeout: Duration,
    },
}

impl CheckoutError {
    /// Returns the created payment, if the gateway accepted it before the
    /// flow failed.
    ///
    /// Callers can still query its status with the transaction UUID.
    #[must_use]
    pub fn submission(&self) -> Option<&PaymentSubmission> {
        match self {
            Self::Client(_) => None,
            Self::InvalidRedirectUrl { submission, .. } | Self::RedirectTimedOut { submission, .. } => {
                Some(submission.as_ref())
            }
        }
    }
}
