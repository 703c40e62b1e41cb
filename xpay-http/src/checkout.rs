//! The payment flow: submit, redirect, resolve.
//!
//! [`Checkout`] pairs an [`XPayClient`] with a [`RedirectHandler`] and turns
//! the submit → authorize sequence into one awaitable call. Status is not
//! chained: once [`Checkout::make_payment`] resolves, callers query
//! [`Checkout::fetch_transaction`] with the returned UUID to learn whether
//! the payment went through.

use std::time::Duration;

use rust_decimal::Decimal;
use url::Url;
use xpay::proto::{PaymentRequest, PaymentSubmission, PreparedAmount, TransactionRecord};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::client::XPayClient;
use crate::error::{CheckoutError, ClientError};
use crate::redirect::RedirectHandler;

/// Orchestrates a payment through the gateway and the authorization page.
///
/// # Example
///
/// ```no_run
/// use rust_decimal::Decimal;
/// use xpay::proto::{BillingContact, PaymentRequest};
/// use xpay::{ClientConfig, SdkMode};
/// use xpay_http::{Checkout, FnRedirectHandler, RedirectSession, XPayClient};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = XPayClient::new(ClientConfig::new(SdkMode::Sandbox, "key", 60, "m2J7eBK"))?;
/// let handler = FnRedirectHandler::new(|url: &url::Url| {
///     let (notifier, session) = RedirectSession::channel();
///     // hand `url` and `notifier` to the UI; it calls `notifier.dismiss()` when closed
///     # drop((url, notifier));
///     session
/// });
/// let checkout = Checkout::new(client, handler);
///
/// let prepared = checkout.prepare_amount(Decimal::from(100)).await?;
/// let request = PaymentRequest::new(
///     prepared.total_amount,
///     BillingContact::new("Jane Doe", "jane@example.com", "+201000000000"),
/// )
/// .with_original_amount(Decimal::from(100));
/// let submission = checkout.make_payment(&request).await?;
/// let record = checkout.fetch_transaction(&submission.transaction_uuid).await?;
/// println!("{}", record.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Checkout<H> {
    client: XPayClient,
    handler: H,
    redirect_timeout: Option<Duration>,
}

impl<H: RedirectHandler> Checkout<H> {
    /// Creates a checkout without a redirect timeout.
    pub const fn new(client: XPayClient, handler: H) -> Self {
        Self {
            client,
            handler,
            redirect_timeout: None,
        }
    }

    /// Gives up waiting for the redirect after `timeout`.
    ///
    /// The payment itself is not cancelled; the error carries the submission
    /// so its status can still be queried.
    #[must_use]
    pub const fn with_redirect_timeout(mut self, timeout: Duration) -> Self {
        self.redirect_timeout = Some(timeout);
        self
    }

    /// Returns the underlying client.
    pub const fn client(&self) -> &XPayClient {
        &self.client
    }

    /// Returns the redirect handler.
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    /// Returns the redirect timeout, if any.
    pub const fn redirect_timeout(&self) -> Option<Duration> {
        self.redirect_timeout
    }

    /// Resolves a requested amount into the chargeable total.
    ///
    /// # Errors
    ///
    /// See [`XPayClient::prepare_amount`].
    pub async fn prepare_amount(&self, amount: Decimal) -> Result<PreparedAmount, ClientError> {
        self.client.prepare_amount(amount).await
    }

    /// Submits a payment and, when the gateway asks for it, waits for the
    /// payer to finish with the authorization page.
    ///
    /// Resolves with the submission exactly as the gateway returned it; the
    /// redirect session contributes nothing but its end.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Client`] if submitting fails; the handler is not
    ///   invoked.
    /// - [`CheckoutError::InvalidRedirectUrl`] if the authorization URL does
    ///   not parse.
    /// - [`CheckoutError::RedirectTimedOut`] if a redirect timeout is set and
    ///   elapses first.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "xpay.checkout.make_payment", skip_all, fields(amount = %request.amount))
    )]
    pub async fn make_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentSubmission, CheckoutError> {
        let submission = self.client.submit_payment(request).await?;

        let Some(raw_url) = submission.redirect_url() else {
            #[cfg(feature = "telemetry")]
            tracing::info!(
                transaction_uuid = %submission.transaction_uuid,
                "Payment submitted without redirect"
            );
            return Ok(submission);
        };

        let url = match Url::parse(raw_url) {
            Ok(url) => url,
            Err(source) => {
                return Err(CheckoutError::InvalidRedirectUrl {
                    submission: Box::new(submission),
                    source,
                });
            }
        };

        #[cfg(feature = "telemetry")]
        tracing::info!(
            transaction_uuid = %submission.transaction_uuid,
            %url,
            "Presenting authorization page"
        );

        let session = self.handler.present(&url);
        match self.redirect_timeout {
            None => session.wait_dismissed().await,
            Some(timeout) => {
                if tokio::time::timeout(timeout, session.wait_dismissed())
                    .await
                    .is_err()
                {
                    #[cfg(feature = "telemetry")]
                    tracing::warn!(
                        transaction_uuid = %submission.transaction_uuid,
                        ?timeout,
                        "Authorization page not dismissed in time"
                    );
                    return Err(CheckoutError::RedirectTimedOut {
                        submission: Box::new(submission),
                        timeout,
                    });
                }
            }
        }

        #[cfg(feature = "telemetry")]
        tracing::info!(
            transaction_uuid = %submission.transaction_uuid,
            "Authorization page dismissed"
        );

        Ok(submission)
    }

    /// Fetches the authoritative state of a transaction.
    ///
    /// # Errors
    ///
    /// See [`XPayClient::fetch_transaction`].
    pub async fn fetch_transaction(&self, uuid: &str) -> Result<TransactionRecord, ClientError> {
        self.client.fetch_transaction(uuid).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::{RedirectNotifier, RedirectSession};
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use xpay::proto::BillingContact;
    use xpay::{ClientConfig, SdkMode};

    /// Records presented URLs and parks the notifiers until the test
    /// dismisses them.
    #[derive(Default)]
    struct RecordingHandler {
        presented: Mutex<Vec<Url>>,
        notifiers: Mutex<Vec<RedirectNotifier>>,
    }

    impl RecordingHandler {
        fn presented(&self) -> Vec<Url> {
            self.presented.lock().unwrap().clone()
        }

        fn dismiss_all(&self) {
            for notifier in self.notifiers.lock().unwrap().drain(..) {
                notifier.dismiss();
            }
        }
    }

    impl RedirectHandler for RecordingHandler {
        fn present(&self, url: &Url) -> RedirectSession {
            let (notifier, session) = RedirectSession::channel();
            notifier.load_started(url.clone());
            self.presented.lock().unwrap().push(url.clone());
            self.notifiers.lock().unwrap().push(notifier);
            session
        }
    }

    fn request() -> PaymentRequest {
        PaymentRequest::new(
            Decimal::from(100),
            BillingContact::new("Jane Doe", "jane@example.com", "+201000000000"),
        )
    }

    async fn server_returning(iframe_url: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/payments/pay/variable-amount"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": {"code": 200, "message": "success", "errors": []},
                "data": {
                    "iframe_url": iframe_url,
                    "transaction_id": 55,
                    "transaction_status": "PENDING",
                    "transaction_uuid": "uuid-55"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;
        server
    }

    fn client_at(uri: &str) -> XPayClient {
        let config = ClientConfig::new(SdkMode::Sandbox, "key", 60, "m2J7eBK")
            .with_base_url(Url::parse(uri).unwrap());
        XPayClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn resolves_immediately_without_redirect() {
        let server = server_returning("").await;
        let checkout = Checkout::new(client_at(&server.uri()), RecordingHandler::default());

        let submission = checkout.make_payment(&request()).await.unwrap();
        assert_eq!(submission.transaction_uuid, "uuid-55");
        assert!(checkout.handler().presented().is_empty());
    }

    #[tokio::test]
    async fn waits_for_dismissal_and_returns_original_submission() {
        let server = server_returning("https://staging.xpay.app/pay/iframe/55").await;
        let handler = std::sync::Arc::new(RecordingHandler::default());
        let checkout = std::sync::Arc::new(Checkout::new(
            client_at(&server.uri()),
            std::sync::Arc::clone(&handler),
        ));

        let task = tokio::spawn({
            let checkout = std::sync::Arc::clone(&checkout);
            async move { checkout.make_payment(&request()).await }
        });

        // Wait until the page is presented, then make sure the flow is still pending.
        while handler.presented().is_empty() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!task.is_finished());
        assert_eq!(
            handler.presented(),
            vec![Url::parse("https://staging.xpay.app/pay/iframe/55").unwrap()]
        );

        handler.dismiss_all();
        let submission = task.await.unwrap().unwrap();
        assert_eq!(submission.transaction_id, 55);
        assert_eq!(submission.transaction_status, "PENDING");
        assert_eq!(
            submission.redirect_url(),
            Some("https://staging.xpay.app/pay/iframe/55")
        );
    }

    #[tokio::test]
    async fn transport_error_skips_redirect() {
        let checkout = Checkout::new(client_at("http://127.0.0.1:1/"), RecordingHandler::default());

        let err = checkout.make_payment(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::Client(ClientError::Transport { .. })
        ));
        assert!(err.submission().is_none());
        assert!(checkout.handler().presented().is_empty());
    }

    #[tokio::test]
    async fn invalid_redirect_url_keeps_submission() {
        let server = server_returning("not a url").await;
        let checkout = Checkout::new(client_at(&server.uri()), RecordingHandler::default());

        let err = checkout.make_payment(&request()).await.unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidRedirectUrl { .. }));
        assert_eq!(err.submission().unwrap().transaction_uuid, "uuid-55");
        assert!(checkout.handler().presented().is_empty());
    }

    #[tokio::test]
    async fn redirect_timeout_returns_submission() {
        let server = server_returning("https://staging.xpay.app/pay/iframe/55").await;
        let checkout = Checkout::new(client_at(&server.uri()), RecordingHandler::default())
            .with_redirect_timeout(Duration::from_millis(20));

        let err = checkout.make_payment(&request()).await.unwrap_err();
        match &err {
            CheckoutError::RedirectTimedOut { submission, timeout } => {
                assert_eq!(submission.transaction_uuid, "uuid-55");
                assert_eq!(*timeout, Duration::from_millis(20));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(checkout.handler().presented().len(), 1);
    }

    #[tokio::test]
    async fn dismissal_before_timeout_succeeds() {
        let server = server_returning("https://staging.xpay.app/pay/iframe/55").await;
        let handler = crate::redirect::FnRedirectHandler::new(|_: &Url| RedirectSession::dismissed());
        let checkout = Checkout::new(client_at(&server.uri()), handler)
            .with_redirect_timeout(Duration::from_secs(5));

        let submission = checkout.make_payment(&request()).await.unwrap();
        assert_eq!(submission.transaction_uuid, "uuid-55");
    }
}
