//! Typed request bodies.
//!
//! Every body the SDK sends is one of the structs below, serialized through
//! `serde_json`; field names are fixed here rather than spelled out at each
//! call site.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::proto::payment::{BillingContact, Currency, PaymentMethod};

/// What the caller wants to pay.
///
/// Community and payment profile come from the [`ClientConfig`]; everything
/// else is per payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Amount to charge, normally the prepared total.
    pub amount: Decimal,
    /// Amount before fees, as requested by the payer.
    pub original_amount: Decimal,
    /// Currency of both amounts.
    pub currency: Currency,
    /// Payment method.
    pub method: PaymentMethod,
    /// Payer contact details.
    pub billing: BillingContact,
}

impl PaymentRequest {
    /// Creates a card payment in EGP where `original_amount == amount`.
    #[must_use]
    pub const fn new(amount: Decimal, billing: BillingContact) -> Self {
        Self {
            amount,
            original_amount: amount,
            currency: Currency::Egp,
            method: PaymentMethod::Card,
            billing,
        }
    }

    /// Sets the pre-fee amount.
    #[must_use]
    pub const fn with_original_amount(mut self, original_amount: Decimal) -> Self {
        self.original_amount = original_amount;
        self
    }

    /// Sets the currency.
    #[must_use]
    pub const fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Sets the payment method.
    #[must_use]
    pub const fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }
}

/// Body of `POST v1/payments/prepare-amount/`.
#[derive(Debug, Clone, Serialize)]
pub struct PrepareAmountBody<'a> {
    /// Community identifier.
    pub community_id: &'a str,
    /// Requested amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl<'a> PrepareAmountBody<'a> {
    /// Builds the body for `amount` in the configured community.
    #[must_use]
    pub fn new(config: &'a ClientConfig, amount: Decimal) -> Self {
        Self {
            community_id: config.community_id(),
            amount,
        }
    }
}

/// Body of `POST v1/payments/pay/variable-amount`.
#[derive(Debug, Clone, Serialize)]
pub struct PayBody<'a> {
    /// Community identifier.
    pub community_id: &'a str,
    /// Amount to charge.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Amount before fees.
    #[serde(with = "rust_decimal::serde::float")]
    pub original_amount: Decimal,
    /// Currency code.
    pub currency: Currency,
    /// Payment profile identifier.
    pub variable_amount_id: u64,
    /// Payment method.
    pub pay_using: PaymentMethod,
    /// Payer contact details.
    pub billing_data: &'a BillingContact,
}

impl<'a> PayBody<'a> {
    /// Builds the body for `request` in the configured community.
    #[must_use]
    pub fn new(config: &'a ClientConfig, request: &'a PaymentRequest) -> Self {
        Self {
            community_id: config.community_id(),
            amount: request.amount,
            original_amount: request.original_amount,
            currency: request.currency,
            variable_amount_id: config.payment_profile_id(),
            pay_using: request.method,
            billing_data: &request.billing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::SdkMode;
    use serde_json::json;

    fn config() -> ClientConfig {
        ClientConfig::new(SdkMode::Sandbox, "key", 60, "m2J7eBK")
    }

    #[test]
    fn prepare_body_shape() {
        let config = config();
        let body = serde_json::to_value(PrepareAmountBody::new(&config, Decimal::from(100))).unwrap();
        assert_eq!(body, json!({"community_id": "m2J7eBK", "amount": 100.0}));
    }

    #[test]
    fn pay_body_shape() {
        let config = config();
        let request = PaymentRequest::new(
            Decimal::new(10250, 2),
            BillingContact::new("Jane Doe", "jane@example.com", "+201000000000"),
        )
        .with_original_amount(Decimal::from(100))
        .with_method(PaymentMethod::MeezaDigital);

        let body = serde_json::to_value(PayBody::new(&config, &request)).unwrap();
        assert_eq!(
            body,
            json!({
                "community_id": "m2J7eBK",
                "amount": 102.5,
                "original_amount": 100.0,
                "currency": "EGP",
                "variable_amount_id": 60,
                "pay_using": "meeza/digital",
                "billing_data": {
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "phone_number": "+201000000000"
                }
            })
        );
    }

    #[test]
    fn payment_request_defaults() {
        let request = PaymentRequest::new(
            Decimal::from(50),
            BillingContact::new("n", "e", "p"),
        );
        assert_eq!(request.original_amount, Decimal::from(50));
        assert_eq!(request.currency, Currency::Egp);
        assert_eq!(request.method, PaymentMethod::Card);

        let request = request.with_currency(Currency::Usd);
        assert_eq!(request.currency, Currency::Usd);
    }
}
