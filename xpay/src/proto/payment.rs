//! Payload types returned by the gateway and the enums used to pay.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::UnknownValueError;

/// Currencies accepted by the pay endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Egyptian pound.
    #[default]
    Egp,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// Saudi riyal.
    Sar,
    /// UAE dirham.
    Aed,
    /// Pound sterling.
    Gbp,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Self; 6] = [
        Self::Egp,
        Self::Usd,
        Self::Eur,
        Self::Sar,
        Self::Aed,
        Self::Gbp,
    ];

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Egp => "EGP",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Sar => "SAR",
            Self::Aed => "AED",
            Self::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownValueError::new("currency", s, "EGP, USD, EUR, SAR, AED or GBP"))
    }
}

/// How the payer settles the payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Card payment through the hosted authorization page.
    #[default]
    #[serde(rename = "card")]
    Card,
    /// Fawry reference code.
    #[serde(rename = "fawry")]
    Fawry,
    /// Meeza digital wallet.
    #[serde(rename = "meeza/digital")]
    MeezaDigital,
}

impl PaymentMethod {
    /// Returns the `pay_using` wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Fawry => "fawry",
            Self::MeezaDigital => "meeza/digital",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" => Ok(Self::Card),
            "fawry" => Ok(Self::Fawry),
            "meeza/digital" | "meeza-digital" | "meeza" => Ok(Self::MeezaDigital),
            _ => Err(UnknownValueError::new(
                "payment method",
                s,
                "card, fawry or meeza/digital",
            )),
        }
    }
}

/// Payer contact details forwarded as `billing_data`.
///
/// Not validated here; the gateway rejects malformed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingContact {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, in whatever format the gateway accepts.
    pub phone_number: String,
}

impl BillingContact {
    /// Creates a billing contact.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }
}

/// Result of the prepare step: the amount that will actually be charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedAmount {
    /// Total chargeable amount, fees included.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    /// Currency of `total_amount`.
    #[serde(rename = "total_amount_currency")]
    pub currency: String,
}

/// Result of submitting a payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSubmission {
    /// Hosted authorization page, when the method needs one.
    #[serde(rename = "iframe_url", default)]
    pub redirect_url: Option<String>,
    /// Numeric transaction identifier.
    pub transaction_id: u64,
    /// Status at submission time (e.g. `"PENDING"`).
    pub transaction_status: String,
    /// Durable handle for later status queries.
    pub transaction_uuid: String,
}

impl PaymentSubmission {
    /// Returns the authorization URL, treating an empty string as absent.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        self.redirect_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// A transaction as reported by the community transactions endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Creation timestamp, as sent by the gateway.
    #[serde(rename = "created")]
    pub created_at: String,
    /// Numeric identifier.
    pub id: u64,
    /// Durable identifier.
    pub uuid: String,
    /// Community member the payment is attributed to.
    #[serde(default)]
    pub member_id: Option<String>,
    /// Total amount; a decimal string on the wire.
    pub total_amount: Decimal,
    /// Currency of `total_amount`.
    #[serde(rename = "total_amount_currency")]
    pub currency: String,
    /// What the payment is for (e.g. `"API Payment"`).
    pub payment_for: String,
    /// Reference number of the paid item, if any.
    #[serde(default)]
    pub payment_for_number: Option<u64>,
    /// Current transaction status (e.g. `"SUCCESSFUL"`).
    pub status: String,
    /// Total amount in minor units (piasters for EGP).
    #[serde(rename = "total_amount_piasters")]
    pub total_amount_minor_units: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prepared_amount_maps_snake_case_keys() {
        let data: PreparedAmount = serde_json::from_value(json!({
            "total_amount": 102.5,
            "total_amount_currency": "EGP"
        }))
        .unwrap();
        assert_eq!(
            data,
            PreparedAmount {
                total_amount: Decimal::new(1025, 1),
                currency: "EGP".into(),
            }
        );
    }

    #[test]
    fn prepared_amount_accepts_integer_total() {
        let data: PreparedAmount = serde_json::from_value(json!({
            "total_amount": 100,
            "total_amount_currency": "USD"
        }))
        .unwrap();
        assert_eq!(data.total_amount, Decimal::from(100));
    }

    #[test]
    fn submission_maps_iframe_url() {
        let data: PaymentSubmission = serde_json::from_value(json!({
            "iframe_url": "https://staging.xpay.app/pay/iframe/abc",
            "transaction_id": 1234,
            "transaction_status": "PENDING",
            "transaction_uuid": "0b9b6d2a-2e47-4b6b-9d6e-3f1a0f6c1f11"
        }))
        .unwrap();
        assert_eq!(data.redirect_url(), Some("https://staging.xpay.app/pay/iframe/abc"));
        assert_eq!(data.transaction_id, 1234);
        assert_eq!(data.transaction_status, "PENDING");
        assert_eq!(data.transaction_uuid, "0b9b6d2a-2e47-4b6b-9d6e-3f1a0f6c1f11");
    }

    #[test]
    fn submission_without_redirect() {
        let missing: PaymentSubmission = serde_json::from_value(json!({
            "transaction_id": 1,
            "transaction_status": "PENDING",
            "transaction_uuid": "u"
        }))
        .unwrap();
        assert_eq!(missing.redirect_url(), None);

        let empty: PaymentSubmission = serde_json::from_value(json!({
            "iframe_url": "",
            "transaction_id": 1,
            "transaction_status": "PENDING",
            "transaction_uuid": "u"
        }))
        .unwrap();
        assert_eq!(empty.redirect_url(), None);
    }

    #[test]
    fn transaction_record_maps_all_fields() {
        let record: TransactionRecord = serde_json::from_value(json!({
            "created": "2024-07-26T10:15:00Z",
            "id": 77,
            "uuid": "tx-uuid",
            "member_id": null,
            "total_amount": "102.50",
            "total_amount_currency": "EGP",
            "payment_for": "API Payment",
            "payment_for_number": null,
            "status": "SUCCESSFUL",
            "total_amount_piasters": 10250
        }))
        .unwrap();
        assert_eq!(record.created_at, "2024-07-26T10:15:00Z");
        assert_eq!(record.id, 77);
        assert_eq!(record.uuid, "tx-uuid");
        assert_eq!(record.member_id, None);
        assert_eq!(record.total_amount, Decimal::new(10250, 2));
        assert_eq!(record.currency, "EGP");
        assert_eq!(record.payment_for, "API Payment");
        assert_eq!(record.payment_for_number, None);
        assert_eq!(record.status, "SUCCESSFUL");
        assert_eq!(record.total_amount_minor_units, 10250);
    }

    #[test]
    fn enums_use_wire_values() {
        assert_eq!(serde_json::to_value(Currency::Egp).unwrap(), json!("EGP"));
        assert_eq!(serde_json::to_value(Currency::Gbp).unwrap(), json!("GBP"));
        assert_eq!(
            serde_json::to_value(PaymentMethod::MeezaDigital).unwrap(),
            json!("meeza/digital")
        );
        assert_eq!(serde_json::to_value(PaymentMethod::Card).unwrap(), json!("card"));
    }

    #[test]
    fn enums_parse_from_cli_strings() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("EGP".parse::<Currency>().unwrap(), Currency::Egp);
        assert!("BTC".parse::<Currency>().is_err());
        assert_eq!("fawry".parse::<PaymentMethod>().unwrap(), PaymentMethod::Fawry);
        assert_eq!(
            "meeza/digital".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::MeezaDigital
        );
        assert!("cash".parse::<PaymentMethod>().is_err());
    }
}
