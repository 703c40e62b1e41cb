//! The response envelope shared by every gateway endpoint.
//!
//! ```json
//! {
//!   "status": {"code": 200, "message": "success", "errors": []},
//!   "data": {"total_amount": 100.0, "total_amount_currency": "EGP"},
//!   "count": null, "next": null, "previous": null
//! }
//! ```
//!
//! Responses are decoded in two steps: first into a [`RawEnvelope`] whose
//! `data` is left as unparsed JSON, then, once the status has been checked,
//! the payload is decoded into its concrete type. A rejected response is
//! therefore an error even when its `data` would have parsed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

/// Status block of an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// HTTP-like status code; 2xx means success.
    pub code: u32,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Individual error strings, empty on success.
    #[serde(default)]
    pub errors: Vec<String>,
}

impl Status {
    /// Returns `true` when `code` is in `200..300`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.code >= 200 && self.code < 300
    }
}

/// Common wrapper of every API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Outcome reported by the gateway.
    pub status: Status,
    /// Payload; absent or `null` on most failures.
    pub data: Option<T>,
    /// Total item count for paginated endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// URL of the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// URL of the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl<T> Envelope<T> {
    /// Returns `true` when the envelope status reports success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// An envelope whose payload has not been decoded yet.
pub type RawEnvelope = Envelope<Box<RawValue>>;

impl RawEnvelope {
    /// Parses the envelope structure from a response body.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the body is not an envelope.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Decodes the payload into `T`.
    ///
    /// A missing or `null` payload is decoded as JSON `null`, which fails for
    /// any struct payload.
    ///
    /// # Errors
    ///
    /// Returns a JSON error if the payload does not match `T`.
    pub fn decode_data<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let raw = self.data.as_deref().map_or("null", RawValue::get);
        serde_json::from_str(raw)
    }
}
