//! HTTP-specific constants for the XPay gateway API.

/// Header carrying the community API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Path of the prepare-amount endpoint, relative to the API base URL.
pub const PREPARE_AMOUNT_PATH: &str = "v1/payments/prepare-amount/";

/// Path of the variable-amount pay endpoint, relative to the API base URL.
pub const PAY_VARIABLE_AMOUNT_PATH: &str = "v1/payments/pay/variable-amount";

/// Path prefix of the community endpoints; followed by
/// `{community_id}/transactions/{uuid}/`.
pub const COMMUNITIES_PATH: &str = "v1/communities/";
