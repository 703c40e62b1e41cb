//! Wire format types for the XPay gateway API.
//!
//! - [`envelope`] - The `{status, data, ...}` wrapper around every response
//! - [`payment`] - Response payloads and the enums they reference
//! - [`request`] - Typed request bodies

pub mod envelope;
pub mod payment;
pub mod request;

pub use envelope::*;
pub use payment::*;
pub use request::*;
