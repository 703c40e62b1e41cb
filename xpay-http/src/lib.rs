#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! HTTP client and checkout flow for the XPay community payment gateway.
//!
//! # Modules
//!
//! - [`client`] - [`XPayClient`], one method per gateway endpoint
//! - [`checkout`] - [`Checkout`], the submit → authorize flow
//! - [`redirect`] - [`RedirectHandler`] contract for the authorization page UI
//! - [`constants`] - Header names and endpoint paths
//! - [`error`] - [`ClientError`] and [`CheckoutError`]
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for requests and flow steps

pub mod checkout;
pub mod client;
pub mod constants;
pub mod error;
pub mod redirect;

pub use checkout::Checkout;
pub use client::XPayClient;
pub use error::{CheckoutError, ClientError};
pub use redirect::{
    FnRedirectHandler, RedirectEvent, RedirectHandler, RedirectNotifier, RedirectSession,
};
