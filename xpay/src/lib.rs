#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the XPay community payment gateway.
//!
//! This crate holds everything about the gateway that does not need an HTTP
//! stack: environment modes, client configuration, the response envelope and
//! the payload types exchanged with the API. The transport client and the
//! checkout flow live in `xpay-http`.
//!
//! # Modules
//!
//! - [`mode`] - Live/sandbox environments and their base URLs
//! - [`config`] - Immutable client configuration
//! - [`proto`] - Wire format: envelope, payloads and typed request bodies
//! - [`error`] - Server rejections and parse errors

pub mod config;
pub mod error;
pub mod mode;
pub mod proto;

pub use config::ClientConfig;
pub use error::{StatusError, UnknownValueError};
pub use mode::SdkMode;
