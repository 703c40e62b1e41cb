//! Client configuration.
//!
//! A [`ClientConfig`] is assembled once with the consuming `with_*` builders
//! and then shared read-only by every request and checkout flow.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::mode::SdkMode;

/// Credentials and environment for talking to the gateway.
///
/// # Example
///
/// ```rust
/// use xpay::{ClientConfig, SdkMode};
///
/// let config = ClientConfig::new(SdkMode::Sandbox, "api-key", 60, "m2J7eBK");
/// assert_eq!(config.base_url().as_str(), "https://staging.xpay.app/api/");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    mode: SdkMode,
    api_key: String,
    payment_profile_id: u64,
    community_id: String,
    base_url: Url,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a configuration whose base URL is derived from `mode`.
    ///
    /// `payment_profile_id` is sent as `variable_amount_id` when paying.
    ///
    /// # Panics
    ///
    /// Never in practice: the mode table only holds valid absolute URLs.
    #[must_use]
    pub fn new(
        mode: SdkMode,
        api_key: impl Into<String>,
        payment_profile_id: u64,
        community_id: impl Into<String>,
    ) -> Self {
        let base_url = Url::parse(mode.base_url()).expect("mode table holds valid URLs");
        Self {
            mode,
            api_key: api_key.into(),
            payment_profile_id,
            community_id: community_id.into(),
            base_url,
            timeout: None,
        }
    }

    /// Points the client at a different API root (mock servers, proxies).
    ///
    /// A trailing `/` is added when missing so endpoint paths join below it.
    #[must_use]
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = base_url;
        self
    }

    /// Sets a per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the environment mode.
    #[must_use]
    pub const fn mode(&self) -> SdkMode {
        self.mode
    }

    /// Returns the API key sent in the `x-api-key` header.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the payment profile (variable amount) identifier.
    #[must_use]
    pub const fn payment_profile_id(&self) -> u64 {
        self.payment_profile_id
    }

    /// Returns the community identifier.
    #[must_use]
    pub fn community_id(&self) -> &str {
        &self.community_id
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout, if any.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("mode", &self.mode)
            .field("api_key", &"<redacted>")
            .field("payment_profile_id", &self.payment_profile_id)
            .field("community_id", &self.community_id)
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_follows_mode() {
        let live = ClientConfig::new(SdkMode::Live, "k", 1, "c");
        assert_eq!(live.base_url().as_str(), "https://community.xpay.app/api/");
        let sandbox = ClientConfig::new(SdkMode::Sandbox, "k", 1, "c");
        assert_eq!(sandbox.base_url().as_str(), "https://staging.xpay.app/api/");
    }

    #[test]
    fn base_url_override_gets_trailing_slash() {
        let config = ClientConfig::new(SdkMode::Sandbox, "k", 1, "c")
            .with_base_url(Url::parse("http://127.0.0.1:8080/api").unwrap());
        assert_eq!(config.base_url().as_str(), "http://127.0.0.1:8080/api/");
        assert_eq!(config.mode(), SdkMode::Sandbox);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ClientConfig::new(SdkMode::Live, "secret-key", 60, "m2J7eBK");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("m2J7eBK"));
    }

    #[test]
    fn accessors() {
        let config = ClientConfig::new(SdkMode::Live, "key", 60, "community")
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.api_key(), "key");
        assert_eq!(config.payment_profile_id(), 60);
        assert_eq!(config.community_id(), "community");
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }
}
