//! Gateway environments and their API base URLs.
//!
//! Each [`SdkMode`] maps to exactly one entry in [`MODE_ENDPOINTS`]; the base
//! URL of a mode is a lookup in that table rather than logic spread across
//! constructors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownValueError;

/// Environment the SDK talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdkMode {
    /// Production gateway; real money moves.
    Live,
    /// Staging gateway for integration work.
    #[default]
    #[serde(alias = "development", alias = "staging")]
    Sandbox,
}

/// A known environment with its canonical name and API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeEndpoint {
    /// The mode this entry describes.
    pub mode: SdkMode,
    /// Canonical lower-case name (e.g. `"sandbox"`).
    pub name: &'static str,
    /// API base URL, always ending in `/` so relative paths join below it.
    pub base_url: &'static str,
}

/// Base URL table for every [`SdkMode`].
pub static MODE_ENDPOINTS: &[ModeEndpoint] = &[
    ModeEndpoint {
        mode: SdkMode::Live,
        name: "live",
        base_url: "https://community.xpay.app/api/",
    },
    ModeEndpoint {
        mode: SdkMode::Sandbox,
        name: "sandbox",
        base_url: "https://staging.xpay.app/api/",
    },
];

impl SdkMode {
    /// Returns the table entry for this mode.
    #[must_use]
    pub fn endpoint(self) -> &'static ModeEndpoint {
        MODE_ENDPOINTS
            .iter()
            .find(|e| e.mode == self)
            .unwrap_or(&MODE_ENDPOINTS[0])
    }

    /// Returns the API base URL for this mode.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        self.endpoint().base_url
    }

    /// Returns the canonical name of this mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.endpoint().name
    }
}

impl fmt::Display for SdkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SdkMode {
    type Err = UnknownValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if matches!(normalized.as_str(), "development" | "staging") {
            return Ok(Self::Sandbox);
        }
        MODE_ENDPOINTS
            .iter()
            .find(|e| e.name == normalized)
            .map(|e| e.mode)
            .ok_or_else(|| UnknownValueError::new("SDK mode", s, "'live' or 'sandbox'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_an_entry() {
        for mode in [SdkMode::Live, SdkMode::Sandbox] {
            assert_eq!(mode.endpoint().mode, mode);
            assert!(mode.base_url().ends_with('/'));
        }
    }

    #[test]
    fn base_urls() {
        assert_eq!(SdkMode::Live.base_url(), "https://community.xpay.app/api/");
        assert_eq!(SdkMode::Sandbox.base_url(), "https://staging.xpay.app/api/");
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("live".parse::<SdkMode>().unwrap(), SdkMode::Live);
        assert_eq!("LIVE".parse::<SdkMode>().unwrap(), SdkMode::Live);
        assert_eq!("sandbox".parse::<SdkMode>().unwrap(), SdkMode::Sandbox);
        assert_eq!("development".parse::<SdkMode>().unwrap(), SdkMode::Sandbox);
        assert_eq!(" staging ".parse::<SdkMode>().unwrap(), SdkMode::Sandbox);
    }

    #[test]
    fn rejects_unknown_mode() {
        let err = "production".parse::<SdkMode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown SDK mode 'production' (expected 'live' or 'sandbox')");
    }

    #[test]
    fn default_is_sandbox() {
        assert_eq!(SdkMode::default(), SdkMode::Sandbox);
        assert_eq!(SdkMode::default().to_string(), "sandbox");
    }
}
