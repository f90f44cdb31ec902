//! Destination URL acceptance policy.

use std::str::FromStr;
use url::Url;

/// How strictly destination URLs are checked before a mapping is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrlPolicy {
    /// Absolute `http`/`https` URL with a host.
    #[default]
    Strict,
    /// Any non-empty string, stored verbatim.
    Opaque,
}

impl UrlPolicy {
    /// Returns true if `candidate` is acceptable under this policy.
    pub fn accepts(&self, candidate: &str) -> bool {
        if candidate.is_empty() {
            return false;
        }

        match self {
            UrlPolicy::Opaque => true,
            UrlPolicy::Strict => match Url::parse(candidate) {
                Ok(url) => matches!(url.scheme(), "http" | "https") && url.has_host(),
                Err(_) => false,
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UrlPolicy::Strict => "strict",
            UrlPolicy::Opaque => "any",
        }
    }
}

impl FromStr for UrlPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "strict" => Ok(UrlPolicy::Strict),
            "any" | "opaque" => Ok(UrlPolicy::Opaque),
            other => Err(format!("unknown URL validation policy '{}'", other)),
        }
    }
}
