//! HTTP cache control module
//!
//! Only the entry document gets explicit cache headers, so that a freshly
//! rebuilt bundle is always picked up on the next load. Everything else is
//! left to the client's heuristics.

use hyper::header::{HeaderName, CACHE_CONTROL, EXPIRES, PRAGMA};

/// Cache policy attached to a served asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// No cache headers are added
    #[default]
    Unspecified,
    /// Force revalidation on every request
    NoCache,
}

static NO_CACHE_HEADERS: [(HeaderName, &str); 3] = [
    (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
];

impl CachePolicy {
    /// Headers this policy adds to a response
    pub fn headers(self) -> &'static [(HeaderName, &'static str)] {
        match self {
            Self::Unspecified => &[],
            Self::NoCache => &NO_CACHE_HEADERS,
        }
    }
}
