//! Origin allow-list for browser callers.
//!
//! Entries are either exact origins (`https://myunihealth.app`), a subdomain
//! wildcard (`https://*.vercel.app`) or the catch-all `*`.

use axum::http::{HeaderValue, request::Parts};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

#[derive(Debug, Clone, PartialEq, Eq)]
enum OriginRule {
    Any,
    Exact(String),
    /// `scheme://*.suffix`; `suffix` is stored with its leading dot.
    Subdomain { scheme: String, suffix: String },
}

impl OriginRule {
    fn parse(raw: &str) -> Option<Self> {
        let origin = raw.trim().trim_end_matches('/').to_ascii_lowercase();
        if origin.is_empty() {
            return None;
        }
        if origin == "*" {
            return Some(OriginRule::Any);
        }

        match origin.split_once("://") {
            Some((scheme, host)) if host.starts_with("*.") => Some(OriginRule::Subdomain {
                scheme: scheme.to_string(),
                suffix: host[1..].to_string(),
            }),
            Some(_) => Some(OriginRule::Exact(origin)),
            None => {
                tracing::error!("Invalid CORS origin '{}': missing scheme. Ignoring.", raw);
                None
            }
        }
    }

    fn matches(&self, origin: &str) -> bool {
        match self {
            OriginRule::Any => true,
            OriginRule::Exact(allowed) => allowed == origin,
            OriginRule::Subdomain { scheme, suffix } => origin
                .split_once("://")
                .filter(|(s, _)| s == scheme)
                .and_then(|(_, host)| host.strip_suffix(suffix.as_str()))
                .is_some_and(|label| !label.is_empty()),
        }
    }
}

/// Parsed allow-list, cheap to clone into the CORS predicate.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    rules: Arc<Vec<OriginRule>>,
}

impl CorsPolicy {
    pub fn new<S: AsRef<str>>(origins: &[S]) -> Self {
        let rules = origins
            .iter()
            .filter_map(|o| OriginRule::parse(o.as_ref()))
            .collect();
        Self {
            rules: Arc::new(rules),
        }
    }

    pub fn allows(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/').to_ascii_lowercase();
        self.rules.iter().any(|rule| rule.matches(&origin))
    }

    /// Credentialed CORS: the matching origin is echoed back, and methods and
    /// headers are mirrored from the preflight since `*` is not allowed there.
    pub fn layer(&self) -> CorsLayer {
        let policy = self.clone();
        CorsLayer::new()
            .allow_origin(AllowOrigin::predicate(
                move |origin: &HeaderValue, _parts: &Parts| {
                    origin.to_str().map(|o| policy.allows(o)).unwrap_or(false)
                },
            ))
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
    }
}
