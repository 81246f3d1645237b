//! Campaign attribution captured from the page address and referrer

use crate::host::PageContext;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const UTM_KEYS: [&str; 5] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_content",
    "utm_term",
];

/// Captured once per load or reset and replaced wholesale, never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionSnapshot {
    #[serde(default)]
    pub utm_source: String,
    #[serde(default)]
    pub utm_medium: String,
    #[serde(default)]
    pub utm_campaign: String,
    #[serde(default)]
    pub utm_content: String,
    #[serde(default)]
    pub utm_term: String,
    #[serde(default)]
    pub referrer: String,
}

impl AttributionSnapshot {
    pub fn capture<P: PageContext + ?Sized>(page: &P) -> Self {
        let href = page.href();
        let referrer = page.referrer();
        let snapshot = Self::from_parts(&href, &referrer);
        debug!(
            utm_source = %snapshot.utm_source,
            utm_campaign = %snapshot.utm_campaign,
            has_referrer = !snapshot.referrer.is_empty(),
            "attribution captured"
        );
        snapshot
    }

    pub fn from_parts(href: &str, referrer: &str) -> Self {
        let query = query_string(href);
        let param = |key: &str| first_param(query, key).unwrap_or_default();

        Self {
            utm_source: param("utm_source"),
            utm_medium: param("utm_medium"),
            utm_campaign: param("utm_campaign"),
            utm_content: param("utm_content"),
            utm_term: param("utm_term"),
            referrer: if referrer.trim().is_empty() {
                String::new()
            } else {
                referrer.to_string()
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn query_string(href: &str) -> &str {
    let without_fragment = href.split('#').next().unwrap_or("");
    match without_fragment.split_once('?') {
        Some((_, query)) => query,
        None => "",
    }
}

/// First value for `key`, decoded like `URLSearchParams::get`.
fn first_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
