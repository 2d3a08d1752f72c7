//! Referrer → traffic-source classification.

use url::Url;

/// Known engines/platforms, matched against the referrer hostname in order.
/// First match wins; the order is part of the contract.
const SOURCE_RULES: &[(&[&str], &str)] = &[
    (&["google"], "google"),
    (&["bing"], "bing"),
    (&["duckduckgo"], "duckduckgo"),
    (&["twitter", "x.com"], "twitter"),
    (&["facebook"], "facebook"),
    (&["instagram"], "instagram"),
    (&["reddit"], "reddit"),
];

/// Derive a traffic-source label from a raw `Referer` header value.
///
/// Fail-open: an absent, empty, or unparsable referrer is "direct", never an
/// error. An unrecognized but valid referrer yields its bare hostname
/// (leading "www." stripped).
pub fn source(referrer: &str) -> String {
    if referrer.is_empty() {
        return "direct".to_string();
    }
    let Ok(parsed) = Url::parse(referrer) else {
        return "direct".to_string();
    };
    let host = parsed
        .host_str()
        .map(|h| h.strip_prefix("www.").unwrap_or(h))
        .unwrap_or("");

    for (tokens, label) in SOURCE_RULES {
        if tokens.iter().any(|t| host.contains(t)) {
            return (*label).to_string();
        }
    }

    if host.is_empty() {
        "direct".to_string()
    } else {
        host.to_string()
    }
}
