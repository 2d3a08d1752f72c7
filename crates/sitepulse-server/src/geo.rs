//! IP → approximate-location lookup.
//!
//! Geolocation is strictly best-effort: any failure (missing database,
//! unparsable IP, no record) degrades to the "Unknown" label and is never
//! surfaced to the request.

use std::net::IpAddr;
use std::str::FromStr;

/// City/country pair from a geolocation lookup. Either part may be absent.
#[derive(Debug, Clone, Default)]
pub struct Location {
    pub city: Option<String>,
    pub country: Option<String>,
}

pub trait Geolocate: Send + Sync {
    fn locate(&self, ip: &str) -> Option<Location>;
}

/// Render a lookup result as the stored label: `"City, CC"`, either part
/// alone, or `"Unknown"`.
pub fn location_label(location: Option<Location>) -> String {
    let parts: Vec<String> = location
        .map(|l| [l.city, l.country].into_iter().flatten().collect())
        .unwrap_or_default();
    if parts.is_empty() {
        "Unknown".to_string()
    } else {
        parts.join(", ")
    }
}

/// MaxMind `.mmdb` lookup against a local database file.
///
/// The reader is opened per lookup, matching the store's load-on-each-access
/// discipline; visit volume is low enough that this never matters.
pub struct MaxMindGeolocate {
    path: String,
}

impl MaxMindGeolocate {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Geolocate for MaxMindGeolocate {
    fn locate(&self, ip: &str) -> Option<Location> {
        if !std::path::Path::new(&self.path).exists() {
            // Database absent. Warning already logged at startup.
            return None;
        }

        let reader = maxminddb::Reader::open_readfile(&self.path).ok()?;
        let ip_addr = IpAddr::from_str(ip).ok()?;

        let record: maxminddb::geoip2::City = reader.lookup(ip_addr).ok()?;

        let country = record
            .country
            .as_ref()
            .and_then(|c| c.iso_code)
            .map(|s| s.to_string());

        let city = record
            .city
            .as_ref()
            .and_then(|c| c.names.as_ref())
            .and_then(|names| names.get("en"))
            .map(|s| s.to_string());

        Some(Location { city, country })
    }
}
