use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Device class derived from the User-Agent string.
///
/// Desktop is the fallback, not a positive match — anything that does not
/// look like a phone or a tablet lands here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Tablet,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Browser {
    Edge,
    Opera,
    Chrome,
    Safari,
    Firefox,
    #[serde(rename = "IE")]
    Ie,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Os {
    Windows,
    #[serde(rename = "macOS")]
    MacOs,
    #[serde(rename = "iOS")]
    Ios,
    Android,
    Linux,
    Other,
}

/// One recorded page view. Mirrors the on-disk JSON shape exactly
/// (camelCase field names).
///
/// Every field except `duration` and `nav_count` is set once at creation and
/// never mutated; those two are updated in place by the session's later
/// heartbeat and navigation events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// Session id: `"{ip}-{unix_millis}"`. Also the correlation key the
    /// client echoes back on heartbeat/track-nav calls. Collisions between
    /// same-IP requests within one millisecond are accepted.
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub ip: String,
    /// "City, CC" or the "Unknown" sentinel when geolocation fails.
    pub location: String,
    pub device: Device,
    pub browser: Browser,
    pub os: Os,
    /// Traffic source label: a known-engine name, a bare hostname, or "direct".
    pub source: String,
    pub user_agent: String,
    /// Seconds on page, last-write-wins from heartbeats. Never accumulated.
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub nav_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_visit() -> Visit {
        Visit {
            id: "1.2.3.4-1700000000000".to_string(),
            timestamp: Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).single()
                .expect("valid timestamp"),
            ip: "1.2.3.4".to_string(),
            location: "Berlin, DE".to_string(),
            device: Device::Desktop,
            browser: Browser::Chrome,
            os: Os::Windows,
            source: "google".to_string(),
            user_agent: "Mozilla/5.0".to_string(),
            duration: 0,
            nav_count: 0,
        }
    }

    #[test]
    fn serializes_with_camel_case_and_renamed_enums() {
        let json = serde_json::to_value(sample_visit()).expect("serialize visit");
        assert_eq!(json["userAgent"], "Mozilla/5.0");
        assert_eq!(json["navCount"], 0);
        assert_eq!(json["device"], "desktop");
        assert_eq!(json["browser"], "Chrome");
        assert_eq!(json["os"], "Windows");
    }

    #[test]
    fn enum_renames_round_trip() {
        assert_eq!(
            serde_json::to_value(Os::MacOs).expect("serialize"),
            serde_json::json!("macOS")
        );
        assert_eq!(
            serde_json::to_value(Os::Ios).expect("serialize"),
            serde_json::json!("iOS")
        );
        assert_eq!(
            serde_json::to_value(Browser::Ie).expect("serialize"),
            serde_json::json!("IE")
        );
    }

    #[test]
    fn duration_and_nav_count_default_to_zero_when_absent() {
        // Records written by older versions lack the mutable counters.
        let json = serde_json::json!({
            "id": "1.2.3.4-1700000000000",
            "timestamp": "2023-11-14T22:13:20Z",
            "ip": "1.2.3.4",
            "location": "Unknown",
            "device": "mobile",
            "browser": "Safari",
            "os": "iOS",
            "source": "direct",
            "userAgent": "Mozilla/5.0"
        });
        let visit: Visit = serde_json::from_value(json).expect("deserialize visit");
        assert_eq!(visit.duration, 0);
        assert_eq!(visit.nav_count, 0);
    }
}
