use chrono::{DateTime, Utc};

/// Mint the session id for a new visit: `"{ip}-{unix_millis}"`.
///
/// Deliberately derived from the client address and arrival instant rather
/// than a random token, so the id doubles as the visit's primary key. Two
/// requests from the same IP within the same millisecond collide; accepted.
pub fn mint_session_id(ip: &str, now: DateTime<Utc>) -> String {
    format!("{}-{}", ip, now.timestamp_millis())
}
