//! Remaining-lifetime text shown on the access page.

use chrono::{DateTime, Utc};

/// Notice shown once a link is past its expiry.
pub const EXPIRED_NOTICE: &str = "Link has expired";

/// Human-readable time left until `expiry`, or `None` once it has passed.
///
/// Days and hours are listed when non-zero; minutes only when less than a
/// day is left. Under a minute reads `"less than a minute"`.
pub fn format_remaining(expiry: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    let millis = (expiry - now).num_milliseconds();
    if millis <= 0 {
        return None;
    }

    let days = millis / 86_400_000;
    let hours = (millis % 86_400_000) / 3_600_000;
    let minutes = (millis % 3_600_000) / 60_000;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(unit(days, "day"));
    }
    if hours > 0 {
        parts.push(unit(hours, "hour"));
    }
    if days == 0 && minutes > 0 {
        parts.push(unit(minutes, "minute"));
    }

    if parts.is_empty() {
        Some("less than a minute".to_string())
    } else {
        Some(parts.join(" "))
    }
}

/// Full notice line, e.g. `"This link expires in 2 days 3 hours"`.
pub fn expiry_notice(expiry: DateTime<Utc>, now: DateTime<Utc>) -> String {
    match format_remaining(expiry, now) {
        Some(left) => format!("This link expires in {left}"),
        None => EXPIRED_NOTICE.to_string(),
    }
}

fn unit(n: i64, name: &str) -> String {
    if n == 1 {
        format!("1 {name}")
    } else {
        format!("{n} {name}s")
    }
}
