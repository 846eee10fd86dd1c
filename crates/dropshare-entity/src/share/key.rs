//! Object key naming and URL segment encoding.
//!
//! Keys are `<unix millis>_<file name>`, placed directly in the bucket.
//! Because a key is always a single path segment, the key of any stored
//! object can be recovered from the last segment of its URL. Keys are
//! capped at [`MAX_KEY_BYTES`] so they stay valid file names on disk.

use chrono::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters escaped in a key segment: everything but RFC 3986 unreserved.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Longest key, in bytes, that [`object_key`] produces.
pub const MAX_KEY_BYTES: usize = 255;

/// Build the storage key for `file_name` uploaded at `at`.
///
/// Over-long names are shortened from the end of the stem, keeping the
/// extension where it fits.
pub fn object_key(file_name: &str, at: DateTime<Utc>) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    let prefix = format!("{}_", at.timestamp_millis());
    let budget = MAX_KEY_BYTES.saturating_sub(prefix.len());
    format!("{prefix}{}", shorten(&safe, budget))
}

fn shorten(name: &str, budget: usize) -> String {
    if name.len() <= budget {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 && name.len() - dot <= budget / 2 => name.split_at(dot),
        _ => (name, ""),
    };
    let mut end = budget - ext.len();
    while !stem.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{ext}", &stem[..end])
}

/// Percent-encode a key for use as a URL path segment.
pub fn encode_segment(key: &str) -> String {
    utf8_percent_encode(key, SEGMENT).to_string()
}

/// Recover the storage key from an object URL.
///
/// Takes the trailing path segment, drops any query or fragment and
/// percent-decodes it. Returns `None` when nothing is left.
pub fn key_from_url(url: &str) -> Option<String> {
    let without_suffix = url.split(['?', '#']).next().unwrap_or(url);
    let segment = without_suffix.trim_end_matches('/').rsplit('/').next()?;
    if segment.is_empty() {
        return None;
    }
    let decoded = percent_decode_str(segment).decode_utf8_lossy().into_owned();
    Some(decoded)
}
