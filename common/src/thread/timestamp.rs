//! Sort keys for split messages.
//!
//! A separator timestamp is parsed when possible. Anything else (the untimed
//! leading chunk, or text that fails to parse) gets a synthetic key anchored on
//! the inquiry's creation time, so every message still has a total order.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

use crate::inquiry::Author;

/// Spacing between synthetic keys of consecutive messages from one author.
pub const SYNTHETIC_STEP_MS: i64 = 100;

/// Dealer synthetic keys start this far after `created_at`, just behind the
/// buyer's opening message. Anchored on `created_at` rather than `repliedAt`,
/// which only records the latest reply.
pub const DEALER_SYNTHETIC_OFFSET_MS: i64 = 1_000;

const SEPARATOR_PARSE_FORMAT: &str = "%b %d, %Y, %I:%M:%S %p";

/// Resolve the ordering key, in milliseconds since the epoch, for the message
/// at `ordinal` within `author`'s blob.
pub fn resolve_sort_key(
    timestamp: Option<&str>,
    ordinal: usize,
    author: Author,
    created_at: DateTime<Utc>,
    offset: FixedOffset,
) -> i64 {
    if let Some(stamp) = timestamp {
        match parse_separator_timestamp(stamp, offset) {
            Some(at) => return at.timestamp_millis(),
            None => debug!(
                timestamp = stamp,
                ordinal,
                ?author,
                "separator timestamp unparseable, using synthetic key"
            ),
        }
    }
    synthetic_sort_key(ordinal, author, created_at)
}

/// Deterministic key derived from `created_at` and position alone.
pub fn synthetic_sort_key(ordinal: usize, author: Author, created_at: DateTime<Utc>) -> i64 {
    let base = match author {
        Author::Buyer => 0,
        Author::Dealer => DEALER_SYNTHETIC_OFFSET_MS,
    };
    let step = i64::try_from(ordinal)
        .unwrap_or(i64::MAX)
        .saturating_mul(SYNTHETIC_STEP_MS);
    created_at
        .timestamp_millis()
        .saturating_add(base)
        .saturating_add(step)
}

/// Parse a separator timestamp such as `Dec 13, 2025, 4:32:13 AM`, read in
/// `offset`. Seconds are optional. The epoch itself is treated as unparsed.
pub fn parse_separator_timestamp(stamp: &str, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let stamp = stamp.trim();
    let naive = NaiveDateTime::parse_from_str(stamp, SEPARATOR_PARSE_FORMAT)
        .ok()
        .or_else(|| {
            let with_seconds = insert_zero_seconds(stamp)?;
            NaiveDateTime::parse_from_str(&with_seconds, SEPARATOR_PARSE_FORMAT).ok()
        })?;
    offset
        .from_local_datetime(&naive)
        .single()
        .filter(|at| at.timestamp_millis() != 0)
}

/// `4:30 AM` -> `4:30:00 AM`.
fn insert_zero_seconds(stamp: &str) -> Option<String> {
    let split = stamp.rfind(' ')?;
    let (clock, meridiem) = stamp.split_at(split);
    Some(format!("{clock}:00{meridiem}"))
}
