//! Splitting blobs on `--- <timestamp> ---` separators, and authoring new ones.
//!
//! A blob is one free-text field holding several messages:
//!
//! ```text
//! Hi
//!
//! --- Dec 13, 2025, 4:30 AM ---
//! Still interested
//! ```
//!
//! The text before the first separator has no timestamp of its own.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, TimeZone};
use regex::Regex;

use crate::error::InquiryError;

/// Render format for separator timestamps: unpadded day and hour, seconds always present.
pub const SEPARATOR_TIME_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

fn separator_regex() -> &'static Regex {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_RE.get_or_init(|| {
        Regex::new(
            r"--- ((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{1,2}, \d{4}, \d{1,2}:\d{2}(?::\d{2})? (?:AM|PM)) ---",
        )
        .expect("separator regex must compile")
    })
}

/// One message cut out of a blob, before any timestamp resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitChunk {
    pub text: String,
    /// Literal timestamp from the preceding separator; `None` for the leading chunk.
    pub timestamp: Option<String>,
}

/// Split a blob into its messages. Empty chunks are dropped; never fails.
pub fn split_blob(blob: Option<&str>) -> Vec<SplitChunk> {
    let Some(blob) = blob.filter(|b| !b.is_empty()) else {
        return Vec::new();
    };

    let separators: Vec<_> = separator_regex().captures_iter(blob).collect();

    let mut chunks = Vec::with_capacity(separators.len() + 1);
    let head_end = separators
        .first()
        .and_then(|caps| caps.get(0))
        .map_or(blob.len(), |m| m.start());
    push_chunk(&mut chunks, &blob[..head_end], None);

    for (i, caps) in separators.iter().enumerate() {
        let (Some(whole), Some(stamp)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let body_end = separators
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map_or(blob.len(), |m| m.start());
        push_chunk(
            &mut chunks,
            &blob[whole.end()..body_end],
            Some(stamp.as_str().to_string()),
        );
    }

    chunks
}

fn push_chunk(chunks: &mut Vec<SplitChunk>, raw: &str, timestamp: Option<String>) {
    let text = raw.trim();
    if !text.is_empty() {
        chunks.push(SplitChunk {
            text: text.to_string(),
            timestamp,
        });
    }
}

/// Render the separator line for a message written at `at`, in the `offset` zone.
pub fn format_separator<Tz: TimeZone>(at: &DateTime<Tz>, offset: FixedOffset) -> String {
    format!(
        "--- {} ---",
        at.with_timezone(&offset).format(SEPARATOR_TIME_FORMAT)
    )
}

/// Append `text` to a blob under a fresh separator stamped with `at`.
pub fn append_to_blob<Tz: TimeZone>(
    existing: Option<&str>,
    text: &str,
    at: &DateTime<Tz>,
    offset: FixedOffset,
) -> Result<String, InquiryError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InquiryError::EmptyMessage);
    }
    let separator = format_separator(at, offset);
    Ok(match existing.map(str::trim_end).filter(|b| !b.is_empty()) {
        Some(blob) => format!("{blob}\n\n{separator}\n{text}"),
        None => format!("{separator}\n{text}"),
    })
}

/// [`append_to_blob`] stamped with the current time.
#[cfg(feature = "std")]
pub fn append_now(
    existing: Option<&str>,
    text: &str,
    offset: FixedOffset,
) -> Result<String, InquiryError> {
    append_to_blob(existing, text, &chrono::Utc::now(), offset)
}
