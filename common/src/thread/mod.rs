//! Inquiry thread reconstruction.
//!
//! An inquiry stores each side of the conversation as one blob. Rebuilding the
//! thread is split → resolve → merge, re-run from scratch on every render.

pub mod merge;
pub mod separator;
pub mod timestamp;

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;

use crate::config::ThreadConfig;
use crate::inquiry::{Author, InquiryRecord};

pub use merge::merge_chronological;
pub use separator::{append_to_blob, format_separator, split_blob, SplitChunk};
#[cfg(feature = "std")]
pub use separator::append_now;
pub use timestamp::resolve_sort_key;

/// One message of a rebuilt thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMessage {
    pub text: String,
    pub timestamp: Option<String>,
    pub author: Author,
    /// Ordering key only; not part of the rendered output.
    #[serde(skip)]
    pub sort_key: i64,
}

/// Split one side's blob and give every message a sort key.
pub fn parse_side(
    blob: Option<&str>,
    author: Author,
    created_at: DateTime<Utc>,
    offset: FixedOffset,
) -> Vec<ParsedMessage> {
    split_blob(blob)
        .into_iter()
        .enumerate()
        .map(|(ordinal, SplitChunk { text, timestamp })| {
            let sort_key =
                resolve_sort_key(timestamp.as_deref(), ordinal, author, created_at, offset);
            ParsedMessage {
                text,
                timestamp,
                author,
                sort_key,
            }
        })
        .collect()
}

/// A buyer/dealer conversation in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<ParsedMessage>,
}

impl Conversation {
    pub fn from_record(record: &InquiryRecord, config: &ThreadConfig) -> Self {
        let offset = config.separator_offset();
        let buyer = parse_side(
            record.blob(Author::Buyer),
            Author::Buyer,
            record.created_at,
            offset,
        );
        let dealer = parse_side(
            record.blob(Author::Dealer),
            Author::Dealer,
            record.created_at,
            offset,
        );
        Conversation {
            messages: merge_chronological(buyer, dealer),
        }
    }

    pub fn messages(&self) -> &[ParsedMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<ParsedMessage> {
        self.messages
    }

    /// No messages on either side; the renderer shows its empty state.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn summary(&self) -> ThreadSummary {
        let count = |author| self.messages.iter().filter(|m| m.author == author).count();
        let last = self.messages.last();
        ThreadSummary {
            buyer_messages: count(Author::Buyer),
            dealer_messages: count(Author::Dealer),
            awaiting_reply: last.is_some_and(|m| m.author == Author::Buyer),
            last_author: last.map(|m| m.author),
            last_timestamp: last.and_then(|m| m.timestamp.clone()),
        }
    }
}

/// Counts and state for inbox badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    pub buyer_messages: usize,
    pub dealer_messages: usize,
    /// The buyer spoke last.
    pub awaiting_reply: bool,
    pub last_author: Option<Author>,
    pub last_timestamp: Option<String>,
}
